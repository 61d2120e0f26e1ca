
mod invalid_json;
mod like;
