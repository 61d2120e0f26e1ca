//! Configuration from the environment

use std::env::var;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;

const DEFAULT_ADDRESS: &str = "0.0.0.0:5000";
const DEFAULT_NOTES_PATH: &str = "notes.json";

/// Get the value of ENV var, or a default
///
/// Only when:
/// - It is set
/// - It is not empty
pub fn env_var_or(var_name: &'static str, default: &str) -> String {
    match var(var_name) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

/// Address to listen on
///
/// Uses `ADDRESS`, with an optional override of just the port using `PORT`
pub fn setup_address() -> Result<SocketAddr> {
    let mut address = env_var_or("ADDRESS", DEFAULT_ADDRESS).parse::<SocketAddr>()?;

    if let Ok(port) = var("PORT")
        && !port.is_empty()
    {
        address.set_port(port.parse::<u16>()?);
    }

    Ok(address)
}

/// Location of the notes document, relative to the working directory unless absolute
pub fn notes_path() -> PathBuf {
    PathBuf::from(env_var_or("NOTES_PATH", DEFAULT_NOTES_PATH))
}
