//! Output formatting helpers.

use anyhow::{Result, bail};
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print an endpoint result, failing when the server returned nothing.
pub fn data(value: Option<Value>, what: &str, compact: bool) -> Result<()> {
    let Some(value) = value else {
        error(&format!("No {} returned", what));
        bail!("{} request returned no data (rerun with -v for details)", what);
    };

    if compact {
        json(&value)
    } else {
        json_pretty(&value)
    }
}
