//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use coinlens_core::ErrorBody;

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

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a normalized server rejection, one line per message.
pub fn form_errors(body: &ErrorBody) {
    match body {
        ErrorBody::Validation(fields) => {
            for (name, messages) in fields {
                for message in messages {
                    eprintln!("{} {}: {}", "✗".red(), name.bold(), message);
                }
            }
        }
        ErrorBody::Message(message) => error(message),
        ErrorBody::Empty => error("The server rejected the request."),
    }
}

/// Format a price with precision appropriate to its magnitude, so
/// micro-cap coins don't collapse to 0.00.
pub fn fmt_price(price: f64) -> String {
    if price == 0.0 {
        "0".to_string()
    } else if price < 0.0001 {
        format!("{:.8}", price)
    } else if price < 1.0 {
        format!("{:.4}", price)
    } else {
        format!("{:.2}", price)
    }
}

/// Format a percentage change, colored by sign.
pub fn fmt_change(change: f64) -> String {
    let text = format!("{:+.2}%", change);
    if change < 0.0 {
        text.red().to_string()
    } else {
        text.green().to_string()
    }
}
