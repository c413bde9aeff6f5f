//! Severity-tagged terminal output.
//!
//! Every line the bootstrapper prints carries a severity prefix so a long
//! run stays scannable. Errors go to stderr, everything else to stdout.

use colored::Colorize;

pub fn info(msg: &str) {
    println!("{} {}", "[info]".blue(), msg);
}

pub fn success(msg: &str) {
    println!("{} {}", "[ok]".green().bold(), msg);
}

pub fn warn(msg: &str) {
    println!("{} {}", "[warn]".yellow().bold(), msg);
}

pub fn error(msg: &str) {
    eprintln!("{} {}", "[error]".red().bold(), msg);
}

/// Section header for a pipeline phase.
pub fn heading(msg: &str) {
    println!("\n{}", msg.bold());
}
