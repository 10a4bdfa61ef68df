//! Offline checker for saved review API responses.
//!
//! Runs a stored `homework_statuses` payload through the same shape checks
//! and status formatting the bot uses, and prints the messages it would send.

use std::process::ExitCode;

use clap::Parser;
use serde_json::Value;

use homework_status_bot::homework::parse_status;
use homework_status_bot::practicum::check_response;

/// Review API response checker.
#[derive(Parser, Debug)]
#[command(name = "check_statuses")]
#[command(about = "Checks a saved homework statuses response and previews the notifications")]
#[command(version)]
struct Args {
    /// Path to the JSON response file to check.
    #[arg(short, long, default_value = "homework_statuses.json")]
    file: String,

    /// Show detailed information for each homework.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    check_file(&args.file, args.verbose)
}

fn check_file(path: &str, verbose: bool) -> ExitCode {
    println!("Checking: {path}\n");

    let response: Value = match std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|content| serde_json::from_str(&content).map_err(|e| e.to_string()))
    {
        Ok(v) => v,
        Err(e) => {
            eprintln!("✗ Failed to load response: {e}");
            return ExitCode::FAILURE;
        }
    };

    let homeworks = match check_response(&response) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("✗ {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut errors = 0;

    for (i, homework) in homeworks.iter().enumerate() {
        if verbose {
            println!(
                "[{i}] name: {}, status: {}, updated: {}",
                field(homework, "homework_name"),
                field(homework, "status"),
                field(homework, "date_updated")
            );
        }

        match parse_status(homework) {
            Ok(message) => println!("  ✓ {message}"),
            Err(e) => {
                errors += 1;
                println!("  ✗ Error: {e}");
            }
        }
    }

    println!();

    let total = homeworks.len();
    if errors == 0 {
        println!("✓ All {total} homework records are valid!");
        ExitCode::SUCCESS
    } else {
        println!("✗ Check failed: {errors} error(s) in {total} homework records");
        ExitCode::FAILURE
    }
}

/// Renders a record field for display.
fn field(homework: &Value, key: &str) -> String {
    match homework.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "-".to_owned(),
    }
}
