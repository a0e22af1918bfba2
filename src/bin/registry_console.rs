//! Line-oriented console over a registry session
//!
//! Reads one command per line from stdin and prints the form after each:
//!
//! ```text
//! name Ana          phone 5551234567     age 20
//! sex feminine      class sciences
//! create | update | delete | search | clear | list | show | quit
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use student_registry::{
    telemetry, Class, FieldKind, RegistryConfig, SessionController, SessionError, Sex,
    StoreBackend,
};

#[derive(Parser, Debug)]
#[command(name = "registry-console", about = "Edit student records from the terminal")]
struct Args {
    /// YAML config file (environment variables are used otherwise)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Keep records in this JSON file, overriding the config
    #[arg(long, env = "REGISTRY_STORE_PATH")]
    store: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => RegistryConfig::load_yaml(path)?,
        None => RegistryConfig::from_env()?,
    };
    if let Some(path) = args.store {
        config.store = StoreBackend::JsonFile { path };
    }

    telemetry::init_tracing(&config.log_filter);
    tracing::info!(store = ?config.store, "starting registry console");

    let gateway = config.open_gateway()?;
    let mut session = SessionController::new(gateway).with_listing_limit(config.listing_limit);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print!("{}", session.view());

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read command")?;
        let (command, rest) = split_command(&line);

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "list" => {
                if let Err(e) = session.refresh_listing() {
                    println!("error: {}", e);
                }
                for line in session.listing_lines() {
                    println!("{}", line);
                }
                continue;
            }
            "show" => {}
            // outcomes are shown through the status line of the view
            "create" => log_failure(session.create()),
            "update" => log_failure(session.update()),
            "delete" => log_failure(session.delete()),
            "search" => log_failure(session.search()),
            "clear" => session.clear(),
            "sex" => match rest.parse::<Sex>() {
                Ok(sex) => session.select_sex(sex),
                Err(e) => println!("error: {}", e),
            },
            "class" => match rest.parse::<Class>() {
                Ok(class) => session.select_class(class),
                Err(e) => println!("error: {}", e),
            },
            other => match other.parse::<FieldKind>() {
                Ok(kind) => session.set_text(kind, rest),
                Err(e) => println!("error: {}", e),
            },
        }

        print!("{}", session.view());
        stdout.flush().context("Failed to flush output")?;
    }

    Ok(())
}

/// Split a console line into the command word and its trimmed argument
fn split_command(line: &str) -> (&str, &str) {
    match line.trim().split_once(' ') {
        Some((command, rest)) => (command, rest.trim()),
        None => (line.trim(), ""),
    }
}

fn log_failure<T>(result: Result<T, SessionError>) {
    if let Err(e) = result {
        tracing::debug!(error = %e, "command failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_is_trimmed() {
        assert_eq!(split_command("phone  5551234567"), ("phone", "5551234567"));
        assert_eq!(split_command("  sex \tFemenino  "), ("sex", "Femenino"));
    }

    #[test]
    fn bare_command_has_empty_argument() {
        assert_eq!(split_command(" search "), ("search", ""));
        assert_eq!(split_command(""), ("", ""));
    }
}
