//! keyfolio - encrypt/decrypt portable secret strings from the console
//!
//! Input comes from an argument or stdin; the envelope (or recovered
//! plaintext) goes to stdout, diagnostics to stderr. The passphrase is read
//! from `KEYFOLIO_SECRET`, or prompted once per process on a terminal.

mod secret;

use std::io::Read;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use keyfolio_core::{CachedSecret, KeyFolio};

use crate::secret::EnvOrPromptSecret;

/// Environment variable consulted before prompting for the passphrase.
const SECRET_ENV: &str = "KEYFOLIO_SECRET";

// Exit codes: clap reports its own usage errors; these cover the rest.
const EXIT_BAD_INPUT: u8 = 2;
const EXIT_ENCRYPT_FAILED: u8 = 10;
const EXIT_DECRYPT_FAILED: u8 = 11;

/// Encrypt and decrypt portable secret strings (AES-GCM envelopes)
#[derive(Parser, Debug)]
#[command(name = "keyfolio")]
#[command(version)]
#[command(about = "Encrypt/decrypt portable strings using keyfolio envelopes (AES-GCM)")]
#[command(after_help = "Piping:
  echo \"hello\" | keyfolio encrypt
  cat cipher.txt | keyfolio decrypt

Secret:
  Uses KEYFOLIO_SECRET if set; otherwise prompts once per process.")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encrypt plaintext into a keyfolio:v1 envelope
    #[command(alias = "enc")]
    Encrypt {
        /// Plaintext to encrypt; reads stdin when omitted
        text: Option<String>,
    },
    /// Decrypt a keyfolio:v1 envelope back to plaintext
    #[command(alias = "dec")]
    Decrypt {
        /// Envelope text to decrypt; reads stdin when omitted
        text: Option<String>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let engine = KeyFolio::new();
    let secrets = CachedSecret::new(EnvOrPromptSecret::new(SECRET_ENV));

    match cli.command {
        Command::Encrypt { text } => run(text, EXIT_ENCRYPT_FAILED, "Encrypt", |input| {
            engine.encrypt(input, &secrets)
        }),
        Command::Decrypt { text } => run(text, EXIT_DECRYPT_FAILED, "Decrypt", |input| {
            engine.decrypt(input, &secrets)
        }),
    }
}

fn run(
    text: Option<String>,
    failure_code: u8,
    verb: &str,
    operation: impl FnOnce(&str) -> keyfolio_core::Result<String>,
) -> ExitCode {
    let input = match resolve_input(text) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("{err:#}");
            return ExitCode::from(EXIT_BAD_INPUT);
        }
    };

    match operation(&input) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{verb} failed: {err}");
            ExitCode::from(failure_code)
        }
    }
}

/// Take the positional argument if present, otherwise drain stdin. Rejects
/// blank input either way.
fn resolve_input(text: Option<String>) -> anyhow::Result<String> {
    let input = match text {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            buffer.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    if input.trim().is_empty() {
        anyhow::bail!("No input provided. Pass a value as an argument or pipe via stdin.");
    }
    Ok(input)
}
