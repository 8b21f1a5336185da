//! Fair RPS Verifier
//!
//! Recomputes `HMAC-SHA256(key, move)` from a disclosed round and compares it
//! with the digest published before the move was chosen. Also checks a JSON
//! transcript produced with `fair-rps --transcript`.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use fair_rps::proof::verify::{verify, VerifyRequest, EXIT_USAGE};

#[derive(Parser, Debug)]
#[command(name = "fair-rps-verify")]
#[command(about = "Check that a disclosed key and move reproduce the published HMAC")]
struct Args {
    /// Disclosed key (hex text, used verbatim as the HMAC key)
    #[arg(long, requires_all = ["move_name", "hmac"], conflicts_with = "transcript")]
    key: Option<String>,

    /// Disclosed opponent move name
    #[arg(long = "move", value_name = "MOVE")]
    move_name: Option<String>,

    /// Digest published at the start of the round
    #[arg(long)]
    hmac: Option<String>,

    /// Path to a JSON round transcript
    #[arg(long, value_name = "FILE")]
    transcript: Option<PathBuf>,
}

fn main() -> ExitCode {
    let request = match request(Args::parse()) {
        Ok(request) => request,
        Err(err) => {
            eprintln!("Error: {err:#}");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    match verify(&request) {
        Ok(outcome) => {
            println!("{}", outcome.report());
            ExitCode::from(outcome.exit_code())
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn request(args: Args) -> anyhow::Result<VerifyRequest> {
    let transcript = args
        .transcript
        .map(|path| {
            std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
        })
        .transpose()?;
    Ok(VerifyRequest::from_parts(args.key, args.move_name, args.hmac, transcript)?)
}
