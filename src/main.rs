//! vibeplan - lower optimizer row expressions into engine expressions

use anyhow::{bail, Context, Result};
use clap::Parser as ClapParser;
use std::io::Read;
use std::path::PathBuf;
use vibeplan::compile::LowerRequest;

/// Lower a JSON request of optimizer row expressions and print the engine
/// expressions as JSON
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Request file, standard input when omitted
    input: Option<PathBuf>,

    /// Outer input field count, overrides the request's own
    #[arg(short = 'j', long)]
    outer_fields: Option<usize>,

    /// Pretty-print the response
    #[arg(short, long)]
    pretty: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let input = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request from {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read request from stdin")?;
            buf
        }
    };

    let mut request = LowerRequest::from_json(&input).context("Failed to parse request")?;
    if let Some(outer) = args.outer_fields {
        request.outer_field_count = Some(outer);
    }

    let response = match request.lower() {
        Ok(response) => response,
        Err(e) if e.is_internal() => {
            bail!("{} (this is a bug in the planner, please report it)", e)
        }
        Err(e) => return Err(e).context("Failed to lower expressions"),
    };

    let output = if args.pretty {
        serde_json::to_string_pretty(&response)
    } else {
        serde_json::to_string(&response)
    }
    .context("Failed to serialize response")?;
    println!("{}", output);

    Ok(())
}
