#![allow(missing_docs)]
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use exemplify_core::{ApiDocument, TracingDiagnostics, collect_document_examples};

const HELP: &str = "\
Print the resolved examples of an OpenAPI document, as JSON

USAGE:
  exemplify [OPTIONS] <FILE>

OPTIONS:
  -o, --owner <NAME>  Only print the examples of this operation
  -p, --pretty        Pretty print the JSON output
  -h, --help          Print this help

The log level is read from RUST_LOG (default: warn)
";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let Some(AppArgs {
        file,
        owner,
        pretty,
    }) = AppArgs::parse().context("parsing arguments")?
    else {
        io::stdout().write_all(HELP.as_bytes())?;
        return Ok(());
    };

    let document = ApiDocument::from_path(&file)
        .with_context(|| format!("loading OpenAPI document {}", file.display()))?;

    let mut owners = collect_document_examples(&document, &mut TracingDiagnostics)
        .context("resolving examples")?;
    info!(count = owners.len(), "operations processed");

    if let Some(owner) = owner {
        owners.retain(|it| it.owner == owner);
        if owners.is_empty() {
            bail!("no operation named '{owner}' in {}", file.display());
        }
    }

    let mut stdout = io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, &owners)?;
    } else {
        serde_json::to_writer(&mut stdout, &owners)?;
    }
    writeln!(stdout)?;

    Ok(())
}

#[derive(Debug)]
struct AppArgs {
    file: PathBuf,
    owner: Option<String>,
    pretty: bool,
}

impl AppArgs {
    /// `None` when the help is requested.
    fn parse() -> Result<Option<Self>> {
        let mut pargs = pico_args::Arguments::from_env();

        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let pretty = pargs.contains(["-p", "--pretty"]);
        let owner = pargs
            .opt_value_from_str(["-o", "--owner"])
            .context("parsing owner argument")?;
        let file = pargs
            .free_from_str()
            .context("parsing the document path")?;

        let remaining = pargs.finish();
        if !remaining.is_empty() {
            warn!(?remaining, "Warning: unused arguments left");
        }

        Ok(Some(Self {
            file,
            owner,
            pretty,
        }))
    }
}
