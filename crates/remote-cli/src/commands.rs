//! Subcommand execution

use std::io::{Read, Write};
use std::path::Path;

use remote_fs::{ListingFormat, RemoteFs, RemoteRunner};

use crate::cli::Commands;
use crate::error::{CliError, Result};

/// Run one subcommand against `fs`, writing listings to `out`.
pub async fn execute<R, W>(fs: &RemoteFs<R>, command: Commands, out: &mut W) -> Result<()>
where
    R: RemoteRunner,
    W: Write,
{
    match command {
        Commands::Access { path } => fs.access(&path).await?,
        Commands::Mkdir { path } => fs.mkdir(&path).await?,
        Commands::Rmrf { path } => fs.rmrf(&path).await?,
        Commands::Write { path, from } => {
            let content = read_input(from.as_deref())?;
            tracing::debug!(path = %path, bytes = content.len(), "Uploading");
            fs.write_file(&path, &content).await?;
        }
        Commands::Ls { path } => {
            let entries = fs.read_dir(&path).await?;
            print_entries(out, &entries, fs.config().listing_format())?;
        }
    }
    Ok(())
}

fn read_input(from: Option<&Path>) -> Result<Vec<u8>> {
    match from {
        Some(path) => std::fs::read(path).map_err(|source| CliError::Input {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut content = Vec::new();
            std::io::stdin().lock().read_to_end(&mut content)?;
            Ok(content)
        }
    }
}

/// One entry per line, or NUL-terminated when names may contain newlines.
fn print_entries<W: Write>(out: &mut W, entries: &[String], format: ListingFormat) -> Result<()> {
    let terminator: &[u8] = match format {
        ListingFormat::Lines => b"\n",
        ListingFormat::NulDelimited => b"\0",
    };
    for entry in entries {
        out.write_all(entry.as_bytes())?;
        out.write_all(terminator)?;
    }
    out.flush()?;
    Ok(())
}
