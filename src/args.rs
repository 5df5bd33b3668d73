use std::path::PathBuf;

use clap::Parser;

use crate::output::Format;
use crate::Error;

/// Enumerate subdomains of one or more domains through the VirusTotal API
#[derive(Parser, Debug)]
#[command(name = "vtenum", version, about)]
pub struct Args {
    /// Target domain
    #[arg(short, long)]
    pub domain: Option<String>,

    /// File containing a list of domains, one per line
    #[arg(short, long)]
    pub list: Option<PathBuf>,

    /// Silent mode: only output results
    #[arg(long)]
    pub silent: bool,

    /// Output results in TXT format
    #[arg(long)]
    pub txt: bool,

    /// Output results in CSV format
    #[arg(long)]
    pub csv: bool,

    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Query the legacy v2 domain report endpoint (single request, sorted output)
    #[arg(long)]
    pub legacy: bool,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "10")]
    pub timeout: u64,
}

impl Args {
    /// Resolves the output format flags, rejecting conflicting combinations
    /// before any network traffic happens.
    pub fn format(&self) -> Result<Format, Error> {
        let selected = [self.txt, self.csv, self.json]
            .iter()
            .filter(|flag| **flag)
            .count();
        if selected > 1 {
            return Err(Error::ConflictingFormats);
        }
        if self.legacy && selected > 0 {
            return Err(Error::LegacyWithFormat);
        }

        let format = if self.txt {
            Format::Txt
        } else if self.csv {
            Format::Csv
        } else if self.json {
            Format::Json
        } else {
            Format::Plain
        };
        Ok(format)
    }
}
