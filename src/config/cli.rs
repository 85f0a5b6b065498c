use crate::config::ScanConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "loan-scout")]
#[command(about = "Scan fundraising loans and pick out young LoanDirect borrowers")]
pub struct CliConfig {
    /// TOML file overriding the built-in endpoint, headers and scan settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum Command {
    /// Print every LoanDirect record with its raw age (default)
    Debug {
        #[arg(long)]
        pages: Option<u32>,
    },
    /// Collect LoanDirect borrowers whose age falls inside the filter range
    Youth {
        #[arg(long)]
        pages: Option<u32>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Debug { pages: None }
    }
}

impl Command {
    pub fn pages(&self) -> Option<u32> {
        match self {
            Command::Debug { pages } | Command::Youth { pages } => *pages,
        }
    }
}

impl CliConfig {
    pub fn command(&self) -> Command {
        self.command.unwrap_or_default()
    }

    /// Loads the optional config file and applies command-line overrides.
    pub fn scan_config(&self) -> Result<ScanConfig> {
        let mut config = match &self.config {
            Some(path) => ScanConfig::from_file(path)?,
            None => ScanConfig::default(),
        };

        if let Some(pages) = self.command().pages() {
            config.scan.pages = pages;
        }

        Ok(config)
    }
}
