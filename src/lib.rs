pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use config::ScanConfig;
pub use core::{fetcher::GraphQlLoanClient, scanner::LoanScanner};
pub use domain::model::{AgeRange, LoanRecord, YouthLoan};
pub use domain::ports::LoanSource;
pub use utils::error::{FetchFailure, Result, ScanError};
