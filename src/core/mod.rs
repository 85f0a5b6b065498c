pub mod fetcher;
pub mod query;
pub mod scanner;

pub use crate::domain::model::{AgeRange, LoanRecord, YouthLoan};
pub use crate::domain::ports::LoanSource;
pub use crate::utils::error::Result;
