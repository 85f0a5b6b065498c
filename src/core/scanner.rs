use crate::config::ScanConfig;
use crate::domain::model::{AgeRange, LoanRecord, YouthLoan};
use crate::domain::ports::LoanSource;
use std::time::Duration;

/// Walks pages `1..=pages` one at a time, pausing between requests.
pub struct LoanScanner<S: LoanSource> {
    source: S,
    page_size: u32,
    page_delay: Duration,
    age_range: AgeRange,
}

impl<S: LoanSource> LoanScanner<S> {
    pub fn new(source: S, config: &ScanConfig) -> Self {
        Self {
            source,
            page_size: config.scan.page_size,
            page_delay: config.page_delay(),
            age_range: config.age_range(),
        }
    }

    pub async fn collect_youth_loans(&self, pages: u32) -> Vec<YouthLoan> {
        let mut youth = Vec::new();

        for page in 1..=pages {
            tracing::info!("Scanning page {}...", page);
            let loans = self.source.fetch(page, self.page_size).await;

            let before = youth.len();
            youth.extend(loans.iter().filter_map(|loan| loan.as_youth(&self.age_range)));
            tracing::debug!(
                "Page {}: {} of {} records matched ages {}-{}",
                page,
                youth.len() - before,
                loans.len(),
                self.age_range.min,
                self.age_range.max
            );

            self.pause_after(page, pages).await;
        }

        youth
    }

    /// Prints every `LoanDirect` record with its raw age and returns them.
    pub async fn debug_age_field(&self, pages: u32) -> Vec<LoanRecord> {
        let mut direct = Vec::new();

        for page in 1..=pages {
            println!("\n--- Page {} ---", page);
            let loans = self.source.fetch(page, self.page_size).await;

            for loan in loans {
                if let Some(line) = loan.describe_direct() {
                    println!("{}", line);
                    direct.push(loan);
                }
            }

            self.pause_after(page, pages).await;
        }

        direct
    }

    async fn pause_after(&self, page: u32, pages: u32) {
        if page < pages && !self.page_delay.is_zero() {
            tokio::time::sleep(self.page_delay).await;
        }
    }
}
