use crate::domain::model::LoanRecord;
use async_trait::async_trait;

/// A paginated source of loan records.
///
/// `fetch` never fails: any error is reported by the implementation and the
/// page comes back empty.
#[async_trait]
pub trait LoanSource: Send + Sync {
    async fn fetch(&self, page: u32, page_size: u32) -> Vec<LoanRecord>;
}
