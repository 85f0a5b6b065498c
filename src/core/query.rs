use crate::domain::model::{LoanRecord, LOAN_DIRECT_TYPENAME};
use crate::utils::error::{Result, ScanError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// POST body understood by the GraphQL gateway.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest {
    pub query: String,
}

impl GraphQlRequest {
    pub fn loans_page(page: u32, page_size: u32, sort_by: &str) -> Self {
        Self {
            query: build_loans_query(page, page_size, sort_by),
        }
    }
}

pub fn build_loans_query(page: u32, page_size: u32, sort_by: &str) -> String {
    format!(
        r#"
{{
  fundraisingLoans(limit:{page_size}, pageNumber:{page}, sortBy:{sort_by}) {{
    values {{
      __typename
      id
      name
      ... on {LOAN_DIRECT_TYPENAME} {{
        ageAtTimeOfLoan
      }}
    }}
  }}
}}
"#
    )
}

/// Response envelope. `errors` wins over `data` whenever the key is present,
/// even when its value is `null`.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<LoansData>,
    #[serde(default, deserialize_with = "present_value")]
    pub errors: Option<Value>,
}

/// Maps a present key to `Some`, keeping `null` as `Some(Value::Null)`.
fn present_value<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
pub struct LoansData {
    #[serde(rename = "fundraisingLoans", default)]
    pub fundraising_loans: Option<LoanPage>,
}

#[derive(Debug, Deserialize)]
pub struct LoanPage {
    #[serde(default)]
    pub values: Option<Vec<Value>>,
}

impl GraphQlResponse {
    pub fn into_loans(self) -> Result<Vec<LoanRecord>> {
        if let Some(errors) = self.errors {
            return Err(ScanError::GraphQlError { errors });
        }

        let values = self
            .data
            .and_then(|data| data.fundraising_loans)
            .and_then(|page| page.values)
            .ok_or_else(|| ScanError::MissingFieldError {
                path: "data.fundraisingLoans.values".to_string(),
            })?;

        Ok(values
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match LoanRecord::from_value(value) {
                Ok(loan) => Some(loan),
                Err(e) => {
                    tracing::debug!("Skipping loan record #{}: {}", index, e);
                    None
                }
            })
            .collect())
    }
}
