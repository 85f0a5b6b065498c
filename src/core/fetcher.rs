use crate::config::ScanConfig;
use crate::core::query::{GraphQlRequest, GraphQlResponse};
use crate::domain::model::LoanRecord;
use crate::domain::ports::LoanSource;
use crate::utils::error::{Result, ScanError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, StatusCode};

/// Posts paginated `fundraisingLoans` queries to the GraphQL gateway.
pub struct GraphQlLoanClient {
    endpoint: String,
    sort_by: String,
    client: Client,
}

impl GraphQlLoanClient {
    pub fn new(config: &ScanConfig) -> Result<Self> {
        let client = Client::builder()
            .default_headers(build_header_map(config)?)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            endpoint: config.source.endpoint.clone(),
            sort_by: config.source.sort_by.clone(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issues one page request and surfaces every failure as a typed error.
    pub async fn try_fetch(&self, page: u32, page_size: u32) -> Result<Vec<LoanRecord>> {
        let body = GraphQlRequest::loans_page(page, page_size, &self.sort_by);

        tracing::debug!(
            "Posting loans query to {} (page {}, size {})",
            self.endpoint,
            page,
            page_size
        );
        let response = self.client.post(&self.endpoint).json(&body).send().await?;

        let status = response.status();
        tracing::debug!("GraphQL response status: {}", status);

        if status == StatusCode::FORBIDDEN {
            return Err(ScanError::Blocked);
        }

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ScanError::HttpError {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let envelope: GraphQlResponse = serde_json::from_slice(&bytes)?;
        envelope.into_loans()
    }
}

#[async_trait]
impl LoanSource for GraphQlLoanClient {
    async fn fetch(&self, page: u32, page_size: u32) -> Vec<LoanRecord> {
        match self.try_fetch(page, page_size).await {
            Ok(loans) => {
                tracing::debug!("Page {} returned {} records", page, loans.len());
                loans
            }
            Err(e) => {
                report_fetch_failure(page, &e);
                Vec::new()
            }
        }
    }
}

fn report_fetch_failure(page: u32, error: &ScanError) {
    match error {
        ScanError::Blocked => {
            tracing::warn!("Blocked (403). The gateway is rejecting automated requests.")
        }
        ScanError::HttpError { status, body } => {
            tracing::error!("STATUS: {}", status);
            tracing::error!("{}", body);
        }
        ScanError::GraphQlError { errors } => tracing::warn!("GraphQL Error: {}", errors),
        other => tracing::error!("Request failed: {}", other),
    }
    tracing::debug!(
        "Page {} yielded no data ({:?})",
        page,
        error.fetch_failure()
    );
}

fn build_header_map(config: &ScanConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    for (name, value) in config.request_headers() {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| ScanError::ConfigError {
                message: format!("Invalid header name '{}': {}", name, e),
            })?;
        let header_value = HeaderValue::from_str(&value).map_err(|e| ScanError::ConfigError {
            message: format!("Invalid value for header '{}': {}", name, e),
        })?;
        headers.insert(header_name, header_value);
    }

    Ok(headers)
}
