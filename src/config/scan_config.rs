use crate::domain::model::AgeRange;
use crate::utils::error::{Result, ScanError};
use crate::utils::validation::{
    validate_graphql_name, validate_ordered_bounds, validate_positive_number, validate_url,
    Validate,
};
use reqwest::header::{HeaderName, HeaderValue};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://gateway.production.kiva.org/graphql";
pub const DEFAULT_SORT_BY: &str = "mostRecent";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 15;
pub const DEFAULT_PAGES: u32 = 3;
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_PAGE_DELAY_MS: u64 = 1500;

/// Browser-like header set sent with every request.
pub const DEFAULT_HEADERS: &[(&str, &str)] = &[
    ("Content-Type", "application/json"),
    (
        "User-Agent",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
         AppleWebKit/537.36 (KHTML, like Gecko) \
         Chrome/120.0.0.0 Safari/537.36",
    ),
    ("Origin", "https://www.kiva.org"),
    ("Referer", "https://www.kiva.org/lend"),
    ("Accept", "*/*"),
    ("Accept-Language", "en-US,en;q=0.9"),
    ("Connection", "keep-alive"),
];

/// Everything the scanner needs, built once at startup and read-only afterwards.
/// `Default` reproduces the built-in constants; a TOML file only overrides
/// what it names.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub source: SourceConfig,
    pub scan: ScanSettings,
    pub filter: FilterConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub endpoint: String,
    pub timeout_seconds: u64,
    pub sort_by: String,
    /// Merged over [`DEFAULT_HEADERS`]; names compare case-insensitively.
    pub headers: HashMap<String, String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            sort_by: DEFAULT_SORT_BY.to_string(),
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    pub pages: u32,
    pub page_size: u32,
    pub page_delay_ms: u64,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            pages: DEFAULT_PAGES,
            page_size: DEFAULT_PAGE_SIZE,
            page_delay_ms: DEFAULT_PAGE_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub min_age: u32,
    pub max_age: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        let range = AgeRange::default();
        Self {
            min_age: range.min,
            max_age: range.max,
        }
    }
}

impl ScanConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScanError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScanError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${KIVA_ENDPOINT})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScanError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout_seconds)
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.scan.page_delay_ms)
    }

    pub fn age_range(&self) -> AgeRange {
        AgeRange::new(self.filter.min_age, self.filter.max_age)
    }

    /// Default headers with configured overrides applied, in a stable order.
    pub fn request_headers(&self) -> Vec<(String, String)> {
        let mut headers: Vec<(String, String)> = DEFAULT_HEADERS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let mut overrides: Vec<(&String, &String)> = self.source.headers.iter().collect();
        overrides.sort();

        for (name, value) in overrides {
            match headers
                .iter_mut()
                .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            {
                Some(entry) => entry.1 = value.clone(),
                None => headers.push((name.clone(), value.clone())),
            }
        }

        headers
    }
}

impl Validate for ScanConfig {
    fn validate(&self) -> Result<()> {
        validate_url("source.endpoint", &self.source.endpoint)?;
        validate_positive_number("source.timeout_seconds", self.source.timeout_seconds, 1)?;
        validate_graphql_name("source.sort_by", &self.source.sort_by)?;
        validate_positive_number("scan.pages", self.scan.pages, 1)?;
        validate_positive_number("scan.page_size", self.scan.page_size, 1)?;
        validate_ordered_bounds("filter", self.filter.min_age, self.filter.max_age)?;

        for (name, value) in &self.source.headers {
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                ScanError::InvalidConfigValueError {
                    field: "source.headers".to_string(),
                    value: name.clone(),
                    reason: format!("Invalid header name: {}", e),
                }
            })?;
            HeaderValue::from_str(value).map_err(|e| ScanError::InvalidConfigValueError {
                field: format!("source.headers.{}", name),
                value: value.clone(),
                reason: format!("Invalid header value: {}", e),
            })?;
        }

        Ok(())
    }
}
