use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// GraphQL typename of the only loan variant that exposes a borrower age.
pub const LOAN_DIRECT_TYPENAME: &str = "LoanDirect";

/// One entry of `fundraisingLoans.values`, dispatched on `__typename`.
///
/// Only `LoanDirect` fields are ever read, so `id` and `name` of other
/// variants are kept when they look like scalars and dropped otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawLoan")]
pub enum LoanRecord {
    Direct {
        id: String,
        name: String,
        age_at_time_of_loan: Option<u32>,
    },
    Other {
        typename: String,
        id: Option<String>,
        name: Option<String>,
    },
}

impl LoanRecord {
    /// Decodes one `values` entry on its own so a bad sibling cannot sink the page.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn typename(&self) -> &str {
        match self {
            LoanRecord::Direct { .. } => LOAN_DIRECT_TYPENAME,
            LoanRecord::Other { typename, .. } => typename,
        }
    }

    pub fn is_direct(&self) -> bool {
        matches!(self, LoanRecord::Direct { .. })
    }

    /// Projects the record onto a [`YouthLoan`] when it is a `LoanDirect`
    /// with a known age inside `range`.
    pub fn as_youth(&self, range: &AgeRange) -> Option<YouthLoan> {
        match self {
            LoanRecord::Direct {
                id,
                name,
                age_at_time_of_loan: Some(age),
            } if range.contains(*age) => Some(YouthLoan {
                id: id.clone(),
                name: name.clone(),
                age: *age,
            }),
            _ => None,
        }
    }

    /// Diagnostic line for `LoanDirect` records; `None` for every other variant.
    pub fn describe_direct(&self) -> Option<String> {
        match self {
            LoanRecord::Direct {
                id,
                name,
                age_at_time_of_loan,
            } => {
                let age = age_at_time_of_loan
                    .map(|a| a.to_string())
                    .unwrap_or_else(|| "None".to_string());
                Some(format!(
                    "{} | ID: {} | Name: {} | Age: {}",
                    LOAN_DIRECT_TYPENAME, id, name, age
                ))
            }
            LoanRecord::Other { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YouthLoan {
    pub id: String,
    pub name: String,
    pub age: u32,
}

impl fmt::Display for YouthLoan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ID: {} | Name: {} | Age: {}", self.id, self.name, self.age)
    }
}

/// Inclusive borrower age bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    pub min: u32,
    pub max: u32,
}

impl AgeRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, age: u32) -> bool {
        self.min <= age && age <= self.max
    }
}

impl Default for AgeRange {
    fn default() -> Self {
        Self::new(18, 26)
    }
}

#[derive(Debug, Deserialize)]
struct RawLoan {
    #[serde(rename = "__typename")]
    typename: String,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    name: Option<Value>,
    #[serde(rename = "ageAtTimeOfLoan", default)]
    age_at_time_of_loan: Option<Value>,
}

/// String form of a JSON string or number; `None` for anything else.
fn scalar_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl TryFrom<RawLoan> for LoanRecord {
    type Error = String;

    fn try_from(raw: RawLoan) -> Result<Self, Self::Error> {
        if raw.typename != LOAN_DIRECT_TYPENAME {
            return Ok(LoanRecord::Other {
                typename: raw.typename,
                id: scalar_text(raw.id),
                name: scalar_text(raw.name),
            });
        }

        let id = scalar_text(raw.id).ok_or("LoanDirect record without a usable id")?;
        let name = match raw.name {
            Some(Value::String(name)) => name,
            _ => return Err(format!("LoanDirect record {} without a name", id)),
        };

        Ok(LoanRecord::Direct {
            id,
            name,
            age_at_time_of_loan: raw
                .age_at_time_of_loan
                .as_ref()
                .and_then(Value::as_u64)
                .and_then(|age| u32::try_from(age).ok()),
        })
    }
}
