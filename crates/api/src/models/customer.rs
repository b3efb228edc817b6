//! Customer models.

use chrono::{DateTime, Utc};
use customer_rest_core::{CustomerId, Email, EmailError, Page, PageError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A row of the `customer` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    pub customer_id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Maintained by the store; never written by this service.
    pub last_update: DateTime<Utc>,
}

/// Request body for create and update, as the client sent it.
///
/// Fields keep their JSON type. Legacy mode binds any value by its text form;
/// strict mode requires strings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CustomerBody {
    pub first_name: Option<Value>,
    pub last_name: Option<Value>,
    pub email: Option<Value>,
}

impl CustomerBody {
    /// Convert every field to the text the store receives.
    ///
    /// Strings bind unquoted, `null` and absent fields bind `NULL`, arrays bind
    /// as array literals and anything else as its JSON text.
    #[must_use]
    pub fn into_text(self) -> CustomerPayload {
        CustomerPayload {
            first_name: self.first_name.and_then(text_form),
            last_name: self.last_name.and_then(text_form),
            email: self.email.and_then(text_form),
        }
    }

    /// Require every present field to be a string or `null`.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::NotText`] naming the first field of another type.
    pub fn into_strings(self) -> Result<CustomerPayload, PayloadError> {
        Ok(CustomerPayload {
            first_name: string_field("first_name", self.first_name)?,
            last_name: string_field("last_name", self.last_name)?,
            email: string_field("email", self.email)?,
        })
    }
}

fn text_form(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Array(items) => Some(array_literal(&items)),
        other => Some(other.to_string()),
    }
}

/// `{"a","b",NULL}` with nested arrays unquoted.
fn array_literal(items: &[Value]) -> String {
    let elements: Vec<String> = items
        .iter()
        .map(|item| match item {
            Value::Null => "NULL".to_string(),
            Value::Array(nested) => array_literal(nested),
            Value::String(s) => quote_element(s),
            other => quote_element(&other.to_string()),
        })
        .collect();
    format!("{{{}}}", elements.join(","))
}

fn quote_element(raw: &str) -> String {
    format!("\"{}\"", raw.replace('\\', "\\\\").replace('"', "\\\""))
}

fn string_field(field: &'static str, value: Option<Value>) -> Result<Option<String>, PayloadError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(PayloadError::NotText(field)),
    }
}

/// Column values bound by create and update.
///
/// Every field is optional so that a missing field reaches the store as
/// `NULL`, where the column constraint rejects it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// Response body for create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedCustomer {
    pub customer_id: CustomerId,
}

/// Query string for list.
///
/// Values stay raw so a malformed number is reported by [`ListQuery::page`]
/// instead of the extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl ListQuery {
    /// Parse into a [`Page`].
    ///
    /// # Errors
    ///
    /// Returns `PageError` if `limit` or `offset` is not a non-negative integer.
    pub fn page(&self) -> Result<Page, PageError> {
        Page::parse(self.limit.as_deref(), self.offset.as_deref())
    }
}

/// Reasons a payload fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{0} must be a string")]
    NotText(&'static str),
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("email is invalid: {0}")]
    Email(#[from] EmailError),
}

/// A validated customer payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
}

impl NewCustomer {
    /// Maximum length of a name field.
    pub const MAX_NAME_LENGTH: usize = 255;
}

impl TryFrom<CustomerPayload> for NewCustomer {
    type Error = PayloadError;

    fn try_from(payload: CustomerPayload) -> Result<Self, Self::Error> {
        let first_name = required_name("first_name", payload.first_name)?;
        let last_name = required_name("last_name", payload.last_name)?;
        let email = payload.email.ok_or(PayloadError::Missing("email"))?;
        let email = Email::parse(&email)?;

        Ok(Self {
            first_name,
            last_name,
            email,
        })
    }
}

impl From<NewCustomer> for CustomerPayload {
    fn from(customer: NewCustomer) -> Self {
        Self {
            first_name: Some(customer.first_name),
            last_name: Some(customer.last_name),
            email: Some(customer.email.into_inner()),
        }
    }
}

fn required_name(field: &'static str, value: Option<String>) -> Result<String, PayloadError> {
    let value = value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or(PayloadError::Missing(field))?;

    if value.chars().count() > NewCustomer::MAX_NAME_LENGTH {
        return Err(PayloadError::TooLong {
            field,
            max: NewCustomer::MAX_NAME_LENGTH,
        });
    }

    Ok(value)
}
