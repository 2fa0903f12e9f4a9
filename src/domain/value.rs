use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS.RU `api_id` token identifying the account.
///
/// Invariant: non-empty after trimming. The value is sent exactly as provided.
pub struct ApiId(String);

impl ApiId {
    /// Query parameter name used by SMS.RU (`api_id`).
    pub const FIELD: &'static str = "api_id";

    /// Create a validated [`ApiId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the validated token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS.RU sender name (`from`).
///
/// Invariant: non-empty after trimming. The value is sent exactly as provided and must be
/// approved in your SMS.RU account.
pub struct SenderId(String);

impl SenderId {
    /// Query parameter name used by SMS.RU (`from`).
    pub const FIELD: &'static str = "from";

    /// Create a validated [`SenderId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Like [`SenderId::new`], but maps blank input to `None` instead of an error.
    pub fn optional(value: impl Into<String>) -> Option<Self> {
        Self::new(value).ok()
    }

    /// Borrow the validated sender name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Partner program identifier (`partner_id`).
///
/// Invariant: strictly positive.
pub struct PartnerId(i64);

impl PartnerId {
    /// Query parameter name used by SMS.RU (`partner_id`).
    pub const FIELD: &'static str = "partner_id";

    /// Create a validated [`PartnerId`].
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value <= 0 {
            return Err(ValidationError::NotPositive {
                field: Self::FIELD,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    /// Get the underlying identifier.
    pub fn value(self) -> i64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Message id assigned by `sms/send` and accepted by `sms/status` (`id`).
///
/// Invariant: non-empty after trimming. The value is sent exactly as provided.
pub struct SmsId(String);

impl SmsId {
    /// Query parameter name used by `sms/status` (`id`).
    pub const FIELD: &'static str = "id";

    /// Create a validated [`SmsId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
