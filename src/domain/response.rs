use crate::domain::status::StatusCode;

/// Successful answer to `sms/send` or `sms/status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Description of `status_code` from the status table, `""` if unknown.
    pub status: &'static str,
    pub status_code: StatusCode,
    /// Assigned message id for sends, the queried id for status checks.
    pub id: String,
    /// Recipient echoed back for sends; `None` for status checks.
    pub phone: Option<String>,
}

impl Response {
    pub(crate) fn from_status(status_code: StatusCode) -> Self {
        Self {
            status: status_code.description(),
            status_code,
            id: String::new(),
            phone: None,
        }
    }
}
