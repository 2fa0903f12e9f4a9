use std::num::IntErrorKind;

/// Every status code SMS.RU documents for the plain-text API, with its description.
///
/// Codes below 200 describe delivery progress, codes from 200 up are errors.
pub const STATUS_DESCRIPTIONS: &[(i64, &str)] = &[
    (-1, "Not found"),
    (100, "Success"),
    (101, "The messege is passed to operator"),
    (102, "The message sent (in transit)"),
    (103, "The message was delivered"),
    (104, "Cannot be delivered: Time of life expired"),
    (105, "Cannot be delivered: deleted by operator"),
    (106, "Cannot be delivered: phone failure"),
    (107, "Cannot be delivered: unknown reason"),
    (108, "Cannot be delivered: rejected"),
    (
        130,
        "Cannot be delivered: Daily message limit on this number was exceeded",
    ),
    (
        131,
        "Cannot be delivered: Same messages limit on this phone number in a minute was exceeded",
    ),
    (
        132,
        "Cannot be delivered: Same messages limit on this phone number in a day was exceeded",
    ),
    (200, "Wrong api_id"),
    (201, "Too low balance"),
    (202, "Wrong recipient"),
    (203, "The message has no text"),
    (204, "Sender name did not approve with administartion"),
    (205, "The message is too long (more than 8 sms)"),
    (206, "Daily message limit exceeded"),
    (
        207,
        "On this phone number (or one of them) must not send the messages, or you indicated more than 100 phone numbers",
    ),
    (208, "Wrong time value"),
    (
        209,
        "You added this phone number (or one of them) in the stop-list",
    ),
    (210, "You must use a POST, not a GET"),
    (211, "Method not found"),
    (212, "Text of message must be in UTF-8"),
    (220, "The service is not availiable now, try again later"),
    (230, "Daily message limit on this number was exceeded"),
    (
        231,
        "Same messages limit on this phone number in a minute was exceeded",
    ),
    (
        232,
        "Same messages limit on this phone number in a day was exceeded",
    ),
    (
        300,
        "Wrong token (maybe it was expired or your IP was changed)",
    ),
    (301, "Wrong password, or user is not exist"),
    (302, "User was authorized, but account is not activate"),
    (901, "Wrong Url (should begin with 'http://')"),
    (902, "Callback is not defined"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// SMS.RU status code, as found on the first line of every response.
///
/// This value is preserved as-is even when the code is unknown to this crate.
pub struct StatusCode(i64);

impl StatusCode {
    /// First code of the error band.
    pub const FIRST_ERROR: i64 = 200;

    /// Construct a status code from its integer representation.
    pub fn new(code: i64) -> Self {
        Self(code)
    }

    /// Parse the first response line.
    ///
    /// Anything that is not an integer yields code `0`, which classifies as success.
    /// Integers beyond the `i64` range saturate, so they keep their sign and band.
    pub fn from_line(line: &str) -> Self {
        let code = match line.parse::<i64>() {
            Ok(code) => code,
            Err(err) => match err.kind() {
                IntErrorKind::PosOverflow => i64::MAX,
                IntErrorKind::NegOverflow => i64::MIN,
                _ => 0,
            },
        };
        Self(code)
    }

    /// Get the integer code as provided by SMS.RU.
    pub fn as_i64(self) -> i64 {
        self.0
    }

    /// Human-readable description, or `""` when the code is not in the table.
    pub fn description(self) -> &'static str {
        STATUS_DESCRIPTIONS
            .iter()
            .find(|(code, _)| *code == self.0)
            .map(|(_, description)| *description)
            .unwrap_or("")
    }

    /// Whether the table knows this code.
    pub fn is_known(self) -> bool {
        STATUS_DESCRIPTIONS.iter().any(|(code, _)| *code == self.0)
    }

    /// Codes `>= 200` mean the request was rejected.
    pub fn is_error(self) -> bool {
        self.0 >= Self::FIRST_ERROR
    }

    /// Codes `< 200`, including `-1` and unknown values in that range.
    pub fn is_success(self) -> bool {
        !self.is_error()
    }

    /// Returns `true` if the service asked to try again later.
    pub fn is_retryable(self) -> bool {
        self.0 == 220
    }

    /// Returns `true` if this code reports bad or inactive credentials.
    pub fn is_auth_error(self) -> bool {
        matches!(self.0, 200 | 300 | 301 | 302)
    }
}
