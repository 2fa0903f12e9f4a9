use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::value::{PartnerId, SenderId};

/// Outgoing SMS for `sms/send`.
///
/// A message is sent either to `to` with `text`, or in batch mode to every entry of
/// `multi` with its own text. Batch mode wins when `multi` is non-empty; `to` and
/// `text` are then not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sms {
    pub to: String,
    pub text: String,
    pub multi: BTreeMap<String, String>,
    pub from: Option<SenderId>,
    /// Scheduled delivery; ignored unless it lies in the future when the message is sent.
    pub time: Option<DateTime<Utc>>,
    pub partner_id: Option<PartnerId>,
    pub test: bool,
    pub translit: bool,
}

impl Sms {
    /// Message to a single recipient, with no sender and no options.
    pub fn new(to: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    /// Batch message carrying a separate text per recipient.
    pub fn batch<P, T>(messages: impl IntoIterator<Item = (P, T)>) -> Self
    where
        P: Into<String>,
        T: Into<String>,
    {
        Self {
            multi: messages
                .into_iter()
                .map(|(phone, text)| (phone.into(), text.into()))
                .collect(),
            ..Default::default()
        }
    }

    /// Whether this message is sent in batch mode.
    pub fn is_batch(&self) -> bool {
        !self.multi.is_empty()
    }
}
