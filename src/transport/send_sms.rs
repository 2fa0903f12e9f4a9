use chrono::{DateTime, Utc};

use crate::domain::{PartnerId, SenderId, Sms};

const TO_FIELD: &str = "to";
const TEXT_FIELD: &str = "text";
const MULTI_FIELD: &str = "multi";
const TIME_FIELD: &str = "time";

/// Query parameters for `sms/send`, without `api_id`.
///
/// `now` decides whether a scheduled time is still in the future.
pub fn encode_send_sms_query(sms: &Sms, now: DateTime<Utc>) -> Vec<(String, String)> {
    let mut params = Vec::<(String, String)>::new();

    if sms.is_batch() {
        for (phone, text) in &sms.multi {
            params.push((format!("{MULTI_FIELD}[{phone}]"), text.clone()));
        }
    } else {
        params.push((TO_FIELD.to_owned(), sms.to.clone()));
        params.push((TEXT_FIELD.to_owned(), sms.text.clone()));
    }

    if let Some(from) = sms.from.as_ref() {
        params.push((SenderId::FIELD.to_owned(), from.as_str().to_owned()));
    }
    if let Some(partner_id) = sms.partner_id {
        params.push((PartnerId::FIELD.to_owned(), partner_id.value().to_string()));
    }
    if sms.test {
        params.push(("test".to_owned(), "1".to_owned()));
    }
    if let Some(time) = sms.time.filter(|time| *time > now) {
        params.push((TIME_FIELD.to_owned(), time.timestamp().to_string()));
    }
    if sms.translit {
        params.push(("translit".to_owned(), "1".to_owned()));
    }

    params
}
