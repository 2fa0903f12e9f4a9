//! Transport layer: query encoding and plain-text response decoding.

mod check_status;
mod plain;
mod send_sms;

pub use check_status::encode_check_status_query;
pub use plain::decode_plain_response;
pub use send_sms::encode_send_sms_query;
