//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod status;
mod validation;
mod value;

pub use request::Sms;
pub use response::Response;
pub use status::{STATUS_DESCRIPTIONS, StatusCode};
pub use validation::ValidationError;
pub use value::{ApiId, PartnerId, SenderId, SmsId};
