//! Address and payload validation

pub mod address;
pub mod error;
pub mod payload;

pub use address::{is_valid_email_address, validate_email_address};
pub use error::{AddressError, AddressLimits, NameLimits, PayloadError};
pub use payload::{EmailPayload, is_valid_payload, placeholder_tags, validate_payload};
