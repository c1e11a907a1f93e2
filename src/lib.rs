//! # Mailgate
//!
//! Mailgate checks an email before it is handed to a mail-sending pipeline.
//!
//! It validates the syntax of email addresses and the completeness of a
//! templated payload. Rendering and delivery stay with the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use mailgate::{AddressError, EmailPayload, validate_email_address};
//!
//! assert!(validate_email_address("john.doe@example.com").is_ok());
//! assert_eq!(
//!     validate_email_address("john@example.co"),
//!     Err(AddressError::UnsupportedDomainSuffix)
//! );
//!
//! let payload = EmailPayload::new(
//!     "John Doe",
//!     "john.doe@example.com",
//!     "Jane Smith",
//!     "jane.smith@example.com",
//!     "Hello {name}! Thank you for subscribing to our newsletter.",
//! )
//! .with_replacement("name", "Jane");
//!
//! assert!(payload.validate().is_ok());
//! ```
//!
//! ## Address rules
//!
//! - At most 254 characters, with exactly one `@`
//! - Local part: at most 64 characters, not starting or ending with `.` or `-`
//! - Domain part: at most 251 characters, no `.` before its last 4 characters
//!   and none at either edge
//! - Domain suffix: `.com`, `.net` or `.org`, in any case
//! - Characters: ASCII letters, digits, `@` and `.` only
//!
//! ## Payload rules
//!
//! - Sender and receiver names: 5 to 30 characters
//! - Sender and receiver addresses: valid per the address rules
//! - The `{name}` placeholders in the body template match the replacement keys exactly
//! - Every replacement value is non-empty
//!
//! ## Errors
//!
//! Every check reports the first rule that failed as an [`AddressError`] or
//! [`PayloadError`]. Callers that only need a yes/no answer can use
//! [`is_valid_email_address`] and [`is_valid_payload`].
//!
//! ## Logging
//!
//! Rejections are emitted as `tracing` debug events carrying the error code.
//! Replacement values are never logged.

mod validate;

pub use validate::{
    AddressError, AddressLimits, EmailPayload, NameLimits, PayloadError, is_valid_email_address,
    is_valid_payload, placeholder_tags, validate_email_address, validate_payload,
};
