//! Error types for address and payload validation

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Email address too long (max {max} characters)")]
    TooLong { max: usize },

    #[error("Email address must contain exactly one @ symbol (found {found})")]
    MissingOrMultipleAtSign { found: usize },

    #[error("Email address local part too long (max {max} characters)")]
    LocalPartTooLong { max: usize },

    #[error("Email address domain part too long (max {max} characters)")]
    DomainPartTooLong { max: usize },

    #[error("Email address local part cannot start or end with a dot or hyphen")]
    InvalidLocalPartEdge,

    #[error("Email address domain part contains invalid dot placement")]
    InvalidDomainDotPlacement,

    #[error("Email address must end with '.com', '.net', or '.org'")]
    UnsupportedDomainSuffix,

    #[error("Email address contains disallowed character {0:?}")]
    DisallowedCharacter(char),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error(
        "Sender name must be {min} to {max} characters (got {len})",
        min = NameLimits::MIN_LENGTH,
        max = NameLimits::MAX_LENGTH
    )]
    SenderNameLength { len: usize },

    #[error(
        "Receiver name must be {min} to {max} characters (got {len})",
        min = NameLimits::MIN_LENGTH,
        max = NameLimits::MAX_LENGTH
    )]
    ReceiverNameLength { len: usize },

    #[error("Invalid sender address: {0}")]
    SenderAddress(#[source] AddressError),

    #[error("Invalid receiver address: {0}")]
    ReceiverAddress(#[source] AddressError),

    #[error("Template tag {{{0}}} has no replacement")]
    UnreplacedTag(String),

    #[error("Replacement {0:?} does not match any template tag")]
    UnusedReplacement(String),

    #[error("Replacement {0:?} has an empty value")]
    EmptyReplacement(String),
}

/// Address size limits
pub struct AddressLimits;

impl AddressLimits {
    /// Maximum length of a whole address
    pub const ADDRESS_MAX_LENGTH: usize = 254;

    /// Maximum length of the part before `@`
    pub const LOCAL_PART_MAX_LENGTH: usize = 64;

    /// Maximum length of the part after `@`
    pub const DOMAIN_PART_MAX_LENGTH: usize = 251;

    /// Trailing characters of the domain part in which a dot is tolerated
    pub const DOMAIN_SUFFIX_WINDOW: usize = 4;

    /// Accepted domain suffixes, compared case-insensitively
    pub const ALLOWED_SUFFIXES: [&'static str; 3] = [".com", ".net", ".org"];
}

/// Display name limits, both bounds inclusive
pub struct NameLimits;

impl NameLimits {
    pub const MIN_LENGTH: usize = 5;
    pub const MAX_LENGTH: usize = 30;
}

impl AddressError {
    /// Stable identifier for the failed rule
    pub fn code(&self) -> &'static str {
        match self {
            AddressError::TooLong { .. } => "too_long",
            AddressError::MissingOrMultipleAtSign { .. } => "missing_or_multiple_at_sign",
            AddressError::LocalPartTooLong { .. } => "local_part_too_long",
            AddressError::DomainPartTooLong { .. } => "domain_part_too_long",
            AddressError::InvalidLocalPartEdge => "invalid_local_part_edge",
            AddressError::InvalidDomainDotPlacement => "invalid_domain_dot_placement",
            AddressError::UnsupportedDomainSuffix => "unsupported_domain_suffix",
            AddressError::DisallowedCharacter(_) => "disallowed_character",
        }
    }
}

impl PayloadError {
    pub fn code(&self) -> &'static str {
        match self {
            PayloadError::SenderNameLength { .. } | PayloadError::ReceiverNameLength { .. } => {
                "name_length"
            }
            PayloadError::SenderAddress(e) | PayloadError::ReceiverAddress(e) => e.code(),
            PayloadError::UnreplacedTag(_) => "unreplaced_tag",
            PayloadError::UnusedReplacement(_) => "unused_replacement",
            PayloadError::EmptyReplacement(_) => "empty_replacement",
        }
    }

    /// Name of the payload input the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            PayloadError::SenderNameLength { .. } => "sender_name",
            PayloadError::ReceiverNameLength { .. } => "receiver_name",
            PayloadError::SenderAddress(_) => "sender_addr",
            PayloadError::ReceiverAddress(_) => "receiver_addr",
            PayloadError::UnreplacedTag(_) => "body_template",
            PayloadError::UnusedReplacement(_) | PayloadError::EmptyReplacement(_) => {
                "replacements"
            }
        }
    }

    /// The underlying address failure, if this error is about an address
    pub fn address_error(&self) -> Option<&AddressError> {
        match self {
            PayloadError::SenderAddress(e) | PayloadError::ReceiverAddress(e) => Some(e),
            _ => None,
        }
    }
}
