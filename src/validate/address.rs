//! Syntactic validation of a single email address

use tracing::{debug, trace};

use crate::validate::error::{AddressError, AddressLimits};

/// Bit `n` is set when ASCII code point `n` may appear in an address
const ALLOWED_CHARS: u128 = allowed_chars();

const fn allowed_chars() -> u128 {
    let mut mask = 0u128;
    let mut c = 0u8;
    while c < 128 {
        if c.is_ascii_alphanumeric() || c == b'@' || c == b'.' {
            mask |= 1 << c;
        }
        c += 1;
    }
    mask
}

fn is_allowed_char(c: char) -> bool {
    (c as u32) < 128 && ALLOWED_CHARS & (1 << c as u32) != 0
}

/// Validate an email address, reporting the first rule it breaks.
///
/// Rules are checked in this order:
///
/// 1. at most 254 characters in total
/// 2. exactly one `@`
/// 3. a local part of at most 64 characters
/// 4. a domain part of at most 251 characters
/// 5. the local part neither starts nor ends with `.` or `-`
/// 6. no `.` in the domain part outside its last 4 characters, and none at either edge
/// 7. the domain ends with `.com`, `.net` or `.org`, in any case
/// 8. only ASCII letters, digits, `@` and `.` anywhere in the address
///
/// Rule 6 is positional: `user@sub.example.com` is rejected because the
/// first dot lies before the suffix window.
///
/// Lengths are counted in characters, not bytes.
pub fn validate_email_address(address: &str) -> Result<(), AddressError> {
    let result = check(address);
    match &result {
        Ok(()) => trace!(address, "email address accepted"),
        Err(e) => debug!(address, code = e.code(), "email address rejected"),
    }
    result
}

/// Boolean form of [`validate_email_address`]
pub fn is_valid_email_address(address: &str) -> bool {
    validate_email_address(address).is_ok()
}

fn check(address: &str) -> Result<(), AddressError> {
    if address.chars().count() > AddressLimits::ADDRESS_MAX_LENGTH {
        return Err(AddressError::TooLong {
            max: AddressLimits::ADDRESS_MAX_LENGTH,
        });
    }

    let at_signs = address.matches('@').count();
    let Some((local_part, domain_part)) = address.split_once('@').filter(|_| at_signs == 1)
    else {
        return Err(AddressError::MissingOrMultipleAtSign { found: at_signs });
    };

    if local_part.chars().count() > AddressLimits::LOCAL_PART_MAX_LENGTH {
        return Err(AddressError::LocalPartTooLong {
            max: AddressLimits::LOCAL_PART_MAX_LENGTH,
        });
    }

    let domain_len = domain_part.chars().count();
    if domain_len > AddressLimits::DOMAIN_PART_MAX_LENGTH {
        return Err(AddressError::DomainPartTooLong {
            max: AddressLimits::DOMAIN_PART_MAX_LENGTH,
        });
    }

    let edge = |c: char| c == '.' || c == '-';
    if local_part.starts_with(edge) || local_part.ends_with(edge) {
        return Err(AddressError::InvalidLocalPartEdge);
    }

    // Everything before the suffix window must be dot-free.
    let head = domain_len.saturating_sub(AddressLimits::DOMAIN_SUFFIX_WINDOW);
    if domain_part.chars().take(head).any(|c| c == '.')
        || domain_part.starts_with('.')
        || domain_part.ends_with('.')
    {
        return Err(AddressError::InvalidDomainDotPlacement);
    }

    let domain_lower = domain_part.to_lowercase();
    if !AddressLimits::ALLOWED_SUFFIXES
        .iter()
        .any(|suffix| domain_lower.ends_with(suffix))
    {
        return Err(AddressError::UnsupportedDomainSuffix);
    }

    if let Some(c) = address.chars().find(|&c| !is_allowed_char(c)) {
        return Err(AddressError::DisallowedCharacter(c));
    }

    Ok(())
}
