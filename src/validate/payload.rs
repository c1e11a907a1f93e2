//! Validation of a complete outgoing email payload

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::validate::address::validate_email_address;
use crate::validate::error::{NameLimits, PayloadError};

// A placeholder is `{name}` with an ASCII word-character name.
static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("PLACEHOLDER_REGEX: invalid regex pattern")
});

/// Collect the distinct placeholder names used in a body template.
///
/// Only `{name}` where `name` is made of ASCII letters, digits and `_`
/// counts; any other use of braces is ignored.
pub fn placeholder_tags(template: &str) -> BTreeSet<&str> {
    PLACEHOLDER_REGEX
        .captures_iter(template)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// An outgoing email prior to rendering and transport
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailPayload {
    /// Display name of the sender
    pub sender_name: String,

    /// Sender's email address
    pub sender_addr: String,

    /// Display name of the receiver
    pub receiver_name: String,

    /// Receiver's email address
    pub receiver_addr: String,

    /// HTML body containing `{name}` placeholders
    pub body_template: String,

    /// Value substituted for each placeholder
    pub replacements: HashMap<String, String>,
}

impl EmailPayload {
    /// Create a payload with no replacements
    pub fn new(
        sender_name: impl Into<String>,
        sender_addr: impl Into<String>,
        receiver_name: impl Into<String>,
        receiver_addr: impl Into<String>,
        body_template: impl Into<String>,
    ) -> Self {
        Self {
            sender_name: sender_name.into(),
            sender_addr: sender_addr.into(),
            receiver_name: receiver_name.into(),
            receiver_addr: receiver_addr.into(),
            body_template: body_template.into(),
            replacements: HashMap::new(),
        }
    }

    /// Add a replacement value for a placeholder
    pub fn with_replacement(mut self, tag: impl Into<String>, value: impl Into<String>) -> Self {
        self.replacements.insert(tag.into(), value.into());
        self
    }

    /// Check that this payload is safe to hand to the sending pipeline
    pub fn validate(&self) -> Result<(), PayloadError> {
        validate_payload(
            &self.sender_name,
            &self.sender_addr,
            &self.receiver_name,
            &self.receiver_addr,
            &self.body_template,
            &self.replacements,
        )
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Validate the pieces of an outgoing email.
///
/// Both names must be 5 to 30 characters long, both addresses must pass
/// [`validate_email_address`], the placeholders in `body_template` must be
/// exactly the keys of `replacements`, and no replacement may be empty.
/// The first failing check is reported.
pub fn validate_payload(
    sender_name: &str,
    sender_addr: &str,
    receiver_name: &str,
    receiver_addr: &str,
    body_template: &str,
    replacements: &HashMap<String, String>,
) -> Result<(), PayloadError> {
    let result = check(
        sender_name,
        sender_addr,
        receiver_name,
        receiver_addr,
        body_template,
        replacements,
    );
    match &result {
        Ok(()) => trace!(sender_addr, receiver_addr, "payload accepted"),
        Err(e) => debug!(
            sender_addr,
            receiver_addr,
            field = e.field(),
            code = e.code(),
            "payload rejected"
        ),
    }
    result
}

/// Boolean form of [`validate_payload`]
pub fn is_valid_payload(
    sender_name: &str,
    sender_addr: &str,
    receiver_name: &str,
    receiver_addr: &str,
    body_template: &str,
    replacements: &HashMap<String, String>,
) -> bool {
    validate_payload(
        sender_name,
        sender_addr,
        receiver_name,
        receiver_addr,
        body_template,
        replacements,
    )
    .is_ok()
}

fn name_length_ok(len: usize) -> bool {
    (NameLimits::MIN_LENGTH..=NameLimits::MAX_LENGTH).contains(&len)
}

fn check(
    sender_name: &str,
    sender_addr: &str,
    receiver_name: &str,
    receiver_addr: &str,
    body_template: &str,
    replacements: &HashMap<String, String>,
) -> Result<(), PayloadError> {
    let len = sender_name.chars().count();
    if !name_length_ok(len) {
        return Err(PayloadError::SenderNameLength { len });
    }

    let len = receiver_name.chars().count();
    if !name_length_ok(len) {
        return Err(PayloadError::ReceiverNameLength { len });
    }

    validate_email_address(sender_addr).map_err(PayloadError::SenderAddress)?;
    validate_email_address(receiver_addr).map_err(PayloadError::ReceiverAddress)?;

    let tags = placeholder_tags(body_template);
    let keys: BTreeSet<&str> = replacements.keys().map(String::as_str).collect();

    if let Some(unused) = keys.difference(&tags).next() {
        return Err(PayloadError::UnusedReplacement(unused.to_string()));
    }
    if let Some(missing) = tags.difference(&keys).next() {
        return Err(PayloadError::UnreplacedTag(missing.to_string()));
    }

    // Sorted so the reported key does not depend on map iteration order.
    if let Some(empty) = keys.iter().find(|key| replacements[**key].is_empty()) {
        return Err(PayloadError::EmptyReplacement(empty.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(template: &str) -> EmailPayload {
        EmailPayload::new(
            "John Doe",
            "john.doe@example.com",
            "Jane Smith",
            "jane.smith@example.com",
            template,
        )
    }

    #[test]
    fn test_placeholder_tags() {
        let tags = placeholder_tags("Hi {name}, your code is {code_1}. Bye {name}!");
        assert_eq!(tags.into_iter().collect::<Vec<_>>(), vec!["code_1", "name"]);
    }

    #[test]
    fn test_placeholder_tags_ignores_other_braces() {
        let tags = placeholder_tags("<style>p { color: red; }</style> {} {a b} {{x}} {é}");
        assert_eq!(tags.into_iter().collect::<Vec<_>>(), vec!["x"]);
    }

    #[test]
    fn test_valid_payload() {
        let p = payload("Hello {name}! Thank you for subscribing to our newsletter.")
            .with_replacement("name", "Jane");
        assert_eq!(p.validate(), Ok(()));
        assert!(p.is_valid());
    }

    #[test]
    fn test_no_tags_no_replacements() {
        assert_eq!(payload("<p>Plain body</p>").validate(), Ok(()));
    }

    #[test]
    fn test_name_lengths() {
        let mut p = payload("Hi");

        for (name, ok) in [
            ("abcd", false),
            ("abcde", true),
            (&*"a".repeat(30), true),
            (&*"a".repeat(31), false),
        ] {
            p.sender_name = name.to_string();
            assert_eq!(p.is_valid(), ok, "sender name of {} chars", name.len());
        }

        p.sender_name = "John Doe".to_string();
        p.receiver_name = "Jan".to_string();
        assert_eq!(
            p.validate(),
            Err(PayloadError::ReceiverNameLength { len: 3 })
        );
    }

    #[test]
    fn test_invalid_addresses() {
        let mut p = payload("Hi");
        p.sender_addr = "john@example.co".to_string();
        assert_eq!(
            p.validate(),
            Err(PayloadError::SenderAddress(
                crate::AddressError::UnsupportedDomainSuffix
            ))
        );

        let mut p = payload("Hi");
        p.receiver_addr = ".jane@example.com".to_string();
        assert_eq!(
            p.validate(),
            Err(PayloadError::ReceiverAddress(
                crate::AddressError::InvalidLocalPartEdge
            ))
        );
    }

    #[test]
    fn test_missing_replacement() {
        assert_eq!(
            payload("Hi {name}!").validate(),
            Err(PayloadError::UnreplacedTag("name".to_string()))
        );
    }

    #[test]
    fn test_unused_replacement() {
        let p = payload("Hi {name}!")
            .with_replacement("name", "Jane")
            .with_replacement("extra", "x");
        assert_eq!(
            p.validate(),
            Err(PayloadError::UnusedReplacement("extra".to_string()))
        );
    }

    #[test]
    fn test_unused_reported_before_unreplaced() {
        let p = payload("Hi {name}!").with_replacement("nme", "Jane");
        assert_eq!(
            p.validate(),
            Err(PayloadError::UnusedReplacement("nme".to_string()))
        );
    }

    #[test]
    fn test_empty_replacement() {
        let p = payload("Hi {name}, {greeting}")
            .with_replacement("name", "")
            .with_replacement("greeting", "");
        assert_eq!(
            p.validate(),
            Err(PayloadError::EmptyReplacement("greeting".to_string()))
        );
    }

    #[test]
    fn test_free_functions_agree() {
        let mut replacements = HashMap::new();
        replacements.insert("name".to_string(), "Jane".to_string());
        assert!(is_valid_payload(
            "John Doe",
            "john.doe@example.com",
            "Jane Smith",
            "jane.smith@example.com",
            "Hi {name}!",
            &replacements,
        ));
        replacements.insert("name".to_string(), String::new());
        assert!(!is_valid_payload(
            "John Doe",
            "john.doe@example.com",
            "Jane Smith",
            "jane.smith@example.com",
            "Hi {name}!",
            &replacements,
        ));
    }
}
