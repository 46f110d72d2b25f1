//! Item identifiers — `namespace:key` addressing shared by every provider.
//!
//! Raw ids come from configuration files and commands in either the
//! qualified form (`nexo:ruby_gem`) or bare (`ruby_gem`), in which case
//! the configured default namespace is applied. Both parts are trimmed
//! and lower-cased, so `Nexo:Ruby_Gem` and `nexo:ruby_gem` address the
//! same item and share one cache entry.

use std::fmt;

/// Separator between namespace and key.
pub const SEPARATOR: char = ':';

/// Errors returned when a raw id cannot be normalized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("empty item key in {0:?}")]
    EmptyKey(String),
    #[error("empty namespace in {0:?}")]
    EmptyNamespace(String),
    #[error("embedded whitespace in {0:?}")]
    Whitespace(String),
    #[error("more than one namespace separator in {0:?}")]
    TooManySeparators(String),
}

/// A normalized, provider-qualified item key.
///
/// Immutable once constructed. Equality and hashing are byte-wise over
/// the normalized parts.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier {
    namespace: String,
    key: String,
}

impl Identifier {
    /// Parse a raw id, applying `default_namespace` to bare keys.
    ///
    /// Surrounding whitespace is ignored; whitespace anywhere else is
    /// rejected, as are empty parts and repeated separators.
    pub fn parse(raw: &str, default_namespace: &str) -> Result<Self, IdentifierError> {
        let trimmed = raw.trim();
        if trimmed.chars().any(char::is_whitespace) {
            return Err(IdentifierError::Whitespace(raw.to_string()));
        }

        let mut parts = trimmed.split(SEPARATOR);
        let (namespace, key) = match (parts.next(), parts.next(), parts.next()) {
            (Some(key), None, None) => (default_namespace, key),
            (Some(namespace), Some(key), None) => (namespace, key),
            _ => return Err(IdentifierError::TooManySeparators(raw.to_string())),
        };

        Self::from_parts(namespace, key, raw)
    }

    /// Build an identifier from already separated parts.
    pub fn new(namespace: &str, key: &str) -> Result<Self, IdentifierError> {
        let raw = format!("{namespace}{SEPARATOR}{key}");
        for part in [namespace, key] {
            if part.contains(SEPARATOR) {
                return Err(IdentifierError::TooManySeparators(raw));
            }
            if part.trim().chars().any(char::is_whitespace) {
                return Err(IdentifierError::Whitespace(raw));
            }
        }
        Self::from_parts(namespace, key, &raw)
    }

    fn from_parts(namespace: &str, key: &str, raw: &str) -> Result<Self, IdentifierError> {
        let namespace = namespace.trim().to_lowercase();
        let key = key.trim().to_lowercase();

        if key.is_empty() {
            return Err(IdentifierError::EmptyKey(raw.to_string()));
        }
        if namespace.is_empty() {
            return Err(IdentifierError::EmptyNamespace(raw.to_string()));
        }

        Ok(Self { namespace, key })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The key with its namespace stripped (`nexo:ruby_gem` → `ruby_gem`).
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether this identifier lives in `namespace` (case-insensitive).
    pub fn is_in(&self, namespace: &str) -> bool {
        self.namespace.eq_ignore_ascii_case(namespace.trim())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.namespace, self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parse(raw: &str) -> Result<Identifier, IdentifierError> {
        Identifier::parse(raw, "minecraft")
    }

    #[test]
    fn qualified_id() {
        let id = parse("nexo:ruby_gem").unwrap();
        assert_eq!(id.namespace(), "nexo");
        assert_eq!(id.key(), "ruby_gem");
        assert_eq!(id.to_string(), "nexo:ruby_gem");
    }

    #[test]
    fn bare_key_gets_default_namespace() {
        let id = parse("stone_sword").unwrap();
        assert_eq!(id.namespace(), "minecraft");
        assert_eq!(id.key(), "stone_sword");
    }

    #[test]
    fn default_namespace_is_normalized() {
        let id = Identifier::parse("gem", "  ItemsAdder ").unwrap();
        assert_eq!(id.namespace(), "itemsadder");
    }

    #[test]
    fn case_and_padding_are_normalized() {
        let a = parse("  Nexo:Ruby_Gem\t").unwrap();
        let b = parse("nexo:ruby_gem").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_key_rejected() {
        assert_eq!(parse(""), Err(IdentifierError::EmptyKey("".into())));
        assert_eq!(parse("   "), Err(IdentifierError::EmptyKey("   ".into())));
        assert_eq!(
            parse("nexo:"),
            Err(IdentifierError::EmptyKey("nexo:".into()))
        );
    }

    #[test]
    fn empty_namespace_rejected() {
        assert_eq!(
            parse(":gem"),
            Err(IdentifierError::EmptyNamespace(":gem".into()))
        );
    }

    #[test]
    fn embedded_whitespace_rejected() {
        assert!(matches!(
            parse("ruby gem"),
            Err(IdentifierError::Whitespace(_))
        ));
        assert!(matches!(
            parse("nexo: ruby_gem"),
            Err(IdentifierError::Whitespace(_))
        ));
    }

    #[test]
    fn repeated_separator_rejected() {
        assert!(matches!(
            parse("a:b:c"),
            Err(IdentifierError::TooManySeparators(_))
        ));
        assert!(matches!(
            parse("nexo::gem"),
            Err(IdentifierError::TooManySeparators(_))
        ));
    }

    #[test]
    fn new_validates_parts() {
        let id = Identifier::new("Oraxen", "Amethyst").unwrap();
        assert_eq!(id.to_string(), "oraxen:amethyst");
        assert!(Identifier::new("a:b", "c").is_err());
        assert!(Identifier::new("a", "b c").is_err());
        assert!(Identifier::new("a", "").is_err());
    }

    #[test]
    fn is_in_ignores_case() {
        let id = parse("oraxen:amethyst").unwrap();
        assert!(id.is_in("Oraxen"));
        assert!(!id.is_in("nexo"));
    }

    proptest! {
        #[test]
        fn parse_round_trips(
            namespace in "[A-Za-z0-9_.-]{1,12}",
            key in "[A-Za-z0-9_./-]{1,24}",
            default in "[a-z]{1,8}",
        ) {
            let first = Identifier::parse(&format!("{namespace}:{key}"), &default).unwrap();
            let second = Identifier::parse(&first.to_string(), &default).unwrap();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.to_string(), second.to_string());
        }

        #[test]
        fn bare_keys_round_trip(key in "[A-Za-z0-9_]{1,24}", default in "[a-z]{1,8}") {
            let first = Identifier::parse(&key, &default).unwrap();
            let second = Identifier::parse(&first.to_string(), "elsewhere").unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
