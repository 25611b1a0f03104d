use crate::error::Result;

/// Level of a Git configuration file.
///
/// Reads normally use [`ConfigurationLevel::All`], where later levels win
/// (system < global < local).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigurationLevel {
    System,
    Global,
    Local,
    All,
}

impl ConfigurationLevel {
    pub fn as_str(&self) -> &str {
        match self {
            ConfigurationLevel::System => "system",
            ConfigurationLevel::Global => "global",
            ConfigurationLevel::Local => "local",
            ConfigurationLevel::All => "all",
        }
    }

    /// Whether an entry stored at `level` is visible when reading at `self`.
    pub fn includes(&self, level: ConfigurationLevel) -> bool {
        *self == ConfigurationLevel::All || *self == level
    }
}

/// A single `key = value` configuration entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
    pub level: ConfigurationLevel,
}

/// Components of a dotted configuration key: `section[.subsection].property`.
///
/// The subsection is everything between the first and the last `.`, so URL
/// scopes containing dots survive intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigKey<'a> {
    pub section: &'a str,
    pub subsection: Option<&'a str>,
    pub property: &'a str,
}

impl<'a> ConfigKey<'a> {
    pub fn parse(key: &'a str) -> Option<Self> {
        let first = key.find('.')?;
        let last = key.rfind('.')?;

        let section = &key[..first];
        let property = &key[last + 1..];
        if section.is_empty() || property.is_empty() {
            return None;
        }

        let subsection = if first == last {
            None
        } else {
            Some(&key[first + 1..last])
        };

        Some(Self { section, subsection, property })
    }

    /// Git key equality: section and property ignore case, the subsection
    /// does not.
    pub fn matches(&self, other: &ConfigKey<'_>) -> bool {
        self.section.eq_ignore_ascii_case(other.section)
            && self.property.eq_ignore_ascii_case(other.property)
            && self.subsection == other.subsection
    }

    /// Whether this key belongs to `section` / `property`, in any subsection.
    pub fn is_in(&self, section: &str, property: &str) -> bool {
        self.section.eq_ignore_ascii_case(section) && self.property.eq_ignore_ascii_case(property)
    }
}

/// Compare two dotted keys the way Git does.
pub fn keys_match(a: &str, b: &str) -> bool {
    match (ConfigKey::parse(a), ConfigKey::parse(b)) {
        (Some(a), Some(b)) => a.matches(&b),
        _ => a == b,
    }
}

/// Scoped Git configuration store.
pub trait GitConfiguration: Send + Sync {
    /// All entries of `section` / `property` in any subsection, ordered from
    /// lowest to highest precedence.
    fn enumerate(
        &self,
        level: ConfigurationLevel,
        section: &str,
        property: &str,
    ) -> Result<Vec<ConfigEntry>>;

    /// Effective value of `key`; the last value wins when it has several.
    fn get(&self, level: ConfigurationLevel, key: &str) -> Result<Option<String>>;

    /// Every value of a multi-valued `key`, in precedence order.
    fn get_all(&self, level: ConfigurationLevel, key: &str) -> Result<Vec<String>>;

    /// Set `key` to a single value, replacing existing values at `level`.
    fn set(&self, level: ConfigurationLevel, key: &str, value: &str) -> Result<()>;

    /// Remove every value of `key` at `level`. Missing keys are not an error.
    fn unset(&self, level: ConfigurationLevel, key: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_without_subsection() {
        let key = ConfigKey::parse("credential.provider").unwrap();
        assert_eq!(key.section, "credential");
        assert_eq!(key.subsection, None);
        assert_eq!(key.property, "provider");
    }

    #[test]
    fn test_parse_key_with_url_subsection() {
        let key = ConfigKey::parse("credential.https://example.com/org.provider").unwrap();
        assert_eq!(key.section, "credential");
        assert_eq!(key.subsection, Some("https://example.com/org"));
        assert_eq!(key.property, "provider");
    }

    #[test]
    fn test_parse_invalid_key() {
        assert!(ConfigKey::parse("credential").is_none());
        assert!(ConfigKey::parse(".provider").is_none());
        assert!(ConfigKey::parse("credential.").is_none());
    }

    #[test]
    fn test_keys_match_case_rules() {
        assert!(keys_match("CREDENTIAL.https://example.com.Provider", "credential.https://example.com.provider"));
        assert!(!keys_match("credential.https://EXAMPLE.com.provider", "credential.https://example.com.provider"));
        assert!(!keys_match("credential.provider", "credential.https://example.com.provider"));
    }

    #[test]
    fn test_level_includes() {
        assert!(ConfigurationLevel::All.includes(ConfigurationLevel::Local));
        assert!(ConfigurationLevel::Global.includes(ConfigurationLevel::Global));
        assert!(!ConfigurationLevel::Global.includes(ConfigurationLevel::Local));
    }
}
