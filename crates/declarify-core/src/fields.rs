//! Keyword to document field mapping

use declarify_config::Encoding;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Where a `setup()` keyword lives in `setup.cfg`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// Keyword argument name
    pub keyword: &'static str,
    /// Document section
    pub section: &'static str,
    /// Key within the section
    pub key: &'static str,
    /// How the value is written
    pub encoding: Encoding,
}

impl FieldRule {
    const fn new(keyword: &'static str, section: &'static str, encoding: Encoding) -> Self {
        Self {
            keyword,
            section,
            key: keyword,
            encoding,
        }
    }
}

const METADATA: &str = "metadata";
const OPTIONS: &str = "options";

/// Every keyword that can be migrated
pub static FIELD_RULES: &[FieldRule] = &[
    FieldRule::new("name", METADATA, Encoding::Plain),
    FieldRule::new("version", METADATA, Encoding::Plain),
    FieldRule::new("author", METADATA, Encoding::Plain),
    FieldRule::new("author_email", METADATA, Encoding::Plain),
    FieldRule::new("license", METADATA, Encoding::Plain),
    FieldRule::new("url", METADATA, Encoding::Plain),
    FieldRule::new("description", METADATA, Encoding::Plain),
    FieldRule::new("long_description", METADATA, Encoding::Plain),
    FieldRule::new("classifiers", METADATA, Encoding::ListSemicolon),
    FieldRule::new("maintainer", METADATA, Encoding::Plain),
    FieldRule::new("maintainer_email", METADATA, Encoding::Plain),
    FieldRule::new("python_requires", OPTIONS, Encoding::Plain),
    FieldRule::new("project_urls", METADATA, Encoding::Map),
    FieldRule::new("long_description_content_type", METADATA, Encoding::Plain),
    FieldRule::new("setup_requires", OPTIONS, Encoding::ListSemicolon),
    FieldRule::new("install_requires", OPTIONS, Encoding::ListSemicolon),
    FieldRule::new("include_package_data", OPTIONS, Encoding::Boolean),
    FieldRule::new("test_suite", OPTIONS, Encoding::Plain),
    FieldRule::new("test_loader", OPTIONS, Encoding::Plain),
];

static INDEX: Lazy<HashMap<&'static str, &'static FieldRule>> =
    Lazy::new(|| FIELD_RULES.iter().map(|rule| (rule.keyword, rule)).collect());

/// Look up the rule for a keyword
#[must_use]
pub fn lookup(keyword: &str) -> Option<&'static FieldRule> {
    INDEX.get(keyword).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keywords_are_unique() {
        let unique: HashSet<&str> = FIELD_RULES.iter().map(|r| r.keyword).collect();
        assert_eq!(unique.len(), FIELD_RULES.len());
    }

    #[test]
    fn section_keys_are_unique() {
        let unique: HashSet<(&str, &str)> = FIELD_RULES.iter().map(|r| (r.section, r.key)).collect();
        assert_eq!(unique.len(), FIELD_RULES.len());
    }

    #[test]
    fn lookup_known_and_unknown() {
        let rule = lookup("install_requires").unwrap();
        assert_eq!(rule.section, "options");
        assert_eq!(rule.key, "install_requires");
        assert_eq!(rule.encoding, Encoding::ListSemicolon);

        assert_eq!(lookup("project_urls").unwrap().encoding, Encoding::Map);
        assert_eq!(lookup("include_package_data").unwrap().encoding, Encoding::Boolean);
        assert!(lookup("fooblat").is_none());
        assert!(lookup("packages").is_none());
        assert!(lookup("Name").is_none());
    }
}
