//! Migration orchestrator
//!
//! Drives one run from `(source text, document text)` to
//! `(new source text, new document text, report)`. The run is pure: it does
//! no I/O and either returns both outputs or an error.

use crate::config::MigrationConfig;
use crate::error::MigrateError;
use crate::fields::{self, FieldRule};
use crate::report::MigrationReport;
use crate::state_machine::{MigrationState, StateTracker};
use declarify_config::{ConfigDocument, EncodedValue, IniValue};
use declarify_syntax::{
    analyze, remove_keywords, Analysis, ClassifiedValue, Literal, Scalar, SourceFile,
};

/// Template placeholder; a keyword holding it is left in the call
const PLACEHOLDER: &str = "??";

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationStatus {
    /// The target call was found and processed
    Migrated,
    /// No call to the target function exists
    CallNotFound,
    /// More than one call to the target function exists
    AmbiguousCall {
        /// Number of matching calls
        count: usize,
    },
}

/// Result of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    status: MigrationStatus,
    source: String,
    document: String,
    report: MigrationReport,
}

impl Migration {
    fn unchanged(status: MigrationStatus, source: &str, document: &str) -> Self {
        Self {
            status,
            source: source.to_string(),
            document: document.to_string(),
            report: MigrationReport::new(),
        }
    }

    /// How the run ended
    #[inline]
    #[must_use]
    pub fn status(&self) -> MigrationStatus {
        self.status
    }

    /// Rewritten source text
    #[inline]
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Updated document text
    #[inline]
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Per-keyword outcome
    #[inline]
    #[must_use]
    pub fn report(&self) -> &MigrationReport {
        &self.report
    }

    /// Split into `(source, document, report)`
    #[must_use]
    pub fn into_parts(self) -> (String, String, MigrationReport) {
        (self.source, self.document, self.report)
    }
}

/// What to do with one migrated keyword's value
#[derive(Debug)]
enum Update {
    /// Write the encoded value into the document
    Write(EncodedValue),
    /// `None` was passed: drop the keyword, leave the document alone
    Drop,
}

/// Migration engine configured for one kind of project
#[derive(Debug, Clone, Default)]
pub struct Migrator {
    config: MigrationConfig,
}

impl Migrator {
    /// Create migrator
    #[inline]
    #[must_use]
    pub fn new(config: MigrationConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    /// Migrate the target call's literal keywords into the document
    ///
    /// `document_text` is the existing document, or `""` when there is none.
    ///
    /// # Errors
    /// - `MigrateError::SourceParse` / `MigrateError::DocumentParse` if an input does not parse
    /// - `MigrateError::DuplicateKeyword` if the target call repeats a keyword
    /// - `MigrateError::StaleNodeReference`, `MigrateError::RewriteFailed` or
    ///   `MigrateError::InvalidTransition` on internal inconsistencies
    pub fn migrate(&self, source_text: &str, document_text: &str) -> Result<Migration, MigrateError> {
        let mut tracker = StateTracker::new();

        let source = SourceFile::parse(source_text).map_err(|source| MigrateError::SourceParse {
            file: self.config.source_file.clone(),
            source,
        })?;
        let mut document =
            ConfigDocument::parse(document_text).map_err(|source| MigrateError::DocumentParse {
                file: self.config.document_file.clone(),
                source,
            })?;

        let analysis = analyze(&source, &self.config.target_function)?;
        tracker.advance(MigrationState::Analyzed)?;

        let call = match analysis {
            Analysis::Found(call) => call,
            Analysis::NotFound => {
                tracing::info!(target_function = %self.config.target_function, "call not found");
                tracker.advance(MigrationState::Done)?;
                return Ok(Migration::unchanged(
                    MigrationStatus::CallNotFound,
                    source_text,
                    document_text,
                ));
            }
            Analysis::Ambiguous { count } => {
                tracing::info!(target_function = %self.config.target_function, count, "ambiguous call");
                tracker.advance(MigrationState::Done)?;
                return Ok(Migration::unchanged(
                    MigrationStatus::AmbiguousCall { count },
                    source_text,
                    document_text,
                ));
            }
        };

        let mut report = MigrationReport::new();
        let mut updates: Vec<(&'static FieldRule, Update)> = Vec::new();
        for argument in call.arguments() {
            let keyword = argument.name();
            let Some(rule) = fields::lookup(keyword) else {
                tracing::debug!(keyword, "unknown keyword");
                report.record_unrecognized(keyword);
                continue;
            };
            match plan(rule, &argument.classify(&source)) {
                Ok(update) => {
                    tracing::debug!(keyword, section = rule.section, key = rule.key, "can move");
                    report.record_migrated(keyword);
                    updates.push((rule, update));
                }
                Err(reason) => {
                    tracing::warn!(keyword, %reason, "too complicated");
                    report.record_opaque(keyword);
                }
            }
        }
        tracker.advance(MigrationState::Classified)?;

        for (rule, update) in &updates {
            match update {
                Update::Write(value) => document.set(rule.section, rule.key, value),
                Update::Drop => {
                    if document.get(rule.section, rule.key).is_some() {
                        tracing::warn!(
                            keyword = rule.keyword,
                            "keyword passed as None; keeping existing document value"
                        );
                    }
                }
            }
        }
        let rewritten = remove_keywords(&source, &call, report.migrated())?;
        tracker.advance(MigrationState::Rewritten)?;

        let migration = Migration {
            status: MigrationStatus::Migrated,
            source: rewritten.into_text(),
            document: document.serialize(),
            report,
        };
        tracker.advance(MigrationState::Done)?;
        Ok(migration)
    }
}

/// Migrate with the default configuration
///
/// # Errors
/// As [`Migrator::migrate`].
pub fn migrate(source_text: &str, document_text: &str) -> Result<Migration, MigrateError> {
    Migrator::default().migrate(source_text, document_text)
}

/// Decide how a keyword's classified value is migrated, or why it cannot be
fn plan(rule: &FieldRule, value: &ClassifiedValue) -> Result<Update, String> {
    let literal = match value {
        ClassifiedValue::Literal(literal) => literal,
        ClassifiedValue::Opaque(opaque) => return Err(opaque.to_string()),
    };
    let value = match literal {
        Literal::Absent => return Ok(Update::Drop),
        Literal::Scalar(Scalar::Str(text)) if text == PLACEHOLDER => {
            return Err(format!("placeholder value {PLACEHOLDER:?}"));
        }
        Literal::Scalar(Scalar::Bool(flag)) => IniValue::Bool(*flag),
        Literal::Scalar(scalar) => IniValue::Text(scalar.to_string()),
        Literal::Sequence(items) => IniValue::List(items.iter().map(ToString::to_string).collect()),
        Literal::Mapping(pairs) => IniValue::Map(
            pairs
                .iter()
                .map(|(key, value)| (key.clone(), value.to_string()))
                .collect(),
        ),
    };
    rule.encoding
        .encode(&value)
        .map(Update::Write)
        .map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use declarify_config::Encoding;
    use pretty_assertions::assert_eq;

    fn rule(keyword: &str) -> &'static FieldRule {
        fields::lookup(keyword).unwrap()
    }

    fn scalar(s: Scalar) -> ClassifiedValue {
        ClassifiedValue::Literal(Literal::Scalar(s))
    }

    fn written(update: Update) -> EncodedValue {
        match update {
            Update::Write(value) => value,
            Update::Drop => panic!("expected a write"),
        }
    }

    #[test]
    fn plan_plain_scalars() {
        let value = written(plan(rule("version"), &scalar(Scalar::Int(2))).unwrap());
        assert_eq!(value.first_line(), "2");
        let value = written(plan(rule("version"), &scalar(Scalar::Float(1.50))).unwrap());
        assert_eq!(value.first_line(), "1.5");
    }

    #[test]
    fn plan_boolean() {
        let value = written(plan(rule("include_package_data"), &scalar(Scalar::Bool(true))).unwrap());
        assert_eq!(value.first_line(), "true");
        assert!(plan(rule("include_package_data"), &scalar(Scalar::Str("yes".into()))).is_err());
    }

    #[test]
    fn plan_sequence_and_mapping() {
        let list = ClassifiedValue::Literal(Literal::Sequence(vec![
            Scalar::Str("a".into()),
            Scalar::Str("b".into()),
        ]));
        assert_eq!(written(plan(rule("install_requires"), &list).unwrap()).first_line(), "a;b");
        assert!(plan(rule("name"), &list).is_err());

        let map = ClassifiedValue::Literal(Literal::Mapping(vec![(
            "Docs".into(),
            Scalar::Str("https://d".into()),
        )]));
        let value = written(plan(rule("project_urls"), &map).unwrap());
        assert_eq!(value.continuation_lines(), &["Docs = https://d".to_string()]);
        assert_eq!(rule("project_urls").encoding, Encoding::Map);
    }

    #[test]
    fn plan_absent_and_placeholder() {
        assert!(matches!(
            plan(rule("url"), &ClassifiedValue::Literal(Literal::Absent)),
            Ok(Update::Drop)
        ));
        let err = plan(rule("url"), &scalar(Scalar::Str("??".into()))).unwrap_err();
        assert!(err.contains("placeholder"));
    }

    #[test]
    fn scenario_a_all_literal() {
        let source = "from setuptools import setup\n\nsetup(\n    name=\"demo\",\n    version=\"1.0\",\n    install_requires=[\"a\", \"b\"],\n)\n";
        let migration = migrate(source, "").unwrap();
        assert_eq!(migration.status(), MigrationStatus::Migrated);
        assert_eq!(
            migration.document(),
            "[metadata]\nname = demo\nversion = 1.0\n\n[options]\ninstall_requires = a;b\n"
        );
        assert_eq!(migration.source(), "from setuptools import setup\n\nsetup(\n)\n");
        assert_eq!(
            migration.report().migrated().iter().collect::<Vec<_>>(),
            vec!["name", "version", "install_requires"]
        );
    }

    #[test]
    fn none_value_is_dropped_without_document_write() {
        let source = "setup(name=\"demo\", url=None)\n";
        let migration = migrate(source, "[metadata]\nurl = https://x\n").unwrap();
        assert_eq!(migration.source(), "setup()\n");
        assert_eq!(
            migration.document(),
            "[metadata]\nurl = https://x\nname = demo\n"
        );
    }

    #[test]
    fn parse_errors_name_the_file() {
        let migrator = Migrator::new(MigrationConfig::new().with_source_file("build.py"));
        let err = migrator.migrate("setup(name=\n", "").unwrap_err();
        assert!(matches!(err, MigrateError::SourceParse { ref file, .. } if file == "build.py"));

        let err = migrate("setup(name='x')\n", "name = x\n").unwrap_err();
        assert!(matches!(err, MigrateError::DocumentParse { ref file, .. } if file == "setup.cfg"));
    }

    #[test]
    fn duplicate_keyword_stops_the_run() {
        let err = migrate("setup(name='a', name='b')\n", "").unwrap_err();
        assert!(matches!(err, MigrateError::DuplicateKeyword { ref keyword, .. } if keyword == "name"));
    }

    #[test]
    fn custom_target_function() {
        let migrator = Migrator::new(MigrationConfig::new().with_target_function("configure"));
        let migration = migrator
            .migrate("setup(version='9')\nbuild.configure(name='x')\n", "")
            .unwrap();
        assert_eq!(migration.status(), MigrationStatus::Migrated);
        assert_eq!(migration.document(), "[metadata]\nname = x\n");
        assert_eq!(migration.source(), "setup(version='9')\nbuild.configure()\n");
    }
}
