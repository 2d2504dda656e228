//! Field rules and the schema registry.
//!
//! A [`Schema`] is built once per entity type and never mutated afterwards.
//! Rules are evaluated independently; within a rule, constraints are checked in
//! declaration order and the first failure wins.

use super::value::FieldValue;
use crate::config::{FormConfig, MAX_RATING};

/// The kind of value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    File,
}

/// A single acceptance check.
#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    /// Trimmed text must have at least this many characters.
    MinTrimmedLength(usize),

    /// Number must be at least this value.
    Min(f64),

    /// Number must be at most this value.
    Max(f64),

    /// First file must be at most this many bytes.
    MaxFileSize(u64),

    /// First file's MIME type must be one of these, exactly.
    MimeTypeIn(Vec<String>),
}

impl Check {
    /// Evaluate against a value. A value of the wrong kind, or a missing
    /// file, never passes.
    fn passes(&self, value: Option<&FieldValue>) -> bool {
        match self {
            Check::MinTrimmedLength(min) => value
                .and_then(FieldValue::as_text)
                .is_some_and(|s| s.trim().chars().count() >= *min),
            Check::Min(min) => value
                .and_then(FieldValue::as_number)
                .is_some_and(|n| n >= *min),
            Check::Max(max) => value
                .and_then(FieldValue::as_number)
                .is_some_and(|n| n <= *max),
            Check::MaxFileSize(max) => value
                .and_then(FieldValue::first_file)
                .is_some_and(|f| f.size <= *max),
            Check::MimeTypeIn(accepted) => value
                .and_then(FieldValue::first_file)
                .is_some_and(|f| accepted.iter().any(|t| *t == f.mime_type)),
        }
    }
}

/// A check paired with the message shown when it fails.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub check: Check,
    pub message: String,
}

impl Constraint {
    pub fn new(check: Check, message: impl Into<String>) -> Self {
        Self {
            check,
            message: message.into(),
        }
    }
}

/// Specification for a single field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub name: String,
    pub kind: FieldKind,
    /// Optional fields skip their constraints when blank or absent.
    pub optional: bool,
    /// Value a fresh form starts with; the kind's empty value when unset.
    pub default: Option<FieldValue>,
    pub constraints: Vec<Constraint>,
}

impl FieldRule {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            optional: false,
            default: None,
            constraints: Vec::new(),
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn default_value(mut self, value: FieldValue) -> Self {
        self.default = Some(value);
        self
    }

    /// The value this field holds in a fresh or reset form.
    pub fn initial_value(&self) -> FieldValue {
        if let Some(value) = &self.default {
            return value.clone();
        }
        match self.kind {
            FieldKind::Text => FieldValue::text(""),
            FieldKind::Number => FieldValue::Number(0.0),
            FieldKind::File => FieldValue::Files(Vec::new()),
        }
    }

    pub fn check(mut self, check: Check, message: impl Into<String>) -> Self {
        self.constraints.push(Constraint::new(check, message));
        self
    }

    /// Message of the first failing constraint, if any.
    pub fn first_failure(&self, value: Option<&FieldValue>) -> Option<&str> {
        if self.optional && value.is_none_or(FieldValue::is_blank) {
            return None;
        }
        self.constraints
            .iter()
            .find(|c| !c.check.passes(value))
            .map(|c| c.message.as_str())
    }
}

/// Immutable rule set for one entity type.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub entity: String,
    rules: Vec<FieldRule>,
}

impl Schema {
    pub fn new(entity: impl Into<String>, rules: Vec<FieldRule>) -> Self {
        Self {
            entity: entity.into(),
            rules,
        }
    }

    /// The destination form's rules, with thresholds taken from `config`.
    pub fn destination(config: &FormConfig) -> Self {
        let mut rating = FieldRule::new("rating", FieldKind::Number)
            .default_value(FieldValue::Number(config.default_rating))
            .check(Check::Min(1.0), "Please enter a valid rating");
        if config.enforce_rating_max {
            rating = rating.check(Check::Max(MAX_RATING), "Please enter a valid rating");
        }

        Self::new(
            "destination",
            vec![
                FieldRule::new("id", FieldKind::Text).optional(),
                FieldRule::new("destination", FieldKind::Text).check(
                    Check::MinTrimmedLength(1),
                    "Please enter a valid destination name",
                ),
                FieldRule::new("image", FieldKind::File)
                    .check(
                        Check::MaxFileSize(config.max_image_bytes),
                        "Max image size is 5MB.",
                    )
                    .check(
                        Check::MimeTypeIn(config.accepted_image_types.clone()),
                        "Only .jpg, .jpeg, .png and .webp formats are supported.",
                    ),
                FieldRule::new("description", FieldKind::Text).check(
                    Check::MinTrimmedLength(1),
                    "Please enter a valid description",
                ),
                FieldRule::new("price", FieldKind::Text)
                    .check(Check::MinTrimmedLength(1), "Please enter a valid price"),
                rating,
            ],
        )
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    pub fn rule(&self, name: &str) -> Option<&FieldRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rule(name).is_some()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FileRef;

    fn schema() -> Schema {
        Schema::destination(&FormConfig::default())
    }

    #[test]
    fn destination_schema_has_expected_fields() {
        let s = schema();
        let names: Vec<_> = s.field_names().collect();
        assert_eq!(
            names,
            vec!["id", "destination", "image", "description", "price", "rating"]
        );
    }

    #[test]
    fn initial_values_follow_kind_unless_declared() {
        let s = Schema::destination(&FormConfig {
            default_rating: 2.0,
            ..Default::default()
        });
        assert_eq!(s.rule("price").unwrap().initial_value(), FieldValue::text(""));
        assert_eq!(
            s.rule("image").unwrap().initial_value(),
            FieldValue::Files(vec![])
        );
        assert_eq!(
            s.rule("rating").unwrap().initial_value(),
            FieldValue::Number(2.0)
        );
        assert_eq!(
            FieldRule::new("count", FieldKind::Number).initial_value(),
            FieldValue::Number(0.0)
        );
    }

    #[test]
    fn unknown_field_is_not_in_schema() {
        assert!(!schema().contains("nonexistent"));
    }

    #[test]
    fn image_rule_checks_size_before_type() {
        let s = schema();
        let rule = s.rule("image").unwrap();
        assert_eq!(rule.kind, FieldKind::File);
        assert_eq!(rule.constraints.len(), 2);
        assert_eq!(rule.constraints[0].check, Check::MaxFileSize(500_000));
    }

    #[test]
    fn missing_file_fails_the_first_constraint() {
        let s = schema();
        let rule = s.rule("image").unwrap();
        assert_eq!(rule.first_failure(None), Some("Max image size is 5MB."));
        assert_eq!(
            rule.first_failure(Some(&FieldValue::Files(vec![]))),
            Some("Max image size is 5MB.")
        );
    }

    #[test]
    fn image_reference_text_is_not_a_file() {
        let s = schema();
        let rule = s.rule("image").unwrap();
        let hydrated = FieldValue::text("https://cdn.example/bromo.png");
        assert_eq!(rule.first_failure(Some(&hydrated)), Some("Max image size is 5MB."));
    }

    #[test]
    fn whitespace_only_text_fails() {
        let s = schema();
        let rule = s.rule("price").unwrap();
        assert_eq!(
            rule.first_failure(Some(&FieldValue::text("   "))),
            Some("Please enter a valid price")
        );
        assert_eq!(rule.first_failure(Some(&FieldValue::text(" 10 "))), None);
    }

    #[test]
    fn optional_id_accepts_blank_and_values() {
        let s = schema();
        let rule = s.rule("id").unwrap();
        assert_eq!(rule.first_failure(None), None);
        assert_eq!(rule.first_failure(Some(&FieldValue::text(""))), None);
        assert_eq!(rule.first_failure(Some(&FieldValue::text("abc"))), None);
    }

    #[test]
    fn rating_upper_bound_is_opt_in() {
        let lenient = schema();
        let high = FieldValue::Number(9.0);
        assert_eq!(lenient.rule("rating").unwrap().first_failure(Some(&high)), None);

        let strict = Schema::destination(&FormConfig {
            enforce_rating_max: true,
            ..Default::default()
        });
        assert_eq!(
            strict.rule("rating").unwrap().first_failure(Some(&high)),
            Some("Please enter a valid rating")
        );
        assert_eq!(
            strict
                .rule("rating")
                .unwrap()
                .first_failure(Some(&FieldValue::Number(5.0))),
            None
        );
    }

    #[test]
    fn configured_size_threshold_is_used() {
        let s = Schema::destination(&FormConfig {
            max_image_bytes: 10,
            ..Default::default()
        });
        let big = FieldValue::file(FileRef::new("a.png", 11, "image/png"));
        assert_eq!(
            s.rule("image").unwrap().first_failure(Some(&big)),
            Some("Max image size is 5MB.")
        );
    }
}
