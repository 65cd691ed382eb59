//! Core rule and alias types

use crate::error::{Result, RulesError};
use serde::{Deserialize, Serialize};

/// Reserved action value matching any action.
///
/// Compared under the context's configured [`StringComparison`], like every
/// other value. `"*"` is the single canonical sentinel; it is never a valid
/// user-chosen action name.
pub const ACTION_WILDCARD: &str = "*";

/// Reserved subject value matching any subject.
///
/// Same convention as [`ACTION_WILDCARD`]. Qualifier lists have no wildcard
/// entries — broad qualifier grants are expressed by leaving a rule unscoped
/// or through a [`AliasKind::Qualifier`] alias.
pub const SUBJECT_WILDCARD: &str = "*";

/// True for the "absent" query value: empty or whitespace-only.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// String equality policy used for all rule, alias, and query comparisons
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringComparison {
    /// ASCII case-insensitive comparison (default)
    #[default]
    IgnoreCase,

    /// Byte-for-byte comparison
    Exact,
}

impl StringComparison {
    /// Check two values for equality under this policy
    pub fn matches(&self, a: &str, b: &str) -> bool {
        match self {
            Self::IgnoreCase => a.eq_ignore_ascii_case(b),
            Self::Exact => a == b,
        }
    }
}

/// A single grant or denial over an (action, subject, qualifiers) triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Action name (e.g., "read", "publish") or [`ACTION_WILDCARD`]
    pub action: String,

    /// Subject name (e.g., "Post", "User") or [`SUBJECT_WILDCARD`]
    pub subject: String,

    /// Qualifiers this rule is scoped to (e.g., field names).
    /// `None` means the rule applies to all qualifiers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifiers: Option<Vec<String>>,

    /// `true` marks a forbidding rule; a matching forbid always wins over
    /// any number of matching allows for the same query
    #[serde(default)]
    pub denied: bool,
}

impl Rule {
    /// Create a validated rule
    ///
    /// Rejects empty or whitespace-only `action` or `subject`, and empty or
    /// whitespace-only qualifier entries. An empty qualifier list is
    /// normalized to `None` (unscoped) so structural equality does not
    /// distinguish the two spellings.
    pub fn new(
        action: impl Into<String>,
        subject: impl Into<String>,
        qualifiers: Option<Vec<String>>,
        denied: bool,
    ) -> Result<Self> {
        let rule = Self {
            action: action.into(),
            subject: subject.into(),
            qualifiers: qualifiers.filter(|q| !q.is_empty()),
            denied,
        };
        rule.validate()?;
        Ok(rule)
    }

    /// Create an allowing rule without qualifier scope
    pub fn allow(action: impl Into<String>, subject: impl Into<String>) -> Result<Self> {
        Self::new(action, subject, None, false)
    }

    /// Create a forbidding rule without qualifier scope
    pub fn forbid(action: impl Into<String>, subject: impl Into<String>) -> Result<Self> {
        Self::new(action, subject, None, true)
    }

    /// Check rule invariants
    ///
    /// `new` calls this; it is also the re-validation hook for rules that
    /// arrived through deserialization and bypassed the constructor.
    pub fn validate(&self) -> Result<()> {
        if is_blank(&self.action) {
            return Err(RulesError::InvalidInput(
                "Rule action cannot be empty".to_string(),
            ));
        }

        if is_blank(&self.subject) {
            return Err(RulesError::InvalidInput(
                "Rule subject cannot be empty".to_string(),
            ));
        }

        if let Some(qualifiers) = &self.qualifiers {
            for qualifier in qualifiers {
                if is_blank(qualifier) {
                    return Err(RulesError::InvalidInput(format!(
                        "Rule '{} {}' has empty qualifier",
                        self.action, self.subject
                    )));
                }
            }
        }

        Ok(())
    }

    /// Whether this rule applies to all qualifiers
    pub fn is_unscoped(&self) -> bool {
        match &self.qualifiers {
            None => true,
            Some(qualifiers) => qualifiers.is_empty(),
        }
    }
}

/// The rule field an alias can substitute for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AliasKind {
    /// Substitutes for a rule's subject
    Subject,

    /// Substitutes for a rule's action
    Action,

    /// Substitutes for an entry in a rule's qualifier list
    Qualifier,
}

/// A named group of interchangeable values, scoped to one rule field
///
/// Rules reference aliases purely by name; resolution happens at query
/// time. The same name may be declared for different kinds without
/// conflict — a `(name, kind)` pair identifies an alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    /// The name used inside rules in place of a literal value
    pub alias: String,

    /// Literal values the alias expands to
    pub values: Vec<String>,

    /// Which rule field this alias substitutes for
    #[serde(rename = "type")]
    pub kind: AliasKind,
}

impl Alias {
    /// Create a validated alias
    pub fn new(
        alias: impl Into<String>,
        values: Vec<String>,
        kind: AliasKind,
    ) -> Result<Self> {
        let alias = Self {
            alias: alias.into(),
            values,
            kind,
        };
        alias.validate()?;
        Ok(alias)
    }

    /// Check alias invariants
    pub fn validate(&self) -> Result<()> {
        if is_blank(&self.alias) {
            return Err(RulesError::InvalidInput(
                "Alias name cannot be empty".to_string(),
            ));
        }

        if self.values.is_empty() {
            return Err(RulesError::InvalidInput(format!(
                "Alias '{}' must have at least one value",
                self.alias
            )));
        }

        for value in &self.values {
            if is_blank(value) {
                return Err(RulesError::InvalidInput(format!(
                    "Alias '{}' has empty value",
                    self.alias
                )));
            }
        }

        Ok(())
    }
}
