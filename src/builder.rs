//! Fluent construction of authorization contexts

use crate::context::AuthorizationContext;
use crate::error::Result;
use crate::types::{Alias, AliasKind, Rule, StringComparison};

/// Incremental builder for an [`AuthorizationContext`]
///
/// Each `allow`/`forbid`/`alias` call validates its arguments immediately,
/// so malformed definitions fail at the call site rather than at query time.
/// The consuming `Result<Self>` shape chains with `?`:
///
/// ```rust
/// use creto_rules::{AliasKind, AuthorizationBuilder, RulesError};
///
/// fn main() -> Result<(), RulesError> {
///     let context = AuthorizationBuilder::new()
///         .allow("Manage", "Project")?
///         .alias("Manage", &["Create", "Update", "Delete"], AliasKind::Action)?
///         .build();
///
///     assert!(context.allowed("Create", "Project"));
///     assert!(!context.allowed("Read", "Project"));
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct AuthorizationBuilder {
    rules: Vec<Rule>,
    aliases: Vec<Alias>,
    comparison: StringComparison,
}

impl AuthorizationBuilder {
    /// Create an empty builder with the default equality policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the string equality policy for the built context
    pub fn comparison(mut self, comparison: StringComparison) -> Self {
        self.comparison = comparison;
        self
    }

    /// Add an unscoped allowing rule
    pub fn allow(self, action: impl Into<String>, subject: impl Into<String>) -> Result<Self> {
        Ok(self.rule(Rule::allow(action, subject)?))
    }

    /// Add an allowing rule scoped to the given qualifiers
    pub fn allow_fields(
        self,
        action: impl Into<String>,
        subject: impl Into<String>,
        qualifiers: &[&str],
    ) -> Result<Self> {
        let qualifiers = qualifiers.iter().map(|q| q.to_string()).collect();
        Ok(self.rule(Rule::new(action, subject, Some(qualifiers), false)?))
    }

    /// Add an unscoped forbidding rule
    pub fn forbid(self, action: impl Into<String>, subject: impl Into<String>) -> Result<Self> {
        Ok(self.rule(Rule::forbid(action, subject)?))
    }

    /// Add a forbidding rule scoped to the given qualifiers
    pub fn forbid_fields(
        self,
        action: impl Into<String>,
        subject: impl Into<String>,
        qualifiers: &[&str],
    ) -> Result<Self> {
        let qualifiers = qualifiers.iter().map(|q| q.to_string()).collect();
        Ok(self.rule(Rule::new(action, subject, Some(qualifiers), true)?))
    }

    /// Declare an alias usable in place of a literal value of the given kind
    pub fn alias(
        mut self,
        name: impl Into<String>,
        values: &[&str],
        kind: AliasKind,
    ) -> Result<Self> {
        let values = values.iter().map(|v| v.to_string()).collect();
        self.aliases.push(Alias::new(name, values, kind)?);
        Ok(self)
    }

    /// Append an already-constructed rule
    ///
    /// Duplicates are kept; they do not change evaluation results, only what
    /// [`AuthorizationContext::rules`] reports.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Absorb another builder's rules and aliases
    ///
    /// Entries structurally equal to one already present are dropped, so
    /// merging overlapping rule sets does not inflate the stored list.
    pub fn merge(mut self, other: AuthorizationBuilder) -> Self {
        for rule in other.rules {
            if !self.rules.contains(&rule) {
                self.rules.push(rule);
            }
        }
        for alias in other.aliases {
            if !self.aliases.contains(&alias) {
                self.aliases.push(alias);
            }
        }
        self
    }

    /// Finalize into an immutable context
    ///
    /// Infallible: every entry was validated when it was added.
    pub fn build(self) -> AuthorizationContext {
        AuthorizationContext::from_validated(self.rules, self.aliases, self.comparison)
    }
}
