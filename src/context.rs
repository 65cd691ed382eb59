//! Authorization context: immutable rule store plus matching engine
//!
//! The context captures rules, aliases, and the string equality policy at
//! construction time and never mutates them. Every query operation takes
//! `&self`, holds no locks, and performs no I/O, so a single context can be
//! shared across arbitrarily many threads. Callers needing updated rules
//! build a new context.

use crate::error::{Result, RulesError};
use crate::types::{
    is_blank, Alias, AliasKind, Rule, StringComparison, ACTION_WILDCARD, SUBJECT_WILDCARD,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Immutable rule store with query operations
///
/// Evaluation semantics: a query is allowed iff at least one matching rule
/// allows it and no matching rule forbids it. A matching forbid always wins,
/// regardless of where it sits in the rule list. Zero matching rules means
/// denied — including the empty context, which denies everything.
#[derive(Debug, Clone)]
pub struct AuthorizationContext {
    rules: Vec<Rule>,
    aliases: Vec<Alias>,
    comparison: StringComparison,
}

impl AuthorizationContext {
    /// Create a context with the default (case-insensitive) equality policy
    ///
    /// Every rule and alias is validated up front; malformed definitions are
    /// rejected here rather than surfacing as surprising query results. An
    /// empty rule list is valid and denies everything.
    pub fn new(rules: Vec<Rule>, aliases: Vec<Alias>) -> Result<Self> {
        Self::with_comparison(rules, aliases, StringComparison::default())
    }

    /// Create a context with an explicit equality policy
    pub fn with_comparison(
        rules: Vec<Rule>,
        aliases: Vec<Alias>,
        comparison: StringComparison,
    ) -> Result<Self> {
        for rule in &rules {
            rule.validate()?;
        }
        for alias in &aliases {
            alias.validate()?;
        }

        Ok(Self {
            rules,
            aliases,
            comparison,
        })
    }

    /// Construction path for inputs already validated by the builder.
    pub(crate) fn from_validated(
        rules: Vec<Rule>,
        aliases: Vec<Alias>,
        comparison: StringComparison,
    ) -> Self {
        Self {
            rules,
            aliases,
            comparison,
        }
    }

    /// The stored rules, in insertion order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The stored aliases
    pub fn aliases(&self) -> &[Alias] {
        &self.aliases
    }

    /// The configured string equality policy
    pub fn comparison(&self) -> StringComparison {
        self.comparison
    }

    /// Check whether an action on a subject is allowed, ignoring qualifiers
    pub fn allowed(&self, action: &str, subject: &str) -> bool {
        self.check(action, subject, None)
    }

    /// Check whether an action on a specific qualifier of a subject is allowed
    pub fn allowed_field(&self, action: &str, subject: &str, qualifier: &str) -> bool {
        self.check(action, subject, Some(qualifier))
    }

    /// Logical negation of [`allowed`](Self::allowed)
    ///
    /// "Forbidden" means "not allowed": a query with zero matching rules is
    /// forbidden even though no rule explicitly denies it.
    pub fn forbidden(&self, action: &str, subject: &str) -> bool {
        !self.allowed(action, subject)
    }

    /// Logical negation of [`allowed_field`](Self::allowed_field)
    pub fn forbidden_field(&self, action: &str, subject: &str, qualifier: &str) -> bool {
        !self.allowed_field(action, subject, qualifier)
    }

    /// All rules matching the query, in insertion order
    ///
    /// This is the introspection primitive `allowed` folds over; callers can
    /// use it to explain a decision (e.g., show which rule forbids an
    /// action). A blank action or subject matches nothing.
    pub fn match_rules(&self, action: &str, subject: &str, qualifier: Option<&str>) -> Vec<&Rule> {
        if is_blank(action) || is_blank(subject) {
            return Vec::new();
        }

        self.rules
            .iter()
            .filter(|rule| self.rule_matches(rule, action, subject, qualifier))
            .collect()
    }

    /// True iff the action is allowed on at least one of the subjects
    ///
    /// Qualifiers are not considered. Vacuously false for an empty subject
    /// list. Unlike the single-query methods, a blank action here is a
    /// caller mistake and errors.
    pub fn any_allowed<S: AsRef<str>>(&self, action: &str, subjects: &[S]) -> Result<bool> {
        self.validate_bulk_action(action)?;
        Ok(subjects
            .iter()
            .any(|subject| self.allowed(action, subject.as_ref())))
    }

    /// True iff the action is allowed on every one of the subjects
    ///
    /// Vacuously true for an empty subject list.
    pub fn all_allowed<S: AsRef<str>>(&self, action: &str, subjects: &[S]) -> Result<bool> {
        self.validate_bulk_action(action)?;
        Ok(subjects
            .iter()
            .all(|subject| self.allowed(action, subject.as_ref())))
    }

    /// True iff the action is allowed on none of the subjects
    ///
    /// Vacuously true for an empty subject list.
    pub fn none_allowed<S: AsRef<str>>(&self, action: &str, subjects: &[S]) -> Result<bool> {
        Ok(!self.any_allowed(action, subjects)?)
    }

    fn check(&self, action: &str, subject: &str, qualifier: Option<&str>) -> bool {
        let matches = self.match_rules(action, subject, qualifier);
        let any_allow = matches.iter().any(|rule| !rule.denied);
        let any_forbid = matches.iter().any(|rule| rule.denied);
        let outcome = any_allow && !any_forbid;

        debug!(
            "Authorization query: action={}, subject={}, qualifier={}, matched={}, outcome={}",
            action,
            subject,
            qualifier.unwrap_or("-"),
            matches.len(),
            if outcome { "ALLOW" } else { "DENY" }
        );

        outcome
    }

    fn rule_matches(
        &self,
        rule: &Rule,
        action: &str,
        subject: &str,
        qualifier: Option<&str>,
    ) -> bool {
        self.field_matches(&rule.subject, subject, SUBJECT_WILDCARD, AliasKind::Subject)
            && self.field_matches(&rule.action, action, ACTION_WILDCARD, AliasKind::Action)
            && self.qualifier_matches(rule, qualifier)
    }

    /// Match one rule field against the query value: literal equality, the
    /// role's wildcard sentinel, or expansion through an alias of the
    /// matching kind.
    fn field_matches(&self, rule_value: &str, query: &str, wildcard: &str, kind: AliasKind) -> bool {
        if self.comparison.matches(rule_value, query)
            || self.comparison.matches(rule_value, wildcard)
        {
            return true;
        }

        self.aliases.iter().any(|alias| {
            alias.kind == kind
                && self.comparison.matches(&alias.alias, rule_value)
                && alias
                    .values
                    .iter()
                    .any(|value| self.comparison.matches(value, query))
        })
    }

    /// An unscoped rule or an unqualified query passes unconditionally.
    /// Otherwise the query qualifier must appear in the rule's qualifier
    /// list, directly or through a qualifier alias named in that list.
    fn qualifier_matches(&self, rule: &Rule, qualifier: Option<&str>) -> bool {
        let qualifiers = match rule.qualifiers.as_deref() {
            None | Some([]) => return true,
            Some(qualifiers) => qualifiers,
        };
        let Some(query) = qualifier else {
            return true;
        };

        if qualifiers
            .iter()
            .any(|candidate| self.comparison.matches(candidate, query))
        {
            return true;
        }

        self.aliases.iter().any(|alias| {
            alias.kind == AliasKind::Qualifier
                && qualifiers
                    .iter()
                    .any(|candidate| self.comparison.matches(candidate, &alias.alias))
                && alias
                    .values
                    .iter()
                    .any(|value| self.comparison.matches(value, query))
        })
    }

    fn validate_bulk_action(&self, action: &str) -> Result<()> {
        if is_blank(action) {
            return Err(RulesError::InvalidInput(
                "Bulk query action cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Plain serializable form of an [`AuthorizationContext`]
///
/// The wire shape for shipping a rule set between services or from a backend
/// to a frontend. Round-tripping through JSON yields a context with
/// identical evaluation behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Rules, in evaluation-irrelevant but introspection-visible order
    pub rules: Vec<Rule>,

    /// Aliases referenced by the rules
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<Alias>,

    /// String equality policy
    #[serde(default)]
    pub comparison: StringComparison,
}

impl RuleSet {
    /// Build a context from this rule set
    ///
    /// Re-validates every entry: deserialization bypasses the `Rule` and
    /// `Alias` constructors, so the invariants are enforced here.
    pub fn into_context(self) -> Result<AuthorizationContext> {
        AuthorizationContext::with_comparison(self.rules, self.aliases, self.comparison)
    }
}

impl From<&AuthorizationContext> for RuleSet {
    fn from(context: &AuthorizationContext) -> Self {
        Self {
            rules: context.rules.clone(),
            aliases: context.aliases.clone(),
            comparison: context.comparison,
        }
    }
}
