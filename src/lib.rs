//! # Creto Rules
//!
//! Declarative, rule-based authorization evaluator.
//!
//! A rule grants or denies an action on a subject, optionally scoped to a
//! list of qualifiers (e.g., field names). Rules support a `"*"` wildcard
//! for the action and subject roles, and named aliases that expand to
//! groups of interchangeable values. The evaluator answers one question:
//! is this `(action, subject, qualifier)` request currently permitted?
//!
//! ## Semantics
//!
//! - **Default deny**: no matching rule means denied.
//! - **Forbid precedence**: a request is allowed iff at least one matching
//!   rule allows it and no matching rule forbids it.
//! - **Immutable after build**: contexts are frozen snapshots, safe for
//!   concurrent reads; rebuild to change rules.
//!
//! ## Example
//!
//! ```rust
//! use creto_rules::{AuthorizationBuilder, RulesError};
//!
//! fn main() -> Result<(), RulesError> {
//!     let context = AuthorizationBuilder::new()
//!         .allow("*", "Post")?
//!         .forbid("publish", "Post")?
//!         .build();
//!
//!     assert!(context.allowed("read", "Post"));
//!     assert!(context.forbidden("publish", "Post"));
//!     assert!(!context.allowed("read", "User"));
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use builder::AuthorizationBuilder;
pub use context::{AuthorizationContext, RuleSet};
pub use error::{Result, RulesError};
pub use types::{
    Alias, AliasKind, Rule, StringComparison, ACTION_WILDCARD, SUBJECT_WILDCARD,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
