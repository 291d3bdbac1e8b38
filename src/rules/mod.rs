//! Link rules for linkrules.
//!
//! This module handles:
//! - Rule shapes (builtin name, matcher + actions, transform function)
//! - Match helpers and attribute actions
//! - Normalizing rules into a first-match-wins chain

pub mod attrs;
pub mod builtin;
pub mod chain;
pub mod matcher;
pub mod normalize;
pub mod types;

pub use attrs::{merge, merge_class, set};
pub use chain::RuleChain;
pub use normalize::{normalize, resolve_rules};
pub use types::{Action, MatchFn, MatchOutcome, MatcherRule, Options, Rule, Transform};
