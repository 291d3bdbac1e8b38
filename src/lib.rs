//! Linkrules - rule-based rewriting of hyperlinks in HTML syntax trees.
//!
//! This library provides the core functionality for linkrules, including:
//! - Link records and the attribute merge helpers that patch them
//! - Builtin and custom rules, normalized into a first-match-wins chain
//! - Applying the chain to the `<a>` elements of a hast-style tree
//! - Configuration file parsing and cascade discovery
//!
//! # Example
//!
//! ```
//! use linkrules::processor::LinkProcessor;
//! use linkrules::rules::{MatchOutcome, MatcherRule, Options, Rule, merge_class};
//! use linkrules::link::MarkdownLink;
//! use linkrules::tree::{Element, Node};
//!
//! let docs = MatcherRule::new(|link: &MarkdownLink| {
//!     MatchOutcome::from(link.href.as_deref().is_some_and(|h| h.starts_with("/docs/")))
//! })
//! .action(merge_class("docs"));
//!
//! let processor = LinkProcessor::new(&Options::with_rules([Rule::from(docs)])).unwrap();
//!
//! let mut tree = Node::root(vec![
//!     Element::new("a")
//!         .with_property("href", "https://example.com")
//!         .with_child(Node::text("Example"))
//!         .into(),
//! ]);
//! assert_eq!(processor.process(&mut tree), 1);
//! ```

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod link;
pub mod processor;
pub mod rules;
pub mod tree;

pub use error::{LinkRulesError, Result};
pub use processor::LinkProcessor;
