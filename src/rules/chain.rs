use crate::link::{LinkRecord, MarkdownLink};
use crate::rules::types::Transform;
use std::fmt;

/// One normalized rule and the label it is logged under.
#[derive(Clone)]
struct ChainEntry {
	label: String,
	transform: Transform,
}

/// Ordered, normalized rules evaluated first-match-wins.
///
/// Built once at setup and never mutated afterwards.
#[derive(Clone, Default)]
pub struct RuleChain {
	entries: Vec<ChainEntry>,
}

impl RuleChain {
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a transform at the lowest priority.
	pub fn push(&mut self, label: impl Into<String>, transform: Transform) {
		self.entries.push(ChainEntry {
			label: label.into(),
			transform,
		});
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Labels in evaluation order.
	pub fn labels(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|entry| entry.label.as_str())
	}

	/// Run the chain against a link.
	///
	/// Every rule sees the original link; the first one that returns a record
	/// wins and later rules are not consulted. `None` means no rule applied.
	pub fn apply(&self, link: &MarkdownLink) -> Option<LinkRecord> {
		self.entries.iter().find_map(|entry| {
			let record = (entry.transform)(link)?;
			tracing::debug!(rule = %entry.label, href = ?link.href, "link rule matched");
			Some(record)
		})
	}
}

impl fmt::Debug for RuleChain {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.labels()).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Arc;
	use std::sync::atomic::{AtomicUsize, Ordering};

	fn constant(class: &'static str) -> Transform {
		Arc::new(move |_: &MarkdownLink| Some(LinkRecord::default().with("className", class)))
	}

	fn skip() -> Transform {
		Arc::new(|_: &MarkdownLink| None)
	}

	#[test]
	fn test_empty_chain_skips() {
		let chain = RuleChain::new();
		assert!(chain.is_empty());
		assert_eq!(chain.apply(&MarkdownLink::new("/a")), None);
	}

	#[test]
	fn test_first_match_wins() {
		let consulted = Arc::new(AtomicUsize::new(0));
		let counter = Arc::clone(&consulted);

		let mut chain = RuleChain::new();
		chain.push("skip", skip());
		chain.push("first", constant("first"));
		chain.push(
			"second",
			Arc::new(move |_: &MarkdownLink| {
				counter.fetch_add(1, Ordering::SeqCst);
				Some(LinkRecord::default().with("className", "second"))
			}),
		);

		let record = chain.apply(&MarkdownLink::new("/a")).unwrap();
		assert_eq!(record.class_name.as_deref(), Some("first"));
		assert_eq!(consulted.load(Ordering::SeqCst), 0);
	}

	#[test]
	fn test_rules_see_original_link() {
		let mut chain = RuleChain::new();
		chain.push(
			"inspect",
			Arc::new(|link: &MarkdownLink| {
				assert_eq!(link.href.as_deref(), Some("/a"));
				None
			}),
		);
		chain.push("skip", skip());
		assert_eq!(chain.apply(&MarkdownLink::new("/a")), None);
	}

	#[test]
	fn test_labels_in_order() {
		let mut chain = RuleChain::new();
		chain.push("one", skip());
		chain.push("two", skip());
		assert_eq!(chain.labels().collect::<Vec<_>>(), vec!["one", "two"]);
		assert_eq!(format!("{chain:?}"), r#"["one", "two"]"#);
	}
}
