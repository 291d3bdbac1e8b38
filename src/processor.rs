//! Applying the rule chain to the links of a syntax tree.

use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::error::Result;
use crate::link::{Download, LinkRecord, MarkdownLink, keys};
use crate::rules::{Options, RuleChain, resolve_rules};
use crate::tree::{self, Element, Node, Visit};

/// Tag name of hyperlink elements.
pub const LINK_TAG: &str = "a";

const EMPTY_CHAIN_WARNING: &str =
	"no link rules configured (builtins disabled and no custom rules); links will be left unchanged";

/// Rewrites hyperlink elements with a rule chain resolved once at setup.
///
/// Holds no mutable state, so one processor can serve any number of trees.
#[derive(Debug, Clone)]
pub struct LinkProcessor {
	chain: RuleChain,
}

impl LinkProcessor {
	/// Resolve `options`, reporting warnings through `tracing`.
	pub fn new(options: &Options) -> Result<Self> {
		Self::with_sink(options, &TracingSink)
	}

	/// Resolve `options`, reporting warnings to `sink`.
	///
	/// An empty chain is not an error: it warns once and yields a processor
	/// that never touches a tree.
	pub fn with_sink(options: &Options, sink: &dyn DiagnosticSink) -> Result<Self> {
		let chain = resolve_rules(options)?;
		if chain.is_empty() {
			sink.warn(EMPTY_CHAIN_WARNING);
		}
		Ok(Self { chain })
	}

	pub fn chain(&self) -> &RuleChain {
		&self.chain
	}

	/// True when processing can never change a tree.
	pub fn is_noop(&self) -> bool {
		self.chain.is_empty()
	}

	/// Rewrite every link in `root` in place, returning how many were rewritten.
	///
	/// Link subtrees are never searched for further links.
	pub fn process(&self, root: &mut Node) -> usize {
		if self.is_noop() {
			return 0;
		}

		let mut rewritten = 0;
		tree::visit(root, &mut |node| {
			let Node::Element(element) = node else {
				return Visit::Continue;
			};
			if element.tag_name != LINK_TAG {
				return Visit::Continue;
			}

			if let Some(record) = self.chain.apply(&extract_link(element)) {
				apply_record(element, record);
				rewritten += 1;
			}
			Visit::Skip
		});
		rewritten
	}
}

/// Read href and title properties, and text from a leading text child.
pub fn extract_link(element: &Element) -> MarkdownLink {
	let text = match element.children.first() {
		Some(Node::Text { value, .. }) => Some(value.clone()),
		_ => None,
	};

	MarkdownLink {
		href: element.property_str(keys::HREF).map(str::to_string),
		title: element.property_str(keys::TITLE).map(str::to_string),
		text,
	}
}

/// Write the set fields of `record` back onto the element.
///
/// Absent or empty fields leave the matching property as it was. Extra
/// fields go in last and overwrite properties of the same name.
pub fn apply_record(element: &mut Element, record: LinkRecord) {
	let LinkRecord {
		href,
		title,
		text,
		class_name,
		rel,
		target,
		download,
		extra,
	} = record;
	let properties = &mut element.properties;

	for (key, value) in [
		(keys::HREF, href),
		(keys::TITLE, title),
		(keys::TARGET, target),
	] {
		if let Some(value) = value.filter(|v| !v.is_empty()) {
			properties.insert(key.to_string(), serde_json::Value::String(value));
		}
	}

	for (key, value) in [(keys::CLASS_NAME, class_name), (keys::REL, rel)] {
		if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
			properties.insert(key.to_string(), token_list(&value));
		}
	}

	if let Some(download) = download.filter(Download::is_truthy) {
		let value = match download {
			Download::File(name) => serde_json::Value::String(name),
			Download::Flag(flag) => serde_json::Value::Bool(flag),
		};
		properties.insert(keys::DOWNLOAD.to_string(), value);
	}

	for (key, value) in extra {
		properties.insert(key, value.into());
	}

	if let Some(text) = text.filter(|t| !t.is_empty()) {
		element.children = vec![Node::text(text)];
	}
}

/// Space-separated tokens as a hast list property.
fn token_list(value: &str) -> serde_json::Value {
	value
		.split_whitespace()
		.map(|token| serde_json::Value::String(token.to_string()))
		.collect()
}
