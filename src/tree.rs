//! Minimal hast-style syntax tree.
//!
//! Nodes serialize with hast field names (`type`, `tagName`, `properties`,
//! `children`, `value`), so trees produced by an upstream HTML or markdown
//! pipeline can be read and written as JSON. Properties keep their insertion
//! order. Fields this model does not name (`position`, `data`, ...) and node
//! types it does not know are carried through unchanged.

use serde::{Deserialize, Serialize};

/// Element properties, in document order.
pub type Properties = serde_json::Map<String, serde_json::Value>;

/// Node fields outside the modelled ones, such as `position` and `data`.
pub type Rest = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
	Root {
		#[serde(default)]
		children: Vec<Node>,
		#[serde(flatten)]
		rest: Rest,
	},
	Element(Element),
	Text {
		value: String,
		#[serde(flatten)]
		rest: Rest,
	},
	Comment {
		value: String,
		#[serde(flatten)]
		rest: Rest,
	},
	Doctype {
		#[serde(flatten)]
		rest: Rest,
	},
	/// Any node without a known `type`, such as `raw`, kept as read.
	#[serde(untagged)]
	Other(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
	pub tag_name: String,

	#[serde(default)]
	pub properties: Properties,

	#[serde(default)]
	pub children: Vec<Node>,

	#[serde(flatten)]
	pub rest: Rest,
}

impl Node {
	pub fn root(children: Vec<Node>) -> Self {
		Node::Root {
			children,
			rest: Rest::new(),
		}
	}

	pub fn text(value: impl Into<String>) -> Self {
		Node::Text {
			value: value.into(),
			rest: Rest::new(),
		}
	}

	pub fn children(&self) -> Option<&[Node]> {
		match self {
			Node::Root { children, .. } => Some(children.as_slice()),
			Node::Element(element) => Some(element.children.as_slice()),
			_ => None,
		}
	}

	pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
		match self {
			Node::Root { children, .. } => Some(children),
			Node::Element(element) => Some(&mut element.children),
			_ => None,
		}
	}
}

impl From<Element> for Node {
	fn from(element: Element) -> Self {
		Node::Element(element)
	}
}

impl Element {
	pub fn new(tag_name: impl Into<String>) -> Self {
		Self {
			tag_name: tag_name.into(),
			..Default::default()
		}
	}

	pub fn with_property(
		mut self,
		key: impl Into<String>,
		value: impl Into<serde_json::Value>,
	) -> Self {
		self.properties.insert(key.into(), value.into());
		self
	}

	pub fn with_child(mut self, child: impl Into<Node>) -> Self {
		self.children.push(child.into());
		self
	}

	/// A property, when it holds a string.
	pub fn property_str(&self, key: &str) -> Option<&str> {
		self.properties.get(key).and_then(serde_json::Value::as_str)
	}
}

/// Whether a visitor wants to descend into the node it was handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
	Continue,
	Skip,
}

/// Walk `node` depth-first in document order.
///
/// The visitor sees a parent before its children; returning [`Visit::Skip`]
/// leaves that node's children unvisited.
pub fn visit<F>(node: &mut Node, visitor: &mut F)
where
	F: FnMut(&mut Node) -> Visit,
{
	if visitor(node) == Visit::Skip {
		return;
	}

	if let Some(children) = node.children_mut() {
		for child in children {
			visit(child, visitor);
		}
	}
}
