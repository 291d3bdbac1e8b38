//! Link records exchanged between rule steps.
//!
//! A [`LinkRecord`] is a typed view of the well-known link attributes plus an
//! open map of extra attributes. Key-based access (`get`/`with`) routes the
//! well-known keys to their typed fields, so an extra attribute can never
//! shadow one of them.

use std::collections::BTreeMap;
use std::fmt;

/// Well-known attribute keys, using hast property names.
pub mod keys {
	pub const HREF: &str = "href";
	pub const TITLE: &str = "title";
	pub const TEXT: &str = "text";
	pub const CLASS_NAME: &str = "className";
	pub const REL: &str = "rel";
	pub const TARGET: &str = "target";
	pub const DOWNLOAD: &str = "download";
}

/// A scalar attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	String(String),
	Bool(bool),
	Integer(i64),
	Float(f64),
}

impl Value {
	/// Whether the value counts as set: empty strings, `false`, zero and NaN do not.
	pub fn is_truthy(&self) -> bool {
		match self {
			Value::String(s) => !s.is_empty(),
			Value::Bool(b) => *b,
			Value::Integer(n) => *n != 0,
			Value::Float(f) => *f != 0.0 && !f.is_nan(),
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::String(s) => f.write_str(s),
			Value::Bool(b) => write!(f, "{b}"),
			Value::Integer(n) => write!(f, "{n}"),
			Value::Float(n) => write!(f, "{n}"),
		}
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Value::String(s.to_string())
	}
}

impl From<String> for Value {
	fn from(s: String) -> Self {
		Value::String(s)
	}
}

impl From<bool> for Value {
	fn from(b: bool) -> Self {
		Value::Bool(b)
	}
}

impl From<i64> for Value {
	fn from(n: i64) -> Self {
		Value::Integer(n)
	}
}

impl From<f64> for Value {
	fn from(n: f64) -> Self {
		Value::Float(n)
	}
}

impl From<Value> for serde_json::Value {
	fn from(value: Value) -> Self {
		match value {
			Value::String(s) => serde_json::Value::String(s),
			Value::Bool(b) => serde_json::Value::Bool(b),
			Value::Integer(n) => serde_json::Value::from(n),
			Value::Float(n) => serde_json::Number::from_f64(n)
				.map(serde_json::Value::Number)
				.unwrap_or(serde_json::Value::Null),
		}
	}
}

/// The `download` attribute: a suggested filename or a bare flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Download {
	File(String),
	Flag(bool),
}

impl Download {
	pub fn is_truthy(&self) -> bool {
		match self {
			Download::File(name) => !name.is_empty(),
			Download::Flag(flag) => *flag,
		}
	}
}

impl From<Download> for Value {
	fn from(download: Download) -> Self {
		match download {
			Download::File(name) => Value::String(name),
			Download::Flag(flag) => Value::Bool(flag),
		}
	}
}

impl From<Value> for Download {
	fn from(value: Value) -> Self {
		match value {
			Value::Bool(flag) => Download::Flag(flag),
			other => Download::File(other.to_string()),
		}
	}
}

/// The attributes of a hyperlink while it moves through the rule chain.
///
/// Non-string values assigned to string-typed keys are stored in their
/// display form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkRecord {
	pub href: Option<String>,
	pub title: Option<String>,
	pub text: Option<String>,
	pub class_name: Option<String>,
	pub rel: Option<String>,
	pub target: Option<String>,
	pub download: Option<Download>,

	/// Attributes outside the well-known set, written to the node verbatim.
	pub extra: BTreeMap<String, Value>,
}

impl LinkRecord {
	/// Read an attribute by key.
	pub fn get(&self, key: &str) -> Option<Value> {
		if key == keys::DOWNLOAD {
			return self.download.clone().map(Value::from);
		}
		match self.string_slot(key) {
			Some(slot) => slot.clone().map(Value::String),
			None => self.extra.get(key).cloned(),
		}
	}

	/// Return a copy of this record with `key` set to `value`.
	pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
		let value = value.into();
		if key == keys::DOWNLOAD {
			self.download = Some(Download::from(value));
		} else if let Some(slot) = self.string_slot_mut(key) {
			*slot = Some(value.to_string());
		} else {
			self.extra.insert(key.to_string(), value);
		}
		self
	}

	/// Shallow-merge `patch` over this record; fields set in the patch win.
	pub fn merged(mut self, patch: &LinkRecord) -> Self {
		fn overlay<T: Clone>(base: &mut Option<T>, patch: &Option<T>) {
			if let Some(value) = patch {
				*base = Some(value.clone());
			}
		}

		overlay(&mut self.href, &patch.href);
		overlay(&mut self.title, &patch.title);
		overlay(&mut self.text, &patch.text);
		overlay(&mut self.class_name, &patch.class_name);
		overlay(&mut self.rel, &patch.rel);
		overlay(&mut self.target, &patch.target);
		overlay(&mut self.download, &patch.download);
		for (key, value) in &patch.extra {
			self.extra.insert(key.clone(), value.clone());
		}
		self
	}

	fn string_slot(&self, key: &str) -> Option<&Option<String>> {
		match key {
			keys::HREF => Some(&self.href),
			keys::TITLE => Some(&self.title),
			keys::TEXT => Some(&self.text),
			keys::CLASS_NAME => Some(&self.class_name),
			keys::REL => Some(&self.rel),
			keys::TARGET => Some(&self.target),
			_ => None,
		}
	}

	fn string_slot_mut(&mut self, key: &str) -> Option<&mut Option<String>> {
		match key {
			keys::HREF => Some(&mut self.href),
			keys::TITLE => Some(&mut self.title),
			keys::TEXT => Some(&mut self.text),
			keys::CLASS_NAME => Some(&mut self.class_name),
			keys::REL => Some(&mut self.rel),
			keys::TARGET => Some(&mut self.target),
			_ => None,
		}
	}
}

/// The read-only view of a link as found in the document, before any rule ran.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownLink {
	pub href: Option<String>,
	pub title: Option<String>,
	pub text: Option<String>,
}

impl MarkdownLink {
	pub fn new(href: impl Into<String>) -> Self {
		Self {
			href: Some(href.into()),
			..Default::default()
		}
	}

	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	pub fn with_text(mut self, text: impl Into<String>) -> Self {
		self.text = Some(text.into());
		self
	}
}

impl From<&MarkdownLink> for LinkRecord {
	fn from(link: &MarkdownLink) -> Self {
		LinkRecord {
			href: link.href.clone(),
			title: link.title.clone(),
			text: link.text.clone(),
			..Default::default()
		}
	}
}
