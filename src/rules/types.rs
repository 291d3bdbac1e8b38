use crate::link::{LinkRecord, MarkdownLink};
use std::fmt;
use std::sync::Arc;

/// A normalized rule: maps a link to a new record, or `None` to skip.
pub type Transform = Arc<dyn Fn(&MarkdownLink) -> Option<LinkRecord> + Send + Sync>;

/// The match half of a [`MatcherRule`].
pub type MatchFn = Arc<dyn Fn(&MarkdownLink) -> MatchOutcome + Send + Sync>;

/// A record-to-record action.
pub type ActionFn = Arc<dyn Fn(LinkRecord) -> LinkRecord + Send + Sync>;

/// Result of running a match function against a link.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
	/// The rule does not apply.
	Skip,

	/// The rule applies and the link is used as found.
	Matched,

	/// The rule applies; merge these fields over the link before the actions run.
	Patch(LinkRecord),
}

impl MatchOutcome {
	pub fn is_match(&self) -> bool {
		!matches!(self, MatchOutcome::Skip)
	}

	/// Keep a match, or fall through to `next` on skip.
	pub fn or_else(self, next: impl FnOnce() -> MatchOutcome) -> MatchOutcome {
		match self {
			MatchOutcome::Skip => next(),
			matched => matched,
		}
	}
}

impl From<bool> for MatchOutcome {
	fn from(matched: bool) -> Self {
		if matched {
			MatchOutcome::Matched
		} else {
			MatchOutcome::Skip
		}
	}
}

impl From<Option<LinkRecord>> for MatchOutcome {
	fn from(patch: Option<LinkRecord>) -> Self {
		patch.map_or(MatchOutcome::Skip, MatchOutcome::Patch)
	}
}

/// One step applied after a matcher accepted a link.
#[derive(Clone)]
pub enum Action {
	/// Shallow-merge these fields over the running record.
	Patch(LinkRecord),

	/// Replace the running record with the function's output.
	Apply(ActionFn),
}

impl Action {
	pub fn from_fn(f: impl Fn(LinkRecord) -> LinkRecord + Send + Sync + 'static) -> Self {
		Action::Apply(Arc::new(f))
	}

	/// Run this action against the running record.
	pub fn apply_to(&self, record: LinkRecord) -> LinkRecord {
		match self {
			Action::Patch(patch) => record.merged(patch),
			Action::Apply(f) => f(record),
		}
	}
}

impl fmt::Debug for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Action::Patch(patch) => f.debug_tuple("Patch").field(patch).finish(),
			Action::Apply(_) => f.write_str("Apply(<fn>)"),
		}
	}
}

/// A match function paired with the actions to run when it accepts a link.
#[derive(Clone)]
pub struct MatcherRule {
	/// Optional name. A name equal to a builtin's replaces that builtin.
	pub name: Option<String>,

	pub matcher: MatchFn,

	/// Run left to right over the matched record.
	pub actions: Vec<Action>,
}

impl MatcherRule {
	pub fn new(matcher: impl Fn(&MarkdownLink) -> MatchOutcome + Send + Sync + 'static) -> Self {
		Self::from_match_fn(Arc::new(matcher))
	}

	pub fn from_match_fn(matcher: MatchFn) -> Self {
		Self {
			name: None,
			matcher,
			actions: Vec::new(),
		}
	}

	pub fn named(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Append an action.
	pub fn action(mut self, action: Action) -> Self {
		self.actions.push(action);
		self
	}
}

impl fmt::Debug for MatcherRule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MatcherRule")
			.field("name", &self.name)
			.field("actions", &self.actions)
			.finish_non_exhaustive()
	}
}

/// A rule as declared by the caller, before normalization.
#[derive(Clone)]
pub enum Rule {
	/// Reference to a builtin rule by name.
	Builtin(String),

	Matcher(MatcherRule),

	/// Already in normalized form.
	Transform(Transform),
}

impl Rule {
	pub fn builtin(name: impl Into<String>) -> Self {
		Rule::Builtin(name.into())
	}

	pub fn transform(
		f: impl Fn(&MarkdownLink) -> Option<LinkRecord> + Send + Sync + 'static,
	) -> Self {
		Rule::Transform(Arc::new(f))
	}

	/// The name this rule is known by, used to suppress builtins of the same name.
	pub fn name(&self) -> Option<&str> {
		match self {
			Rule::Builtin(name) => Some(name),
			Rule::Matcher(rule) => rule.name.as_deref(),
			Rule::Transform(_) => None,
		}
	}
}

impl From<MatcherRule> for Rule {
	fn from(rule: MatcherRule) -> Self {
		Rule::Matcher(rule)
	}
}

impl fmt::Debug for Rule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Rule::Builtin(name) => f.debug_tuple("Builtin").field(name).finish(),
			Rule::Matcher(rule) => f.debug_tuple("Matcher").field(rule).finish(),
			Rule::Transform(_) => f.write_str("Transform(<fn>)"),
		}
	}
}

/// Setup options for a [`LinkProcessor`](crate::processor::LinkProcessor).
#[derive(Debug, Clone)]
pub struct Options {
	/// Caller rules, evaluated before any builtin.
	pub rules: Vec<Rule>,

	/// Append the builtins not overridden by name in `rules`.
	pub use_builtin: bool,
}

impl Default for Options {
	fn default() -> Self {
		Self {
			rules: Vec::new(),
			use_builtin: true,
		}
	}
}

impl Options {
	pub fn with_rules(rules: impl IntoIterator<Item = Rule>) -> Self {
		Self {
			rules: rules.into_iter().collect(),
			..Default::default()
		}
	}

	pub fn without_builtin(mut self) -> Self {
		self.use_builtin = false;
		self
	}
}
