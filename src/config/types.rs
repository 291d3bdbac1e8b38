use crate::error::LinkRulesError;
use serde::Deserialize;
use std::path::PathBuf;

/// Top-level configuration from a `.linkrules.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
	/// If true, stop the directory cascade here and jump to ~/.linkrules.toml.
	#[serde(default)]
	pub root: bool,

	/// If true, ignore every config above this one, including ~/.linkrules.toml.
	#[serde(default)]
	pub no_external_lookup: bool,

	/// Whether builtin rules are appended after the custom ones.
	/// The most specific config that sets it wins; defaults to true.
	#[serde(default)]
	pub use_builtin: Option<bool>,

	/// Link rules, evaluated in order. First matching rule wins.
	#[serde(default)]
	pub rules: Vec<RuleEntry>,
}

/// A declared link rule.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RuleEntry {
	/// Name of this rule. Naming a rule after a builtin replaces the builtin.
	/// Not allowed with `builtin`, which is already named.
	pub name: Option<String>,

	/// Use a builtin rule (mutually exclusive with prefix and pattern).
	pub builtin: Option<String>,

	/// Match links whose href, title or text starts with this prefix; the prefix is stripped.
	pub prefix: Option<String>,

	/// Regex matched against the link href.
	pub pattern: Option<String>,

	/// Class added to matched links.
	pub add_class: Option<String>,

	/// Attributes set on matched links. Values must be strings, booleans or numbers.
	#[serde(default)]
	pub set: toml::Table,
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

/// Merged configuration from multiple config files in the cascade.
#[derive(Debug, Clone, Default)]
pub struct MergedConfig {
	/// All rules from all configs, in cascade order (first match wins).
	pub rules: Vec<RuleWithSource>,

	/// From the most specific config that sets it.
	pub use_builtin: Option<bool>,
}

/// A rule with its source config path for debugging/display.
#[derive(Debug, Clone)]
pub struct RuleWithSource {
	/// The rule itself.
	pub rule: RuleEntry,

	/// The config file this rule came from.
	pub source: PathBuf,
}

impl RuleEntry {
	/// Validate that exactly one matcher is set and that actions fit it.
	pub fn validate(&self) -> Result<(), LinkRulesError> {
		let matcher_fields = [
			("builtin", self.builtin.is_some()),
			("prefix", self.prefix.is_some()),
			("pattern", self.pattern.is_some()),
		];

		let set_fields: Vec<_> = matcher_fields
			.iter()
			.filter(|(_, is_set)| *is_set)
			.map(|(name, _)| *name)
			.collect();

		match set_fields.as_slice() {
			[] => return Err(LinkRulesError::MissingMatcher),
			[_] => {}
			[first, second, ..] => {
				return Err(LinkRulesError::MutuallyExclusive {
					option1: first.to_string(),
					option2: second.to_string(),
				});
			}
		}

		if self.builtin.is_some() {
			let action = if self.name.is_some() {
				Some("name")
			} else if self.add_class.is_some() {
				Some("add-class")
			} else if !self.set.is_empty() {
				Some("set")
			} else {
				None
			};
			if let Some(action) = action {
				return Err(LinkRulesError::MutuallyExclusive {
					option1: "builtin".to_string(),
					option2: action.to_string(),
				});
			}
		}

		for (key, value) in &self.set {
			if !matches!(
				value,
				toml::Value::String(_)
					| toml::Value::Boolean(_)
					| toml::Value::Integer(_)
					| toml::Value::Float(_)
			) {
				return Err(LinkRulesError::UnsupportedValue { key: key.clone() });
			}
		}

		Ok(())
	}
}

impl Config {
	/// Validate all rules in this config.
	pub fn validate(&self) -> Result<(), LinkRulesError> {
		for rule in &self.rules {
			rule.validate()?;
		}
		Ok(())
	}
}
