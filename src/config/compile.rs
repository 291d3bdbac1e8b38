use crate::config::types::{MergedConfig, RuleEntry};
use crate::error::{LinkRulesError, Result};
use crate::link::{LinkRecord, Value};
use crate::rules::matcher::{compile_regex, pattern, prefix};
use crate::rules::{Action, MatcherRule, Options, Rule, merge_class};

/// Compile all rules in a merged config into processor options.
pub fn compile_rules(config: &MergedConfig) -> Result<Options> {
	let rules = config
		.rules
		.iter()
		.map(|rws| compile_rule(&rws.rule))
		.collect::<Result<Vec<_>>>()?;

	Ok(Options {
		rules,
		use_builtin: config.use_builtin.unwrap_or(true),
	})
}

/// Compile one declared rule.
///
/// Actions run in declaration-independent order: the `set` patch, then
/// `add-class`.
pub fn compile_rule(entry: &RuleEntry) -> Result<Rule> {
	entry.validate()?;

	if let Some(name) = &entry.builtin {
		return Ok(Rule::builtin(name.clone()));
	}

	let matcher = match (&entry.prefix, &entry.pattern) {
		(Some(p), _) => prefix(p.clone()),
		(None, Some(p)) => pattern(compile_regex(p)?),
		(None, None) => return Err(LinkRulesError::MissingMatcher),
	};

	let mut rule = MatcherRule::from_match_fn(matcher);
	if let Some(name) = &entry.name {
		rule = rule.named(name.clone());
	}
	if !entry.set.is_empty() {
		rule = rule.action(Action::Patch(patch_from_table(&entry.set)?));
	}
	if let Some(class) = &entry.add_class {
		rule = rule.action(merge_class(class.clone()));
	}

	Ok(Rule::from(rule))
}

fn patch_from_table(table: &toml::Table) -> Result<LinkRecord> {
	table
		.iter()
		.try_fold(LinkRecord::default(), |record, (key, value)| {
			Ok(record.with(key, toml_to_value(key, value)?))
		})
}

fn toml_to_value(key: &str, value: &toml::Value) -> Result<Value> {
	match value {
		toml::Value::String(s) => Ok(Value::String(s.clone())),
		toml::Value::Boolean(b) => Ok(Value::Bool(*b)),
		toml::Value::Integer(n) => Ok(Value::Integer(*n)),
		toml::Value::Float(f) => Ok(Value::Float(*f)),
		_ => Err(LinkRulesError::UnsupportedValue {
			key: key.to_string(),
		}),
	}
}
