use crate::error::{LinkRulesError, Result};
use crate::link::{LinkRecord, MarkdownLink};
use crate::rules::builtin;
use crate::rules::chain::RuleChain;
use crate::rules::types::{MatchOutcome, MatcherRule, Options, Rule, Transform};
use std::sync::Arc;

/// Turn any rule shape into a [`Transform`].
///
/// Unknown builtin names fail here, at setup, rather than per link.
pub fn normalize(rule: &Rule) -> Result<Transform> {
	match rule {
		Rule::Builtin(name) => builtin::lookup(name)
			.map(wrap_matcher)
			.ok_or_else(|| LinkRulesError::UnknownBuiltin { name: name.clone() }),
		Rule::Matcher(matcher) => Ok(wrap_matcher(matcher.clone())),
		Rule::Transform(transform) => Ok(Arc::clone(transform)),
	}
}

fn wrap_matcher(rule: MatcherRule) -> Transform {
	let MatcherRule {
		matcher, actions, ..
	} = rule;

	Arc::new(move |link: &MarkdownLink| {
		let record = match matcher(link) {
			MatchOutcome::Skip => return None,
			MatchOutcome::Matched => LinkRecord::from(link),
			MatchOutcome::Patch(patch) => LinkRecord::from(link).merged(&patch),
		};

		Some(
			actions
				.iter()
				.fold(record, |record, action| action.apply_to(record)),
		)
	})
}

/// Resolve options into the chain used for every link.
///
/// Caller rules come first, in declaration order. With `use_builtin`, each
/// builtin not named by a caller rule is appended in table order.
pub fn resolve_rules(options: &Options) -> Result<RuleChain> {
	let mut chain = RuleChain::new();

	for (index, rule) in options.rules.iter().enumerate() {
		let label = rule
			.name()
			.map_or_else(|| format!("rule #{}", index + 1), str::to_string);
		chain.push(label, normalize(rule)?);
	}

	if options.use_builtin {
		for name in builtin::NAMES {
			if options.rules.iter().any(|rule| rule.name() == Some(name)) {
				tracing::debug!(builtin = name, "builtin overridden by caller rule");
				continue;
			}
			chain.push(name, normalize(&Rule::builtin(name))?);
		}
	}

	Ok(chain)
}
