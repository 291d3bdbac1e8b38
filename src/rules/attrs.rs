use crate::link::{LinkRecord, Value, keys};
use crate::rules::types::Action;

/// Action that overwrites `key` with `value`, leaving every other field alone.
pub fn set(key: impl Into<String>, value: impl Into<Value>) -> Action {
	let key = key.into();
	let value = value.into();
	Action::from_fn(move |record| record.with(&key, value.clone()))
}

/// Action that adds `value` to the space-separated token list at `key`.
pub fn merge(key: impl Into<String>, value: impl Into<String>) -> Action {
	let key = key.into();
	let value = value.into();
	Action::from_fn(move |record| merge_token(record, &key, &value))
}

/// Action that adds a CSS class.
pub fn merge_class(name: impl Into<String>) -> Action {
	merge(keys::CLASS_NAME, name)
}

/// Add `token` to the space-separated list at `key`.
///
/// The new token comes first, followed by the existing tokens in their
/// original order; duplicates are dropped. A missing, empty or non-string
/// value is replaced by `token`.
pub fn merge_token(record: LinkRecord, key: &str, token: &str) -> LinkRecord {
	match record.get(key) {
		Some(Value::String(existing)) if !existing.is_empty() => {
			let mut tokens = vec![token];
			for existing_token in existing.split(' ') {
				if !tokens.contains(&existing_token) {
					tokens.push(existing_token);
				}
			}
			let joined = tokens.join(" ");
			record.with(key, joined)
		}
		_ => record.with(key, token),
	}
}
