//! Ready-made rules, referenced by name from [`Rule::Builtin`](crate::rules::Rule::Builtin).

use crate::link::{Download, LinkRecord, keys};
use crate::rules::attrs::merge_class;
use crate::rules::matcher::{match_download, match_external, match_same_page};
use crate::rules::types::{Action, MatcherRule};

pub const EXTERNAL: &str = "external";
pub const DOWNLOAD: &str = "download";
pub const SAME_PAGE: &str = "same-page";

/// Builtin names in the order they are appended to a rule chain.
pub const NAMES: [&str; 3] = [EXTERNAL, DOWNLOAD, SAME_PAGE];

/// Build the builtin rule called `name`.
pub fn lookup(name: &str) -> Option<MatcherRule> {
	match name {
		EXTERNAL => Some(external_rule()),
		DOWNLOAD => Some(download_rule()),
		SAME_PAGE => Some(same_page_rule()),
		_ => None,
	}
}

/// One-line summary of a builtin, for listings.
pub fn describe(name: &str) -> Option<&'static str> {
	match name {
		EXTERNAL => Some("http(s) or `external:` links open in a new tab with rel=\"external nofollow noopener\""),
		DOWNLOAD => Some("file links (by extension) or `download:` links get a download attribute"),
		SAME_PAGE => Some("`#fragment` links get the same-page class"),
		_ => None,
	}
}

fn external_rule() -> MatcherRule {
	let decorations = LinkRecord::default()
		.with(keys::TARGET, "_blank")
		.with(keys::REL, "external nofollow noopener");

	MatcherRule::new(match_external)
		.named(EXTERNAL)
		.action(Action::Patch(decorations))
		.action(merge_class("external"))
}

fn download_rule() -> MatcherRule {
	MatcherRule::new(match_download)
		.named(DOWNLOAD)
		.action(merge_class("download"))
		.action(Action::from_fn(|record| {
			let download = match record.download {
				Some(ref existing) if existing.is_truthy() => existing.clone(),
				_ => Download::Flag(true),
			};
			LinkRecord {
				download: Some(download),
				..record
			}
		}))
}

fn same_page_rule() -> MatcherRule {
	MatcherRule::new(match_same_page)
		.named(SAME_PAGE)
		.action(merge_class("same-page"))
}
