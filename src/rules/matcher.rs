use crate::error::{LinkRulesError, Result};
use crate::link::{LinkRecord, MarkdownLink, keys};
use crate::rules::types::{MatchFn, MatchOutcome};
use regex::Regex;
use std::sync::{Arc, LazyLock};
use url::Url;

/// Base for resolving relative addresses; only the resulting path is inspected.
static DOWNLOAD_BASE: LazyLock<Option<Url>> =
	LazyLock::new(|| Url::parse("https://linkrules.invalid/").ok());

/// Extensions that name a page rather than a file to download.
const PAGE_EXTENSIONS: &[&str] = &["html", "htm"];

const MAX_EXTENSION_LEN: usize = 4;

/// Strip a literal prefix from the first of href, title, text that carries it.
///
/// The patch contains only the stripped field.
pub fn match_prefix(link: &MarkdownLink, prefix: &str) -> MatchOutcome {
	let fields = [
		(keys::HREF, &link.href),
		(keys::TITLE, &link.title),
		(keys::TEXT, &link.text),
	];

	for (key, value) in fields {
		if let Some(rest) = value.as_deref().and_then(|v| v.strip_prefix(prefix)) {
			return MatchOutcome::Patch(LinkRecord::default().with(key, rest));
		}
	}

	MatchOutcome::Skip
}

/// Absolute http(s) links, or links tagged with `external:`.
pub fn match_external(link: &MarkdownLink) -> MatchOutcome {
	let is_web_url = link
		.href
		.as_deref()
		.is_some_and(|href| href.starts_with("http:") || href.starts_with("https:"));

	if is_web_url {
		MatchOutcome::Matched
	} else {
		match_prefix(link, "external:")
	}
}

/// Links to files (by extension), or links tagged with `download:`.
pub fn match_download(link: &MarkdownLink) -> MatchOutcome {
	let by_extension = link
		.href
		.as_deref()
		.and_then(download_filename)
		.map(|filename| LinkRecord::default().with(keys::DOWNLOAD, filename));

	MatchOutcome::from(by_extension).or_else(|| match_prefix(link, "download:"))
}

/// In-page anchors.
pub fn match_same_page(link: &MarkdownLink) -> MatchOutcome {
	MatchOutcome::from(link.href.as_deref().is_some_and(|href| href.starts_with('#')))
}

/// Match function for [`match_prefix`].
pub fn prefix(prefix: impl Into<String>) -> MatchFn {
	let prefix = prefix.into();
	Arc::new(move |link: &MarkdownLink| match_prefix(link, &prefix))
}

pub fn external() -> MatchFn {
	Arc::new(match_external)
}

pub fn download() -> MatchFn {
	Arc::new(match_download)
}

/// Match function accepting links whose href matches `regex`.
pub fn pattern(regex: Regex) -> MatchFn {
	Arc::new(move |link: &MarkdownLink| {
		MatchOutcome::from(link.href.as_deref().is_some_and(|href| regex.is_match(href)))
	})
}

/// Compile a regex pattern string.
pub fn compile_regex(pattern: &str) -> Result<Regex> {
	Regex::new(pattern).map_err(|source| LinkRulesError::InvalidRegex {
		pattern: pattern.to_string(),
		source,
	})
}

/// The filename to offer for download, when the href looks like a file.
///
/// Unresolvable addresses are not downloads.
fn download_filename(href: &str) -> Option<String> {
	let url = DOWNLOAD_BASE.as_ref()?.join(href).ok()?;
	let path = url.path();
	let (_, extension) = path.rsplit_once('.')?;
	let extension = extension.to_lowercase();

	if PAGE_EXTENSIONS.contains(&extension.as_str()) || !extension_within_bounds(&extension) {
		return None;
	}

	path.rsplit('/').next().map(str::to_string)
}

/// Disjunctive length gate: every extension passes, however long or short.
fn extension_within_bounds(extension: &str) -> bool {
	!extension.is_empty() || extension.len() <= MAX_EXTENSION_LEN
}
