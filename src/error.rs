use std::path::PathBuf;

/// Library-level structured errors for linkrules.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum LinkRulesError {
	#[error("Unknown builtin rule: {name}")]
	UnknownBuiltin { name: String },

	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Invalid regex pattern in rule: {pattern}")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Mutually exclusive options: {option1} and {option2}")]
	MutuallyExclusive { option1: String, option2: String },

	#[error("Rule has no matcher (expected one of builtin, prefix, pattern)")]
	MissingMatcher,

	#[error("Unsupported value for attribute `{key}` (expected string, boolean or number)")]
	UnsupportedValue { key: String },

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

/// Result type alias using LinkRulesError.
pub type Result<T> = std::result::Result<T, LinkRulesError>;
