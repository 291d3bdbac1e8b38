//! Configuration loading and parsing for linkrules.
//!
//! This module handles:
//! - TOML config file parsing
//! - Directory cascade discovery
//! - Config merging and compilation into processor options

pub mod cascade;
pub mod compile;
pub mod parser;
pub mod types;

pub use cascade::{
	CONFIG_FILE_NAME, discover_configs, load_merged_config, merge_configs, user_config_path,
};
pub use compile::{compile_rule, compile_rules};
pub use parser::{parse_config_file, parse_config_str};
pub use types::{Config, LoadedConfig, MergedConfig, RuleEntry, RuleWithSource};
