use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use linkrules::LinkProcessor;
use linkrules::config::{
	LoadedConfig, MergedConfig, compile_rules, discover_configs, load_merged_config,
	merge_configs, parse_config_file, user_config_path,
};
use linkrules::rules::builtin;
use linkrules::tree::Node;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV_VAR: &str = "LINKRULES_LOG";

#[derive(Parser)]
#[command(name = "linkrules")]
#[command(
	author,
	version,
	about = "Rewrite hyperlinks in HTML syntax trees with ordered rules"
)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// JSON syntax tree to process (reads stdin when omitted)
	#[arg(value_name = "INPUT")]
	input: Option<PathBuf>,

	/// Use this config file instead of discovering .linkrules.toml files
	#[arg(long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Do not append the builtin rules
	#[arg(long)]
	no_builtin: bool,

	/// Pretty-print the output tree
	#[arg(long)]
	pretty: bool,

	/// Log rule decisions to stderr
	#[arg(short, long)]
	verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
	/// List the builtin rules
	Builtins,
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display discovered configuration files and their rules
	Show,
	/// Check all config files for errors without processing anything
	Validate,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	// Handle subcommands
	if let Some(command) = &cli.command {
		return match command {
			Commands::Config { action } => match action {
				ConfigAction::Show => handle_config_show(),
				ConfigAction::Validate => handle_config_validate(),
			},
			Commands::Builtins => handle_builtins(),
		};
	}

	handle_process(&cli)
}

fn init_logging(verbose: bool) {
	let default_directive = if verbose { "debug" } else { "warn" };
	let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
		.unwrap_or_else(|_| EnvFilter::new(default_directive));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

fn handle_process(cli: &Cli) -> Result<ExitCode> {
	let merged = match &cli.config {
		Some(path) => load_single_config(path)?,
		None => {
			let cwd = std::env::current_dir().context("Failed to get current directory")?;
			load_merged_config(&cwd).context("Failed to load configuration")?
		}
	};

	let mut options = compile_rules(&merged).context("Failed to compile rules")?;
	if cli.no_builtin {
		options.use_builtin = false;
	}
	let processor = LinkProcessor::new(&options).context("Failed to set up link rules")?;
	tracing::debug!(
		rules = ?processor.chain().labels().collect::<Vec<_>>(),
		"resolved link rules"
	);

	let source = read_input(cli.input.as_deref())?;
	let mut tree: Node =
		serde_json::from_str(&source).context("Failed to parse syntax tree JSON")?;

	let rewritten = processor.process(&mut tree);
	tracing::debug!(rewritten, "processed syntax tree");

	let output = if cli.pretty {
		serde_json::to_string_pretty(&tree)
	} else {
		serde_json::to_string(&tree)
	}
	.context("Failed to serialize syntax tree")?;
	println!("{}", output);

	Ok(ExitCode::SUCCESS)
}

fn load_single_config(path: &Path) -> Result<MergedConfig> {
	let config = parse_config_file(path)
		.with_context(|| format!("Failed to load {}", path.display()))?;
	Ok(merge_configs(&[LoadedConfig {
		config,
		path: path.to_path_buf(),
	}]))
}

fn read_input(input: Option<&Path>) -> Result<String> {
	match input {
		Some(path) => std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read {}", path.display())),
		None => std::io::read_to_string(std::io::stdin()).context("Failed to read stdin"),
	}
}

fn handle_builtins() -> Result<ExitCode> {
	for name in builtin::NAMES {
		println!("{:<10} {}", name, builtin::describe(name).unwrap_or_default());
	}
	Ok(ExitCode::SUCCESS)
}

fn handle_config_show() -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let configs = discover_configs(&cwd).context("Failed to discover config files")?;

	if configs.is_empty() {
		println!("No configuration files found.");
		return Ok(ExitCode::SUCCESS);
	}

	println!("Configuration files (in cascade order):\n");

	for loaded in &configs {
		println!("# Source: {}", loaded.path.display());
		println!("# root: {}", loaded.config.root);
		println!("# no-external-lookup: {}", loaded.config.no_external_lookup);
		if let Some(use_builtin) = loaded.config.use_builtin {
			println!("# use-builtin: {}", use_builtin);
		}
		println!("# rules: {}", loaded.config.rules.len());
		println!();

		for (i, rule) in loaded.config.rules.iter().enumerate() {
			println!("  Rule {}:", i + 1);
			if let Some(ref name) = rule.name {
				println!("    name: {}", name);
			}
			if let Some(ref builtin) = rule.builtin {
				println!("    builtin: {}", builtin);
			}
			if let Some(ref prefix) = rule.prefix {
				println!("    prefix: {}", prefix);
			}
			if let Some(ref pattern) = rule.pattern {
				println!("    pattern: {}", pattern);
			}
			if let Some(ref class) = rule.add_class {
				println!("    add-class: {}", class);
			}
			for (key, value) in &rule.set {
				println!("    set {}: {}", key, value);
			}
			println!();
		}
	}

	let merged = merge_configs(&configs);
	println!("use-builtin (effective): {}", merged.use_builtin.unwrap_or(true));

	// Show user config path
	if let Ok(user_path) = user_config_path() {
		println!("User config path: {}", user_path.display());
		if user_path.exists() {
			println!("  (exists)");
		} else {
			println!("  (not found)");
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate() -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;

	let checked = discover_configs(&cwd).and_then(|configs| {
		let options = compile_rules(&merge_configs(&configs))?;
		LinkProcessor::new(&options)?;
		Ok(configs)
	});

	match checked {
		Ok(configs) => {
			if configs.is_empty() {
				println!("No configuration files found.");
			} else {
				println!("All configuration files are valid:");
				for loaded in &configs {
					println!(
						"  {} ({} rules)",
						loaded.path.display(),
						loaded.config.rules.len()
					);
				}
			}
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {}", e);
			Ok(ExitCode::FAILURE)
		}
	}
}
