#![allow(deprecated)] // assert_cmd::Command::cargo_bin is deprecated but replacement requires nightly

use predicates::prelude::*;
use std::fs;
use std::path::Path;

const TREE: &str = r#"{"type":"root","children":[{"type":"element","tagName":"p","properties":{},"children":[{"type":"element","tagName":"a","properties":{"href":"https://example.com"},"children":[{"type":"text","value":"Example"}]},{"type":"text","value":" and "},{"type":"element","tagName":"a","properties":{"href":"/about"},"children":[{"type":"text","value":"About"}]}]}]}"#;

/// A command isolated from any real user or parent config.
fn linkrules_cmd(dir: &Path) -> assert_cmd::Command {
	let mut cmd = assert_cmd::Command::cargo_bin("linkrules").unwrap();
	cmd.current_dir(dir).env("HOME", dir).env_remove("LINKRULES_LOG");
	cmd
}

fn link_tree(href: &str, text: &str) -> String {
	format!(
		r#"{{"type":"root","children":[{{"type":"element","tagName":"a","properties":{{"href":"{href}"}},"children":[{{"type":"text","value":"{text}"}}]}}]}}"#
	)
}

// ============================================================================
// CLI flag tests
// ============================================================================

#[test]
fn test_help_flag() {
	let temp_dir = tempfile::tempdir().unwrap();
	linkrules_cmd(temp_dir.path())
		.arg("--help")
		.assert()
		.success()
		.stdout(predicate::str::contains("Rewrite hyperlinks"));
}

#[test]
fn test_version_flag() {
	let temp_dir = tempfile::tempdir().unwrap();
	linkrules_cmd(temp_dir.path())
		.arg("--version")
		.assert()
		.success()
		.stdout(predicate::str::contains("linkrules"));
}

#[test]
fn test_builtins_listed_in_order() {
	let temp_dir = tempfile::tempdir().unwrap();
	linkrules_cmd(temp_dir.path())
		.arg("builtins")
		.assert()
		.success()
		.stdout(predicate::str::is_match(r"(?s)external.*download.*same-page").unwrap());
}

// ============================================================================
// Processing tests
// ============================================================================

#[test]
fn test_builtin_rules_applied_from_stdin() {
	let temp_dir = tempfile::tempdir().unwrap();
	linkrules_cmd(temp_dir.path())
		.write_stdin(TREE)
		.assert()
		.success()
		.stdout(predicate::str::contains(r#""target":"_blank""#))
		.stdout(predicate::str::contains(r#""className":["external"]"#))
		.stdout(predicate::str::contains(
			r#""rel":["external","nofollow","noopener"]"#,
		))
		.stdout(predicate::str::contains(
			r#"{"type":"element","tagName":"a","properties":{"href":"/about"},"children":[{"type":"text","value":"About"}]}"#,
		));
}

#[test]
fn test_input_file_and_pretty_output() {
	let temp_dir = tempfile::tempdir().unwrap();
	let input_path = temp_dir.path().join("tree.json");
	fs::write(&input_path, link_tree("/files/report.pdf", "Report")).unwrap();

	linkrules_cmd(temp_dir.path())
		.args(["--pretty", "tree.json"])
		.assert()
		.success()
		.stdout(predicate::str::contains("\"download\": \"report.pdf\""))
		.stdout(predicate::str::contains("\"download\"\n"));
}

#[test]
fn test_prefixed_text_stripped() {
	let temp_dir = tempfile::tempdir().unwrap();
	linkrules_cmd(temp_dir.path())
		.write_stdin(link_tree("/discussion", "external:Discussion on Github"))
		.assert()
		.success()
		.stdout(predicate::str::contains(r#""value":"Discussion on Github""#))
		.stdout(predicate::str::contains(r#""href":"/discussion""#))
		.stdout(predicate::str::contains("external:").not());
}

#[test]
fn test_no_builtin_leaves_tree_unchanged_and_warns_once() {
	let temp_dir = tempfile::tempdir().unwrap();
	linkrules_cmd(temp_dir.path())
		.arg("--no-builtin")
		.write_stdin(TREE)
		.assert()
		.success()
		.stdout(predicate::str::diff(format!("{TREE}\n")))
		.stderr(predicate::str::contains("no link rules configured").count(1));
}

#[test]
fn test_unmatched_nodes_round_trip_with_positions() {
	let temp_dir = tempfile::tempdir().unwrap();
	let input = r#"{"type":"root","children":[{"type":"element","tagName":"a","properties":{"href":"/about"},"children":[{"type":"text","value":"About","position":{"start":{"line":1,"column":4,"offset":3},"end":{"line":1,"column":9,"offset":8}}}],"position":{"start":{"line":1,"column":1,"offset":0},"end":{"line":1,"column":13,"offset":12}}},{"type":"raw","value":"<b>x</b>"}],"data":{"quirksMode":false}}"#;

	linkrules_cmd(temp_dir.path())
		.write_stdin(input)
		.assert()
		.success()
		.stdout(predicate::str::diff(format!("{input}\n")));
}

#[test]
fn test_invalid_tree_json() {
	let temp_dir = tempfile::tempdir().unwrap();
	linkrules_cmd(temp_dir.path())
		.write_stdin("{not json")
		.assert()
		.failure()
		.stderr(predicate::str::contains("Failed to parse syntax tree JSON"));
}

// ============================================================================
// Config-driven processing tests
// ============================================================================

#[test]
fn test_discovered_config_rules_run_first() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(
		temp_dir.path().join(".linkrules.toml"),
		r#"
root = true

[[rules]]
pattern = "^https://example\\.com"
add-class = "partner"
set = { "data-partner" = true }
"#,
	)
	.unwrap();

	linkrules_cmd(temp_dir.path())
		.write_stdin(TREE)
		.assert()
		.success()
		.stdout(predicate::str::contains(r#""className":["partner"]"#))
		.stdout(predicate::str::contains(r#""data-partner":true"#))
		.stdout(predicate::str::contains("_blank").not());
}

#[test]
fn test_config_disables_builtins() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(
		temp_dir.path().join(".linkrules.toml"),
		r#"
use-builtin = false

[[rules]]
builtin = "same-page"
"#,
	)
	.unwrap();

	linkrules_cmd(temp_dir.path())
		.write_stdin(link_tree("https://example.com", "x"))
		.assert()
		.success()
		.stdout(predicate::str::contains("external").not());

	linkrules_cmd(temp_dir.path())
		.write_stdin(link_tree("#top", "Top"))
		.assert()
		.success()
		.stdout(predicate::str::contains(r#""className":["same-page"]"#));
}

#[test]
fn test_explicit_config_flag() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = temp_dir.path().join("rules.toml");
	fs::write(
		&config_path,
		r#"
[[rules]]
prefix = "docs:"
add-class = "docs"
"#,
	)
	.unwrap();

	linkrules_cmd(temp_dir.path())
		.args(["--config", "rules.toml"])
		.write_stdin(link_tree("/guide", "docs:Guide"))
		.assert()
		.success()
		.stdout(predicate::str::contains(r#""className":["docs"]"#))
		.stdout(predicate::str::contains(r#""value":"Guide""#));
}

#[test]
fn test_unknown_builtin_fails_at_setup() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(
		temp_dir.path().join(".linkrules.toml"),
		r#"
[[rules]]
builtin = "intranet"
"#,
	)
	.unwrap();

	linkrules_cmd(temp_dir.path())
		.write_stdin(TREE)
		.assert()
		.failure()
		.stdout(predicate::str::is_empty())
		.stderr(predicate::str::contains("Unknown builtin rule: intranet"));
}

// ============================================================================
// config subcommand tests
// ============================================================================

#[test]
fn test_config_validate_no_config() {
	let temp_dir = tempfile::tempdir().unwrap();

	linkrules_cmd(temp_dir.path())
		.args(["config", "validate"])
		.assert()
		.success()
		.stdout(predicate::str::contains("No configuration files found"));
}

#[test]
fn test_config_validate_valid_config() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(
		temp_dir.path().join(".linkrules.toml"),
		r#"
root = true

[[rules]]
builtin = "external"
"#,
	)
	.unwrap();

	linkrules_cmd(temp_dir.path())
		.args(["config", "validate"])
		.assert()
		.success()
		.stdout(predicate::str::contains("valid"));
}

#[test]
fn test_config_validate_invalid_config() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(temp_dir.path().join(".linkrules.toml"), "invalid toml [[[").unwrap();

	linkrules_cmd(temp_dir.path())
		.args(["config", "validate"])
		.assert()
		.failure();
}

#[test]
fn test_config_validate_invalid_pattern() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(
		temp_dir.path().join(".linkrules.toml"),
		r#"
[[rules]]
pattern = "[unclosed"
"#,
	)
	.unwrap();

	linkrules_cmd(temp_dir.path())
		.args(["config", "validate"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("Invalid regex pattern"));
}

#[test]
fn test_config_show_displays_config() {
	let temp_dir = tempfile::tempdir().unwrap();
	fs::write(
		temp_dir.path().join(".linkrules.toml"),
		r#"
root = true

[[rules]]
name = "docs"
prefix = "docs:"
add-class = "docs"
"#,
	)
	.unwrap();

	linkrules_cmd(temp_dir.path())
		.args(["config", "show"])
		.assert()
		.success()
		.stdout(predicate::str::contains("prefix: docs:"))
		.stdout(predicate::str::contains("add-class: docs"))
		.stdout(predicate::str::contains("use-builtin (effective): true"));
}
