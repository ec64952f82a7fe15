use docport_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;
use rstest::rstest;
use similar_asserts::assert_eq;

mod common;

use common::docport_cmd;
use common::mintlify_tree;
use common::write_file;

#[test]
fn migrate_writes_converted_tree() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	mintlify_tree(tmp.path())?;

	docport_cmd()
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"Starting Mintlify to Docusaurus migration...",
		))
		.stdout(predicates::str::contains(
			"Migrating: introduction.mdx -> introduction.md",
		))
		.stdout(predicates::str::contains(
			"Migrating: guides/setup.mdx -> guides/setup.md",
		))
		.stdout(predicates::str::contains("Migration complete: 3 file(s)"));

	let docs = tmp.path().join("docusaurus/docs");
	let intro = std::fs::read_to_string(docs.join("introduction.md"))?;
	assert_eq!(intro, "---\ntitle: Intro\n---\n\n:::note\n\nRead this first.\n:::\n\n");

	let setup = std::fs::read_to_string(docs.join("guides/setup.md"))?;
	assert_eq!(
		setup,
		"---\ntitle: Setup\nsidebar_position: 1\n---\n\nSee [install](./install.md).\n"
	);

	let usage = std::fs::read_to_string(docs.join("guides/usage.md"))?;
	assert!(usage.starts_with("---\ntitle: Usage\nsidebar_position: 9\n---\n\n"));
	assert!(usage.contains(":::tip"));
	assert!(!docs.join("guides/diagram.png").exists());

	Ok(())
}

#[test]
fn migrate_honors_out_directory() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let out = tempfile::tempdir()?;
	mintlify_tree(tmp.path())?;

	docport_cmd()
		.arg("--path")
		.arg(tmp.path())
		.arg("--out")
		.arg(out.path())
		.assert()
		.success();

	assert!(out.path().join("introduction.md").is_file());
	assert!(out.path().join("guides/usage.md").is_file());
	assert!(!tmp.path().join("docusaurus").exists());

	Ok(())
}

#[test]
fn migrate_empty_tree_succeeds() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	docport_cmd()
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Migration complete: 0 file(s)"));

	Ok(())
}

#[rstest]
#[case::text(&["--dry-run"])]
#[case::diff(&["--dry-run", "--diff"])]
#[case::json(&["--dry-run", "--format", "json"])]
fn dry_run_does_not_write(#[case] flags: &[&str]) -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	mintlify_tree(tmp.path())?;

	docport_cmd()
		.args(flags)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Migrating:").not());

	assert!(!tmp.path().join("docusaurus").exists());

	Ok(())
}

#[test]
fn dry_run_lists_plan_with_positions() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	mintlify_tree(tmp.path())?;
	write_file(tmp.path(), "guides/advanced/tuning.mdx", "# Tuning\n")?;

	let output = docport_cmd()
		.arg("--dry-run")
		.arg("--path")
		.arg(tmp.path())
		.output()?;
	assert!(output.status.success());

	let stdout = String::from_utf8(output.stdout)?;
	insta::assert_snapshot!(stdout, @r"
	Dry run: would migrate 4 file(s):
	  introduction.mdx -> introduction.md
	  guides/advanced/tuning.mdx -> guides/advanced/tuning.md (sidebar_position: 1)
	  guides/setup.mdx -> guides/setup.md (sidebar_position: 2)
	  guides/usage.md -> guides/usage.md (sidebar_position: 3)
	");

	Ok(())
}

#[test]
fn dry_run_diff_shows_converted_lines() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	mintlify_tree(tmp.path())?;

	docport_cmd()
		.arg("--dry-run")
		.arg("--diff")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("-icon: \"rocket\""))
		.stdout(predicates::str::contains("+:::note"));

	assert!(!tmp.path().join("docusaurus").exists());

	Ok(())
}

#[test]
fn diff_requires_dry_run() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	docport_cmd()
		.arg("--diff")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.failure();

	Ok(())
}

#[test]
fn dry_run_json_lists_entries() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	mintlify_tree(tmp.path())?;

	let output = docport_cmd()
		.arg("--dry-run")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.output()?;
	assert!(output.status.success());

	let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(json["dry_run"], serde_json::Value::Bool(true));

	let entries = json["entries"]
		.as_array()
		.unwrap_or_else(|| panic!("entries should be an array: {json}"));
	assert_eq!(entries.len(), 3);
	assert_eq!(entries[0]["source"], "introduction.mdx");
	assert_eq!(entries[0]["destination"], "introduction.md");
	assert!(entries[0]["sidebar_position"].is_null());
	assert_eq!(entries[1]["source"], "guides/setup.mdx");
	assert_eq!(entries[1]["sidebar_position"], 1);
	assert_eq!(entries[2]["sidebar_position"], 2);

	Ok(())
}

#[test]
fn migrate_json_reports_written_entries() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	mintlify_tree(tmp.path())?;

	let output = docport_cmd()
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.output()?;
	assert!(output.status.success());

	let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(json["dry_run"], serde_json::Value::Bool(false));
	assert_eq!(json["entries"].as_array().map(Vec::len), Some(3));
	assert!(tmp.path().join("docusaurus/docs/introduction.md").is_file());

	Ok(())
}

#[test]
fn config_file_overrides_categories() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	mintlify_tree(tmp.path())?;
	write_file(tmp.path(), "api/users.mdx", "# Users\n")?;
	write_file(
		tmp.path(),
		"docport.toml",
		"categories = [\"api\"]\nmappings = []\n",
	)?;

	docport_cmd()
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Migration complete: 1 file(s)"));

	let users = std::fs::read_to_string(tmp.path().join("docusaurus/docs/api/users.md"))?;
	assert_eq!(users, "# Users\n");
	assert!(!tmp.path().join("docusaurus/docs/guides").exists());

	Ok(())
}

#[test]
fn invalid_config_exits_with_diagnostic() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_file(tmp.path(), "docport.toml", "unknown_key = true\n")?;

	docport_cmd()
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("failed to parse config file"));

	Ok(())
}
