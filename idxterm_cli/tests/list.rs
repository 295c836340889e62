mod common;

use idxterm_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;
use serde_json::Value;

#[test]
fn list_prints_the_merged_term_tree() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::create_dir_all(tmp.path().join("topics"))?;
	std::fs::write(tmp.path().join("topics/widgets.dita"), common::WIDGETS_TOPIC)?;
	std::fs::write(tmp.path().join("topics/levers.dita"), common::LEVERS_TOPIC)?;

	let output = common::idxterm_cmd()
		.arg("list")
		.arg("--path")
		.arg(tmp.path())
		.output()?;

	assert!(output.status.success());
	let stdout = String::from_utf8(output.stdout)?;
	let expected = "widgets\n  -> topics/levers.dita\n  -> Widget basics (topics/widgets.dita)\n  \
	                levers\n    -> topics/levers.dita\n  gears\n    -> Widget basics \
	                (topics/widgets.dita)\n\n3 index term(s) in 2 file(s)\nLocale: en-US\n";
	assert_eq!(stdout, expected);

	Ok(())
}

#[test]
fn list_json_includes_locale_and_terms() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("widgets.dita"), common::WIDGETS_TOPIC)?;

	let output = common::idxterm_cmd()
		.arg("list")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.output()?;

	assert!(output.status.success());
	let json: Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(json["locale"], "en-US");
	assert_eq!(json["files"], 1);
	assert_eq!(json["term_count"], 2);
	assert_eq!(json["terms"][0]["name"], "widgets");
	assert_eq!(json["terms"][0]["sub_terms"][0]["name"], "gears");
	assert_eq!(
		json["terms"][0]["targets"][0]["target_name"],
		"Widget basics"
	);
	assert_eq!(
		json["terms"][0]["targets"][0]["target_uri"],
		"widgets.dita"
	);

	Ok(())
}

#[test]
fn list_with_no_documents() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::idxterm_cmd()
		.arg("list")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("No index terms found."))
		.stdout(predicates::str::contains("Locale: (none)"));

	Ok(())
}

#[test]
fn list_respects_configured_element_names() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("idxterm.toml"),
		"extensions = [\"xml\"]\n\n[elements]\nterm = \"term\"\n",
	)?;
	std::fs::write(
		tmp.path().join("guide.xml"),
		"<guide><term>configured</term><indexterm>default</indexterm></guide>",
	)?;
	std::fs::write(
		tmp.path().join("skipped.dita"),
		"<topic><term>skipped</term></topic>",
	)?;

	common::idxterm_cmd()
		.arg("list")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("configured"))
		.stdout(predicates::str::contains("default").not())
		.stdout(predicates::str::contains("skipped").not())
		.stdout(predicates::str::contains("1 index term(s) in 1 file(s)"));

	Ok(())
}

#[test]
fn invalid_config_is_reported_through_miette() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("idxterm.toml"), "[elements\n")?;

	common::idxterm_cmd()
		.arg("list")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("idxterm::config_parse"));

	Ok(())
}
