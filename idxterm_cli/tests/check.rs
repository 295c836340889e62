mod common;

use idxterm_core::AnyEmptyResult;

#[test]
fn check_passes_for_clean_documents() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("widgets.dita"), common::WIDGETS_TOPIC)?;

	common::idxterm_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("scanned cleanly"))
		.stdout(predicates::str::contains("2 index term(s) collected from 1 file(s)"));

	Ok(())
}

#[test]
fn check_fails_on_malformed_language_attribute() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("widgets.dita"), common::WIDGETS_TOPIC)?;
	std::fs::write(
		tmp.path().join("broken.dita"),
		"<topic xml:lang=\"en\"><indexterm>lost</indexterm></topic>",
	)?;

	common::idxterm_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains(
			"error: broken.dita: scan failed: malformed language attribute: `en`",
		))
		.stderr(predicates::str::contains("1 problem(s) found in 2 file(s)"));

	Ok(())
}

#[test]
fn empty_terms_are_warnings_unless_strict() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("empty.dita"),
		"<topic><indexterm></indexterm></topic>",
	)?;

	common::idxterm_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stderr(predicates::str::contains("warning: empty.dita"));

	common::idxterm_cmd()
		.arg("check")
		.arg("--strict")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1);

	Ok(())
}

#[test]
fn check_ignores_excluded_paths() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::create_dir_all(tmp.path().join("out"))?;
	std::fs::write(
		tmp.path().join("idxterm.toml"),
		"[exclude]\npatterns = [\"out/\"]\n",
	)?;
	std::fs::write(
		tmp.path().join("out/broken.dita"),
		"<topic xml:lang=\"x\"/>",
	)?;

	common::idxterm_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	Ok(())
}
