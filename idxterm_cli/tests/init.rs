mod common;

use idxterm_core::AnyEmptyResult;

#[test]
fn init_creates_config_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::idxterm_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Created"));

	let config_path = tmp.path().join("idxterm.toml");
	assert!(config_path.is_file());

	// Everything is commented out, so the file parses to the defaults.
	let content = std::fs::read_to_string(&config_path)?;
	let config = idxterm_core::config::IdxConfig::parse(&content)?;
	assert_eq!(config.elements.term, "indexterm");

	Ok(())
}

#[test]
fn init_is_a_no_op_when_config_exists() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::create_dir_all(tmp.path().join(".config"))?;
	std::fs::write(tmp.path().join(".config/idxterm.toml"), "# custom\n")?;

	common::idxterm_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("already exists"));

	assert!(!tmp.path().join("idxterm.toml").exists());

	Ok(())
}

#[test]
fn missing_subcommand_exits_with_usage_hint() {
	common::idxterm_cmd()
		.assert()
		.code(1)
		.stderr(predicates::str::contains("idxterm --help"));
}
