#![allow(dead_code)]

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn idxterm_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("idxterm"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("RUST_LOG");
	cmd
}

pub const WIDGETS_TOPIC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<concept id="widgets" xml:lang="en-US">
  <title>Widget basics</title>
  <conbody>
    <p><indexterm>widgets<indexterm>gears</indexterm></indexterm></p>
  </conbody>
</concept>
"#;

pub const LEVERS_TOPIC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<concept id="levers">
  <conbody>
    <p><indexterm>widgets<indexterm>levers</indexterm></indexterm></p>
  </conbody>
</concept>
"#;
