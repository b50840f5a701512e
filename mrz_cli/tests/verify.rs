mod common;

use mrz_core::AnyEmptyResult;
use serde_json::Value;

#[test]
fn verify_passes_for_valid_zone() -> AnyEmptyResult {
	common::mrz_cmd()
		.arg("verify")
		.args(common::HULTON_TD3)
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"all 5 check digits of the TD3 zone are valid",
		));

	Ok(())
}

#[test]
fn verify_reads_stdin() -> AnyEmptyResult {
	common::mrz_cmd()
		.arg("verify")
		.write_stdin(
			"I<UTOD231458907<<<<<<<<<<<<<<<\n7408122F1204159UTO<<<<<<<<<<<1\nERIKSSON<<ANNA<MARIA<<<<<<<<<<\n\n",
		)
		.assert()
		.success()
		.stdout(predicates::str::contains("TD1 zone are valid"));

	Ok(())
}

#[test]
fn verify_fails_for_tampered_digit() -> AnyEmptyResult {
	common::mrz_cmd()
		.arg("verify")
		.arg(common::HULTON_TD3[0])
		.arg("A099139827USA8303198M3301188534397504<287219")
		.assert()
		.code(1)
		.stderr(predicates::str::contains(
			"composite check digit at 2:44: expected 6, found 9",
		));

	Ok(())
}

#[test]
fn verify_rejects_malformed_zone() -> AnyEmptyResult {
	common::mrz_cmd()
		.arg("verify")
		.arg("P<USAHULTON")
		.assert()
		.code(2)
		.stderr(predicates::str::contains("malformed machine readable zone"));

	Ok(())
}

#[test]
fn verify_compares_against_record() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let record = tmp.path().join("record.toml");
	std::fs::write(&record, common::HULTON_RECORD)?;

	common::mrz_cmd()
		.arg("verify")
		.arg("--path")
		.arg(tmp.path())
		.arg("--record")
		.arg(&record)
		.args(common::HULTON_TD3)
		.assert()
		.success()
		.stdout(predicates::str::contains("The zone matches the record."));

	Ok(())
}

#[test]
fn verify_shows_diff_against_record() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let record = tmp.path().join("record.toml");
	std::fs::write(&record, common::HULTON_RECORD)?;

	common::mrz_cmd()
		.arg("verify")
		.arg("--path")
		.arg(tmp.path())
		.arg("--record")
		.arg(&record)
		.arg("--diff")
		.arg("P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<")
		.arg("L898902C36UTO7408122F1204159ZE184226B<<<<<10")
		.assert()
		.code(1)
		.stderr(predicates::str::contains("differs from the one encoded"))
		.stderr(predicates::str::contains(
			"-P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<",
		))
		.stderr(predicates::str::contains(format!(
			"+{}",
			common::HULTON_TD3[0]
		)));

	Ok(())
}

#[test]
fn verify_json_output() -> AnyEmptyResult {
	let output = common::mrz_cmd()
		.arg("verify")
		.args(["--output", "json"])
		.arg(common::HULTON_TD3[0])
		.arg("A099139827USA8303198M3301188534397504<287219")
		.output()?;

	assert_eq!(output.status.code(), Some(1));
	let value: Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(value["ok"], false);
	assert_eq!(value["format"], "TD3");
	assert_eq!(value["checks"][4]["field"], "composite");
	assert_eq!(value["checks"][4]["expected"], "6");
	assert_eq!(value["checks"][4]["found"], "9");
	assert!(value.get("matches_record").is_none());

	Ok(())
}
