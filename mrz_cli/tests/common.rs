#![allow(dead_code)]

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub const HULTON_TD3: [&str; 2] = [
	"P<USAHULTON<<DAVID<NAKAMURA<<<<<<<<<<<<<<<<<",
	"A099139827USA8303198M3301188534397504<287216",
];

pub const HULTON_RECORD: &str = "document_type = \"P\"\nissuing_country = \"USA\"\nnationality = \
                                 \"USA\"\nsurname = \"Hulton\"\ngiven_names = \"David \
                                 Nakamura\"\ndocument_number = \"A09913982\"\nbirth_date = \
                                 \"190383\"\nexpiry_date = \"180133\"\nsex = \"M\"\noptional_data \
                                 = \"534397504<2872\"\n";

pub fn mrz_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("mrz"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("RUST_LOG");
	cmd
}
