use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use mrz_core::DocumentRecord;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Generate and verify machine readable zones for ICAO 9303 travel documents.",
	long_about = "mrz computes the Machine Readable Zone printed on passports (TD3, 2x44) and \
	              identity cards (TD1, 3x30) from the holder's identity fields, check digits \
	              included.\n\nQuick start:\n  mrz init    Create a sample config and record\n  \
	              mrz encode  Encode a record\n  mrz verify  Check the digits of an existing zone"
)]
pub struct MrzCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory, used to discover `mrz.toml`.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Create a sample `mrz.toml` and `record.toml`.
	///
	/// Existing files are left untouched.
	Init,
	/// Encode one or more document records into machine readable zones.
	///
	/// Fields come from `--record` and/or the individual field flags, which
	/// take precedence for single-record files. Fields left empty are filled
	/// from the `[defaults]` section of `mrz.toml`.
	Encode {
		/// Record file (json, toml, yaml) holding one record or a `records`
		/// list.
		#[arg(long, short)]
		record: Option<PathBuf>,

		/// Document format: `td3` (passport) or `td1` (identity card).
		/// Defaults to the `format` in `mrz.toml`, then `td3`.
		#[arg(long, short)]
		format: Option<String>,

		/// Output format for encoded zones.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		output: OutputFormat,

		/// Also print the computed check digits in text output.
		#[arg(long, default_value_t = false)]
		digits: bool,

		#[command(flatten)]
		fields: RecordFields,
	},
	/// Recompute the check digits of an existing machine readable zone.
	///
	/// Lines are read from the arguments, or from stdin when none are given.
	/// Exits with a non-zero status code if any digit does not match.
	Verify {
		/// The zone's lines, top to bottom.
		lines: Vec<String>,

		/// Also compare the zone against the one encoded from this record.
		#[arg(long, short)]
		record: Option<PathBuf>,

		/// Show a line diff between the supplied and the encoded zone. Only
		/// used with `--record`.
		#[arg(long, default_value_t = false)]
		diff: bool,

		/// Output format for verification results.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		output: OutputFormat,
	},
}

/// Per-field overrides for `mrz encode`.
#[derive(Debug, Clone, Default, Args)]
pub struct RecordFields {
	/// Document code, e.g. `P` or `ID`.
	#[arg(long)]
	pub document_type: Option<String>,
	/// Issuing state code, e.g. `UTO`.
	#[arg(long)]
	pub issuing_country: Option<String>,
	/// Nationality code, e.g. `UTO`.
	#[arg(long)]
	pub nationality: Option<String>,
	#[arg(long)]
	pub surname: Option<String>,
	#[arg(long)]
	pub given_names: Option<String>,
	#[arg(long)]
	pub document_number: Option<String>,
	/// Date of birth as `DDMMYY`.
	#[arg(long)]
	pub birth_date: Option<String>,
	/// Date of expiry as `DDMMYY`.
	#[arg(long)]
	pub expiry_date: Option<String>,
	/// `M`, `F` or `<`.
	#[arg(long)]
	pub sex: Option<String>,
	#[arg(long)]
	pub optional_data: Option<String>,
}

impl RecordFields {
	/// Returns true if no field flag was given.
	pub fn is_empty(&self) -> bool {
		self.document_type.is_none()
			&& self.issuing_country.is_none()
			&& self.nationality.is_none()
			&& self.surname.is_none()
			&& self.given_names.is_none()
			&& self.document_number.is_none()
			&& self.birth_date.is_none()
			&& self.expiry_date.is_none()
			&& self.sex.is_none()
			&& self.optional_data.is_none()
	}

	/// Overwrite the fields of `record` that were given on the command line.
	pub fn apply(&self, record: &mut DocumentRecord) {
		let pairs = [
			(&mut record.document_type, &self.document_type),
			(&mut record.issuing_country, &self.issuing_country),
			(&mut record.nationality, &self.nationality),
			(&mut record.surname, &self.surname),
			(&mut record.given_names, &self.given_names),
			(&mut record.document_number, &self.document_number),
			(&mut record.birth_date, &self.birth_date),
			(&mut record.expiry_date, &self.expiry_date),
			(&mut record.sex, &self.sex),
			(&mut record.optional_data, &self.optional_data),
		];

		for (field, value) in pairs {
			if let Some(value) = value {
				field.clone_from(value);
			}
		}
	}
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
