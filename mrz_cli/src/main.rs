use std::io::BufRead;
use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use mrz_cli::Commands;
use mrz_cli::MrzCli;
use mrz_cli::OutputFormat;
use mrz_cli::RecordFields;
use mrz_core::AnyEmptyResult;
use mrz_core::AnyResult;
use mrz_core::CheckDigitReport;
use mrz_core::DocumentRecord;
use mrz_core::EncodedMrz;
use mrz_core::MrzFormat;
use mrz_core::config::MrzConfig;
use mrz_core::config::load_records;
use mrz_core::encode;
use mrz_core::verify;
use owo_colors::OwoColorize;
use serde::Serialize;
use similar::ChangeTag;
use similar::TextDiff;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
}

const SAMPLE_CONFIG: &str = "# mrz configuration\n\n# Format used when `--format` is not given: \
                             \"td3\" (passport) or \"td1\" (identity card).\nformat = \
                             \"td3\"\n\n# Values used for any record field left empty.\n# \
                             [defaults]\n# document_type = \"P\"\n# issuing_country = \
                             \"UTO\"\n# nationality = \"UTO\"\n";

const SAMPLE_RECORD: &str = "document_type = \"P\"\nissuing_country = \"USA\"\nnationality = \
                             \"USA\"\nsurname = \"Hulton\"\ngiven_names = \"David \
                             Nakamura\"\ndocument_number = \"A09913982\"\n# DDMMYY\nbirth_date = \
                             \"190383\"\nexpiry_date = \"180133\"\nsex = \"M\"\noptional_data = \
                             \"534397504<2872\"\n";

fn main() {
	let args = MrzCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Init) => run_init(&args),
		Some(Commands::Encode {
			record,
			format,
			output,
			digits,
			fields,
		}) => run_encode(
			&args,
			record.as_deref(),
			format.as_deref(),
			*output,
			*digits,
			fields,
		),
		Some(Commands::Verify {
			lines,
			record,
			diff,
			output,
		}) => run_verify(&args, lines, record.as_deref(), *diff, *output),
		None => {
			eprintln!("No subcommand specified. Run `mrz --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<mrz_core::MrzError>() {
			Ok(mrz_err) => {
				let report: miette::Report = (*mrz_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_filter = if verbose { "mrz_core=debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.without_time()
		.try_init();
}

fn resolve_root(args: &MrzCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn load_config(args: &MrzCli) -> AnyResult<MrzConfig> {
	let root = resolve_root(args);
	Ok(MrzConfig::load(&root)?.unwrap_or_default())
}

fn run_init(args: &MrzCli) -> AnyEmptyResult {
	let root = resolve_root(args);
	let config_path = root.join("mrz.toml");
	let record_path = root.join("record.toml");

	if config_path.exists() {
		println!("Config file already exists: {}", config_path.display());
	} else {
		std::fs::write(&config_path, SAMPLE_CONFIG)?;
		println!("Created config file: {}", config_path.display());
	}

	if record_path.exists() {
		println!("Record file already exists: {}", record_path.display());
	} else {
		std::fs::write(&record_path, SAMPLE_RECORD)?;
		println!("Created record file: {}", record_path.display());
		println!();
		println!("Next steps:");
		println!("  1. Edit {} with the holder's details", record_path.display());
		println!("  2. Run `mrz encode --record {}`", record_path.display());
	}

	Ok(())
}

fn run_encode(
	args: &MrzCli,
	record_path: Option<&Path>,
	format: Option<&str>,
	output: OutputFormat,
	show_digits: bool,
	fields: &RecordFields,
) -> AnyEmptyResult {
	let config = load_config(args)?;
	let format = match format {
		Some(name) => name.parse::<MrzFormat>()?,
		None => config.default_format()?.unwrap_or(MrzFormat::Td3),
	};

	let mut records = match record_path {
		Some(path) => load_records(path)?,
		None if fields.is_empty() => {
			return Err("no record given: pass `--record <FILE>` or field flags such as \
			            `--surname`"
				.into());
		}
		None => vec![DocumentRecord::default()],
	};

	if !fields.is_empty() {
		let count = records.len();
		let [record] = records.as_mut_slice() else {
			return Err(format!(
				"field flags can only be combined with a single record, the record file holds \
				 {count}"
			)
			.into());
		};
		fields.apply(record);
	}

	let encoded: Vec<EncodedMrz> = records
		.into_iter()
		.map(|record| encode(&record.with_defaults(&config.defaults), format))
		.collect();

	match output {
		OutputFormat::Json => {
			let value = match encoded.as_slice() {
				[single] => serde_json::to_value(single)?,
				many => serde_json::to_value(many)?,
			};
			println!("{value}");
		}
		OutputFormat::Text => {
			for (index, mrz) in encoded.iter().enumerate() {
				if index > 0 {
					println!();
				}
				println!("{mrz}");
				if show_digits {
					print_check_digits(mrz);
				}
			}
		}
	}

	Ok(())
}

fn print_check_digits(mrz: &EncodedMrz) {
	let digits = &mrz.check_digits;
	println!("  document number: {}", digits.document_number);
	println!("  birth date:      {}", digits.birth_date);
	println!("  expiry date:     {}", digits.expiry_date);
	if let Some(optional) = digits.optional_data {
		println!("  optional data:   {optional}");
	}
	println!("  composite:       {}", digits.composite);
}

#[derive(Serialize)]
struct VerifyReport<'a> {
	ok: bool,
	format: MrzFormat,
	checks: &'a [CheckDigitReport],
	#[serde(skip_serializing_if = "Option::is_none")]
	matches_record: Option<bool>,
}

fn run_verify(
	args: &MrzCli,
	lines: &[String],
	record_path: Option<&Path>,
	show_diff: bool,
	output: OutputFormat,
) -> AnyEmptyResult {
	let lines = if lines.is_empty() {
		read_stdin_lines()?
	} else {
		lines.to_vec()
	};
	let lines: Vec<&str> = lines.iter().map(|line| line.trim()).collect();

	let verification = verify(&lines)?;

	let expected = match record_path {
		Some(path) => Some(encode_single_record(args, path, verification.format)?),
		None => None,
	};
	let matches_record = expected
		.as_ref()
		.map(|mrz| mrz.line_strs() == lines);

	let ok = verification.is_ok() && matches_record != Some(false);

	match output {
		OutputFormat::Json => {
			let report = VerifyReport {
				ok,
				format: verification.format,
				checks: &verification.checks,
				matches_record,
			};
			println!("{}", serde_json::to_string(&report)?);
		}
		OutputFormat::Text => {
			if verification.is_ok() {
				println!(
					"{} all {} check digits of the {} zone are valid.",
					colored!("Verification passed:", green),
					verification.checks.len(),
					verification.format
				);
			} else {
				eprintln!("{}", colored!("Verification failed.", red));
				for check in verification.mismatches() {
					eprintln!(
						"  {} check digit at {}:{}: expected {}, found {}",
						check.field, check.line, check.column, check.expected, check.found
					);
				}
			}

			if let (Some(mrz), Some(false)) = (&expected, matches_record) {
				eprintln!(
					"{} the zone differs from the one encoded from the record.",
					colored!("warning:", yellow)
				);
				if show_diff {
					print_diff(&lines.join("\n"), &mrz.to_string());
				}
			} else if matches_record == Some(true) {
				println!("The zone matches the record.");
			}
		}
	}

	if !ok {
		process::exit(1);
	}

	Ok(())
}

fn read_stdin_lines() -> AnyResult<Vec<String>> {
	let mut lines = Vec::new();
	for line in std::io::stdin().lock().lines() {
		let line = line?;
		if !line.trim().is_empty() {
			lines.push(line);
		}
	}

	Ok(lines)
}

fn encode_single_record(args: &MrzCli, path: &Path, format: MrzFormat) -> AnyResult<EncodedMrz> {
	let config = load_config(args)?;
	let records = load_records(path)?;
	let [record] = records.as_slice() else {
		return Err(format!(
			"comparison needs exactly one record, `{}` holds {}",
			path.display(),
			records.len()
		)
		.into());
	};

	Ok(encode(&record.clone().with_defaults(&config.defaults), format))
}

fn print_diff(current: &str, expected: &str) {
	let current = format!("{current}\n");
	let expected = format!("{expected}\n");
	let diff = TextDiff::from_lines(&current, &expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				eprint!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				eprint!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				eprint!("   {change}");
			}
		}
	}
}
