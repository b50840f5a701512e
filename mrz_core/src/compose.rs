//! Lay out sanitized fields and check digits into fixed-width lines.
//!
//! Each field is fitted to its own width before it is joined to its
//! neighbours, so an oversized value can never shift the columns that follow
//! it or push a check digit out of the line.

use crate::CheckDigits;
use crate::DocumentRecord;
use crate::EncodedMrz;
use crate::MrzFormat;
use crate::MrzLine;
use crate::MrzResult;
use crate::check_digit::check_digit;
use crate::sanitize::FILLER;
use crate::sanitize::fit;
use crate::sanitize::reformat_date;
use crate::sanitize::sanitize;
use crate::sanitize::sanitize_name;
use crate::sanitize::sanitize_sex;

/// Document codes occupy two columns: `P` becomes `P<`, `ID` stays `ID`.
pub const DOCUMENT_TYPE_WIDTH: usize = 2;
pub const COUNTRY_WIDTH: usize = 3;
pub const DOCUMENT_NUMBER_WIDTH: usize = 9;
pub const DATE_WIDTH: usize = 6;
pub const TD3_OPTIONAL_WIDTH: usize = 14;
pub const TD1_LINE1_OPTIONAL_WIDTH: usize = 15;
pub const TD1_LINE2_OPTIONAL_WIDTH: usize = 11;

/// The record's fields after sanitizing and fitting, shared by both formats.
struct Fields {
	document_type: String,
	issuing_country: String,
	nationality: String,
	names: String,
	document_number: String,
	birth_date: String,
	expiry_date: String,
	sex: char,
}

impl Fields {
	fn new(record: &DocumentRecord) -> Self {
		let surname = sanitize_name(&record.surname);
		let given_names = sanitize_name(&record.given_names);

		Self {
			document_type: fit(&sanitize(&record.document_type), DOCUMENT_TYPE_WIDTH),
			issuing_country: fit(&sanitize(&record.issuing_country), COUNTRY_WIDTH),
			nationality: fit(&sanitize(&record.nationality), COUNTRY_WIDTH),
			names: format!("{surname}{FILLER}{FILLER}{given_names}"),
			document_number: fit(&sanitize(&record.document_number), DOCUMENT_NUMBER_WIDTH),
			birth_date: fit(&reformat_date(&record.birth_date), DATE_WIDTH),
			expiry_date: fit(&reformat_date(&record.expiry_date), DATE_WIDTH),
			sex: sanitize_sex(&record.sex),
		}
	}
}

/// Encode `record` in the given format.
#[tracing::instrument(level = "debug", skip(record))]
pub fn encode(record: &DocumentRecord, format: MrzFormat) -> EncodedMrz {
	let encoded = match format {
		MrzFormat::Td3 => encode_td3(record),
		MrzFormat::Td1 => encode_td1(record),
	};

	tracing::debug!(lines = encoded.lines.len(), "encoded machine readable zone");
	encoded
}

/// Encode `record` in the format named by `format`, e.g. `"td3"`.
///
/// Fails with [`MrzError::UnsupportedFormat`](crate::MrzError) for any name
/// other than TD3 or TD1.
pub fn encode_by_name(record: &DocumentRecord, format: &str) -> MrzResult<EncodedMrz> {
	Ok(encode(record, format.parse()?))
}

/// Encode a passport zone: two lines of 44 characters.
///
/// ```text
/// P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<
/// L898902C36UTO7408122F1204159ZE184226B<<<<<10
/// ```
///
/// Line 2 ends with the check digit of the optional data field followed by
/// the composite check digit over the document number, birth date, expiry
/// date and optional data fields with their check digits.
pub fn encode_td3(record: &DocumentRecord) -> EncodedMrz {
	let fields = Fields::new(record);
	let width = MrzFormat::Td3.line_width();

	let line1 = format!(
		"{}{}{}",
		fields.document_type,
		fields.issuing_country,
		fit(
			&fields.names,
			width - DOCUMENT_TYPE_WIDTH - COUNTRY_WIDTH
		)
	);

	let optional_data = fit(&sanitize(&record.optional_data), TD3_OPTIONAL_WIDTH);
	let cd_number = check_digit(&fields.document_number);
	let cd_birth = check_digit(&fields.birth_date);
	let cd_expiry = check_digit(&fields.expiry_date);
	let cd_optional = check_digit(&optional_data);

	let composite_data = format!(
		"{}{cd_number}{}{cd_birth}{}{cd_expiry}{optional_data}{cd_optional}",
		fields.document_number, fields.birth_date, fields.expiry_date
	);
	let cd_composite = check_digit(&composite_data);

	let line2 = format!(
		"{}{cd_number}{}{}{cd_birth}{}{}{cd_expiry}{optional_data}{cd_optional}{cd_composite}",
		fields.document_number,
		fields.nationality,
		fields.birth_date,
		fields.sex,
		fields.expiry_date,
	);

	EncodedMrz {
		format: MrzFormat::Td3,
		lines: vec![MrzLine::new(line1), MrzLine::new(line2)],
		check_digits: CheckDigits {
			document_number: cd_number,
			birth_date: cd_birth,
			expiry_date: cd_expiry,
			optional_data: Some(cd_optional),
			composite: cd_composite,
		},
	}
}

/// Encode an identity card zone: three lines of 30 characters.
///
/// The final digit of line 2 is computed over the whole of line 1 followed
/// by the first 29 characters of line 2.
pub fn encode_td1(record: &DocumentRecord) -> EncodedMrz {
	let fields = Fields::new(record);
	let width = MrzFormat::Td1.line_width();

	let cd_number = check_digit(&fields.document_number);
	let line1 = format!(
		"{}{}{}{cd_number}{}",
		fields.document_type,
		fields.issuing_country,
		fields.document_number,
		fit("", TD1_LINE1_OPTIONAL_WIDTH),
	);

	let optional_data = fit(&sanitize(&record.optional_data), TD1_LINE2_OPTIONAL_WIDTH);
	let cd_birth = check_digit(&fields.birth_date);
	let cd_expiry = check_digit(&fields.expiry_date);
	let body = format!(
		"{}{cd_birth}{}{}{cd_expiry}{}{optional_data}",
		fields.birth_date, fields.sex, fields.expiry_date, fields.nationality,
	);
	let cd_composite = check_digit(&format!("{line1}{body}"));
	let line2 = format!("{body}{cd_composite}");

	let line3 = fit(&fields.names, width);

	EncodedMrz {
		format: MrzFormat::Td1,
		lines: vec![
			MrzLine::new(line1),
			MrzLine::new(line2),
			MrzLine::new(line3),
		],
		check_digits: CheckDigits {
			document_number: cd_number,
			birth_date: cd_birth,
			expiry_date: cd_expiry,
			optional_data: None,
			composite: cd_composite,
		},
	}
}
