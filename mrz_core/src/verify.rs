use std::fmt;
use std::ops::Range;

use serde::Serialize;

use crate::MrzError;
use crate::MrzFormat;
use crate::MrzResult;
use crate::check_digit::check_digit;
use crate::sanitize::is_mrz_char;

/// The field a check digit protects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum CheckedField {
	DocumentNumber,
	BirthDate,
	ExpiryDate,
	OptionalData,
	Composite,
}

impl fmt::Display for CheckedField {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let label = match self {
			Self::DocumentNumber => "document number",
			Self::BirthDate => "birth date",
			Self::ExpiryDate => "expiry date",
			Self::OptionalData => "optional data",
			Self::Composite => "composite",
		};
		f.write_str(label)
	}
}

/// The outcome of recomputing one check digit in an existing zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckDigitReport {
	pub field: CheckedField,
	/// 1-indexed line of the check digit.
	pub line: usize,
	/// 1-indexed column of the check digit.
	pub column: usize,
	/// The digit recomputed from the protected data.
	pub expected: char,
	/// The digit present in the zone.
	pub found: char,
}

impl CheckDigitReport {
	pub fn is_ok(&self) -> bool {
		self.expected == self.found
	}
}

/// Result of verifying an existing machine readable zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verification {
	pub format: MrzFormat,
	pub checks: Vec<CheckDigitReport>,
}

impl Verification {
	/// Returns true if every check digit matches.
	pub fn is_ok(&self) -> bool {
		self.checks.iter().all(CheckDigitReport::is_ok)
	}

	/// The check digits that do not match their data.
	pub fn mismatches(&self) -> impl Iterator<Item = &CheckDigitReport> {
		self.checks.iter().filter(|check| !check.is_ok())
	}
}

/// A check digit location: the data it covers and where the digit sits.
struct DigitSpec {
	field: CheckedField,
	/// `(line index, column range)` pairs concatenated in order.
	data: &'static [(usize, Range<usize>)],
	line: usize,
	column: usize,
}

const TD3_DIGITS: &[DigitSpec] = &[
	DigitSpec {
		field: CheckedField::DocumentNumber,
		data: &[(1, 0..9)],
		line: 1,
		column: 9,
	},
	DigitSpec {
		field: CheckedField::BirthDate,
		data: &[(1, 13..19)],
		line: 1,
		column: 19,
	},
	DigitSpec {
		field: CheckedField::ExpiryDate,
		data: &[(1, 21..27)],
		line: 1,
		column: 27,
	},
	DigitSpec {
		field: CheckedField::OptionalData,
		data: &[(1, 28..42)],
		line: 1,
		column: 42,
	},
	DigitSpec {
		field: CheckedField::Composite,
		data: &[(1, 0..10), (1, 13..20), (1, 21..43)],
		line: 1,
		column: 43,
	},
];

const TD1_DIGITS: &[DigitSpec] = &[
	DigitSpec {
		field: CheckedField::DocumentNumber,
		data: &[(0, 5..14)],
		line: 0,
		column: 14,
	},
	DigitSpec {
		field: CheckedField::BirthDate,
		data: &[(1, 0..6)],
		line: 1,
		column: 6,
	},
	DigitSpec {
		field: CheckedField::ExpiryDate,
		data: &[(1, 8..14)],
		line: 1,
		column: 14,
	},
	DigitSpec {
		field: CheckedField::Composite,
		data: &[(0, 0..30), (1, 0..29)],
		line: 1,
		column: 29,
	},
];

/// Recompute every check digit of an existing zone.
///
/// The format is detected from the shape of `lines` after trimming
/// surrounding whitespace. Mismatched digits are reported rather than
/// returned as errors; only a zone of the wrong shape or with characters
/// outside the MRZ alphabet fails.
pub fn verify<S: AsRef<str>>(lines: &[S]) -> MrzResult<Verification> {
	let lines: Vec<&str> = lines.iter().map(|line| line.as_ref().trim()).collect();
	let width = lines.first().map_or(0, |line| line.chars().count());

	let Some(format) = MrzFormat::from_shape(lines.len(), width) else {
		return Err(MrzError::MalformedMrz(format!(
			"expected 2 lines of 44 or 3 lines of 30 characters, got {} line(s) starting with \
			 {width} character(s)",
			lines.len()
		)));
	};

	for (index, line) in lines.iter().enumerate() {
		if let Some(ch) = line.chars().find(|ch| !is_mrz_char(*ch)) {
			return Err(MrzError::MalformedMrz(format!(
				"line {} contains `{ch}` which is outside the MRZ alphabet",
				index + 1
			)));
		}

		if line.len() != width {
			return Err(MrzError::MalformedMrz(format!(
				"line {} has {} character(s), expected {width}",
				index + 1,
				line.len()
			)));
		}
	}

	let specs = match format {
		MrzFormat::Td3 => TD3_DIGITS,
		MrzFormat::Td1 => TD1_DIGITS,
	};

	let checks = specs
		.iter()
		.map(|spec| {
			let data: String = spec
				.data
				.iter()
				.map(|(line, range)| &lines[*line][range.clone()])
				.collect();
			let found = lines[spec.line][spec.column..].chars().next().unwrap_or('<');

			CheckDigitReport {
				field: spec.field,
				line: spec.line + 1,
				column: spec.column + 1,
				expected: check_digit(&data),
				found,
			}
		})
		.collect();

	tracing::debug!(%format, "verified machine readable zone");

	Ok(Verification { format, checks })
}
