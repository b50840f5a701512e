use std::fmt;
use std::str::FromStr;

use derive_more::Deref;
use derive_more::Display;
use serde::Deserialize;
use serde::Serialize;

use crate::MrzError;

/// The identity fields of a travel document, as supplied by the caller.
///
/// Every field is raw text. Sanitizing, date reordering and width handling
/// all happen during encoding, so a record can be deserialized straight from
/// a form or a record file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocumentRecord {
	/// Document code, e.g. `P` for a passport or `I`/`ID` for an identity
	/// card.
	pub document_type: String,
	/// Three-letter code of the issuing state or organization.
	pub issuing_country: String,
	/// Three-letter code of the holder's nationality.
	pub nationality: String,
	pub surname: String,
	/// Given names separated by spaces.
	pub given_names: String,
	pub document_number: String,
	/// Date of birth as `DDMMYY`.
	pub birth_date: String,
	/// Date of expiry as `DDMMYY`.
	pub expiry_date: String,
	/// `M`, `F` or `<` for unspecified.
	pub sex: String,
	/// Personal number or other optional data.
	pub optional_data: String,
}

impl DocumentRecord {
	/// Fill every empty field of this record from `defaults`.
	#[must_use]
	pub fn with_defaults(mut self, defaults: &DocumentRecord) -> Self {
		let pairs = [
			(&mut self.document_type, &defaults.document_type),
			(&mut self.issuing_country, &defaults.issuing_country),
			(&mut self.nationality, &defaults.nationality),
			(&mut self.surname, &defaults.surname),
			(&mut self.given_names, &defaults.given_names),
			(&mut self.document_number, &defaults.document_number),
			(&mut self.birth_date, &defaults.birth_date),
			(&mut self.expiry_date, &defaults.expiry_date),
			(&mut self.sex, &defaults.sex),
			(&mut self.optional_data, &defaults.optional_data),
		];

		for (field, default) in pairs {
			if field.trim().is_empty() {
				field.clone_from(default);
			}
		}

		self
	}
}

/// The document size classes this crate can encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[non_exhaustive]
pub enum MrzFormat {
	/// Passport booklet: two lines of 44 characters.
	#[serde(rename = "TD3")]
	Td3,
	/// Identity card: three lines of 30 characters.
	#[serde(rename = "TD1")]
	Td1,
}

impl MrzFormat {
	pub const fn line_count(self) -> usize {
		match self {
			Self::Td3 => 2,
			Self::Td1 => 3,
		}
	}

	pub const fn line_width(self) -> usize {
		match self {
			Self::Td3 => 44,
			Self::Td1 => 30,
		}
	}

	/// Detect the format from the shape of a zone.
	pub fn from_shape(line_count: usize, line_width: usize) -> Option<Self> {
		[Self::Td3, Self::Td1]
			.into_iter()
			.find(|format| format.line_count() == line_count && format.line_width() == line_width)
	}
}

impl fmt::Display for MrzFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Td3 => f.write_str("TD3"),
			Self::Td1 => f.write_str("TD1"),
		}
	}
}

impl FromStr for MrzFormat {
	type Err = MrzError;

	fn from_str(name: &str) -> Result<Self, Self::Err> {
		match name.trim().to_ascii_uppercase().as_str() {
			"TD3" => Ok(Self::Td3),
			"TD1" => Ok(Self::Td1),
			_ => Err(MrzError::UnsupportedFormat(name.to_string())),
		}
	}
}

/// One fixed-width line of a machine readable zone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, Display, Serialize)]
#[display("{_0}")]
#[serde(transparent)]
pub struct MrzLine(String);

impl MrzLine {
	pub(crate) fn new(line: String) -> Self {
		Self(line)
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

/// The check digits computed while encoding, exposed for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckDigits {
	pub document_number: char,
	pub birth_date: char,
	pub expiry_date: char,
	/// Check digit of the optional data field. Only TD3 carries one.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub optional_data: Option<char>,
	/// The final digit of the zone.
	pub composite: char,
}

/// A fully encoded machine readable zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedMrz {
	pub format: MrzFormat,
	pub lines: Vec<MrzLine>,
	pub check_digits: CheckDigits,
}

impl EncodedMrz {
	/// The lines as plain string slices.
	pub fn line_strs(&self) -> Vec<&str> {
		self.lines.iter().map(MrzLine::as_str).collect()
	}
}

impl fmt::Display for EncodedMrz {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.line_strs().join("\n"))
	}
}
