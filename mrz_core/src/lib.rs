//! `mrz_core` computes the Machine Readable Zone (MRZ) of ICAO 9303 travel
//! documents. Given the identity fields of a document it produces the fixed
//! width lines, check digits included, that are printed along the bottom of
//! a passport or identity card.
//!
//! ## Processing Pipeline
//!
//! ```text
//! DocumentRecord (raw field text)
//!   → Sanitizer (NFC, uppercase, separators → `<`, drop everything else)
//!   → Check-digit engine (7-3-1 weighted sum, modulo 10)
//!   → Line composer (per-field widths, TD3 2×44 or TD1 3×30)
//!   → EncodedMrz (lines + the check digits used)
//! ```
//!
//! ## Modules
//!
//! - [`sanitize`] — Map raw text into the MRZ alphabet, reorder dates, fit
//!   fields to their widths.
//! - [`check_digit`] — The ICAO 9303 check-digit algorithm.
//! - [`config`] — `mrz.toml` discovery and record file loading.
//!
//! ## Quick Start
//!
//! ```rust
//! use mrz_core::DocumentRecord;
//! use mrz_core::MrzFormat;
//! use mrz_core::encode;
//!
//! let record = DocumentRecord {
//! 	document_type: "P".into(),
//! 	issuing_country: "UTO".into(),
//! 	nationality: "UTO".into(),
//! 	surname: "Eriksson".into(),
//! 	given_names: "Anna Maria".into(),
//! 	document_number: "L898902C3".into(),
//! 	birth_date: "120874".into(),
//! 	expiry_date: "150412".into(),
//! 	sex: "F".into(),
//! 	optional_data: "ZE184226B".into(),
//! };
//!
//! let mrz = encode(&record, MrzFormat::Td3);
//! assert_eq!(mrz.lines[0].as_str(), "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<");
//! assert_eq!(mrz.lines[1].as_str(), "L898902C36UTO7408122F1204159ZE184226B<<<<<10");
//! ```

pub use compose::*;
pub use error::*;
pub use record::*;
pub use verify::*;

pub mod check_digit;
mod compose;
pub mod config;
#[allow(unused_assignments)]
mod error;
mod record;
pub mod sanitize;
mod verify;
