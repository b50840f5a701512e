use unicode_normalization::UnicodeNormalization;

/// The filler character. Pads every field and separates name components.
pub const FILLER: char = '<';

/// Characters that render as nothing or as a gap but are not classified as
/// whitespace by [`char::is_whitespace`].
const INVISIBLE_SEPARATORS: [char; 3] = ['\u{200B}', '\u{2060}', '\u{FEFF}'];

/// Returns `true` if `ch` belongs to the MRZ alphabet: `A`-`Z`, `0`-`9` and
/// the filler `<`.
pub fn is_mrz_char(ch: char) -> bool {
	ch.is_ascii_uppercase() || ch.is_ascii_digit() || ch == FILLER
}

/// Returns `true` for the characters that separate words in raw field text.
///
/// This covers every Unicode whitespace character (including the no-break,
/// narrow no-break and thin spaces) plus the zero-width separators.
pub fn is_separator(ch: char) -> bool {
	ch.is_whitespace() || INVISIBLE_SEPARATORS.contains(&ch)
}

/// Normalize raw field text into the MRZ alphabet.
///
/// The text is NFC-normalized, uppercased, every separator becomes `<`, and
/// any character still outside the alphabet is dropped. Never fails; empty
/// input yields an empty string and the function is idempotent.
pub fn sanitize(raw: &str) -> String {
	raw.nfc()
		.flat_map(char::to_uppercase)
		.map(|ch| if is_separator(ch) { FILLER } else { ch })
		.filter(|ch| is_mrz_char(*ch))
		.collect()
}

/// Sanitize a name component (surname or given names).
///
/// Filler left at either edge after sanitizing is dropped, so trailing
/// whitespace or punctuation cannot leak into the `<<` boundary between
/// surname and given names. Interior separators each become a single `<` and
/// runs are kept as typed.
pub fn sanitize_name(raw: &str) -> String {
	sanitize(raw).trim_matches(FILLER).to_string()
}

/// Reduce the sex field to one of `M`, `F` or `<` (unspecified).
///
/// Surrounding separators are ignored, so `" F"` reads as `F`.
pub fn sanitize_sex(raw: &str) -> char {
	match sanitize(raw.trim_matches(is_separator)).chars().next() {
		Some(ch @ ('M' | 'F')) => ch,
		_ => FILLER,
	}
}

/// Reorder a `DDMMYY` date into the `YYMMDD` order the MRZ stores.
///
/// Non-digit characters are stripped first. When exactly six digits remain
/// they are reordered; otherwise the remaining digits are returned as they
/// are and the caller decides whether that is acceptable.
pub fn reformat_date(raw: &str) -> String {
	let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

	if digits.len() != 6 {
		tracing::debug!(raw, digits = %digits, "date did not reduce to six digits");
		return digits;
	}

	format!("{}{}{}", &digits[4..6], &digits[2..4], &digits[0..2])
}

/// Truncate `value` to `width` characters or right-pad it with `<`.
///
/// Every MRZ field has a fixed width, so this is applied to each field on its
/// own before fields are joined.
pub fn fit(value: &str, width: usize) -> String {
	let mut field: String = value.chars().take(width).collect();
	let len = field.chars().count();

	if len < value.chars().count() {
		tracing::debug!(value, width, "field truncated to width");
	}

	field.extend(std::iter::repeat_n(FILLER, width - len));
	field
}
