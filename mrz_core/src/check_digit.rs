/// Weights applied cyclically to each character, starting at the first.
pub const WEIGHTS: [u32; 3] = [7, 3, 1];

/// Numeric value of an MRZ character in the check-digit sum.
///
/// Digits map to themselves, `A`-`Z` map to 10-35 and the filler maps to 0.
/// Characters outside the alphabet also count as 0 so the engine stays total.
pub fn char_value(ch: char) -> u32 {
	match ch {
		'0'..='9' => u32::from(ch) - u32::from('0'),
		'A'..='Z' => u32::from(ch) - u32::from('A') + 10,
		_ => 0,
	}
}

/// Compute the ICAO 9303 7-3-1 check digit of `data`.
///
/// `data` should already be sanitized. The result is an ASCII digit and an
/// empty input yields `'0'`.
pub fn check_digit(data: &str) -> char {
	let sum = data
		.chars()
		.zip(WEIGHTS.iter().cycle())
		.fold(0, |acc, (ch, weight)| (acc + char_value(ch) * weight) % 10);

	let digit = char::from_digit(sum, 10).unwrap_or('0');
	tracing::trace!(data, %digit, "computed check digit");
	digit
}
