// ---------------------------------------------------------------------------
// Field normalizers: raw catalog strings → numbers used for computation
// ---------------------------------------------------------------------------

/// Characters the crawler's output may carry around a price: the pound sign,
/// the `Â` left behind when its UTF-8 bytes are decoded as Latin-1, and a
/// no-break space.
const PRICE_ARTIFACTS: [char; 3] = ['Â', '£', '\u{a0}'];

/// Rating words in ordinal order; position + 1 is the rating value.
const RATING_WORDS: [&str; 5] = ["One", "Two", "Three", "Four", "Five"];

/// Parse a raw price such as `"£51.77"` or `"Â£51.77"` into a number.
///
/// Returns `None` when what remains after stripping artifacts is not a finite
/// base-10 decimal. Already-clean input (`"51.77"`) parses to the same value.
pub fn normalize_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| !PRICE_ARTIFACTS.contains(c)).collect();
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Map a rating word (`"One"`..`"Five"`, case-sensitive) to 1..=5.
pub fn normalize_rating(word: &str) -> Option<u8> {
    RATING_WORDS
        .iter()
        .position(|w| *w == word)
        .map(|i| i as u8 + 1)
}

/// Round half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
