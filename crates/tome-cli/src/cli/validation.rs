/// Lowest accepted debounce window in milliseconds.
pub const MIN_DEBOUNCE_MS: u64 = 10;

/// Highest accepted debounce window in milliseconds.
pub const MAX_DEBOUNCE_MS: u64 = 10_000;

/// Parse and validate a debounce window for watch mode.
///
/// # Errors
///
/// Returns an error message if the value is not a number or falls outside
/// `MIN_DEBOUNCE_MS..=MAX_DEBOUNCE_MS`.
pub fn parse_debounce(s: &str) -> Result<u64, String> {
    let value: u64 = s
        .trim()
        .parse()
        .map_err(|_| format!("Debounce must be a whole number of milliseconds: '{}'", s))?;

    if !(MIN_DEBOUNCE_MS..=MAX_DEBOUNCE_MS).contains(&value) {
        return Err(format!(
            "Debounce must be between {} and {} ms: '{}'",
            MIN_DEBOUNCE_MS, MAX_DEBOUNCE_MS, s
        ));
    }

    Ok(value)
}
