/// Tolerant parsing of locale-formatted counter values.
///
/// CSV exports and manual entry mix formats freely (`1.234,56`, `1234.56`,
/// plain digits), so the parser degrades gracefully instead of rejecting
/// rows: dots are treated as thousands separators and dropped, the first
/// comma becomes a decimal point, every other non-digit character is
/// discarded and the result is floored. Anything unparseable maps to 0.
///
/// # Examples
/// ```
/// use meter_billing::common::numeric::parse_counter;
///
/// assert_eq!(parse_counter("1.234,56"), 1234);
/// assert_eq!(parse_counter(" 5000 "), 5000);
/// assert_eq!(parse_counter("n/a"), 0);
/// ```
pub fn parse_counter(raw: &str) -> u64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0;
    }

    let clean: String = trimmed
        .replace('.', "")
        .replacen(',', ".", 1)
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    match clean.parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => n.floor() as u64,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_digits_pass_through() {
        assert_eq!(parse_counter("5000"), 5000);
        assert_eq!(parse_counter("0"), 0);
    }

    #[test]
    fn brazilian_thousands_and_decimal_comma() {
        assert_eq!(parse_counter("1.234"), 1234);
        assert_eq!(parse_counter("1.234,56"), 1234);
        assert_eq!(parse_counter("52.200"), 52200);
    }

    #[test]
    fn dot_is_always_a_thousands_separator() {
        // "1234.56" is read as 123456: the dot is stripped before parsing.
        assert_eq!(parse_counter("1234.56"), 123456);
    }

    #[test]
    fn fractional_input_is_floored() {
        assert_eq!(parse_counter("42,9"), 42);
    }

    #[test]
    fn garbage_degrades_to_zero() {
        assert_eq!(parse_counter(""), 0);
        assert_eq!(parse_counter("   "), 0);
        assert_eq!(parse_counter("n/a"), 0);
    }

    #[test]
    fn only_the_first_comma_is_decimal() {
        // Extra commas are stripped like any other stray character, so
        // "1,2,3" reads as 1.23 and floors to 1.
        assert_eq!(parse_counter("1,2,3"), 1);
        assert_eq!(parse_counter("12,3,456"), 12);
    }

    #[test]
    fn oversized_values_clamp_to_u64_max() {
        assert_eq!(parse_counter("99999999999999999999999"), u64::MAX);
    }

    #[test]
    fn surrounding_noise_is_discarded() {
        assert_eq!(parse_counter(" 5000 págs"), 5000);
        assert_eq!(parse_counter("-5000"), 5000);
    }

    #[test]
    fn parse_is_idempotent_through_display() {
        for raw in ["1.234,56", "987", "12,0", "junk", ""] {
            let once = parse_counter(raw);
            assert_eq!(parse_counter(&once.to_string()), once);
        }
    }
}
