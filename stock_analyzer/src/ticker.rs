//! Ticker symbol validation.

/// Longest accepted symbol.
const MAX_TICKER_LEN: usize = 10;

/// Checks whether a candidate string looks like an exchange ticker.
///
/// Accepted symbols are non-empty, at most ten characters, and built from
/// uppercase ASCII letters, digits, dots and hyphens. Dots and hyphens are
/// allowed anywhere because class shares and some foreign listings carry
/// them ("BRK.B", "RDS-A").
///
/// Callers are expected to uppercase user input before validating; lowercase
/// symbols are rejected here, not coerced.
pub fn validate_ticker(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate.chars().count() <= MAX_TICKER_LEN
        && candidate
            .chars()
            .all(|c| matches!(c, 'A'..='Z' | '0'..='9' | '.' | '-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_symbols_are_accepted() {
        for symbol in ["AAPL", "GOOGL", "MSFT", "TSLA", "BRK.B", "RDS-A", "X"] {
            assert!(validate_ticker(symbol), "{symbol} should validate");
        }
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(!validate_ticker(""));
    }

    #[test]
    fn overlong_symbols_are_rejected() {
        assert!(validate_ticker("ABCDEFGHIJ"));
        assert!(!validate_ticker("TOOLONGNAME"));
    }

    #[test]
    fn stray_characters_are_rejected() {
        for symbol in ["INVALID@", "test symbol", "aapl", "AA PL", "A_B", "Ä"] {
            assert!(!validate_ticker(symbol), "{symbol} should not validate");
        }
    }
}
