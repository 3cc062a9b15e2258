//! Free-text numeric entry.
//!
//! The displayed text and the committed value are tracked separately so that a
//! half-typed number ("-", "") never destroys the last good value.
//!
//! Reconciliation rules:
//! - edit: store the text; if it parses, commit and propagate, unless the text
//!   is exactly "-", which is held without propagating.
//! - blur: if the text parses, commit it and normalise the text to the
//!   canonical form; otherwise revert the text to the committed value.
//!
//! Parsing reads the longest numeric prefix, so "12abc" is 12 and "1,5" is 1.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericBuffer {
    text: String,
    committed: f64,
}

impl NumericBuffer {
    pub fn new(value: f64) -> Self {
        Self { text: canonical(value), committed: value }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn committed(&self) -> f64 {
        self.committed
    }

    /// True while the text does not show the committed value.
    pub fn is_dirty(&self) -> bool {
        self.text != canonical(self.committed)
    }

    /// A keystroke. Returns the value to propagate, if any.
    pub fn edit(&mut self, raw: impl Into<String>) -> Option<f64> {
        self.text = raw.into();
        if self.text == "-" {
            return None;
        }
        let value = parse_number(&self.text)?;
        self.committed = value;
        Some(value)
    }

    /// Focus lost. Returns the value to propagate, or `None` when the text was
    /// discarded.
    pub fn blur(&mut self) -> Option<f64> {
        match parse_number(&self.text) {
            Some(value) => {
                self.committed = value;
                self.text = canonical(value);
                Some(value)
            }
            None => {
                self.text = canonical(self.committed);
                None
            }
        }
    }
}

/// Longest numeric prefix after leading whitespace: optional sign, digits,
/// optional fraction, optional complete exponent. Only finite values count.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    numeric_prefix(text)
        .and_then(|prefix| prefix.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

fn numeric_prefix(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let mut end = match bytes.first() {
        Some(b'+') | Some(b'-') => 1,
        _ => 0,
    };
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - end - 1;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }

    // An exponent counts only when it has digits: "1e" and "1e-" stop at "1".
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+') | Some(b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    Some(&text[..end])
}

/// Shortest round-trip form; negative zero prints as "0".
pub fn canonical(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lone_minus_is_held() {
        let mut buf = NumericBuffer::new(10.0);
        assert_eq!(buf.edit("-"), None);
        assert_eq!(buf.text(), "-");
        assert_eq!(buf.committed(), 10.0);
    }

    #[test]
    fn test_minus_then_digit_propagates() {
        let mut buf = NumericBuffer::new(10.0);
        buf.edit("-");
        assert_eq!(buf.edit("-5"), Some(-5.0));
        assert_eq!(buf.committed(), -5.0);
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_blur_with_garbage_reverts() {
        let mut buf = NumericBuffer::new(0.1);
        buf.edit("0.25");
        assert_eq!(buf.edit("abc"), None);
        assert_eq!(buf.text(), "abc");
        assert_eq!(buf.blur(), None);
        assert_eq!(buf.text(), "0.25");
        assert_eq!(buf.committed(), 0.25);
    }

    #[test]
    fn test_empty_text_is_kept_until_blur() {
        let mut buf = NumericBuffer::new(-10.0);
        assert_eq!(buf.edit(""), None);
        assert_eq!(buf.text(), "");
        assert!(buf.is_dirty());
        buf.blur();
        assert_eq!(buf.text(), "-10");
    }

    #[test]
    fn test_blur_normalises_text() {
        let mut buf = NumericBuffer::new(1.0);
        assert_eq!(buf.edit(" 2.50 "), Some(2.5));
        assert_eq!(buf.text(), " 2.50 ");
        assert_eq!(buf.blur(), Some(2.5));
        assert_eq!(buf.text(), "2.5");

        buf.edit("1e-4");
        buf.blur();
        assert_eq!(buf.text(), "0.0001");

        buf.edit("-0");
        buf.blur();
        assert_eq!(buf.text(), "0");
    }

    #[test]
    fn test_non_finite_is_rejected() {
        let mut buf = NumericBuffer::new(3.0);
        assert_eq!(buf.edit("NaN"), None);
        assert_eq!(buf.edit("inf"), None);
        assert_eq!(buf.blur(), None);
        assert_eq!(buf.text(), "3");
    }

    #[test]
    fn test_numeric_prefix_is_used() {
        let mut buf = NumericBuffer::new(0.0);
        assert_eq!(buf.edit("12abc"), Some(12.0));
        assert_eq!(buf.text(), "12abc");
        assert_eq!(buf.blur(), Some(12.0));
        assert_eq!(buf.text(), "12");

        assert_eq!(buf.edit("1e"), Some(1.0));
        assert_eq!(buf.edit("1e-"), Some(1.0));
        assert_eq!(buf.edit("1e-3"), Some(0.001));
        assert_eq!(buf.edit("1,5"), Some(1.0));
        buf.blur();
        assert_eq!(buf.text(), "1");
    }

    #[test]
    fn test_parse_number_edges() {
        assert_eq!(parse_number("  -2.5kg"), Some(-2.5));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("5."), Some(5.0));
        assert_eq!(parse_number("+7"), Some(7.0));
        assert_eq!(parse_number("x12"), None);
        assert_eq!(parse_number("."), None);
        assert_eq!(parse_number("-."), None);
        assert_eq!(parse_number("Infinity"), None);
        assert_eq!(parse_number("1e400"), None);
    }

    #[test]
    fn test_blur_of_lone_minus_reverts() {
        let mut buf = NumericBuffer::new(4.0);
        buf.edit("-");
        assert_eq!(buf.blur(), None);
        assert_eq!(buf.text(), "4");
    }
}
