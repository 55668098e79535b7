//! Numeric coercion for pt-BR formatted input.
//!
//! Three parsing rules coexist because different field classes are typed
//! differently:
//!
//! - [`parse_decimal`]: free-decimal text (dimensions, weights). Only the decimal
//!   comma is translated; this is the rule the packaging normalizer applies.
//! - [`parse_display`]: the inverse of [`format`], accepting `.` thousands
//!   grouping (`"1.234,50"`).
//! - [`parse_cents`]: keystroke-accumulating currency input; every non-digit is
//!   dropped and the digits are read as cents.
//!
//! None of these ever fail: malformed input degrades to `None` ("not provided"),
//! which is distinct from zero.

use serde::{Deserialize, Serialize};

/// A loosely-typed numeric form value, as it arrives from a text input or from
/// a previously loaded record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumInput {
    Number(f64),
    Text(String),
}

impl From<f64> for NumInput {
    fn from(value: f64) -> Self {
        NumInput::Number(value)
    }
}

impl From<&str> for NumInput {
    fn from(value: &str) -> Self {
        NumInput::Text(value.to_string())
    }
}

impl From<String> for NumInput {
    fn from(value: String) -> Self {
        NumInput::Text(value)
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Parse free-decimal text: trim, swap the decimal comma for a period, parse.
///
/// ```
/// use bizadmin_products::numeric::parse_decimal;
///
/// assert_eq!(parse_decimal(" 1,234 "), Some(1.234));
/// assert_eq!(parse_decimal("0"), Some(0.0));
/// assert_eq!(parse_decimal("   "), None);
/// assert_eq!(parse_decimal("invalid"), None);
/// ```
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    finite(trimmed.replacen(',', ".", 1).parse::<f64>().ok()?)
}

/// Parse text produced by [`format`] (or typed the same way): `.` groups are
/// dropped and the decimal comma becomes a period.
pub fn parse_display(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let plain = trimmed.replace('.', "").replacen(',', ".", 1);
    finite(plain.parse::<f64>().ok()?)
}

/// Read every ASCII digit in `raw` as an integer number of cents.
///
/// Signs and separators are discarded, so the result is never negative.
pub fn parse_cents(raw: &str) -> Option<f64> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    finite(digits.parse::<f64>().ok()? / 100.0)
}

/// Coerce a raw form value with the free-decimal rule.
pub fn coerce(input: Option<&NumInput>) -> Option<f64> {
    match input? {
        NumInput::Number(n) => finite(*n),
        NumInput::Text(s) => parse_decimal(s),
    }
}

/// Render a value with two fixed decimals, `.` thousands and `,` decimals.
///
/// ```
/// use bizadmin_products::numeric::format;
///
/// assert_eq!(format(Some(1234.5)), "1.234,50");
/// assert_eq!(format(None), "");
/// ```
pub fn format(value: Option<f64>) -> String {
    let Some(value) = value.and_then(finite) else {
        return String::new();
    };

    let fixed = std::format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if value < 0.0 && fixed != "0.00" {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out.push(',');
    out.push_str(frac_part);
    out
}

/// Live adapter between a currency-style text input and its numeric form value.
///
/// The input keeps its own display text; every keystroke is read with
/// [`parse_cents`] and the text is re-rendered with [`format`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NumericField {
    text: String,
}

impl NumericField {
    pub fn new(initial: Option<f64>) -> Self {
        Self {
            text: format(initial),
        }
    }

    /// Text currently shown in the input.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Handle the raw text of the input after a keystroke.
    ///
    /// Returns the value to store in the form (`None` clears the field).
    pub fn input(&mut self, raw: &str) -> Option<f64> {
        match parse_cents(raw) {
            Some(value) => {
                self.text = format(Some(value));
                Some(value)
            }
            None => {
                self.text.clear();
                None
            }
        }
    }

    /// Follow a form value that changed elsewhere (e.g. a different record was loaded).
    ///
    /// The text is only re-rendered when it no longer shows `external`.
    pub fn sync(&mut self, external: Option<f64>) {
        if parse_display(&self.text) != external {
            self.text = format(external);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_decimal_translates_the_decimal_comma() {
        assert_eq!(parse_decimal("10,5"), Some(10.5));
        assert_eq!(parse_decimal("20,0"), Some(20.0));
        assert_eq!(parse_decimal("30"), Some(30.0));
        assert_eq!(parse_decimal("15.7"), Some(15.7));
    }

    #[test]
    fn parse_decimal_treats_blank_as_absent() {
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal(" "), None);
        assert_eq!(parse_decimal("\t\n"), None);
    }

    #[test]
    fn parse_decimal_keeps_zero() {
        assert_eq!(parse_decimal("0"), Some(0.0));
        assert_eq!(parse_decimal("0,00"), Some(0.0));
    }

    #[test]
    fn parse_decimal_degrades_garbage_to_none() {
        assert_eq!(parse_decimal("invalid"), None);
        assert_eq!(parse_decimal("1,2,3"), None);
        assert_eq!(parse_decimal("1.234,50"), None);
        assert_eq!(parse_decimal("inf"), None);
        assert_eq!(parse_decimal("NaN"), None);
    }

    #[test]
    fn parse_display_accepts_thousands_grouping() {
        assert_eq!(parse_display("1.234,50"), Some(1234.5));
        assert_eq!(parse_display("1.000.000,00"), Some(1_000_000.0));
        assert_eq!(parse_display("-12,30"), Some(-12.3));
        assert_eq!(parse_display(""), None);
        assert_eq!(parse_display("abc"), None);
    }

    #[test]
    fn parse_cents_reads_digits_as_cents() {
        assert_eq!(parse_cents("1234"), Some(12.34));
        assert_eq!(parse_cents("R$ 12,34"), Some(12.34));
        assert_eq!(parse_cents("-5"), Some(0.05));
        assert_eq!(parse_cents("1.234,567"), Some(12345.67));
        assert_eq!(parse_cents("abc"), None);
        assert_eq!(parse_cents(""), None);
    }

    #[test]
    fn coerce_passes_finite_numbers_through() {
        assert_eq!(coerce(Some(&NumInput::Number(25.0))), Some(25.0));
        assert_eq!(coerce(Some(&NumInput::Number(0.0))), Some(0.0));
        assert_eq!(coerce(Some(&NumInput::Number(f64::NAN))), None);
        assert_eq!(coerce(Some(&NumInput::Number(f64::INFINITY))), None);
        assert_eq!(coerce(Some(&NumInput::from(" 1,234 "))), Some(1.234));
        assert_eq!(coerce(None), None);
    }

    #[test]
    fn format_groups_thousands_with_two_decimals() {
        assert_eq!(format(Some(1234.5)), "1.234,50");
        assert_eq!(format(Some(0.0)), "0,00");
        assert_eq!(format(Some(12.0)), "12,00");
        assert_eq!(format(Some(999.999)), "1.000,00");
        assert_eq!(format(Some(1_234_567.891)), "1.234.567,89");
        assert_eq!(format(Some(-1234.5)), "-1.234,50");
        assert_eq!(format(Some(f64::NAN)), "");
        assert_eq!(format(None), "");
    }

    #[test]
    fn numeric_input_deserializes_numbers_and_strings() {
        let n: NumInput = serde_json::from_str("12.5").unwrap();
        assert_eq!(n, NumInput::Number(12.5));
        let s: NumInput = serde_json::from_str("\"12,5\"").unwrap();
        assert_eq!(s, NumInput::Text("12,5".into()));
    }

    #[test]
    fn field_accumulates_keystrokes_as_cents() {
        let mut field = NumericField::new(None);
        assert_eq!(field.text(), "");

        assert_eq!(field.input("1"), Some(0.01));
        assert_eq!(field.text(), "0,01");
        assert_eq!(field.input("0,012"), Some(0.12));
        assert_eq!(field.input("0,1234"), Some(12.34));
        assert_eq!(field.text(), "12,34");
        assert_eq!(field.input("123456"), Some(1234.56));
        assert_eq!(field.text(), "1.234,56");

        assert_eq!(field.input(""), None);
        assert_eq!(field.text(), "");
    }

    #[test]
    fn field_sync_only_rerenders_on_external_change() {
        let mut field = NumericField::new(Some(10.0));
        assert_eq!(field.text(), "10,00");

        field.sync(Some(10.0));
        assert_eq!(field.text(), "10,00");

        field.sync(Some(2.5));
        assert_eq!(field.text(), "2,50");

        field.sync(None);
        assert_eq!(field.text(), "");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: plain numeric strings parse to their comma-to-period value.
            #[test]
            fn decimal_strings_parse(
                int_part in "[0-9]{1,9}",
                frac in proptest::option::of("[0-9]{1,6}"),
                comma in any::<bool>(),
                pad_left in "[ \t]{0,3}",
                pad_right in "[ \t]{0,3}",
            ) {
                let sep = if comma { "," } else { "." };
                let body = match &frac {
                    Some(f) => std::format!("{int_part}{sep}{f}"),
                    None => int_part.clone(),
                };
                let raw = std::format!("{pad_left}{body}{pad_right}");
                let expected: f64 = body.replace(',', ".").parse().unwrap();
                prop_assert_eq!(parse_decimal(&raw), Some(expected));
            }

            /// Property: whitespace-only input is absent.
            #[test]
            fn blank_is_absent(raw in "[ \t\r\n]{0,10}") {
                prop_assert_eq!(parse_decimal(&raw), None);
                prop_assert_eq!(parse_display(&raw), None);
            }

            /// Property: formatting then parsing recovers two-decimal values.
            #[test]
            fn format_round_trips(cents in -10_000_000_000i64..10_000_000_000i64) {
                let n = cents as f64 / 100.0;
                let back = parse_display(&format(Some(n))).unwrap();
                prop_assert!((back - n).abs() < 1e-9, "{} != {}", back, n);
            }

            /// Property: integers round-trip exactly.
            #[test]
            fn integers_round_trip(n in -1_000_000_000i64..1_000_000_000i64) {
                prop_assert_eq!(parse_display(&format(Some(n as f64))), Some(n as f64));
            }

            /// Property: cents parsing never yields a negative value and never panics.
            #[test]
            fn cents_never_negative(raw in ".{0,40}") {
                if let Some(v) = parse_cents(&raw) {
                    prop_assert!(v >= 0.0);
                }
            }
        }
    }
}
