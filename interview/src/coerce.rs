//! Lenient numeric and equality coercions.
//!
//! Conditions written by definition authors compare answers of any type
//! against literals. These helpers pin down exactly how such comparisons
//! coerce: strings are parsed as numeric literals (blank means zero,
//! anything unparseable is `NaN`), booleans count as 0/1, lists are joined
//! with commas first, and null is zero.

use interview_types::AnswerValue;

/// A primitive operand after list flattening.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Primitive {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

impl Primitive {
    /// Flatten an optional answer into a primitive. Missing answers are undefined.
    pub(crate) fn from_answer(value: Option<&AnswerValue>) -> Self {
        match value {
            None => Self::Undefined,
            Some(AnswerValue::Null) => Self::Null,
            Some(AnswerValue::Bool(b)) => Self::Bool(*b),
            Some(AnswerValue::Number(n)) => Self::Number(*n),
            Some(AnswerValue::String(s)) => Self::String(s.clone()),
            Some(AnswerValue::List(items)) => Self::String(items.join(",")),
        }
    }

    pub(crate) fn to_number(&self) -> f64 {
        match self {
            Self::Undefined => f64::NAN,
            Self::Null => 0.0,
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Number(n) => *n,
            Self::String(s) => string_to_number(s),
        }
    }
}

/// Type-sensitive equality. Lists are never strictly equal to anything.
pub(crate) fn strict_equals(left: Option<&AnswerValue>, right: &Primitive) -> bool {
    match (left, right) {
        (None, Primitive::Undefined) => true,
        (Some(AnswerValue::Null), Primitive::Null) => true,
        (Some(AnswerValue::Bool(a)), Primitive::Bool(b)) => a == b,
        (Some(AnswerValue::Number(a)), Primitive::Number(b)) => a == b,
        (Some(AnswerValue::String(a)), Primitive::String(b)) => a == b,
        _ => false,
    }
}

/// Coercing equality.
pub(crate) fn loose_equals(left: &Primitive, right: &Primitive) -> bool {
    use Primitive::*;
    match (left, right) {
        (Undefined | Null, Undefined | Null) => true,
        (Undefined | Null, _) | (_, Undefined | Null) => false,
        (Bool(a), Bool(b)) => a == b,
        (Number(a), Number(b)) => a == b,
        (String(a), String(b)) => a == b,
        (Bool(_), _) => loose_equals(&Number(left.to_number()), right),
        (_, Bool(_)) => loose_equals(left, &Number(right.to_number())),
        (Number(a), String(b)) => *a == string_to_number(b),
        (String(a), Number(b)) => string_to_number(a) == *b,
    }
}

/// Whitespace as understood by string trimming and numeric parsing.
pub(crate) fn is_space(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

pub(crate) fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

pub(crate) fn trim(s: &str) -> &str {
    s.trim_matches(is_space)
}

/// Strict numeric conversion of a whole string.
///
/// Blank strings are 0; `Infinity` (optionally signed), `0x`/`0o`/`0b`
/// prefixed integers and decimal literals are accepted; everything else is `NaN`.
pub(crate) fn string_to_number(s: &str) -> f64 {
    let s = trim(s);
    if s.is_empty() {
        return 0.0;
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix(&s[2..], radix);
    }

    let (sign, unsigned) = split_sign(s);
    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }

    match decimal_prefix_len(unsigned) {
        Some(len) if len == unsigned.len() => {
            unsigned.parse::<f64>().map(|n| sign * n).unwrap_or(f64::NAN)
        }
        _ => f64::NAN,
    }
}

/// Lenient integer parsing: leading whitespace, optional sign, then the longest run of digits.
pub(crate) fn parse_int_prefix(s: &str) -> f64 {
    let s = s.trim_start_matches(is_space);
    let (sign, unsigned) = split_sign(s);
    let digits: &str = &unsigned[..unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len())];
    if digits.is_empty() {
        return f64::NAN;
    }
    sign * digits.parse::<f64>().unwrap_or(f64::NAN)
}

/// Lenient decimal parsing: leading whitespace, then the longest decimal literal prefix.
pub(crate) fn parse_float_prefix(s: &str) -> f64 {
    let s = s.trim_start_matches(is_space);
    let (sign, unsigned) = split_sign(s);
    if unsigned.starts_with("Infinity") {
        return sign * f64::INFINITY;
    }
    match decimal_prefix_len(unsigned) {
        Some(len) => unsigned[..len]
            .parse::<f64>()
            .map(|n| sign * n)
            .unwrap_or(f64::NAN),
        None => f64::NAN,
    }
}

fn split_sign(s: &str) -> (f64, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (-1.0, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (1.0, rest)
    } else {
        (1.0, s)
    }
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    let mut value = 0.0;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => value = value * f64::from(radix) + f64::from(d),
            None => return f64::NAN,
        }
    }
    value
}

/// Length of the longest prefix of `s` that forms an unsigned decimal literal
/// (`12`, `1.5`, `.5`, `5.`, `1e3`, `2.5E-4`), or `None` if there is none.
fn decimal_prefix_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut pos = 0;
    let count_digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let int_digits = count_digits(pos);
    pos += int_digits;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        frac_digits = count_digits(pos + 1);
        if int_digits > 0 || frac_digits > 0 {
            pos += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp = pos + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(exp);
        if exp_digits > 0 {
            pos = exp + exp_digits;
        }
    }

    Some(pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_to_number_accepts_numeric_literals() {
        assert_eq!(string_to_number("42"), 42.0);
        assert_eq!(string_to_number("  -2.5 "), -2.5);
        assert_eq!(string_to_number(".5"), 0.5);
        assert_eq!(string_to_number("5."), 5.0);
        assert_eq!(string_to_number("1e3"), 1000.0);
        assert_eq!(string_to_number("0x1F"), 31.0);
        assert_eq!(string_to_number("0b101"), 5.0);
        assert_eq!(string_to_number(""), 0.0);
        assert_eq!(string_to_number("   "), 0.0);
        assert_eq!(string_to_number("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn string_to_number_rejects_garbage() {
        assert!(string_to_number("abc").is_nan());
        assert!(string_to_number("12px").is_nan());
        assert!(string_to_number("inf").is_nan());
        assert!(string_to_number("NaN").is_nan());
        assert!(string_to_number("-0x10").is_nan());
        assert!(string_to_number(".").is_nan());
        assert!(string_to_number("1e").is_nan());
    }

    #[test]
    fn prefix_parsers_are_lenient() {
        assert_eq!(parse_int_prefix("  12abc"), 12.0);
        assert_eq!(parse_int_prefix("-7.9"), -7.0);
        assert!(parse_int_prefix("abc").is_nan());
        assert!(parse_int_prefix("").is_nan());
        assert_eq!(parse_float_prefix("3.25kg"), 3.25);
        assert_eq!(parse_float_prefix("1e2x"), 100.0);
        assert_eq!(parse_float_prefix("2e"), 2.0);
        assert!(parse_float_prefix("x1").is_nan());
    }

    #[test]
    fn loose_equality_coerces() {
        use Primitive::*;
        assert!(loose_equals(&String("18".into()), &Number(18.0)));
        assert!(loose_equals(&Bool(true), &Number(1.0)));
        assert!(loose_equals(&Number(0.0), &Bool(false)));
        assert!(loose_equals(&String("1".into()), &Bool(true)));
        assert!(!loose_equals(&Undefined, &Bool(false)));
        assert!(!loose_equals(&Null, &Number(0.0)));
        assert!(loose_equals(&Null, &Undefined));
        assert!(!loose_equals(&Number(f64::NAN), &Number(f64::NAN)));
    }

    #[test]
    fn strict_equality_is_type_sensitive() {
        let eighteen = AnswerValue::Number(18.0);
        assert!(strict_equals(Some(&eighteen), &Primitive::Number(18.0)));
        assert!(!strict_equals(Some(&eighteen), &Primitive::String("18".into())));
        assert!(!strict_equals(None, &Primitive::Bool(false)));
    }

    #[test]
    fn lists_flatten_to_joined_strings() {
        let list = AnswerValue::from(vec!["a", "b"]);
        assert_eq!(
            Primitive::from_answer(Some(&list)),
            Primitive::String("a,b".into())
        );
        assert_eq!(Primitive::from_answer(Some(&AnswerValue::List(vec![]))).to_number(), 0.0);
    }
}
