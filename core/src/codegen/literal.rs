use crate::codegen::naming::simple_name;
use crate::model::value::Scalar;

/// Turns leaf values into source literals.
pub trait LiteralRenderer {
    fn render(&self, scalar: &Scalar) -> String;
}

/// Literals for the declaration-style output.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclarationLiterals;

impl LiteralRenderer for DeclarationLiterals {
    fn render(&self, scalar: &Scalar) -> String {
        match scalar {
            Scalar::Bool(b) => b.to_string(),
            Scalar::Byte(v) => format!("(byte) {}", v),
            Scalar::Short(v) => format!("(short) {}", v),
            Scalar::Int(v) => v.to_string(),
            Scalar::Long(v) => format!("{}L", v),
            Scalar::Float(v) => match non_finite("Float", f64::from(*v)) {
                Some(s) => s,
                None => format!("{:?}f", v),
            },
            Scalar::Double(v) => match non_finite("Double", *v) {
                Some(s) => s,
                None => format!("{:?}", v),
            },
            Scalar::Char(c) => format!("'{}'", escape_char(*c, '\'')),
            Scalar::Str(s) => format!("\"{}\"", escape(s)),
            Scalar::Enum { type_name, constant } => format!("{}.{}", simple_name(type_name), constant),
            Scalar::Date(d) => format!("new Date({})", d.timestamp_millis()),
            Scalar::Decimal(d) => format!("new BigDecimal(\"{}\")", d),
            Scalar::BigInteger(i) => format!("new BigInteger(\"{}\")", i),
        }
    }
}

fn non_finite(boxed: &str, v: f64) -> Option<String> {
    if v.is_nan() {
        Some(format!("{}.NaN", boxed))
    } else if v.is_infinite() && v > 0.0 {
        Some(format!("{}.POSITIVE_INFINITY", boxed))
    } else if v.is_infinite() {
        Some(format!("{}.NEGATIVE_INFINITY", boxed))
    } else {
        None
    }
}

fn escape_char(c: char, quote: char) -> String {
    match c {
        '\\' => "\\\\".to_string(),
        '\n' => "\\n".to_string(),
        '\r' => "\\r".to_string(),
        '\t' => "\\t".to_string(),
        '\u{8}' => "\\b".to_string(),
        '\u{c}' => "\\f".to_string(),
        c if c == quote => format!("\\{}", c),
        c if c.is_control() => format!("\\u{:04x}", c as u32),
        c => c.to_string(),
    }
}

/// Escape `s` for use inside a double-quoted string literal.
pub fn escape(s: &str) -> String {
    s.chars().map(|c| escape_char(c, '"')).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn render(s: Scalar) -> String {
        DeclarationLiterals.render(&s)
    }

    #[test]
    fn numeric_suffixes() {
        assert_eq!(render(Scalar::Int(5)), "5");
        assert_eq!(render(Scalar::Long(5)), "5L");
        assert_eq!(render(Scalar::Float(1.5)), "1.5f");
        assert_eq!(render(Scalar::Double(2.0)), "2.0");
        assert_eq!(render(Scalar::Short(-3)), "(short) -3");
        assert_eq!(render(Scalar::Double(f64::NAN)), "Double.NaN");
        assert_eq!(render(Scalar::Float(f32::NEG_INFINITY)), "Float.NEGATIVE_INFINITY");
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(render(Scalar::Str("a \"b\"\n".to_string())), "\"a \\\"b\\\"\\n\"");
        assert_eq!(render(Scalar::Char('\'')), "'\\''");
        assert_eq!(render(Scalar::Char('"')), "'\"'");
    }

    #[test]
    fn object_backed_scalars() {
        let enumerant = Scalar::Enum {
            type_name: "com.acme.Color".to_string(),
            constant: "RED".to_string(),
        };
        assert_eq!(render(enumerant), "Color.RED");
        let date = Utc.timestamp_millis_opt(1_600_000_000_123).unwrap();
        assert_eq!(render(Scalar::Date(date)), "new Date(1600000000123)");
        let dec = Decimal::from_str("1.50").unwrap();
        assert_eq!(render(Scalar::Decimal(dec)), "new BigDecimal(\"1.50\")");
        assert_eq!(render(Scalar::BigInteger(12345678901234567890)), "new BigInteger(\"12345678901234567890\")");
    }
}
