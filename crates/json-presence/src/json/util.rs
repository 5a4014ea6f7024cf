//! JSON text helpers shared by the encoder and decoder.

use std::fmt;
use std::fmt::Write as _;

use serde_json::{Number, Value};

/// The syntactic kind of a JSON value, read from its first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    /// Classifies already-validated JSON text with no leading whitespace.
    pub fn of(text: &str) -> Self {
        match text.as_bytes().first() {
            Some(b'n') => JsonKind::Null,
            Some(b't') | Some(b'f') => JsonKind::Bool,
            Some(b'"') => JsonKind::String,
            Some(b'[') => JsonKind::Array,
            Some(b'{') => JsonKind::Object,
            _ => JsonKind::Number,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            JsonKind::Null => "null",
            JsonKind::Bool => "boolean",
            JsonKind::Number => "number",
            JsonKind::String => "string",
            JsonKind::Array => "array",
            JsonKind::Object => "object",
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Writes `s` as a quoted JSON string.
///
/// Short escapes for `\b \f \n \r \t`, `\u00XX` for other control
/// characters, U+2028 and U+2029 always escaped, and `<`, `>`, `&` escaped
/// when `escape_html` is set.
pub fn write_json_string(out: &mut String, s: &str, escape_html: bool) {
    out.reserve(s.len() + 2);
    out.push('"');
    let mut start = 0;
    for (i, ch) in s.char_indices() {
        let short = match ch {
            '"' => Some(r#"\""#),
            '\\' => Some(r"\\"),
            '\n' => Some(r"\n"),
            '\r' => Some(r"\r"),
            '\t' => Some(r"\t"),
            '\u{08}' => Some(r"\b"),
            '\u{0c}' => Some(r"\f"),
            _ => None,
        };
        let needs_hex = ch < ' '
            || ch == '\u{2028}'
            || ch == '\u{2029}'
            || (escape_html && matches!(ch, '<' | '>' | '&'));
        if short.is_none() && !needs_hex {
            continue;
        }
        out.push_str(&s[start..i]);
        match short {
            Some(escape) => out.push_str(escape),
            None => write_unicode_escape(out, ch),
        }
        start = i + ch.len_utf8();
    }
    out.push_str(&s[start..]);
    out.push('"');
}

fn write_unicode_escape(out: &mut String, ch: char) {
    out.push('\\');
    out.push('u');
    // Writing to a String cannot fail.
    let _ = write!(out, "{:04x}", ch as u32);
}

/// Writes a number. Integers are written as-is. Floats take their shortest
/// form, so `1.0` is `1`, and switch to exponent notation with an explicit
/// sign (`1e+21`) outside `[1e-6, 1e21)`.
pub fn write_json_number(out: &mut String, n: &Number) {
    let Some(f) = n.as_f64().filter(|_| n.is_f64()) else {
        let _ = write!(out, "{n}");
        return;
    };
    let abs = f.abs();
    if abs != 0.0 && !(1e-6..1e21).contains(&abs) {
        let start = out.len();
        let _ = write!(out, "{f:e}");
        if let Some(e) = out[start..].find('e') {
            let at = start + e + 1;
            if !out[at..].starts_with('-') {
                out.insert(at, '+');
            }
        }
    } else {
        let _ = write!(out, "{f}");
    }
}

/// Writes already-validated JSON text with insignificant whitespace removed.
///
/// String contents are copied unchanged except for U+2028 and U+2029, and
/// `<`, `>`, `&` when `escape_html` is set, which become `\u` escapes.
pub fn write_json_compact(out: &mut String, text: &str, escape_html: bool) {
    out.reserve(text.len());
    let mut in_string = false;
    let mut escaped = false;
    for ch in text.chars() {
        if !in_string {
            match ch {
                ' ' | '\t' | '\n' | '\r' => {}
                '"' => {
                    in_string = true;
                    out.push(ch);
                }
                _ => out.push(ch),
            }
            continue;
        }
        if escaped {
            escaped = false;
            out.push(ch);
            continue;
        }
        match ch {
            '\\' => {
                escaped = true;
                out.push(ch);
            }
            '"' => {
                in_string = false;
                out.push(ch);
            }
            '\u{2028}' | '\u{2029}' => write_unicode_escape(out, ch),
            '<' | '>' | '&' if escape_html => write_unicode_escape(out, ch),
            _ => out.push(ch),
        }
    }
}

/// Writes `value` as compact JSON with object keys sorted at every level.
pub fn write_json_sorted(out: &mut String, value: &Value, escape_html: bool) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => write_json_number(out, n),
        Value::String(s) => write_json_string(out, s, escape_html),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_json_sorted(out, item, escape_html);
            }
            out.push(']');
        }
        Value::Object(map) => write_object_sorted(out, map, escape_html),
    }
}

/// Writes a map as a compact JSON object with its keys sorted at every level.
pub fn write_object_sorted(
    out: &mut String,
    map: &serde_json::Map<String, Value>,
    escape_html: bool,
) {
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    out.push('{');
    for (i, (key, val)) in entries.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_json_string(out, key, escape_html);
        out.push(':');
        write_json_sorted(out, val, escape_html);
    }
    out.push('}');
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn quoted(s: &str, escape_html: bool) -> String {
        let mut out = String::new();
        write_json_string(&mut out, s, escape_html);
        out
    }

    #[test]
    fn kind_from_first_byte() {
        assert_eq!(JsonKind::of("null"), JsonKind::Null);
        assert_eq!(JsonKind::of("false"), JsonKind::Bool);
        assert_eq!(JsonKind::of("-1.5"), JsonKind::Number);
        assert_eq!(JsonKind::of("\"x\""), JsonKind::String);
        assert_eq!(JsonKind::of("[]"), JsonKind::Array);
        assert_eq!(JsonKind::of("{}"), JsonKind::Object);
        assert_eq!(JsonKind::Object.to_string(), "object");
    }

    #[test]
    fn string_short_escapes() {
        assert_eq!(quoted("", true), r#""""#);
        assert_eq!(quoted("a\"b\\c", true), r#""a\"b\\c""#);
        assert_eq!(quoted("\n\r\t\u{08}\u{0c}", true), r#""\n\r\t\b\f""#);
    }

    #[test]
    fn string_hex_escapes() {
        let mut expected = String::from("\"");
        for code in ["0001", "001f", "2028", "2029"] {
            expected.push('\\');
            expected.push('u');
            expected.push_str(code);
        }
        expected.push('"');
        assert_eq!(quoted("\u{01}\u{1f}\u{2028}\u{2029}", false), expected);
    }

    #[test]
    fn string_html_escapes_toggle() {
        assert_eq!(quoted("<a&b>", false), r#""<a&b>""#);
        let escaped = quoted("<a&b>", true);
        assert!(!escaped.contains('<') && !escaped.contains('&') && !escaped.contains('>'));
        let back: String = serde_json::from_str(&escaped).unwrap();
        assert_eq!(back, "<a&b>");
    }

    #[test]
    fn escaped_strings_parse_back() {
        let tricky = "tab\tquote\"slash\\nul\u{0}line\u{2028}emoji\u{1F600}<&>";
        for escape_html in [true, false] {
            let back: String = serde_json::from_str(&quoted(tricky, escape_html)).unwrap();
            assert_eq!(back, tricky);
        }
    }

    fn compact(text: &str, escape_html: bool) -> String {
        let mut out = String::new();
        write_json_compact(&mut out, text, escape_html);
        out
    }

    fn number(text: &str) -> String {
        let n: Number = serde_json::from_str(text).unwrap();
        let mut out = String::new();
        write_json_number(&mut out, &n);
        out
    }

    #[test]
    fn compact_drops_whitespace_outside_strings() {
        let text = "{ \"a b\" : [ 1 ,\t2 ],\n \"c\\\" d\": { } }";
        assert_eq!(compact(text, false), r#"{"a b":[1,2],"c\" d":{}}"#);
        assert_eq!(compact("  7 ", true), "7");
    }

    #[test]
    fn compact_escapes_html_and_separators_inside_strings() {
        assert_eq!(compact(r#"{"k": "<b>&"}"#, false), r#"{"k":"<b>&"}"#);
        let escaped = compact("{\"<k>\": \"<b>&\u{2028}\"}", true);
        assert!(!escaped.contains(['<', '>', '&', '\u{2028}', ' ']), "{escaped}");
        let back: Value = serde_json::from_str(&escaped).unwrap();
        assert_eq!(back, json!({"<k>": "<b>&\u{2028}"}));
        // Separators are escaped even without HTML escaping.
        assert!(!compact("\"\u{2029}\"", false).contains('\u{2029}'));
    }

    #[test]
    fn numbers_follow_float64_formatting() {
        assert_eq!(number("5"), "5");
        assert_eq!(number("-3"), "-3");
        assert_eq!(number("18446744073709551615"), "18446744073709551615");
        assert_eq!(number("1.0"), "1");
        assert_eq!(number("-2.50"), "-2.5");
        assert_eq!(number("0.1"), "0.1");
        assert_eq!(number("1e20"), "100000000000000000000");
        assert_eq!(number("1e21"), "1e+21");
        assert_eq!(number("1.5e300"), "1.5e+300");
        assert_eq!(number("0.000001"), "0.000001");
        assert_eq!(number("1.5e-7"), "1.5e-7");
        assert_eq!(number("-0.0"), "-0");
    }

    #[test]
    fn sorted_output_matches_nested_order() {
        let value = json!({"b": {"z": 1, "a": [3, {"y": null, "x": true}]}, "a": "s"});
        let mut out = String::new();
        write_json_sorted(&mut out, &value, true);
        assert_eq!(out, r#"{"a":"s","b":{"a":[3,{"x":true,"y":null}],"z":1}}"#);
    }
}
