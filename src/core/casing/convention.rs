//! Casing conventions and the per-identifier converters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Target naming convention, chosen once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CasingConvention {
    Camel,
    Snake,
    Pascal,
}

impl CasingConvention {
    pub fn as_str(&self) -> &'static str {
        match self {
            CasingConvention::Camel => "camel",
            CasingConvention::Snake => "snake",
            CasingConvention::Pascal => "pascal",
        }
    }

    /// Convert `identifier` into this convention.
    pub fn convert(&self, identifier: &str) -> String {
        match self {
            CasingConvention::Camel => to_camel(identifier),
            CasingConvention::Snake => to_snake(identifier),
            CasingConvention::Pascal => to_pascal(identifier),
        }
    }
}

impl fmt::Display for CasingConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CasingConvention {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "camelCase" => return Ok(CasingConvention::Camel),
            "snake_case" => return Ok(CasingConvention::Snake),
            "PascalCase" => return Ok(CasingConvention::Pascal),
            _ => {}
        }

        match s.to_ascii_lowercase().as_str() {
            "camel" => Ok(CasingConvention::Camel),
            "snake" => Ok(CasingConvention::Snake),
            "pascal" => Ok(CasingConvention::Pascal),
            _ => Err(Error::config_invalid_value(
                "convention",
                Some(s.to_string()),
                format!("Unknown casing convention '{}'. Use: camel, snake, pascal", s),
            )),
        }
    }
}

fn push_lower(out: &mut String, c: char) {
    out.extend(c.to_lowercase());
}

fn push_upper(out: &mut String, c: char) {
    out.extend(c.to_uppercase());
}

/// Lower-case the first character, then join `_x` pairs into `X`.
///
/// A single trailing underscore is kept as-is. An underscore followed by
/// anything other than a lowercase letter is copied unchanged.
pub fn to_camel(identifier: &str) -> String {
    let (body, trailing) = match identifier.strip_suffix('_') {
        Some(body) if !body.is_empty() => (body, "_"),
        _ => (identifier, ""),
    };

    let mut out = String::with_capacity(identifier.len());
    let mut chars = body.chars().peekable();

    if let Some(first) = chars.next() {
        push_lower(&mut out, first);
    }

    while let Some(c) = chars.next() {
        if c == '_' {
            if let Some(&next) = chars.peek() {
                if next.is_lowercase() {
                    chars.next();
                    push_upper(&mut out, next);
                    continue;
                }
            }
        }
        out.push(c);
    }

    out.push_str(trailing);
    out
}

/// `to_camel` with the first character upper-cased.
pub fn to_pascal(identifier: &str) -> String {
    let camel = to_camel(identifier);
    let mut chars = camel.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let mut out = String::with_capacity(camel.len());
            push_upper(&mut out, first);
            out.push_str(chars.as_str());
            out
        }
    }
}

/// Lower-case everything, inserting `_` at each lower→upper transition.
///
/// Runs of capitals are not split: `parseHTTPHeader` becomes
/// `parse_httpheader`.
pub fn to_snake(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len() + 4);
    let mut prev: Option<char> = None;

    for c in identifier.chars() {
        if let Some(p) = prev {
            if c.is_uppercase() && p.is_lowercase() {
                out.push('_');
            }
        }
        push_lower(&mut out, c);
        prev = Some(c);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_joins_snake_words() {
        assert_eq!(to_camel("abc_def"), "abcDef");
        assert_eq!(to_camel("get_http_response"), "getHttpResponse");
        assert_eq!(to_camel("FooBar"), "fooBar");
    }

    #[test]
    fn camel_keeps_trailing_underscore() {
        assert_eq!(to_camel("trailing_"), "trailing_");
        assert_eq!(to_camel("Trailing_"), "trailing_");
        assert_eq!(to_camel("two_words_"), "twoWords_");
    }

    #[test]
    fn camel_keeps_underscore_before_non_lowercase() {
        assert_eq!(to_camel("foo_1"), "foo_1");
        assert_eq!(to_camel("foo_Bar"), "foo_Bar");
        assert_eq!(to_camel("foo__bar"), "foo_Bar");
    }

    #[test]
    fn camel_leading_underscore_is_untouched() {
        assert_eq!(to_camel("_private"), "_private");
        assert_eq!(to_camel("_"), "_");
    }

    #[test]
    fn pascal_upper_cases_first_letter() {
        assert_eq!(to_pascal("abc_def"), "AbcDef");
        assert_eq!(to_pascal("fooBar"), "FooBar");
        assert_eq!(to_pascal(""), "");
    }

    #[test]
    fn snake_splits_on_lower_upper_transition() {
        assert_eq!(to_snake("abcDef"), "abc_def");
        assert_eq!(to_snake("FooBarBaz"), "foo_bar_baz");
        assert_eq!(to_snake("abc1Def"), "abc1def");
    }

    #[test]
    fn snake_does_not_split_acronyms() {
        assert_eq!(to_snake("parseHTTPHeader"), "parse_httpheader");
        assert_eq!(to_snake("HTTPServer"), "httpserver");
    }

    #[test]
    fn conversions_are_idempotent_on_own_output() {
        for input in ["abc_def", "fooBar", "FooBar", "x", "already_snake_2"] {
            for convention in [
                CasingConvention::Camel,
                CasingConvention::Snake,
                CasingConvention::Pascal,
            ] {
                let once = convention.convert(input);
                assert_eq!(convention.convert(&once), once, "{} / {}", input, convention);
            }
        }
    }

    #[test]
    fn parses_short_and_long_names() {
        assert_eq!("snake".parse::<CasingConvention>().unwrap(), CasingConvention::Snake);
        assert_eq!("Camel".parse::<CasingConvention>().unwrap(), CasingConvention::Camel);
        assert_eq!("PascalCase".parse::<CasingConvention>().unwrap(), CasingConvention::Pascal);
        assert_eq!("snake_case".parse::<CasingConvention>().unwrap(), CasingConvention::Snake);
    }

    #[test]
    fn unknown_convention_is_config_error() {
        let err = "kebab".parse::<CasingConvention>().unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ConfigInvalidValue);
        assert_eq!(err.details["key"], "convention");
    }
}
