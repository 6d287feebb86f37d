use crate::parsing::values::parse_number;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)[xX](\d+)").expect("section pattern is valid"));

/// Beam mark and section size read from an ID label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeamId {
    pub mark: String,
    /// Section width in millimeters.
    pub width: Decimal,
    /// Section depth in millimeters.
    pub depth: Decimal,
}

/// Parse a beam ID label such as "B1 300x600" or "B12 (250 X 500)".
///
/// The mark is the first whitespace-separated token. The section is read from
/// the tokens around a standalone "x"; when there is none, the remaining
/// tokens are joined and searched for `<digits>x<digits>`, which covers
/// callouts written as "300x600", "300x 600" or "300 x600". Width and depth
/// default to zero when nothing can be read.
pub fn parse_beam_id(text: &str) -> BeamId {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mark = tokens.first().map(|t| t.to_string()).unwrap_or_default();

    let (width, depth) = standalone_section(&tokens)
        .or_else(|| joined_section(&tokens))
        .unwrap_or((Decimal::ZERO, Decimal::ZERO));

    BeamId { mark, width, depth }
}

fn standalone_section(tokens: &[&str]) -> Option<(Decimal, Decimal)> {
    let pos = tokens
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, t)| t.eq_ignore_ascii_case("x"))
        .map(|(i, _)| i)?;
    let before = tokens.get(pos - 1)?;
    let after = tokens.get(pos + 1)?;
    Some((parse_number(before), parse_number(after)))
}

fn joined_section(tokens: &[&str]) -> Option<(Decimal, Decimal)> {
    // The mark is left out so a trailing digit of "B1" cannot run into the width.
    let joined = match tokens {
        [] => return None,
        [only] => only.to_string(),
        [_, rest @ ..] => rest.concat(),
    };
    let caps = SECTION_RE.captures(&joined)?;
    Some((parse_number(&caps[1]), parse_number(&caps[2])))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn assert_id(text: &str, mark: &str, width: Decimal, depth: Decimal) {
        let id = parse_beam_id(text);
        assert_eq!(id.mark, mark, "mark of {text:?}");
        assert_eq!(id.width, width, "width of {text:?}");
        assert_eq!(id.depth, depth, "depth of {text:?}");
    }

    #[test]
    fn test_compact_section() {
        assert_id("B1 300x600", "B1", dec!(300), dec!(600));
    }

    #[test]
    fn test_uppercase_marker() {
        assert_id("B2 250X500", "B2", dec!(250), dec!(500));
    }

    #[test]
    fn test_standalone_marker() {
        assert_id("B3 300 x 700", "B3", dec!(300), dec!(700));
        assert_id("B3 300 X 700", "B3", dec!(300), dec!(700));
    }

    #[test]
    fn test_split_marker_tokens() {
        assert_id("B4 300x 650", "B4", dec!(300), dec!(650));
        assert_id("B4 300 x650", "B4", dec!(300), dec!(650));
    }

    #[test]
    fn test_surrounding_tokens() {
        assert_id("2B7 (300x600) TYP.", "2B7", dec!(300), dec!(600));
        assert_id("RB1 ( 200 x 400 )", "RB1", dec!(200), dec!(400));
    }

    #[test]
    fn test_malformed_standalone_numbers_are_zero() {
        assert_id("B5 abc x 600", "B5", Decimal::ZERO, dec!(600));
    }

    #[test]
    fn test_no_section() {
        assert_id("B6", "B6", Decimal::ZERO, Decimal::ZERO);
        assert_id("B6 TYP", "B6", Decimal::ZERO, Decimal::ZERO);
    }

    #[test]
    fn test_trailing_marker_falls_back_to_pattern() {
        // "x" with nothing after it is not a usable standalone marker
        assert_id("B8 300x600 x", "B8", dec!(300), dec!(600));
    }

    #[test]
    fn test_empty_text() {
        assert_id("   ", "", Decimal::ZERO, Decimal::ZERO);
    }
}
