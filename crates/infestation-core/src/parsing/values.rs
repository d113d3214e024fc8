use crate::error::InfestationError;

/// Minus-like glyphs the recognition source emits in place of a plain `-`.
pub const WEIRD_HYPHENS: &[char] = &['\u{2010}', '\u{2012}', '\u{2013}', '\u{2014}', '\u{2212}'];

/// Character substitutions applied before a value is stripped and parsed.
const SUBSTITUTIONS: &[(char, char)] = &[
    ('\u{2010}', '-'),
    ('\u{2012}', '-'),
    ('\u{2013}', '-'),
    ('\u{2014}', '-'),
    ('\u{2212}', '-'),
    (',', '.'),
];

/// Whole-token markers for "no cases", read as zero.
const PLACEHOLDERS: &[&str] = &["-", "."];

fn substitute(c: char) -> char {
    SUBSTITUTIONS
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
        .unwrap_or(c)
}

/// Replace every weird hyphen glyph with a plain `-`.
pub fn normalize_hyphens(s: &str) -> String {
    s.chars()
        .map(|c| if WEIRD_HYPHENS.contains(&c) { '-' } else { c })
        .collect()
}

/// True for a token that stands for a missing (zero) value.
pub fn is_placeholder(token: &str) -> bool {
    let token = normalize_hyphens(token.trim());
    PLACEHOLDERS.contains(&token.as_str())
}

/// True if `text`, once ignorable characters are dropped and hyphens are
/// normalized, is all digits or exactly a minus sign.
pub fn is_data_token(text: &str, ignorable: &[char]) -> bool {
    let stripped: String = text.chars().filter(|c| !ignorable.contains(c)).collect();
    let stripped = normalize_hyphens(&stripped);
    stripped == "-" || (!stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit()))
}

/// Reduce a raw value token to digits and at most a decimal point.
///
/// Placeholders become `"0"`. Anything that leaves nothing behind is an error,
/// never a silent zero.
pub fn normalize_value(raw: &str) -> Result<String, InfestationError> {
    if is_placeholder(raw) {
        return Ok("0".into());
    }

    let normalized: String = raw
        .chars()
        .map(substitute)
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if normalized.is_empty() {
        return Err(InfestationError::NumericNormalization {
            raw: raw.to_string(),
            reason: "no digits left after normalization".into(),
        });
    }

    Ok(normalized)
}

/// Normalize and parse a value token into a finite, non-negative float.
pub fn parse_value(raw: &str) -> Result<f64, InfestationError> {
    let normalized = normalize_value(raw)?;
    let value: f64 = normalized
        .parse()
        .map_err(|e: std::num::ParseFloatError| InfestationError::NumericNormalization {
            raw: raw.to_string(),
            reason: format!("'{normalized}' is not a number: {e}"),
        })?;

    if !value.is_finite() {
        return Err(InfestationError::NumericNormalization {
            raw: raw.to_string(),
            reason: "value is out of range".into(),
        });
    }

    Ok(value)
}
