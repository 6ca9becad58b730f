use crate::error::{Result, SessionError};

/// Parse a user-typed edge weight.
///
/// Surrounding whitespace is ignored; an empty entry means "use the default".
/// Anything else must be a finite, non-negative number.
pub fn parse_weight(text: &str, default: f64) -> Result<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    match trimmed.parse::<f64>() {
        Ok(w) if w.is_finite() && w >= 0.0 => Ok(w),
        _ => Err(SessionError::InvalidWeightInput(trimmed.to_string())),
    }
}

/// Trim a user-typed vertex label, rejecting blank input.
pub fn normalize_label(text: &str) -> Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(SessionError::EmptyLabel);
    }
    Ok(trimmed.to_string())
}

/// Parse a boolean setting value. Accepts on/off, true/false, yes/no, 1/0.
pub fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weight() {
        assert_eq!(parse_weight(" 2.5 ", 1.0), Ok(2.5));
        assert_eq!(parse_weight("", 1.0), Ok(1.0));
        assert_eq!(parse_weight("   ", 3.0), Ok(3.0));
        assert_eq!(parse_weight("0", 1.0), Ok(0.0));
        assert_eq!(
            parse_weight("-1", 1.0),
            Err(SessionError::InvalidWeightInput("-1".into()))
        );
        assert!(parse_weight("abc", 1.0).is_err());
        assert!(parse_weight("inf", 1.0).is_err());
        assert!(parse_weight("NaN", 1.0).is_err());
    }

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("  A "), Ok("A".to_string()));
        assert_eq!(normalize_label("\t"), Err(SessionError::EmptyLabel));
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("ON"), Some(true));
        assert_eq!(parse_bool("no"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
