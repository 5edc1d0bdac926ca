//! Field cleanup for the known-dirty timing feed
//!
//! The provider intermittently ships values where an internal character
//! has been replaced by an underscore ("f_ma_e", "12_30_45") along with
//! localized gender tokens. The rules below are evaluated in a fixed
//! order; that order is part of the contract and covered by tests.

const MALE: &str = "Male";
const FEMALE: &str = "Female";

/// Localized gender synonyms observed in the feed
const MALE_SYNONYMS: &[&str] = &["pria", "laki-laki", "laki", "l", "cowok", "cwo"];
const FEMALE_SYNONYMS: &[&str] = &["wanita", "perempuan", "p", "w", "cewek", "cwe"];

/// Normalize a raw gender token to "Male" / "Female"
///
/// Rules, in order:
/// 1. exact English forms ("male"/"m", "female"/"f")
/// 2. localized synonym tables
/// 3. underscore-corruption substrings; the female variants are checked
///    first because "female" contains "male"
/// 4. letters-only length fallback: 4 letters reads as "male", 6 as
///    "female"; anything else passes through trimmed
///
/// An empty input yields "Unknown".
pub fn normalize_gender(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "Unknown".to_string();
    }

    let lower = trimmed.to_lowercase();

    match lower.as_str() {
        "male" | "m" => return MALE.to_string(),
        "female" | "f" => return FEMALE.to_string(),
        _ => {}
    }

    if MALE_SYNONYMS.contains(&lower.as_str()) {
        return MALE.to_string();
    }
    if FEMALE_SYNONYMS.contains(&lower.as_str()) {
        return FEMALE.to_string();
    }

    if lower.contains("female") || lower.contains("f_ma") {
        return FEMALE.to_string();
    }
    if lower.contains("male") || lower.contains("ma_e") {
        return MALE.to_string();
    }

    // Length fallback is tied to the English word lengths and known to
    // misread other languages; kept because the feed relies on it.
    let letters = lower.chars().filter(|c| c.is_alphabetic()).count();
    match letters {
        4 => MALE.to_string(),
        6 => FEMALE.to_string(),
        _ => trimmed.to_string(),
    }
}

/// Clean a participant name: strip underscores, collapse whitespace
/// runs, trim
pub fn clean_name(raw: &str) -> String {
    raw.replace('_', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Clean a time-like value ("12_30_45" -> "12:30:45")
///
/// Underscores become colons, repeated colons collapse to one, and
/// leading/trailing colons are trimmed. Empty input, or input that is
/// empty after cleanup, is None.
pub fn clean_time_value(raw: Option<&str>) -> Option<String> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    let mut cleaned = String::with_capacity(raw.len());
    let mut last_was_colon = false;
    for c in raw.chars() {
        let c = if c == '_' { ':' } else { c };
        if c == ':' {
            if !last_was_colon {
                cleaned.push(':');
            }
            last_was_colon = true;
        } else {
            cleaned.push(c);
            last_was_colon = false;
        }
    }

    let cleaned = cleaned.trim_matches(':').to_string();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Permissive integer parse for rank-like fields
///
/// None, "", "N/A" and "-" are null; any other non-numeric input
/// degrades to 0 rather than an error.
pub fn to_nullable_int(raw: Option<&str>) -> Option<i64> {
    let raw = raw?.trim();
    if raw.is_empty() || raw == "N/A" || raw == "-" {
        return None;
    }
    Some(raw.parse::<i64>().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_exact_forms() {
        assert_eq!(normalize_gender("Male"), "Male");
        assert_eq!(normalize_gender("male"), "Male");
        assert_eq!(normalize_gender("M"), "Male");
        assert_eq!(normalize_gender("Female"), "Female");
        assert_eq!(normalize_gender("f"), "Female");
    }

    #[test]
    fn test_gender_localized_synonyms() {
        assert_eq!(normalize_gender("Pria"), "Male");
        assert_eq!(normalize_gender("laki-laki"), "Male");
        assert_eq!(normalize_gender("cowok"), "Male");
        assert_eq!(normalize_gender("L"), "Male");
        assert_eq!(normalize_gender("Wanita"), "Female");
        assert_eq!(normalize_gender("perempuan"), "Female");
        assert_eq!(normalize_gender("cewek"), "Female");
        assert_eq!(normalize_gender("P"), "Female");
    }

    #[test]
    fn test_gender_underscore_corruption() {
        assert_eq!(normalize_gender("f_ma_e"), "Female");
        assert_eq!(normalize_gender("f_male"), "Female");
        assert_eq!(normalize_gender("Ma_e"), "Male");
        assert_eq!(normalize_gender("male_"), "Male");
        // Contains neither "female" nor "f_ma", so the male substring
        // rule claims it; rule order is the contract here
        assert_eq!(normalize_gender("fe_male"), "Male");
    }

    #[test]
    fn test_gender_length_fallback() {
        // Unmatched 4-letter token reads as male, 6-letter as female
        assert_eq!(normalize_gender("mies"), "Male");
        assert_eq!(normalize_gender("herren"), "Female");
        // Anything else passes through trimmed
        assert_eq!(normalize_gender("  nonbinary "), "nonbinary");
    }

    #[test]
    fn test_gender_empty_is_unknown() {
        assert_eq!(normalize_gender(""), "Unknown");
        assert_eq!(normalize_gender("   "), "Unknown");
    }

    #[test]
    fn test_clean_name() {
        assert_eq!(clean_name("Jane_ Doe"), "Jane Doe");
        assert_eq!(clean_name("  Jane   Doe  "), "Jane Doe");
        assert_eq!(clean_name("J_ane Doe"), "Jane Doe");
    }

    #[test]
    fn test_clean_time_value() {
        assert_eq!(clean_time_value(Some("12_30_45")), Some("12:30:45".to_string()));
        assert_eq!(clean_time_value(Some("::12:30::")), Some("12:30".to_string()));
        assert_eq!(clean_time_value(Some("04:::15")), Some("04:15".to_string()));
        assert_eq!(clean_time_value(Some("")), None);
        assert_eq!(clean_time_value(Some("::")), None);
        assert_eq!(clean_time_value(None), None);
    }

    #[test]
    fn test_to_nullable_int() {
        assert_eq!(to_nullable_int(Some("7")), Some(7));
        assert_eq!(to_nullable_int(Some(" 12 ")), Some(12));
        assert_eq!(to_nullable_int(Some("N/A")), None);
        assert_eq!(to_nullable_int(Some("-")), None);
        assert_eq!(to_nullable_int(Some("")), None);
        assert_eq!(to_nullable_int(None), None);
        // Garbage degrades to 0, never an error
        assert_eq!(to_nullable_int(Some("abc")), Some(0));
    }
}
