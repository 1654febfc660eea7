//! Config validation: unknown-key detection with Levenshtein suggestions
//! and range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! collect its dotted keys, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

/// Largest IPR curve the calculator will allocate.
const MAX_CURVE_POINTS: usize = 1_000_000;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, ", did you mean '{s}'?")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for `CalcConfig`.
///
/// Maintained by hand to match the struct hierarchy in calc_config.rs.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [survey]
        "survey",
        "survey.ratio_factor_basis",
        "survey.azimuth_averaging",
        "survey.validate_depths",
        "survey.dls_course_length",
        // [ipr]
        "ipr",
        "ipr.curve_points",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Every dotted key path in a TOML document, tables before their children.
///
/// `[survey]` with `azimuth_averaging = ".."` yields `survey` and
/// `survey.azimuth_averaging`. Array contents are not descended into.
pub fn collect_dotted_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let Some(table) = value.as_table() else {
        return Vec::new();
    };
    table
        .iter()
        .flat_map(|(key, child)| {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            let nested = collect_dotted_keys(child, &path);
            std::iter::once(path).chain(nested)
        })
        .collect()
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Edit distance between two strings, counted in chars.
fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_chars.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (k, levenshtein(unknown, k)))
        .filter(|&(_, dist)| dist <= 3)
        .min_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)))
        .map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// Parse errors are left to serde and produce no warnings here.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new();
    };

    let known = known_config_keys();
    collect_dotted_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Range Validation
// ============================================================================

/// Validate value ranges on a parsed `CalcConfig`.
///
/// Returns (errors, warnings): errors must prevent startup, warnings are
/// suspicious but not fatal.
pub fn validate_physical_ranges(
    config: &super::CalcConfig,
) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let points = config.ipr.curve_points;
    if points > MAX_CURVE_POINTS {
        errors.push(format!(
            "ipr.curve_points = {points} exceeds the maximum of {MAX_CURVE_POINTS}"
        ));
    } else if points > 10_000 {
        warnings.push(ValidationWarning {
            field: "ipr.curve_points".to_string(),
            message: format!("ipr.curve_points = {points} is unusually dense (typical 20-1000)"),
            suggestion: None,
        });
    }

    // Common reporting lengths are 30 m, 30 ft and 100 ft
    let course = config.survey.dls_course_length;
    if course.is_finite() && course > 0.0 && !(1.0..=1000.0).contains(&course) {
        warnings.push(ValidationWarning {
            field: "survey.dls_course_length".to_string(),
            message: format!(
                "survey.dls_course_length = {course} is outside typical range (1-1000)"
            ),
            suggestion: None,
        });
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CalcConfig;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("survey", "survey"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein("curve_point", "curve_points"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_collect_dotted_keys_nested() {
        let toml: toml::Value = r#"
            [survey]
            azimuth_averaging = "circular"
        "#
        .parse()
        .unwrap();
        let keys = collect_dotted_keys(&toml, "");
        assert_eq!(keys, vec!["survey", "survey.azimuth_averaging"]);
    }

    #[test]
    fn test_typo_key_produces_warning_with_suggestion() {
        let toml_str = r#"
[survey]
azimuth_averageing = "circular"
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "survey.azimuth_averageing");
        assert_eq!(
            warnings[0].suggestion.as_deref(),
            Some("survey.azimuth_averaging")
        );
    }

    #[test]
    fn test_all_valid_keys_produce_zero_warnings() {
        let toml_str = r#"
[survey]
ratio_factor_basis = "dogleg_angle"
azimuth_averaging = "circular"
validate_depths = true
dls_course_length = 100.0

[ipr]
curve_points = 50
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert!(warnings.is_empty(), "Expected 0 warnings, got: {:?}", warnings);
    }

    #[test]
    fn test_suggest_correction_no_match_for_garbage() {
        let known = known_config_keys();
        assert!(suggest_correction("completely_unrelated_garbage_key_xyz", &known).is_none());
    }

    #[test]
    fn test_range_defaults_clean() {
        let (errors, warnings) = validate_physical_ranges(&CalcConfig::default());
        assert!(errors.is_empty(), "Defaults should produce no errors: {:?}", errors);
        assert!(warnings.is_empty(), "Defaults should produce no warnings: {:?}", warnings);
    }

    #[test]
    fn test_range_course_length_suspicious() {
        let mut config = CalcConfig::default();
        config.survey.dls_course_length = 5000.0;
        let (errors, warnings) = validate_physical_ranges(&config);
        assert!(errors.is_empty());
        assert!(warnings.iter().any(|w| w.field == "survey.dls_course_length"));
    }

    #[test]
    fn test_range_curve_points_too_large() {
        let mut config = CalcConfig::default();
        config.ipr.curve_points = MAX_CURVE_POINTS + 1;
        let (errors, _) = validate_physical_ranges(&config);
        assert!(errors.iter().any(|e| e.contains("ipr.curve_points")));
    }
}
