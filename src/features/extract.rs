use serde_json::{Map, Value};

use super::location::{lat_from_string, lng_from_string};
use super::media::media_counts;
use super::normalize::numeric_value;

/// Number of features the model was trained on. The extractor always
/// produces exactly this many, in the order of [`FEATURE_NAMES`].
pub const FEATURE_COUNT: usize = 15;

/// Feature names in model input order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "project_name_length",
    "ecosystem_type_encoded",
    "area_hectares",
    "description_length",
    "latitude",
    "longitude",
    "photo_count",
    "video_count",
    "document_count",
    "water_ph",
    "water_salinity_ppt",
    "water_dissolved_oxygen",
    "soil_organic_carbon_percent",
    "soil_ph",
    "soil_salinity_ppt",
];

/// The fixed-schema numeric view of a project submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Features {
    pub project_name_length: f64,
    pub ecosystem_type_encoded: f64,
    pub area_hectares: f64,
    pub description_length: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub photo_count: f64,
    pub video_count: f64,
    pub document_count: f64,
    pub water_ph: f64,
    pub water_salinity_ppt: f64,
    pub water_dissolved_oxygen: f64,
    pub soil_organic_carbon_percent: f64,
    pub soil_ph: f64,
    pub soil_salinity_ppt: f64,
}

impl Features {
    /// The feature values in model input order.
    pub fn to_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            self.project_name_length,
            self.ecosystem_type_encoded,
            self.area_hectares,
            self.description_length,
            self.latitude,
            self.longitude,
            self.photo_count,
            self.video_count,
            self.document_count,
            self.water_ph,
            self.water_salinity_ppt,
            self.water_dissolved_oxygen,
            self.soil_organic_carbon_percent,
            self.soil_ph,
            self.soil_salinity_ppt,
        ]
    }

    /// Name→value snapshot for result diagnostics.
    pub fn to_json_map(&self) -> Map<String, Value> {
        FEATURE_NAMES
            .iter()
            .zip(self.to_vector())
            .map(|(name, value)| ((*name).to_string(), Value::from(value)))
            .collect()
    }
}

/// Map a submission onto the fixed 15-feature schema.
///
/// Extra keys are ignored and every missing or malformed field degrades to
/// its default, so this never fails regardless of input shape.
pub fn extract_features(submission: &Value) -> Features {
    let project_name = submission
        .get("project_name")
        .and_then(Value::as_str)
        .unwrap_or("");

    let ecosystem = submission
        .get("ecosystem_type")
        .and_then(Value::as_str)
        .unwrap_or("");

    let area_hectares = submission
        .get("area_hectares")
        .map_or(0.0, numeric_value);

    let description = submission
        .get("description")
        .and_then(Value::as_str)
        .or_else(|| {
            submission
                .get("project_description")
                .and_then(Value::as_str)
        })
        .unwrap_or("");

    let (latitude, longitude) = match submission.get("location") {
        Some(Value::Object(location)) => (
            location.get("lat").map_or(0.0, numeric_value),
            location.get("lng").map_or(0.0, numeric_value),
        ),
        Some(Value::String(location)) => (lat_from_string(location), lng_from_string(location)),
        _ => (0.0, 0.0),
    };

    let (photo_count, video_count, document_count) = media_counts(submission);

    let measurements = submission.get("field_measurements");
    let water = measurements.and_then(|m| m.get("water_quality"));
    let soil = measurements.and_then(|m| m.get("soil_analysis"));

    Features {
        project_name_length: project_name.chars().count() as f64,
        ecosystem_type_encoded: encode_ecosystem(ecosystem),
        area_hectares,
        description_length: description.chars().count() as f64,
        latitude,
        longitude,
        photo_count: f64::from(photo_count),
        video_count: f64::from(video_count),
        document_count: f64::from(document_count),
        water_ph: numeric_or(water, "ph_level", 7.0),
        water_salinity_ppt: numeric_or(water, "salinity", 25.0),
        water_dissolved_oxygen: numeric_or(water, "dissolved_oxygen", 6.0),
        soil_organic_carbon_percent: numeric_or(soil, "carbon_content", 2.0),
        soil_ph: numeric_or(soil, "ph_level", 7.0),
        soil_salinity_ppt: numeric_or(soil, "salinity", 15.0),
    }
}

/// Collapse the six-term ecosystem vocabulary into the three categories the
/// model was trained on. Unrecognised types share category 1 with the
/// seagrass/wetland group, so the encoding cannot distinguish the two.
fn encode_ecosystem(ecosystem: &str) -> f64 {
    match ecosystem.to_lowercase().as_str() {
        "mangrove" | "mangroves" => 0.0,
        "seagrass" | "coastal_wetland" | "coastal_wetlands" => 1.0,
        "salt_marsh" | "kelp_forest" => 2.0,
        _ => 1.0,
    }
}

// Defaults apply only when the key is absent; a present-but-null reading
// still goes through the normalizer and becomes 0.0.
fn numeric_or(section: Option<&Value>, key: &str, default: f64) -> f64 {
    match section.and_then(|s| s.get(key)) {
        Some(value) => numeric_value(value),
        None => default,
    }
}
