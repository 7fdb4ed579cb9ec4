use super::round2;
use crate::features::Features;

/// Rule-based score used whenever no trained model is available.
///
/// Starts at 50 and adds independent bonuses per dimension; no bonus
/// depends on another, so the score is monotonic in each one. Clamped to
/// [0, 100] and rounded to 2 decimals.
pub fn fallback_score(features: &Features) -> f64 {
    let mut score: f64 = 50.0;

    // Ecosystem: mangroves score highest, seagrass/wetland group next
    if features.ecosystem_type_encoded == 0.0 {
        score += 10.0;
    } else if features.ecosystem_type_encoded == 1.0 {
        score += 5.0;
    }

    // Area reasonableness: 1-100 ha is the credible restoration band
    let area = features.area_hectares;
    if (1.0..=100.0).contains(&area) {
        score += 15.0;
    } else if (0.1..=1000.0).contains(&area) {
        score += 10.0;
    } else if area > 0.0 {
        score += 5.0;
    }

    // Location validity: in range and not the 0,0 placeholder
    let lat = features.latitude;
    let lng = features.longitude;
    if (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lng)
        && (lat != 0.0 || lng != 0.0)
    {
        score += 10.0;
    }

    // Data completeness
    if features.project_name_length > 5.0 {
        score += 5.0;
    }
    if features.description_length > 20.0 {
        score += 5.0;
    }

    // Media evidence
    let total_media = features.photo_count + features.video_count + features.document_count;
    if total_media >= 5.0 {
        score += 10.0;
    } else if total_media >= 1.0 {
        score += 5.0;
    }

    // Water quality plausibility
    if (6.0..=8.5).contains(&features.water_ph) {
        score += 3.0;
    }
    if (0.0..=50.0).contains(&features.water_salinity_ppt) {
        score += 3.0;
    }

    // Soil quality
    if features.soil_organic_carbon_percent > 1.0 {
        score += 4.0;
    }

    round2(score.clamp(0.0, 100.0))
}
