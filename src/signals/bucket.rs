use super::types::{Bucket, Classified};
use crate::config::ThresholdProfile;

/// Brings a fraction (0.62) or a percentage (62) onto the 0-100 scale.
/// Non-finite input is treated as missing.
pub fn normalize_pct(value: f64) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }
    if value > 1.0 {
        Some(value)
    } else {
        Some(value * 100.0)
    }
}

/// Tier for a value already on the 0-100 scale.
pub fn bucket_for(pct: f64, profile: &ThresholdProfile) -> Bucket {
    let is_red = if profile.red_inclusive {
        pct <= profile.red_ceiling
    } else {
        pct < profile.red_ceiling
    };

    if is_red {
        Bucket::Red
    } else if pct > profile.green_floor {
        Bucket::Green
    } else {
        Bucket::Yellow
    }
}

/// Missing and NaN values have no bucket; they are never Red.
pub fn classify(value: Option<f64>, profile: &ThresholdProfile) -> Option<Bucket> {
    classify_side(value, profile).map(|c| c.bucket)
}

pub fn classify_side(value: Option<f64>, profile: &ThresholdProfile) -> Option<Classified> {
    let pct = normalize_pct(value?)?;
    Some(Classified {
        pct,
        bucket: bucket_for(pct, profile),
    })
}

/// "62.0%" for present values, "-" for missing ones.
pub fn format_pct(value: Option<f64>) -> String {
    match value.and_then(normalize_pct) {
        Some(pct) => format!("{:.1}%", pct),
        None => "-".to_string(),
    }
}
