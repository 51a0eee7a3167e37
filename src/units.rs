//! Feet/inches display helpers. The engine works in plain inches; these
//! exist only for presentation.

pub fn to_inches(feet: f64, inches: f64) -> f64 {
    feet * 12.0 + inches
}

/// Formats inches as `F' R"` with the inch remainder rounded to 2 decimals.
pub fn to_feet_inches(inches: f64) -> String {
    let feet = (inches / 12.0).floor();
    let remaining = ((inches - feet * 12.0) * 100.0).round() / 100.0;
    format!("{}' {}\"", feet as i64, remaining)
}
