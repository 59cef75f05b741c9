/// Distance label for the directions panel.
///
/// Meters below one kilometer, otherwise kilometers with one decimal.
pub fn format_distance(meters: f64) -> String {
    let meters = meters.max(0.0);
    if meters < 1000.0 {
        format!("{} m", meters.round() as i64)
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

/// Duration label for the directions panel.
///
/// Sub-minute durations round up to "1 min".
pub fn format_duration(seconds: f64) -> String {
    let minutes = (seconds.max(0.0) / 60.0).ceil() as i64;
    let minutes = minutes.max(1);
    if minutes < 60 {
        format!("{minutes} min")
    } else {
        format!("{} h {} min", minutes / 60, minutes % 60)
    }
}
