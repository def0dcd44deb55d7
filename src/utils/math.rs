//! Numeric helpers for report figures and summaries

/// Round to two decimal places, the precision of every report figure.
///
/// # Examples
/// ```
/// use store_uptime::utils::math::round2;
///
/// assert_eq!(round2(3.14159), 3.14);
/// assert_eq!(round2(2.0 / 3.0), 0.67);
/// assert_eq!(round2(0.0), 0.0);
/// ```
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Calculate percentage safely, returning 0.0 if total is zero.
///
/// # Examples
/// ```
/// use store_uptime::utils::math::safe_percentage;
///
/// assert_eq!(safe_percentage(50, 100), 50.0);
/// assert_eq!(safe_percentage(50, 0), 0.0);  // Zero-division guard
/// ```
#[inline]
pub fn safe_percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}
