use anyhow::bail;

use super::Weekday;

/// Normalize a day-of-week specification to a [`Weekday`].
///
/// Accepts full names (`monday`), 3-letter (`mon`), 2-letter (`mo`), and
/// `w-` prefixed specs (`w-mon`), all case-insensitive.
///
/// # Examples
/// ```
/// use tempo_chrono::timepoint::{parse_weekday, Weekday};
///
/// assert_eq!(parse_weekday("MONDAY").unwrap(), Weekday::Mon);
/// assert_eq!(parse_weekday("w-sun").unwrap(), Weekday::Sun);
/// assert_eq!(parse_weekday("th").unwrap(), Weekday::Thu);
/// assert!(parse_weekday("noday").is_err());
/// ```
pub fn parse_weekday(spec: &str) -> anyhow::Result<Weekday> {
    let lowered = spec.trim().to_ascii_lowercase();
    let name = lowered.strip_prefix("w-").unwrap_or(&lowered);
    let weekday = match name {
        "monday" | "mon" | "mo" => Weekday::Mon,
        "tuesday" | "tue" | "tu" => Weekday::Tue,
        "wednesday" | "wed" | "we" => Weekday::Wed,
        "thursday" | "thu" | "th" => Weekday::Thu,
        "friday" | "fri" | "fr" => Weekday::Fri,
        "saturday" | "sat" | "sa" => Weekday::Sat,
        "sunday" | "sun" | "su" => Weekday::Sun,
        _ => bail!(
            "invalid weekday specification: '{spec}'. \
             Expected a full name ('monday'), 3-letter ('mon'), 2-letter ('mo'), \
             or 'w-' prefixed ('w-mon') form"
        ),
    };
    Ok(weekday)
}
