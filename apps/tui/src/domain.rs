use ratatui::style::Color;

/// Health category derived from an AQI reading via the ECA breakpoint table.
///
/// Categories partition the non-negative reals into six left-inclusive
/// intervals; anything out of domain (negative, NaN) maps to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AqiCategory {
    Good,
    Moderate,
    SensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
    #[default]
    Unknown,
}

/// Lowest tier that triggers the audible/visual alert side effects.
pub const ALERT_TIER: u8 = 3;

impl AqiCategory {
    /// Ordinal severity tier, 0 (Good) through 5 (Hazardous); `Unknown` is 6.
    pub const fn tier(self) -> u8 {
        match self {
            Self::Good => 0,
            Self::Moderate => 1,
            Self::SensitiveGroups => 2,
            Self::Unhealthy => 3,
            Self::VeryUnhealthy => 4,
            Self::Hazardous => 5,
            Self::Unknown => 6,
        }
    }

    /// Symbolic style tag, mirrored from the web dashboard's CSS classes.
    pub const fn style(self) -> &'static str {
        match self {
            Self::Good => "aqi-good",
            Self::Moderate => "aqi-moderate",
            Self::SensitiveGroups => "aqi-sensitive",
            Self::Unhealthy => "aqi-unhealthy",
            Self::VeryUnhealthy => "aqi-very-unhealthy",
            Self::Hazardous => "aqi-hazardous",
            Self::Unknown => "aqi-unknown",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::SensitiveGroups => "Unhealthy for sensitive groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very unhealthy",
            Self::Hazardous => "Hazardous",
            Self::Unknown => "Unknown",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Good => "No health risk.",
            Self::Moderate => "Acceptable, may affect sensitive people.",
            Self::SensitiveGroups => "May affect children, the elderly and the ill.",
            Self::Unhealthy => "Affects most people.",
            Self::VeryUnhealthy => "High risk for everyone.",
            Self::Hazardous => "Public health emergency.",
            Self::Unknown => "Reading out of range.",
        }
    }

    /// Marker color matching the web dashboard's map palette.
    pub const fn color(self) -> Color {
        match self {
            Self::Good => Color::Green,
            Self::Moderate => Color::Yellow,
            Self::SensitiveGroups => Color::Rgb(255, 140, 0),
            Self::Unhealthy => Color::Red,
            Self::VeryUnhealthy => Color::Magenta,
            Self::Hazardous => Color::Rgb(90, 0, 0),
            Self::Unknown => Color::Gray,
        }
    }

    /// Whether this category triggers the alert side effects.
    ///
    /// `Unknown` never alerts, even though its ordinal sits above the
    /// threshold.
    pub const fn is_alert_worthy(self) -> bool {
        matches!(self, Self::Unhealthy | Self::VeryUnhealthy | Self::Hazardous)
    }

    /// Banner text shown with the prediction peak. The four alert-adjacent
    /// tiers each get a distinct message; everything else shares the default.
    pub const fn banner_message(self) -> &'static str {
        match self {
            Self::SensitiveGroups => "Sensitive groups should limit prolonged outdoor exertion.",
            Self::Unhealthy => "Everyone should reduce outdoor activity.",
            Self::VeryUnhealthy => "Avoid outdoor activity; keep windows closed.",
            Self::Hazardous => "Health emergency: remain indoors.",
            Self::Good | Self::Moderate | Self::Unknown => {
                "Air quality is within acceptable limits."
            }
        }
    }
}

/// Maps an AQI reading onto its category.
///
/// Total over all `f64` input: negative and NaN readings yield
/// [`AqiCategory::Unknown`] rather than an error. Breakpoints are
/// left-inclusive, so a reading of exactly 301.0 is already `Hazardous`.
pub fn classify(reading: f64) -> AqiCategory {
    if reading.is_nan() || reading < 0.0 {
        AqiCategory::Unknown
    } else if reading >= 301.0 {
        AqiCategory::Hazardous
    } else if reading >= 201.0 {
        AqiCategory::VeryUnhealthy
    } else if reading >= 151.0 {
        AqiCategory::Unhealthy
    } else if reading >= 101.0 {
        AqiCategory::SensitiveGroups
    } else if reading >= 51.0 {
        AqiCategory::Moderate
    } else {
        AqiCategory::Good
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoints_are_left_inclusive() {
        assert_eq!(classify(0.0), AqiCategory::Good);
        assert_eq!(classify(50.999), AqiCategory::Good);
        assert_eq!(classify(51.0), AqiCategory::Moderate);
        assert_eq!(classify(100.999), AqiCategory::Moderate);
        assert_eq!(classify(101.0), AqiCategory::SensitiveGroups);
        assert_eq!(classify(150.999), AqiCategory::SensitiveGroups);
        assert_eq!(classify(151.0), AqiCategory::Unhealthy);
        assert_eq!(classify(200.999), AqiCategory::Unhealthy);
        assert_eq!(classify(201.0), AqiCategory::VeryUnhealthy);
        assert_eq!(classify(300.999), AqiCategory::VeryUnhealthy);
        assert_eq!(classify(301.0), AqiCategory::Hazardous);
    }

    #[test]
    fn out_of_domain_readings_are_unknown() {
        assert_eq!(classify(-1.0), AqiCategory::Unknown);
        assert_eq!(classify(-0.001), AqiCategory::Unknown);
        assert_eq!(classify(f64::NAN), AqiCategory::Unknown);
    }

    #[test]
    fn no_upper_bound_on_hazardous() {
        assert_eq!(classify(10_000.0), AqiCategory::Hazardous);
        assert_eq!(classify(f64::INFINITY), AqiCategory::Hazardous);
    }

    #[test]
    fn tier_is_monotonic_over_increasing_readings() {
        let mut previous = 0;
        for step in 0..4000 {
            let reading = f64::from(step) * 0.1;
            let tier = classify(reading).tier();
            assert!(tier >= previous, "tier decreased at reading {reading}");
            previous = tier;
        }
    }

    #[test]
    fn alert_threshold_matches_tier_three() {
        assert!(!classify(150.999).is_alert_worthy());
        assert!(classify(151.0).is_alert_worthy());
        assert!(classify(250.0).is_alert_worthy());
        assert!(classify(500.0).is_alert_worthy());
        assert!(!AqiCategory::Unknown.is_alert_worthy());
        assert_eq!(ALERT_TIER, AqiCategory::Unhealthy.tier());
    }

    #[test]
    fn banner_messages_cover_five_distinct_texts() {
        let all = [
            AqiCategory::Good,
            AqiCategory::Moderate,
            AqiCategory::SensitiveGroups,
            AqiCategory::Unhealthy,
            AqiCategory::VeryUnhealthy,
            AqiCategory::Hazardous,
            AqiCategory::Unknown,
        ];
        let mut messages: Vec<&str> = all.iter().map(|c| c.banner_message()).collect();
        messages.sort_unstable();
        messages.dedup();
        assert_eq!(messages.len(), 5);
        assert_eq!(
            AqiCategory::Good.banner_message(),
            AqiCategory::Unknown.banner_message()
        );
    }
}
