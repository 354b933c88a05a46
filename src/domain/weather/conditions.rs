use chrono::{DateTime, Utc};

use super::clock::is_night_at;
use crate::cli::IconMode;

/// Decorative classification that drives the background palette and particles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherCategory {
    Rainy,
    Thunderstorm,
    Snowy,
    ClearDay,
    ClearNight,
    Cloudy,
    CloudyNight,
    Misty,
    Unknown,
}

impl WeatherCategory {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Rainy => "rainy",
            Self::Thunderstorm => "thunderstorm",
            Self::Snowy => "snowy",
            Self::ClearDay => "sunny",
            Self::ClearNight => "clear-night",
            Self::Cloudy => "cloudy",
            Self::CloudyNight => "cloudy-night",
            Self::Misty => "misty",
            Self::Unknown => "clear",
        }
    }
}

/// Keyword family matched inside a free-text condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionGroup {
    Rain,
    Thunder,
    Snow,
    Clear,
    Cloud,
    Mist,
}

impl ConditionGroup {
    #[must_use]
    pub fn category(self, is_night: bool) -> WeatherCategory {
        match (self, is_night) {
            (Self::Rain, _) => WeatherCategory::Rainy,
            (Self::Thunder, _) => WeatherCategory::Thunderstorm,
            (Self::Snow, _) => WeatherCategory::Snowy,
            (Self::Clear, false) => WeatherCategory::ClearDay,
            (Self::Clear, true) => WeatherCategory::ClearNight,
            (Self::Cloud, false) => WeatherCategory::Cloudy,
            (Self::Cloud, true) => WeatherCategory::CloudyNight,
            (Self::Mist, _) => WeatherCategory::Misty,
        }
    }
}

struct ConditionRule {
    group: ConditionGroup,
    keywords: &'static [&'static str],
}

// Order is precedence: the first rule with any matching keyword wins.
// Thunder sits ahead of rain so "thunderstorm with light rain" keeps its
// lightning.
const CONDITION_RULES: &[ConditionRule] = &[
    ConditionRule {
        group: ConditionGroup::Thunder,
        keywords: &["thunder", "storm"],
    },
    ConditionRule {
        group: ConditionGroup::Rain,
        keywords: &["rain", "drizzle"],
    },
    ConditionRule {
        group: ConditionGroup::Snow,
        keywords: &["snow"],
    },
    ConditionRule {
        group: ConditionGroup::Clear,
        keywords: &["clear"],
    },
    ConditionRule {
        group: ConditionGroup::Cloud,
        keywords: &["cloud"],
    },
    ConditionRule {
        group: ConditionGroup::Mist,
        keywords: &["mist", "fog", "haze"],
    },
];

/// Case-insensitive substring match against the ordered rule list.
#[must_use]
pub fn match_condition(condition: &str) -> Option<ConditionGroup> {
    let condition = condition.to_lowercase();
    CONDITION_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| condition.contains(kw)))
        .map(|rule| rule.group)
}

#[must_use]
pub fn classify(condition: &str, is_night: bool) -> WeatherCategory {
    match_condition(condition).map_or(WeatherCategory::Unknown, |group| group.category(is_night))
}

/// Everything the rendering and animation layers need to decorate a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    pub category: WeatherCategory,
    pub show_stars: bool,
    pub is_night: bool,
}

impl Presentation {
    /// Stars show only for `ClearNight` and `CloudyNight`; an `Unknown` sky
    /// stays starless even after dark.
    #[must_use]
    pub fn new(category: WeatherCategory, is_night: bool) -> Self {
        Self {
            category,
            show_stars: matches!(
                category,
                WeatherCategory::ClearNight | WeatherCategory::CloudyNight
            ),
            is_night,
        }
    }
}

impl Default for Presentation {
    fn default() -> Self {
        Self::new(WeatherCategory::Unknown, false)
    }
}

#[must_use]
pub fn present(condition: &str, offset_secs: i32) -> Presentation {
    present_at(Utc::now(), condition, offset_secs)
}

#[must_use]
pub fn present_at(now: DateTime<Utc>, condition: &str, offset_secs: i32) -> Presentation {
    let is_night = is_night_at(now, offset_secs);
    Presentation::new(classify(condition, is_night), is_night)
}

/// Glyph for an OpenWeatherMap icon code such as `"10d"`.
#[must_use]
pub fn weather_icon(icon: &str, mode: IconMode) -> &'static str {
    let (ascii, emoji, unicode) = icon_tokens(icon);
    match mode {
        IconMode::Ascii => ascii,
        IconMode::Emoji => emoji,
        IconMode::Unicode => unicode,
    }
}

fn icon_tokens(icon: &str) -> (&'static str, &'static str, &'static str) {
    let is_night = icon.ends_with('n');
    match icon.get(..2).unwrap_or_default() {
        "01" if is_night => ("MON", "🌙", "☾"),
        "01" => ("SUN", "☀️", "☀"),
        "02" if is_night => ("PCN", "☁️", "☁"),
        "02" => ("PCL", "⛅", "⛅"),
        "03" | "04" => ("CLD", "☁️", "☁"),
        "09" | "10" => ("RAN", "🌧️", "☂"),
        "11" => ("THN", "⛈️", "⚡"),
        "13" => ("SNW", "🌨️", "❄"),
        "50" => ("FOG", "🌫️", "░"),
        _ => ("---", "☁️", "☁"),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn keyword_groups_map_to_categories() {
        assert_eq!(classify("light rain", false), WeatherCategory::Rainy);
        assert_eq!(classify("Drizzle", true), WeatherCategory::Rainy);
        assert_eq!(classify("Snow", false), WeatherCategory::Snowy);
        assert_eq!(classify("haze", false), WeatherCategory::Misty);
        assert_eq!(classify("Fog", true), WeatherCategory::Misty);
        assert_eq!(classify("", false), WeatherCategory::Unknown);
        assert_eq!(classify("Tornado", false), WeatherCategory::Unknown);
    }

    #[test]
    fn thunder_outranks_rain_when_both_appear() {
        assert_eq!(
            match_condition("thunderstorm with light rain"),
            Some(ConditionGroup::Thunder)
        );
        assert_eq!(
            classify("thunderstorm with light rain", false),
            WeatherCategory::Thunderstorm
        );
        assert_eq!(classify("rain and snow", false), WeatherCategory::Rainy);
    }

    #[test]
    fn clear_and_cloud_depend_on_night_flag() {
        assert_eq!(classify("Clear", false), WeatherCategory::ClearDay);
        assert_eq!(classify("clear sky", true), WeatherCategory::ClearNight);
        assert_eq!(classify("few clouds", false), WeatherCategory::Cloudy);
        assert_eq!(classify("Clouds", true), WeatherCategory::CloudyNight);
    }

    #[test]
    fn stars_only_for_night_sky_categories() {
        for category in [
            WeatherCategory::Rainy,
            WeatherCategory::Thunderstorm,
            WeatherCategory::Snowy,
            WeatherCategory::ClearDay,
            WeatherCategory::Cloudy,
            WeatherCategory::Misty,
            WeatherCategory::Unknown,
        ] {
            assert!(!Presentation::new(category, true).show_stars, "{category:?}");
        }
        assert!(Presentation::new(WeatherCategory::ClearNight, true).show_stars);
        assert!(Presentation::new(WeatherCategory::CloudyNight, true).show_stars);
    }

    #[test]
    fn present_clear_at_local_ten_pm() {
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 20, 0, 0).unwrap();
        let presentation = present_at(now, "Clear", 2 * 3_600);
        assert_eq!(presentation.category, WeatherCategory::ClearNight);
        assert!(presentation.show_stars);
        assert!(presentation.is_night);
    }

    #[test]
    fn rainy_night_keeps_night_flag_without_stars() {
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 2, 0, 0).unwrap();
        let presentation = present_at(now, "Rain", 0);
        assert_eq!(presentation.category, WeatherCategory::Rainy);
        assert!(presentation.is_night);
        assert!(!presentation.show_stars);
    }

    #[test]
    fn unmatched_condition_at_night_has_no_stars() {
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 23, 0, 0).unwrap();
        let presentation = present_at(now, "Tornado", 0);
        assert_eq!(presentation.category, WeatherCategory::Unknown);
        assert!(presentation.is_night);
        assert!(!presentation.show_stars);
    }

    #[test]
    fn icon_codes_pick_day_and_night_glyphs() {
        assert_eq!(weather_icon("01d", IconMode::Ascii), "SUN");
        assert_eq!(weather_icon("01n", IconMode::Ascii), "MON");
        assert_eq!(weather_icon("10n", IconMode::Unicode), "☂");
        assert_eq!(weather_icon("11d", IconMode::Ascii), "THN");
        assert_eq!(weather_icon("", IconMode::Ascii), "---");
    }
}
