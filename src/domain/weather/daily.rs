use chrono::{DateTime, Local, NaiveDate, TimeZone};

use super::{DailySummary, ForecastSample};

pub const MAX_DAILY_SUMMARIES: usize = 7;

#[derive(Debug)]
struct DayAccumulator {
    timestamp: i64,
    max_c: f32,
    min_c: f32,
    // (icon, count) in order of first appearance
    icon_counts: Vec<(String, usize)>,
    description: String,
}

impl DayAccumulator {
    fn start(sample: &ForecastSample) -> Self {
        Self {
            timestamp: sample.timestamp,
            max_c: sample.temperature_c,
            min_c: sample.temperature_c,
            icon_counts: vec![(sample.icon.clone(), 1)],
            description: sample.description.clone(),
        }
    }

    fn add(&mut self, sample: &ForecastSample) {
        self.max_c = self.max_c.max(sample.temperature_c);
        self.min_c = self.min_c.min(sample.temperature_c);
        match self
            .icon_counts
            .iter_mut()
            .find(|(icon, _)| *icon == sample.icon)
        {
            Some((_, count)) => *count += 1,
            None => self.icon_counts.push((sample.icon.clone(), 1)),
        }
    }

    fn dominant_icon(&self) -> String {
        let mut best: Option<&(String, usize)> = None;
        for entry in &self.icon_counts {
            if best.is_none_or(|(_, count)| entry.1 > *count) {
                best = Some(entry);
            }
        }
        best.map(|(icon, _)| icon.clone()).unwrap_or_default()
    }

    fn finish(self) -> DailySummary {
        DailySummary {
            icon: self.dominant_icon(),
            timestamp: self.timestamp,
            temperature_max_c: self.max_c,
            temperature_min_c: self.min_c,
            description: self.description,
        }
    }
}

/// Groups samples by the viewer's local calendar day.
#[must_use]
pub fn aggregate(samples: &[ForecastSample]) -> Vec<DailySummary> {
    aggregate_in(samples, &Local)
}

/// Groups samples by calendar day in `zone`, keeping first-seen day order
/// and at most [`MAX_DAILY_SUMMARIES`] days.
#[must_use]
pub fn aggregate_in<Tz: TimeZone>(samples: &[ForecastSample], zone: &Tz) -> Vec<DailySummary> {
    let mut days: Vec<(NaiveDate, DayAccumulator)> = Vec::new();

    for sample in samples {
        let Some(date) = calendar_day(sample.timestamp, zone) else {
            continue;
        };

        match days.iter_mut().find(|(day, _)| *day == date) {
            Some((_, acc)) => acc.add(sample),
            None => days.push((date, DayAccumulator::start(sample))),
        }
    }

    days.into_iter()
        .take(MAX_DAILY_SUMMARIES)
        .map(|(_, acc)| acc.finish())
        .collect()
}

fn calendar_day<Tz: TimeZone>(timestamp: i64, zone: &Tz) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp, 0).map(|utc| utc.with_timezone(zone).date_naive())
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, Utc};

    use super::*;

    // 2026-03-14T00:00:00Z
    const DAY_ONE: i64 = 1_773_446_400;
    const THREE_HOURS: i64 = 3 * 3_600;

    fn sample(timestamp: i64, temperature_c: f32, icon: &str, description: &str) -> ForecastSample {
        ForecastSample {
            timestamp,
            temperature_c,
            icon: icon.to_string(),
            description: description.to_string(),
            precipitation_probability: 0.0,
        }
    }

    #[test]
    fn empty_input_yields_no_days() {
        assert!(aggregate_in(&[], &Utc).is_empty());
    }

    #[test]
    fn single_day_takes_extremes_of_all_samples() {
        let temps = [10.0, 12.0, 15.0, 18.0, 17.0, 14.0, 11.0, 9.0];
        let samples = temps
            .iter()
            .enumerate()
            .map(|(idx, temp)| sample(DAY_ONE + idx as i64 * THREE_HOURS, *temp, "02d", "few clouds"))
            .collect::<Vec<_>>();

        let days = aggregate_in(&samples, &Utc);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].temperature_max_c, 18.0);
        assert_eq!(days[0].temperature_min_c, 9.0);
        assert_eq!(days[0].timestamp, DAY_ONE);
        assert_eq!(days[0].description, "few clouds");
    }

    #[test]
    fn single_sample_day_has_equal_extremes() {
        let days = aggregate_in(&[sample(DAY_ONE, 4.5, "13d", "snow")], &Utc);
        assert_eq!(days[0].temperature_max_c, days[0].temperature_min_c);
    }

    #[test]
    fn most_frequent_icon_wins_per_day() {
        let day_one_icons = ["02d", "01d", "01d", "04d", "01d", "01d", "01d", "02d"];
        let mut samples = day_one_icons
            .iter()
            .enumerate()
            .map(|(idx, icon)| sample(DAY_ONE + idx as i64 * THREE_HOURS, 5.0, icon, "sky"))
            .collect::<Vec<_>>();
        samples.extend(
            (0..8).map(|idx| sample(DAY_ONE + (8 + idx) * THREE_HOURS, 7.0, "10d", "light rain")),
        );

        let days = aggregate_in(&samples, &Utc);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].icon, "01d");
        assert_eq!(days[1].icon, "10d");
        assert_eq!(days[1].description, "light rain");
    }

    #[test]
    fn icon_ties_keep_first_seen() {
        let samples = vec![
            sample(DAY_ONE, 1.0, "04d", "a"),
            sample(DAY_ONE + THREE_HOURS, 1.0, "10d", "b"),
            sample(DAY_ONE + 2 * THREE_HOURS, 1.0, "10d", "c"),
            sample(DAY_ONE + 3 * THREE_HOURS, 1.0, "04d", "d"),
        ];
        assert_eq!(aggregate_in(&samples, &Utc)[0].icon, "04d");
    }

    #[test]
    fn output_is_capped_at_seven_days() {
        let samples = (0..10)
            .map(|day| sample(DAY_ONE + day * 86_400, day as f32, "01d", "clear"))
            .collect::<Vec<_>>();
        let days = aggregate_in(&samples, &Utc);
        assert_eq!(days.len(), MAX_DAILY_SUMMARIES);
        assert_eq!(days[6].temperature_max_c, 6.0);
    }

    #[test]
    fn day_boundary_follows_the_grouping_zone() {
        // 22:00Z and 23:00Z on day one: same UTC day, different day at UTC+1.
        let samples = vec![
            sample(DAY_ONE + 22 * 3_600, 3.0, "01n", "clear"),
            sample(DAY_ONE + 23 * 3_600, 2.0, "01n", "clear"),
        ];
        assert_eq!(aggregate_in(&samples, &Utc).len(), 1);

        let east = FixedOffset::east_opt(90 * 60).unwrap();
        assert_eq!(aggregate_in(&samples, &east).len(), 2);
    }
}
