use chrono::FixedOffset;
use proptest::prelude::*;
use skycast::{
    domain::weather::{ForecastSample, aggregate_in},
    ui::widgets::daily::{bar_columns, temperature_span},
};

fn forecast_strategy() -> impl Strategy<Value = Vec<ForecastSample>> {
    prop::collection::vec(-35.0f32..42.0, 1..40).prop_map(|temps| {
        temps
            .into_iter()
            .enumerate()
            .map(|(idx, temperature_c)| ForecastSample {
                timestamp: 1_773_446_400 + idx as i64 * 10_800,
                temperature_c,
                icon: "03d".to_string(),
                description: "scattered clouds".to_string(),
                precipitation_probability: 0.1,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn every_day_bar_fits_the_track(
        samples in forecast_strategy(),
        width in 1usize..80,
        offset_hours in -11i32..=13,
    ) {
        let zone = FixedOffset::east_opt(offset_hours * 3_600).unwrap();
        let days = aggregate_in(&samples, &zone);
        let span = temperature_span(&days);

        for day in &days {
            let bar = bar_columns(day, span, width);
            prop_assert!(bar.start <= bar.end);
            prop_assert!(bar.end <= width);
            if day.temperature_min_c == span.0 {
                prop_assert_eq!(bar.start, 0);
            }
            if day.temperature_max_c == span.1 && span.1 - span.0 >= 1.0 {
                prop_assert_eq!(bar.end, width);
            }
        }
    }

    #[test]
    fn colder_days_start_further_left(
        samples in forecast_strategy(),
        width in 1usize..80,
    ) {
        let days = aggregate_in(&samples, &FixedOffset::east_opt(0).unwrap());
        let span = temperature_span(&days);

        for a in &days {
            for b in &days {
                if a.temperature_min_c <= b.temperature_min_c {
                    prop_assert!(
                        bar_columns(a, span, width).start <= bar_columns(b, span, width).start
                    );
                }
            }
        }
    }
}
