//! Historical timeline behind the "new cases per day" graph.

use crate::api::count_from_value;
use crate::domain::CasesType;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Cumulative totals keyed by `m/d/yy` date strings, as the
/// `historical/all` endpoint returns them. Days whose total is unusable
/// are left out rather than failing the timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct HistoricalTimeline {
    #[serde(default, deserialize_with = "lenient_totals")]
    pub cases: HashMap<String, u64>,
    #[serde(default, deserialize_with = "lenient_totals")]
    pub recovered: HashMap<String, u64>,
    #[serde(default, deserialize_with = "lenient_totals")]
    pub deaths: HashMap<String, u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: u64,
}

impl HistoricalTimeline {
    pub const fn cumulative(&self, cases_type: CasesType) -> &HashMap<String, u64> {
        match cases_type {
            CasesType::Cases => &self.cases,
            CasesType::Recovered => &self.recovered,
            CasesType::Deaths => &self.deaths,
        }
    }

    /// Day-over-day differences in date order. The first day has no
    /// predecessor and yields no point; downward corrections clamp to zero.
    pub fn new_per_day(&self, cases_type: CasesType) -> Vec<SeriesPoint> {
        let mut totals: Vec<(NaiveDate, u64)> = self
            .cumulative(cases_type)
            .iter()
            .filter_map(|(date, total)| Some((parse_date(date)?, *total)))
            .collect();
        totals.sort_by_key(|(date, _)| *date);

        totals
            .windows(2)
            .map(|pair| SeriesPoint {
                date: pair[1].0,
                value: pair[1].1.saturating_sub(pair[0].1),
            })
            .collect()
    }
}

/// A series laid out for a line chart: x is the day index, y the value.
#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    pub points: Vec<(f64, f64)>,
    /// Largest value, at least 1 so the y axis never collapses.
    pub y_max: u64,
}

impl Plot {
    pub fn new(series: &[SeriesPoint]) -> Self {
        Self {
            points: series
                .iter()
                .enumerate()
                .map(|(index, point)| (index as f64, point.value as f64))
                .collect(),
            y_max: series.iter().map(|point| point.value).max().unwrap_or(0).max(1),
        }
    }

    pub fn x_max(&self) -> f64 {
        self.points.len().saturating_sub(1).max(1) as f64
    }

    /// Headroom above the tallest point.
    pub fn y_bound(&self) -> f64 {
        self.y_max as f64 * 1.1
    }
}

fn lenient_totals<'de, D>(deserializer: D) -> Result<HashMap<String, u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<HashMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|(date, total)| Some((date, count_from_value(&total)?)))
        .collect())
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%m/%d/%y").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline(entries: &[(&str, u64)]) -> HistoricalTimeline {
        HistoricalTimeline {
            cases: entries
                .iter()
                .map(|(date, total)| ((*date).to_string(), *total))
                .collect(),
            ..HistoricalTimeline::default()
        }
    }

    #[test]
    fn new_values_are_differences_in_date_order() {
        let history = timeline(&[
            ("1/10/23", 130),
            ("12/31/22", 100),
            ("1/1/23", 110),
            ("1/9/23", 125),
        ]);

        let series = history.new_per_day(CasesType::Cases);
        let values: Vec<u64> = series.iter().map(|point| point.value).collect();

        assert_eq!(values, [10, 15, 5]);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
    }

    #[test]
    fn corrections_clamp_to_zero() {
        let history = timeline(&[("3/1/23", 50), ("3/2/23", 40), ("3/3/23", 45)]);

        let values: Vec<u64> = history
            .new_per_day(CasesType::Cases)
            .iter()
            .map(|point| point.value)
            .collect();

        assert_eq!(values, [0, 5]);
    }

    #[test]
    fn unparseable_dates_and_short_series_are_skipped() {
        let history = timeline(&[("not a date", 10), ("3/1/23", 50)]);
        assert!(history.new_per_day(CasesType::Cases).is_empty());
        assert!(history.new_per_day(CasesType::Deaths).is_empty());
    }

    #[test]
    fn decodes_the_endpoint_payload() {
        let body = br#"{"cases": {"3/1/23": 1, "3/2/23": 4}, "deaths": {"3/1/23": 0}}"#;
        let history: HistoricalTimeline = serde_json::from_slice(body).unwrap();
        assert_eq!(history.cases.len(), 2);
        assert!(history.recovered.is_empty());
        assert_eq!(history.new_per_day(CasesType::Cases)[0].value, 3);
    }

    #[test]
    fn odd_days_do_not_fail_the_timeline() {
        let body = br#"{
            "cases": {"3/1/23": 10, "3/2/23": null, "3/3/23": 16, "3/4/23": -2},
            "recovered": null,
            "deaths": {"3/1/23": "4", "3/2/23": 6.0}
        }"#;

        let history: HistoricalTimeline = serde_json::from_slice(body).unwrap();

        assert_eq!(history.cases.len(), 3);
        assert!(!history.cases.contains_key("3/2/23"));
        assert_eq!(history.cases["3/4/23"], 0);
        assert!(history.recovered.is_empty());
        let values: Vec<u64> = history
            .new_per_day(CasesType::Cases)
            .iter()
            .map(|point| point.value)
            .collect();
        assert_eq!(values, [6, 0]);
        assert_eq!(history.new_per_day(CasesType::Deaths)[0].value, 2);
    }

    #[test]
    fn plot_indexes_days_and_keeps_a_usable_y_axis() {
        let history = timeline(&[("3/1/23", 5), ("3/2/23", 9), ("3/3/23", 9)]);

        let plot = Plot::new(&history.new_per_day(CasesType::Cases));

        assert_eq!(plot.points, [(0.0, 4.0), (1.0, 0.0)]);
        assert_eq!(plot.y_max, 4);
        assert!((plot.x_max() - 1.0).abs() < f64::EPSILON);

        let flat = Plot::new(&[]);
        assert_eq!(flat.y_max, 1);
        assert!(flat.points.is_empty());
    }
}
