use chrono::{Duration, Local, NaiveDate};

use crate::{CreateError, DeleteError, ReadError, UpdateError, ValidationError};

/// Number of days, including the day itself, whose weigh-ins contribute to the trend weight.
pub const TREND_WINDOW_DAYS: i64 = 10;

/// Weight given to each new weigh-in when updating the trend weight.
pub const TREND_SMOOTHING: f64 = 0.3;

#[allow(async_fn_in_trait)]
pub trait WeightService {
    async fn get_weight_entries(&self) -> Result<Vec<WeightEntry>, ReadError>;
    async fn create_weight_entry(&self, entry: WeightEntry) -> Result<WeightEntry, CreateError>;
    async fn replace_weight_entry(&self, entry: WeightEntry) -> Result<WeightEntry, UpdateError>;
    async fn delete_weight_entry(&self, date: NaiveDate) -> Result<NaiveDate, DeleteError>;

    /// A weigh-in date must be a past or present day without an existing entry.
    async fn validate_weight_date(&self, date: &str) -> Result<NaiveDate, ValidationError> {
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|_| ValidationError::Other("Invalid date".into()))?;
        if date > Local::now().date_naive() {
            return Err(ValidationError::Other(
                "Date must not be in the future".into(),
            ));
        }
        let entries = self
            .get_weight_entries()
            .await
            .map_err(|err| ValidationError::Other(err.into()))?;
        if entries.iter().any(|e| e.date == date) {
            return Err(ValidationError::Conflict("date".to_string()));
        }
        Ok(date)
    }

    /// Body weight in kg, accepting a comma as decimal separator.
    fn validate_weight(&self, weight: &str) -> Result<f32, ValidationError> {
        let Ok(weight) = weight.trim().replace(',', ".").parse::<f32>() else {
            return Err(ValidationError::Other(
                "Weight must be a decimal number".into(),
            ));
        };
        if weight.is_finite() && weight > 0.0 {
            Ok(weight)
        } else {
            Err(ValidationError::Other(
                "Weight must be a positive decimal number".into(),
            ))
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait WeightRepository {
    async fn read_weight_entries(&self) -> Result<Vec<WeightEntry>, ReadError>;
    async fn create_weight_entry(&self, entry: WeightEntry) -> Result<WeightEntry, CreateError>;
    async fn replace_weight_entry(&self, entry: WeightEntry) -> Result<WeightEntry, UpdateError>;
    async fn delete_weight_entry(&self, date: NaiveDate) -> Result<NaiveDate, DeleteError>;
}

/// A weigh-in, at most one per day.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightEntry {
    pub date: NaiveDate,
    pub weight: f32,
}

/// Most recent entry on or before `date`.
#[must_use]
pub fn latest_weight_entry(entries: &[WeightEntry], date: NaiveDate) -> Option<&WeightEntry> {
    entries
        .iter()
        .filter(|e| e.date <= date)
        .max_by_key(|e| e.date)
}

/// Smoothed body weight in kg as of `date`.
///
/// Only weigh-ins of the [`TREND_WINDOW_DAYS`] days up to and including `date` are taken into
/// account. Starting with the oldest of them, each later weigh-in moves the trend by
/// [`TREND_SMOOTHING`] towards its weight, so day-to-day fluctuations in water weight are damped.
/// Returns `None` if there is no weigh-in in the window.
#[must_use]
pub fn weight_trend(entries: &[WeightEntry], date: NaiveDate) -> Option<f64> {
    let first_day = date - Duration::days(TREND_WINDOW_DAYS - 1);
    let mut window = entries
        .iter()
        .filter(|e| (first_day..=date).contains(&e.date))
        .collect::<Vec<_>>();
    window.sort_by_key(|e| e.date);

    let (oldest, later) = window.split_first()?;
    Some(later.iter().fold(f64::from(oldest.weight), |trend, e| {
        TREND_SMOOTHING * f64::from(e.weight) + (1.0 - TREND_SMOOTHING) * trend
    }))
}

/// Change of the trend weight in kg over the week ending on `date`.
///
/// Negative values mean weight loss. The magnitude is directly comparable to the weekly change
/// a [`FitnessProfile`](crate::FitnessProfile) aims for.
#[must_use]
pub fn weekly_weight_change(entries: &[WeightEntry], date: NaiveDate) -> Option<f64> {
    let trend = weight_trend(entries, date)?;
    let trend_week_ago = weight_trend(entries, date - Duration::days(7))?;
    Some(trend - trend_week_ago)
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{ActivityLevel, BiometricInput, FitnessProfile, Gender, Goal};

    use super::*;

    fn day(n: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(n)
    }

    fn weigh_ins(weights: &[(i64, f32)]) -> Vec<WeightEntry> {
        weights
            .iter()
            .map(|&(n, weight)| WeightEntry {
                date: day(n),
                weight,
            })
            .collect()
    }

    #[rstest]
    #[case::before_all_entries(0, None)]
    #[case::on_entry(2, Some(2))]
    #[case::between_entries(4, Some(2))]
    #[case::after_all_entries(30, Some(9))]
    fn test_latest_weight_entry(#[case] n: i64, #[case] expected: Option<i64>) {
        let entries = weigh_ins(&[(9, 71.0), (2, 72.0), (5, 71.5)]);

        assert_eq!(
            latest_weight_entry(&entries, day(n)).map(|e| e.date),
            expected.map(day)
        );
    }

    #[rstest]
    #[case::no_weigh_in(&[], None)]
    #[case::single_weigh_in(&[(5, 80.0)], Some(80.0))]
    #[case::weigh_in_moves_trend(&[(4, 80.0), (5, 81.0)], Some(80.3))]
    #[case::unordered_weigh_ins(&[(5, 81.0), (4, 80.0)], Some(80.3))]
    #[case::weigh_ins_before_window(&[(-6, 90.0), (-5, 90.0), (0, 80.0)], Some(80.0))]
    #[case::weigh_ins_after_date(&[(0, 80.0), (6, 70.0)], Some(80.0))]
    #[case::only_weigh_ins_after_date(&[(6, 70.0)], None)]
    fn test_weight_trend(#[case] weights: &[(i64, f32)], #[case] expected: Option<f64>) {
        let trend = weight_trend(&weigh_ins(weights), day(5));

        assert_eq!(trend.is_some(), expected.is_some());
        if let (Some(trend), Some(expected)) = (trend, expected) {
            assert_approx_eq!(trend, expected, 0.001);
        }
    }

    #[test]
    fn test_weight_trend_damps_fluctuation() {
        let entries = weigh_ins(&[(0, 80.0), (1, 80.0), (2, 80.0), (3, 82.0)]);

        assert_approx_eq!(weight_trend(&entries, day(3)).unwrap(), 80.6, 0.001);
        assert_approx_eq!(weight_trend(&entries, day(2)).unwrap(), 80.0, 0.001);
    }

    #[test]
    fn test_weekly_weight_change_daily_weigh_ins() {
        #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
        let entries = (0..=28)
            .map(|n| WeightEntry {
                date: day(n),
                weight: (85.0 - 0.5 * n as f64 / 7.0) as f32,
            })
            .collect::<Vec<_>>();

        assert_approx_eq!(weekly_weight_change(&entries, day(28)).unwrap(), -0.5, 0.001);
        assert_approx_eq!(weekly_weight_change(&entries, day(16)).unwrap(), -0.5, 0.001);
    }

    #[test]
    fn test_weekly_weight_change_weekly_weigh_ins() {
        let entries = weigh_ins(&[(0, 80.0), (7, 79.5), (14, 79.0)]);

        assert_approx_eq!(weekly_weight_change(&entries, day(14)).unwrap(), -0.5, 0.001);
    }

    #[test]
    fn test_weekly_weight_change_weight_gain() {
        let entries = weigh_ins(&[(0, 62.0), (3, 62.1), (7, 62.25), (10, 62.35)]);

        let change = weekly_weight_change(&entries, day(10)).unwrap();

        assert!(change > 0.0);
        assert_approx_eq!(change, 0.1765, 0.001);
    }

    #[rstest]
    #[case::no_weigh_ins(&[])]
    #[case::first_week(&[(8, 80.0), (10, 79.8), (14, 79.5)])]
    #[case::gap_a_week_ago(&[(-3, 80.0), (14, 79.0)])]
    fn test_weekly_weight_change_without_history(#[case] weights: &[(i64, f32)]) {
        assert_eq!(weekly_weight_change(&weigh_ins(weights), day(14)), None);
    }

    #[test]
    fn test_weekly_weight_change_on_pace_with_profile() {
        let profile = FitnessProfile::new(
            BiometricInput::new(85.0, 180.0, 35, Gender::Male).unwrap(),
            ActivityLevel::Moderate,
            Goal::Lose,
            0.5,
        )
        .unwrap();
        let entries = weigh_ins(&[(0, 85.0), (7, 84.5), (14, 84.0), (21, 83.5)]);

        let change = weekly_weight_change(&entries, day(21)).unwrap();

        assert!(change < 0.0);
        assert_approx_eq!(-change, profile.weekly_change_kg, 0.001);
    }

    struct Entries(Vec<WeightEntry>);

    impl WeightService for Entries {
        async fn get_weight_entries(&self) -> Result<Vec<WeightEntry>, ReadError> {
            Ok(self.0.clone())
        }

        async fn create_weight_entry(
            &self,
            entry: WeightEntry,
        ) -> Result<WeightEntry, CreateError> {
            Ok(entry)
        }

        async fn replace_weight_entry(
            &self,
            entry: WeightEntry,
        ) -> Result<WeightEntry, UpdateError> {
            Ok(entry)
        }

        async fn delete_weight_entry(&self, date: NaiveDate) -> Result<NaiveDate, DeleteError> {
            Ok(date)
        }
    }

    #[test]
    fn test_validate_weight_date() {
        let service = Entries(weigh_ins(&[(0, 80.0)]));

        assert_eq!(
            block_on(service.validate_weight_date("2024-01-02")).unwrap(),
            day(1)
        );
        assert_eq!(
            block_on(service.validate_weight_date(" 2024-01-03 ")).unwrap(),
            day(2)
        );
        assert!(matches!(
            block_on(service.validate_weight_date("2024-01-01")),
            Err(ValidationError::Conflict(field)) if field == "date"
        ));
        assert!(matches!(
            block_on(service.validate_weight_date("01.01.2024")),
            Err(ValidationError::Other(err)) if err.to_string() == "Invalid date"
        ));
        let tomorrow = (Local::now().date_naive() + Duration::days(1))
            .format("%Y-%m-%d")
            .to_string();
        assert!(matches!(
            block_on(service.validate_weight_date(&tomorrow)),
            Err(ValidationError::Other(err)) if err.to_string() == "Date must not be in the future"
        ));
    }

    #[rstest]
    #[case("72.4", Some(72.4))]
    #[case(" 72,4 ", Some(72.4))]
    #[case("0", None)]
    #[case("-65", None)]
    #[case("inf", None)]
    #[case("NaN", None)]
    #[case("72 kg", None)]
    fn test_validate_weight(#[case] weight: &str, #[case] expected: Option<f32>) {
        assert_eq!(Entries(vec![]).validate_weight(weight).ok(), expected);
    }
}
