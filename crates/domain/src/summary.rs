use chrono::NaiveDate;

use crate::{Meal, Nutrition, Progress, ProgressKind, Workout, calculate_progress};

/// Energy balance of a single day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub nutrition: Nutrition,
    pub calories_burned: i32,
    pub target_calories: i32,
    pub progress: Progress,
}

impl DailySummary {
    /// Summarize the meals and workouts logged on `date`. Entries of other days are ignored.
    #[must_use]
    pub fn new(
        date: NaiveDate,
        meals: &[Meal],
        workouts: &[Workout],
        target_calories: i32,
    ) -> Self {
        let nutrition = meals
            .iter()
            .filter(|m| m.date == date)
            .map(|m| m.nutrition)
            .sum::<Nutrition>();
        let calories_burned = workouts
            .iter()
            .filter(|w| w.date == date)
            .fold(0, |total: i32, w| total.saturating_add(w.calories_burned));
        Self {
            date,
            nutrition,
            calories_burned,
            target_calories,
            progress: calculate_progress(
                f64::from(nutrition.calories),
                f64::from(target_calories),
                ProgressKind::Calorie,
            ),
        }
    }

    #[must_use]
    pub fn net_calories(&self) -> i64 {
        i64::from(self.nutrition.calories) - i64::from(self.calories_burned)
    }

    #[must_use]
    pub fn remaining_calories(&self) -> i64 {
        i64::from(self.target_calories) - self.net_calories()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{MealName, ProgressStatus, WorkoutActivity};

    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    fn meal(id: u128, day: u32, calories: u32) -> Meal {
        Meal {
            id: id.into(),
            date: date(day),
            name: MealName::new("Meal").unwrap(),
            nutrition: Nutrition {
                calories,
                protein_g: 20.0,
                carbs_g: 50.0,
                fat_g: 10.0,
            },
        }
    }

    fn workout(id: u128, day: u32, calories_burned: i32) -> Workout {
        Workout {
            id: id.into(),
            date: date(day),
            activity: WorkoutActivity::Running,
            duration_minutes: 30,
            calories_burned,
        }
    }

    #[test]
    fn test_daily_summary() {
        let summary = DailySummary::new(
            date(2),
            &[meal(1, 1, 900), meal(2, 2, 600), meal(3, 2, 1200)],
            &[workout(1, 2, 403), workout(2, 3, 250)],
            2000,
        );

        assert_eq!(
            summary,
            DailySummary {
                date: date(2),
                nutrition: Nutrition {
                    calories: 1800,
                    protein_g: 40.0,
                    carbs_g: 100.0,
                    fat_g: 20.0,
                },
                calories_burned: 403,
                target_calories: 2000,
                progress: Progress {
                    percentage: 90,
                    status: ProgressStatus::OnTarget,
                },
            }
        );
        assert_eq!(summary.net_calories(), 1397);
        assert_eq!(summary.remaining_calories(), 603);
    }

    #[test]
    fn test_daily_summary_saturates_totals() {
        let summary = DailySummary::new(
            date(2),
            &[meal(1, 2, 3_000_000_000), meal(2, 2, 3_000_000_000)],
            &[workout(1, 2, i32::MAX), workout(2, 2, 1)],
            2000,
        );

        assert_eq!(summary.nutrition.calories, u32::MAX);
        assert_eq!(summary.calories_burned, i32::MAX);
        assert_eq!(
            summary.net_calories(),
            i64::from(u32::MAX) - i64::from(i32::MAX)
        );
        assert_eq!(
            summary.progress,
            Progress {
                percentage: 100,
                status: ProgressStatus::OverTarget,
            }
        );
    }

    #[test]
    fn test_daily_summary_without_entries() {
        let summary = DailySummary::new(date(2), &[], &[], 0);

        assert_eq!(summary.nutrition, Nutrition::default());
        assert_eq!(summary.calories_burned, 0);
        assert_eq!(
            summary.progress,
            Progress {
                percentage: 0,
                status: ProgressStatus::NoTargetSet,
            }
        );
        assert_eq!(summary.net_calories(), 0);
    }
}
