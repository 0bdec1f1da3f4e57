use chrono::NaiveDate;
use fitlog_domain::{
    CreateError, DailySummary, FitnessMetrics, InvalidInputError, MealRepository, Progress,
    ReadError, Service, WeightEntry, WeightRepository, WeightService, Workout, WorkoutActivity,
    WorkoutRepository, WorkoutService, calculate_weight_goal_progress, latest_weight_entry,
    weekly_weight_change, weight_trend,
};
use log::debug;

use crate::Settings;

#[derive(thiserror::Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error("invalid profile: {0}")]
    InvalidProfile(#[from] InvalidInputError),
}

/// Everything shown on the overview of a single day.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub date: NaiveDate,
    /// `None` if no profile is configured.
    pub metrics: Option<FitnessMetrics>,
    pub summary: DailySummary,
    pub current_weight: Option<WeightEntry>,
    /// Smoothed weight in kg.
    pub trend_weight: Option<f64>,
    /// Change of the trend weight in kg over the last week, negative when losing weight.
    pub weekly_change: Option<f64>,
    /// `None` unless both a start and a target weight are configured.
    pub weight_goal: Option<Progress>,
}

impl Dashboard {
    pub async fn load<R>(
        service: &Service<R>,
        settings: &Settings,
        today: NaiveDate,
    ) -> Result<Self, DashboardError>
    where
        R: WeightRepository + WorkoutRepository + MealRepository,
    {
        let entries = service
            .get_weight_entries()
            .await?
            .into_iter()
            .filter(|e| e.date <= today)
            .collect::<Vec<_>>();
        let current_weight = latest_weight_entry(&entries, today).cloned();
        let trend_weight = weight_trend(&entries, today);
        let weekly_change = weekly_weight_change(&entries, today);

        let metrics = settings.fitness_profile()?.map(|mut profile| {
            if let Some(entry) = &current_weight {
                profile.biometrics.weight_kg = f64::from(entry.weight);
            }
            profile.metrics(settings.bmr_formula())
        });
        let target_calories = metrics
            .as_ref()
            .map_or(0, |m| m.calorie_target.target_calories);
        let summary = service.daily_summary(today, target_calories).await?;

        let weight_goal = match (settings.start_weight_kg, settings.target_weight_kg) {
            (Some(start), Some(target)) => current_weight
                .as_ref()
                .map(|entry| f64::from(entry.weight))
                .or(settings.profile.as_ref().map(|p| p.weight_kg))
                .map(|current| calculate_weight_goal_progress(start, current, target)),
            _ => None,
        };

        debug!("loaded dashboard of {today}");

        Ok(Self {
            date: today,
            metrics,
            summary,
            current_weight,
            trend_weight,
            weekly_change,
            weight_goal,
        })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum RecordWorkoutError {
    #[error("weight unknown, log a weight or set up a profile first")]
    UnknownWeight,
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Create(#[from] CreateError),
}

/// Log a workout, burning calories for the latest weight logged on or before `date`.
///
/// Falls back to the profile weight if no weight has been logged yet.
pub async fn record_workout<R>(
    service: &Service<R>,
    settings: &Settings,
    date: NaiveDate,
    activity: WorkoutActivity,
    duration_minutes: u32,
) -> Result<Workout, RecordWorkoutError>
where
    R: WeightRepository + WorkoutRepository,
{
    let entries = service.get_weight_entries().await?;
    let weight_kg = latest_weight_entry(&entries, date)
        .map(|entry| f64::from(entry.weight))
        .or(settings.profile.as_ref().map(|p| p.weight_kg))
        .ok_or(RecordWorkoutError::UnknownWeight)?;
    Ok(service
        .create_workout(date, activity, duration_minutes, weight_kg)
        .await?)
}
