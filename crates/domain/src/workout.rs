use std::fmt;

use chrono::NaiveDate;
use derive_more::Deref;
use strum::{AsRefStr, EnumIter, IntoEnumIterator};
use uuid::Uuid;

use crate::{CreateError, DeleteError, ReadError, UpdateError, ValidationError, round};

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    async fn get_workouts_on(&self, date: NaiveDate) -> Result<Vec<Workout>, ReadError>;
    async fn create_workout(
        &self,
        date: NaiveDate,
        activity: WorkoutActivity,
        duration_minutes: u32,
        weight_kg: f64,
    ) -> Result<Workout, CreateError>;
    async fn replace_workout(&self, workout: Workout) -> Result<Workout, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;

    fn validate_workout_duration(&self, duration: &str) -> Result<u32, ValidationError> {
        match duration.trim().parse::<u32>() {
            Ok(parsed_duration) => {
                if parsed_duration > 0 {
                    Ok(parsed_duration)
                } else {
                    Err(ValidationError::Other(
                        "Duration must be a positive number of minutes".into(),
                    ))
                }
            }
            Err(_) => Err(ValidationError::Other(
                "Duration must be a whole number of minutes".into(),
            )),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn read_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    async fn create_workout(
        &self,
        date: NaiveDate,
        activity: WorkoutActivity,
        duration_minutes: u32,
        calories_burned: i32,
    ) -> Result<Workout, CreateError>;
    async fn replace_workout(&self, workout: Workout) -> Result<Workout, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    pub date: NaiveDate,
    pub activity: WorkoutActivity,
    pub duration_minutes: u32,
    pub calories_burned: i32,
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkoutID(Uuid);

impl WorkoutID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Kind of exercise, used to look up its metabolic equivalent.
///
/// Names are matched case-insensitively. Unknown names are kept as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum WorkoutActivity {
    Walking,
    Jogging,
    Running,
    Cycling,
    Swimming,
    Weightlifting,
    Yoga,
    Pilates,
    Dancing,
    Basketball,
    Soccer,
    Tennis,
    Other(String),
}

impl WorkoutActivity {
    /// Metabolic equivalent of task.
    #[must_use]
    pub fn met(&self) -> f64 {
        match self {
            WorkoutActivity::Walking => 3.5,
            WorkoutActivity::Jogging | WorkoutActivity::Soccer => 7.0,
            WorkoutActivity::Running => 11.5,
            WorkoutActivity::Cycling | WorkoutActivity::Basketball => 8.0,
            WorkoutActivity::Swimming | WorkoutActivity::Tennis => 6.0,
            WorkoutActivity::Weightlifting
            | WorkoutActivity::Pilates
            | WorkoutActivity::Other(_) => 3.0,
            WorkoutActivity::Yoga => 2.5,
            WorkoutActivity::Dancing => 4.5,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            WorkoutActivity::Other(name) => name,
            activity => activity.as_ref(),
        }
    }
}

impl From<&str> for WorkoutActivity {
    fn from(value: &str) -> Self {
        let value = value.trim();
        WorkoutActivity::iter()
            .filter(|activity| !matches!(activity, WorkoutActivity::Other(_)))
            .find(|activity| activity.as_ref().eq_ignore_ascii_case(value))
            .unwrap_or_else(|| WorkoutActivity::Other(value.to_string()))
    }
}

impl fmt::Display for WorkoutActivity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Energy burned by an activity in kcal.
#[must_use]
pub fn calculate_workout_calories(
    activity: &WorkoutActivity,
    duration_minutes: u32,
    weight_kg: f64,
) -> i32 {
    round(activity.met() * weight_kg * f64::from(duration_minutes) / 60.)
}
