use chrono::NaiveDate;
use log::{debug, error};

use crate::{
    CreateError, DailySummary, DeleteError, Meal, MealID, MealName, MealRepository, MealService,
    Nutrition, ReadError, UpdateError, WeightEntry, WeightRepository, WeightService, Workout,
    WorkoutActivity, WorkoutID, WorkoutRepository, WorkoutService, calculate_workout_calories,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

impl<R> Service<R>
where
    R: MealRepository + WorkoutRepository,
{
    /// Summarize the meals and workouts logged on `date` against a calorie target.
    pub async fn daily_summary(
        &self,
        date: NaiveDate,
        target_calories: i32,
    ) -> Result<DailySummary, ReadError> {
        let meals = self.get_meals_on(date).await?;
        let workouts = self.get_workouts_on(date).await?;
        Ok(DailySummary::new(date, &meals, &workouts, target_calories))
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::Unavailable(_)) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: WeightRepository> WeightService for Service<R> {
    async fn get_weight_entries(&self) -> Result<Vec<WeightEntry>, ReadError> {
        log_on_error!(
            self.repository.read_weight_entries(),
            ReadError,
            "get",
            "weight entries"
        )
    }

    async fn create_weight_entry(&self, entry: WeightEntry) -> Result<WeightEntry, CreateError> {
        log_on_error!(
            self.repository.create_weight_entry(entry),
            CreateError,
            "create",
            "weight entry"
        )
    }

    async fn replace_weight_entry(&self, entry: WeightEntry) -> Result<WeightEntry, UpdateError> {
        log_on_error!(
            self.repository.replace_weight_entry(entry),
            UpdateError,
            "replace",
            "weight entry"
        )
    }

    async fn delete_weight_entry(&self, date: NaiveDate) -> Result<NaiveDate, DeleteError> {
        log_on_error!(
            self.repository.delete_weight_entry(date),
            DeleteError,
            "delete",
            "weight entry"
        )
    }
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError> {
        log_on_error!(
            self.repository.read_workouts(),
            ReadError,
            "get",
            "workouts"
        )
    }

    async fn get_workouts_on(&self, date: NaiveDate) -> Result<Vec<Workout>, ReadError> {
        Ok(self
            .get_workouts()
            .await?
            .into_iter()
            .filter(|w| w.date == date)
            .collect())
    }

    async fn create_workout(
        &self,
        date: NaiveDate,
        activity: WorkoutActivity,
        duration_minutes: u32,
        weight_kg: f64,
    ) -> Result<Workout, CreateError> {
        let calories_burned = calculate_workout_calories(&activity, duration_minutes, weight_kg);
        log_on_error!(
            self.repository
                .create_workout(date, activity, duration_minutes, calories_burned),
            CreateError,
            "create",
            "workout"
        )
    }

    async fn replace_workout(&self, workout: Workout) -> Result<Workout, UpdateError> {
        log_on_error!(
            self.repository.replace_workout(workout),
            UpdateError,
            "replace",
            "workout"
        )
    }

    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
        log_on_error!(
            self.repository.delete_workout(id),
            DeleteError,
            "delete",
            "workout"
        )
    }
}

impl<R: MealRepository> MealService for Service<R> {
    async fn get_meals(&self) -> Result<Vec<Meal>, ReadError> {
        log_on_error!(self.repository.read_meals(), ReadError, "get", "meals")
    }

    async fn get_meals_on(&self, date: NaiveDate) -> Result<Vec<Meal>, ReadError> {
        Ok(self
            .get_meals()
            .await?
            .into_iter()
            .filter(|m| m.date == date)
            .collect())
    }

    async fn create_meal(
        &self,
        date: NaiveDate,
        name: MealName,
        nutrition: Nutrition,
    ) -> Result<Meal, CreateError> {
        log_on_error!(
            self.repository.create_meal(date, name, nutrition),
            CreateError,
            "create",
            "meal"
        )
    }

    async fn replace_meal(&self, meal: Meal) -> Result<Meal, UpdateError> {
        log_on_error!(
            self.repository.replace_meal(meal),
            UpdateError,
            "replace",
            "meal"
        )
    }

    async fn delete_meal(&self, id: MealID) -> Result<MealID, DeleteError> {
        log_on_error!(
            self.repository.delete_meal(id),
            DeleteError,
            "delete",
            "meal"
        )
    }
}
