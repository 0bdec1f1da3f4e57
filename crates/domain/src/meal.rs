use chrono::NaiveDate;
use derive_more::{AsRef, Deref, Display};
use uuid::Uuid;

use crate::{CreateError, DeleteError, ReadError, UpdateError, ValidationError};

#[allow(async_fn_in_trait)]
pub trait MealService {
    async fn get_meals(&self) -> Result<Vec<Meal>, ReadError>;
    async fn get_meals_on(&self, date: NaiveDate) -> Result<Vec<Meal>, ReadError>;
    async fn create_meal(
        &self,
        date: NaiveDate,
        name: MealName,
        nutrition: Nutrition,
    ) -> Result<Meal, CreateError>;
    async fn replace_meal(&self, meal: Meal) -> Result<Meal, UpdateError>;
    async fn delete_meal(&self, id: MealID) -> Result<MealID, DeleteError>;

    fn validate_meal_name(&self, name: &str) -> Result<MealName, ValidationError> {
        MealName::new(name).map_err(|err| ValidationError::Other(err.into()))
    }

    fn validate_meal_calories(&self, calories: &str) -> Result<u32, ValidationError> {
        match calories.trim().parse::<u32>() {
            Ok(parsed_calories) => {
                if parsed_calories <= Nutrition::MAX_MEAL_CALORIES {
                    Ok(parsed_calories)
                } else {
                    Err(ValidationError::Other(
                        format!(
                            "Calories must be {} or less",
                            Nutrition::MAX_MEAL_CALORIES
                        )
                        .into(),
                    ))
                }
            }
            Err(_) => Err(ValidationError::Other(
                "Calories must be a whole number".into(),
            )),
        }
    }

    fn validate_meal_nutrient(&self, amount: &str) -> Result<f32, ValidationError> {
        match amount.replace(',', ".").trim().parse::<f32>() {
            Ok(parsed_amount) => {
                if parsed_amount >= 0.0 {
                    Ok(parsed_amount)
                } else {
                    Err(ValidationError::Other(
                        "Amount must not be negative".into(),
                    ))
                }
            }
            Err(_) => Err(ValidationError::Other(
                "Amount must be a decimal number".into(),
            )),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait MealRepository {
    async fn read_meals(&self) -> Result<Vec<Meal>, ReadError>;
    async fn create_meal(
        &self,
        date: NaiveDate,
        name: MealName,
        nutrition: Nutrition,
    ) -> Result<Meal, CreateError>;
    async fn replace_meal(&self, meal: Meal) -> Result<Meal, UpdateError>;
    async fn delete_meal(&self, id: MealID) -> Result<MealID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Meal {
    pub id: MealID,
    pub date: NaiveDate,
    pub name: MealName,
    pub nutrition: Nutrition,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Nutrition {
    pub calories: u32,
    pub protein_g: f32,
    pub carbs_g: f32,
    pub fat_g: f32,
}

impl Nutrition {
    /// Upper bound accepted for the energy of a single meal.
    pub const MAX_MEAL_CALORIES: u32 = 10_000;
}

impl std::ops::Add for Nutrition {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            calories: self.calories.saturating_add(other.calories),
            protein_g: self.protein_g + other.protein_g,
            carbs_g: self.carbs_g + other.carbs_g,
            fat_g: self.fat_g + other.fat_g,
        }
    }
}

impl std::iter::Sum for Nutrition {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Nutrition::default(), |total, nutrition| total + nutrition)
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MealID(Uuid);

impl MealID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for MealID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for MealID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MealName(String);

impl MealName {
    pub const MAX_LEN: usize = 64;

    pub fn new(name: &str) -> Result<Self, MealNameError> {
        let trimmed_name = name.trim();

        if trimmed_name.is_empty() {
            return Err(MealNameError::Empty);
        }

        let len = trimmed_name.chars().count();

        if len > Self::MAX_LEN {
            return Err(MealNameError::TooLong(len));
        }

        Ok(MealName(trimmed_name.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MealNameError {
    #[error("Meal name must not be empty")]
    Empty,
    #[error("Meal name must be 64 characters or fewer ({0} > 64)")]
    TooLong(usize),
}
