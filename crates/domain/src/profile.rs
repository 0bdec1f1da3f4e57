use std::str::FromStr;

use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::{
    Bmi, CalorieTarget, DailyMacros, IdealWeightRange, InvalidInputError, ProteinNeeds,
    calculate_bmi, calculate_calorie_target, calculate_daily_macros, calculate_ideal_weight_range,
    calculate_protein_needs, calculate_tdee,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Gender {
    Female,
    Male,
}

impl From<&str> for Gender {
    fn from(value: &str) -> Self {
        match value {
            "male" => Gender::Male,
            _ => Gender::Female,
        }
    }
}

impl FromStr for Gender {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::iter()
            .find(|gender| gender.as_ref() == s)
            .ok_or_else(|| InvalidInputError::UnknownGender(s.to_string()))
    }
}

/// Physical activity level of a person.
///
/// `Unspecified` is the result of lenient parsing of an unknown level. It carries the fallback
/// factors used for unrecognized levels, which are not the same as those of any named level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
    Unspecified,
}

impl ActivityLevel {
    /// Factor applied to the BMR to get the TDEE.
    #[must_use]
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary | ActivityLevel::Unspecified => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    /// Recommended daily protein intake in grams per kilogram of body weight.
    #[must_use]
    pub fn protein_per_kg(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 0.8,
            ActivityLevel::Light | ActivityLevel::Unspecified => 1.0,
            ActivityLevel::Moderate => 1.2,
            ActivityLevel::Active => 1.4,
            ActivityLevel::VeryActive => 1.6,
        }
    }
}

impl From<&str> for ActivityLevel {
    fn from(value: &str) -> Self {
        value.parse().unwrap_or(ActivityLevel::Unspecified)
    }
}

impl FromStr for ActivityLevel {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::iter()
            .filter(|level| *level != ActivityLevel::Unspecified)
            .find(|level| level.as_ref() == s)
            .ok_or_else(|| InvalidInputError::UnknownActivityLevel(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Goal {
    Lose,
    Maintain,
    Gain,
}

impl From<&str> for Goal {
    fn from(value: &str) -> Self {
        value.parse().unwrap_or(Goal::Maintain)
    }
}

impl FromStr for Goal {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::iter()
            .find(|goal| goal.as_ref() == s)
            .ok_or_else(|| InvalidInputError::UnknownGoal(s.to_string()))
    }
}

/// Equation used to estimate the basal metabolic rate.
///
/// Mifflin-St Jeor is authoritative. Harris-Benedict is kept for comparison with values computed
/// by older tooling.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display, AsRefStr, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum BmrFormula {
    #[default]
    MifflinStJeor,
    HarrisBenedict,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiometricInput {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: u32,
    pub gender: Gender,
}

impl BiometricInput {
    pub fn new(
        weight_kg: f64,
        height_cm: f64,
        age: u32,
        gender: Gender,
    ) -> Result<Self, InvalidInputError> {
        if weight_kg.is_nan() || weight_kg <= 0.0 {
            return Err(InvalidInputError::NonPositiveWeight(weight_kg));
        }
        if height_cm.is_nan() || height_cm <= 0.0 {
            return Err(InvalidInputError::NonPositiveHeight(height_cm));
        }
        if age == 0 {
            return Err(InvalidInputError::NonPositiveAge);
        }
        Ok(Self {
            weight_kg,
            height_cm,
            age,
            gender,
        })
    }

    #[must_use]
    pub fn bmr(&self, formula: BmrFormula) -> i32 {
        formula.bmr(self.weight_kg, self.height_cm, self.age, self.gender)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessProfile {
    pub biometrics: BiometricInput,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    pub weekly_change_kg: f64,
}

impl FitnessProfile {
    pub fn new(
        biometrics: BiometricInput,
        activity_level: ActivityLevel,
        goal: Goal,
        weekly_change_kg: f64,
    ) -> Result<Self, InvalidInputError> {
        if weekly_change_kg.is_nan() || weekly_change_kg < 0.0 {
            return Err(InvalidInputError::NegativeWeeklyChange(weekly_change_kg));
        }
        Ok(Self {
            biometrics,
            activity_level,
            goal,
            weekly_change_kg,
        })
    }

    #[must_use]
    pub fn metrics(&self, formula: BmrFormula) -> FitnessMetrics {
        let BiometricInput {
            weight_kg,
            height_cm,
            gender,
            ..
        } = self.biometrics;
        let bmr = self.biometrics.bmr(formula);
        let tdee = calculate_tdee(f64::from(bmr), self.activity_level);
        let calorie_target =
            calculate_calorie_target(f64::from(tdee), self.goal, self.weekly_change_kg);
        let protein = calculate_protein_needs(weight_kg, self.activity_level);
        FitnessMetrics {
            bmi: calculate_bmi(weight_kg, height_cm / 100.),
            bmr,
            tdee,
            calorie_target,
            protein,
            macros: calculate_daily_macros(calorie_target.target_calories, protein.protein_grams),
            ideal_weight_range: calculate_ideal_weight_range(height_cm, gender),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FitnessMetrics {
    pub bmi: Bmi,
    pub bmr: i32,
    pub tdee: i32,
    pub calorie_target: CalorieTarget,
    pub protein: ProteinNeeds,
    pub macros: DailyMacros,
    pub ideal_weight_range: IdealWeightRange,
}
