//! Energy expenditure and intake targets.
//!
//! All functions are pure. Invalid biometric input results in zero values rather than errors, use
//! [`crate::BiometricInput::new`] to reject such input up front.

use crate::{ActivityLevel, BmrFormula, Gender, Goal, round};

/// Energy content of one kilogram of body mass.
pub const KCAL_PER_KG: f64 = 7700.;

/// Weekly weight change assumed when none is given.
pub const DEFAULT_WEEKLY_CHANGE_KG: f64 = 0.5;

const KCAL_PER_G_PROTEIN: i32 = 4;
const KCAL_PER_G_CARBS: f64 = 4.;
const KCAL_PER_G_FAT: f64 = 9.;
const FAT_SHARE: f64 = 0.25;

impl BmrFormula {
    /// Basal metabolic rate in kcal/day, or 0 if weight, height or age is not positive.
    #[must_use]
    pub fn bmr(self, weight_kg: f64, height_cm: f64, age: u32, gender: Gender) -> i32 {
        if weight_kg.is_nan() || height_cm.is_nan() || weight_kg <= 0.0 || height_cm <= 0.0 {
            return 0;
        }
        if age == 0 {
            return 0;
        }

        let age = f64::from(age);
        let bmr = match (self, gender) {
            (BmrFormula::MifflinStJeor, Gender::Male) => {
                10. * weight_kg + 6.25 * height_cm - 5. * age + 5.
            }
            (BmrFormula::MifflinStJeor, Gender::Female) => {
                10. * weight_kg + 6.25 * height_cm - 5. * age - 161.
            }
            (BmrFormula::HarrisBenedict, Gender::Male) => {
                88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age
            }
            (BmrFormula::HarrisBenedict, Gender::Female) => {
                447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age
            }
        };
        round(bmr)
    }
}

/// Basal metabolic rate in kcal/day according to the Mifflin-St Jeor equation.
#[must_use]
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age: u32, gender: Gender) -> i32 {
    BmrFormula::MifflinStJeor.bmr(weight_kg, height_cm, age, gender)
}

/// Total daily energy expenditure in kcal/day.
#[must_use]
pub fn calculate_tdee(bmr: f64, activity_level: ActivityLevel) -> i32 {
    round(bmr * activity_level.multiplier())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalorieTarget {
    pub target_calories: i32,
    pub weekly_change: f64,
    pub goal: Goal,
}

/// Daily calorie intake needed to change the body weight by `weekly_change_kg` per week.
///
/// The weekly change is ignored and reported as 0 for `Goal::Maintain`.
#[must_use]
pub fn calculate_calorie_target(tdee: f64, goal: Goal, weekly_change_kg: f64) -> CalorieTarget {
    let daily_difference = weekly_change_kg * KCAL_PER_KG / 7.;
    let (target_calories, weekly_change) = match goal {
        Goal::Lose => (tdee - daily_difference, weekly_change_kg),
        Goal::Gain => (tdee + daily_difference, weekly_change_kg),
        Goal::Maintain => (tdee, 0.),
    };
    CalorieTarget {
        target_calories: round(target_calories),
        weekly_change,
        goal,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProteinNeeds {
    pub protein_grams: i32,
    pub protein_calories: i32,
}

#[must_use]
pub fn calculate_protein_needs(weight_kg: f64, activity_level: ActivityLevel) -> ProteinNeeds {
    let protein_grams = round(weight_kg * activity_level.protein_per_kg());
    ProteinNeeds {
        protein_grams,
        protein_calories: protein_grams * KCAL_PER_G_PROTEIN,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyMacros {
    pub protein_g: i32,
    pub carbs_g: i32,
    pub fat_g: i32,
}

/// Split a calorie target into macronutrients.
///
/// Fat covers a quarter of the calories and carbohydrates cover what remains after protein and
/// fat.
#[must_use]
pub fn calculate_daily_macros(target_calories: i32, protein_grams: i32) -> DailyMacros {
    let target_calories = f64::from(target_calories);
    let fat_calories = target_calories * FAT_SHARE;
    let carb_calories =
        (target_calories - f64::from(protein_grams * KCAL_PER_G_PROTEIN) - fat_calories).max(0.);
    DailyMacros {
        protein_g: protein_grams,
        carbs_g: round(carb_calories / KCAL_PER_G_CARBS),
        fat_g: round(fat_calories / KCAL_PER_G_FAT),
    }
}
