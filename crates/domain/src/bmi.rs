use std::fmt;

use strum::{AsRefStr, Display};

use crate::{Gender, round};

/// Lower and upper bound of the healthy BMI band.
const HEALTHY_BMI: (f64, f64) = (18.5, 24.9);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bmi {
    /// Body mass index rounded to one decimal place.
    pub bmi: f64,
    pub category: BmiCategory,
    pub color: StatusColor,
}

impl Bmi {
    const INVALID: Bmi = Bmi {
        bmi: 0.0,
        category: BmiCategory::Invalid,
        color: StatusColor::Error,
    };
}

impl fmt::Display for Bmi {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.1}", self.bmi)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
    Invalid,
}

impl BmiCategory {
    #[must_use]
    pub fn color(self) -> StatusColor {
        match self {
            BmiCategory::Underweight => StatusColor::Info,
            BmiCategory::Normal => StatusColor::Success,
            BmiCategory::Overweight => StatusColor::Warning,
            BmiCategory::Obese | BmiCategory::Invalid => StatusColor::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum StatusColor {
    Info,
    Success,
    Warning,
    Error,
}

/// Calculate the body mass index.
///
/// A non-positive weight or height results in a BMI of 0 in the category `Invalid`.
#[must_use]
pub fn calculate_bmi(weight_kg: f64, height_m: f64) -> Bmi {
    if weight_kg.is_nan() || height_m.is_nan() || weight_kg <= 0.0 || height_m <= 0.0 {
        return Bmi::INVALID;
    }

    let bmi = weight_kg / (height_m * height_m);
    let category = if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    };

    Bmi {
        bmi: (bmi * 10.).round() / 10.,
        category,
        color: category.color(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdealWeightRange {
    pub min: i32,
    pub max: i32,
    pub height: f64,
}

/// Calculate the weight range corresponding to a healthy BMI.
///
/// The range does not depend on gender.
#[must_use]
pub fn calculate_ideal_weight_range(height_cm: f64, _gender: Gender) -> IdealWeightRange {
    if height_cm.is_nan() || height_cm <= 0.0 {
        return IdealWeightRange {
            min: 0,
            max: 0,
            height: height_cm,
        };
    }

    let height_m = height_cm / 100.;
    IdealWeightRange {
        min: round(HEALTHY_BMI.0 * height_m * height_m),
        max: round(HEALTHY_BMI.1 * height_m * height_m),
        height: height_cm,
    }
}
