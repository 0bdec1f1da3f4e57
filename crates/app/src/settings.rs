use fitlog_domain::{
    BiometricInput, BmrFormula, DEFAULT_WEEKLY_CHANGE_KG, FitnessProfile, InvalidInputError,
    ReadError, Service, StorageError, UpdateError,
};
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};

#[allow(async_fn_in_trait)]
pub trait SettingsService {
    async fn get_settings(&self) -> Result<Settings, ReadError>;
    async fn set_settings(&self, settings: Settings) -> Result<(), UpdateError>;
}

#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    async fn read_settings(&self) -> Result<Settings, ReadError>;
    async fn write_settings(&self, settings: Settings) -> Result<(), UpdateError>;
}

impl<R: SettingsRepository> SettingsService for Service<R> {
    async fn get_settings(&self) -> Result<Settings, ReadError> {
        let result = self.repository().read_settings().await;
        match &result {
            Err(err @ ReadError::Storage(StorageError::Unavailable(_))) => {
                debug!("failed to get settings: {err}");
            }
            Err(err) => error!("failed to get settings: {err}"),
            Ok(_) => {}
        }
        result
    }

    async fn set_settings(&self, settings: Settings) -> Result<(), UpdateError> {
        let result = self.repository().write_settings(settings).await;
        if let Err(err) = &result {
            error!("failed to set settings: {err}");
        }
        result
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub profile: Option<Profile>,
    pub bmr_formula: String,
    pub start_weight_kg: Option<f64>,
    pub target_weight_kg: Option<f64>,
}

impl Settings {
    /// Formula used for the BMR, falling back to the default for unknown names.
    #[must_use]
    pub fn bmr_formula(&self) -> BmrFormula {
        self.bmr_formula.parse().unwrap_or_else(|_| {
            warn!("unknown BMR formula \"{}\"", self.bmr_formula);
            BmrFormula::default()
        })
    }

    pub fn fitness_profile(&self) -> Result<Option<FitnessProfile>, InvalidInputError> {
        self.profile
            .as_ref()
            .map(FitnessProfile::try_from)
            .transpose()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            profile: None,
            bmr_formula: BmrFormula::default().to_string(),
            start_weight_kg: None,
            target_weight_kg: None,
        }
    }
}

/// Stored form of a [`FitnessProfile`].
///
/// Enum values are kept as strings and parsed strictly when the profile is used.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: u32,
    pub gender: String,
    pub activity_level: String,
    pub goal: String,
    #[serde(default = "default_weekly_change_kg")]
    pub weekly_change_kg: f64,
}

fn default_weekly_change_kg() -> f64 {
    DEFAULT_WEEKLY_CHANGE_KG
}

impl TryFrom<&Profile> for FitnessProfile {
    type Error = InvalidInputError;

    fn try_from(value: &Profile) -> Result<Self, Self::Error> {
        FitnessProfile::new(
            BiometricInput::new(
                value.weight_kg,
                value.height_cm,
                value.age,
                value.gender.parse()?,
            )?,
            value.activity_level.parse()?,
            value.goal.parse()?,
            value.weekly_change_kg,
        )
    }
}

impl From<&FitnessProfile> for Profile {
    fn from(value: &FitnessProfile) -> Self {
        Self {
            weight_kg: value.biometrics.weight_kg,
            height_cm: value.biometrics.height_cm,
            age: value.biometrics.age,
            gender: value.biometrics.gender.to_string(),
            activity_level: value.activity_level.to_string(),
            goal: value.goal.to_string(),
            weekly_change_kg: value.weekly_change_kg,
        }
    }
}

#[cfg(test)]
mod tests {
    use fitlog_domain::{ActivityLevel, Gender, Goal};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn profile() -> Profile {
        Profile {
            weight_kg: 70.0,
            height_cm: 175.0,
            age: 25,
            gender: "male".to_string(),
            activity_level: "very_active".to_string(),
            goal: "gain".to_string(),
            weekly_change_kg: 0.25,
        }
    }

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();

        assert_eq!(settings.profile, None);
        assert_eq!(settings.bmr_formula(), BmrFormula::MifflinStJeor);
        assert_eq!(settings.fitness_profile(), Ok(None));
    }

    #[rstest]
    #[case("mifflin_st_jeor", BmrFormula::MifflinStJeor)]
    #[case("harris_benedict", BmrFormula::HarrisBenedict)]
    #[case("katch_mcardle", BmrFormula::MifflinStJeor)]
    fn test_settings_bmr_formula(#[case] name: &str, #[case] expected: BmrFormula) {
        let settings = Settings {
            bmr_formula: name.to_string(),
            ..Settings::default()
        };

        assert_eq!(settings.bmr_formula(), expected);
    }

    #[test]
    fn test_settings_fitness_profile() {
        let settings = Settings {
            profile: Some(profile()),
            ..Settings::default()
        };

        assert_eq!(
            settings.fitness_profile(),
            Ok(Some(FitnessProfile {
                biometrics: BiometricInput {
                    weight_kg: 70.0,
                    height_cm: 175.0,
                    age: 25,
                    gender: Gender::Male,
                },
                activity_level: ActivityLevel::VeryActive,
                goal: Goal::Gain,
                weekly_change_kg: 0.25,
            }))
        );
    }

    #[rstest]
    #[case::gender(
        Profile { gender: "other".to_string(), ..profile() },
        InvalidInputError::UnknownGender("other".to_string())
    )]
    #[case::activity_level(
        Profile { activity_level: "extreme".to_string(), ..profile() },
        InvalidInputError::UnknownActivityLevel("extreme".to_string())
    )]
    #[case::goal(
        Profile { goal: "bulk".to_string(), ..profile() },
        InvalidInputError::UnknownGoal("bulk".to_string())
    )]
    #[case::weight(
        Profile { weight_kg: 0.0, ..profile() },
        InvalidInputError::NonPositiveWeight(0.0)
    )]
    #[case::age(Profile { age: 0, ..profile() }, InvalidInputError::NonPositiveAge)]
    fn test_profile_try_from_invalid(
        #[case] profile: Profile,
        #[case] expected: InvalidInputError,
    ) {
        assert_eq!(FitnessProfile::try_from(&profile), Err(expected));
    }

    #[test]
    fn test_profile_from_fitness_profile() {
        let fitness_profile = FitnessProfile::try_from(&profile()).unwrap();

        assert_eq!(Profile::from(&fitness_profile), profile());
    }

    #[test]
    fn test_settings_deserialize() {
        let settings: Settings = serde_json::from_str(
            r#"{
                "profile": {
                    "weightKg": 70,
                    "heightCm": 175,
                    "age": 25,
                    "gender": "male",
                    "activityLevel": "very_active",
                    "goal": "gain"
                },
                "targetWeightKg": 75
            }"#,
        )
        .unwrap();

        assert_eq!(
            settings,
            Settings {
                profile: Some(Profile {
                    weekly_change_kg: DEFAULT_WEEKLY_CHANGE_KG,
                    ..profile()
                }),
                bmr_formula: "mifflin_st_jeor".to_string(),
                start_weight_kg: None,
                target_weight_kg: Some(75.0),
            }
        );
    }

    #[test]
    fn test_settings_serialize() {
        assert_eq!(
            serde_json::to_string(&Settings::default()).unwrap(),
            r#"{"profile":null,"bmrFormula":"mifflin_st_jeor","startWeightKg":null,"targetWeightKg":null}"#
        );
    }
}
