use std::str::FromStr;

use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};

use crate::InvalidInputError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ProgressKind {
    WeightLoss,
    WeightGain,
    Calorie,
}

impl FromStr for ProgressKind {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::iter()
            .find(|kind| kind.as_ref() == s)
            .ok_or_else(|| InvalidInputError::UnknownProgressKind(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
pub enum ProgressStatus {
    #[strum(serialize = "No target set")]
    NoTargetSet,
    #[strum(serialize = "Goal achieved!")]
    GoalAchieved,
    #[strum(serialize = "In progress")]
    InProgress,
    #[strum(serialize = "On target")]
    OnTarget,
    #[strum(serialize = "Under target")]
    UnderTarget,
    #[strum(serialize = "Over target")]
    OverTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Rounded percentage in the range 0 to 100.
    pub percentage: u8,
    pub status: ProgressStatus,
}

impl Progress {
    const NO_TARGET: Progress = Progress {
        percentage: 0,
        status: ProgressStatus::NoTargetSet,
    };

    const ACHIEVED: Progress = Progress {
        percentage: 100,
        status: ProgressStatus::GoalAchieved,
    };

    fn new(percentage: f64, status: ProgressStatus) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percentage = (percentage.clamp(0., 100.) + 0.5).floor() as u8;
        Self { percentage, status }
    }
}

/// Calculate the progress of `current` towards `target`.
///
/// For weight loss the percentage is `d / (d + 1)` of the remaining difference `d`, so it only
/// measures closeness to the target, not progress since a starting weight. Use
/// [`calculate_weight_goal_progress`] when the starting weight is known.
///
/// The calorie status is determined from the unclamped ratio, so intakes above 110 % are reported
/// as over target even though the percentage is capped at 100.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn calculate_progress(current: f64, target: f64, kind: ProgressKind) -> Progress {
    if target == 0.0 {
        return Progress::NO_TARGET;
    }

    match kind {
        ProgressKind::WeightLoss => {
            if current <= target {
                return Progress::ACHIEVED;
            }
            let difference = current - target;
            Progress::new(
                difference / (difference + 1.) * 100.,
                ProgressStatus::InProgress,
            )
        }
        ProgressKind::WeightGain => {
            if current >= target {
                return Progress::ACHIEVED;
            }
            Progress::new(current / target * 100., ProgressStatus::InProgress)
        }
        ProgressKind::Calorie => {
            let percentage = current / target * 100.;
            let status = if percentage < 90. {
                ProgressStatus::UnderTarget
            } else if percentage > 110. {
                ProgressStatus::OverTarget
            } else {
                ProgressStatus::OnTarget
            };
            Progress::new(percentage, status)
        }
    }
}

/// Calculate the progress from `start` towards `target` in either direction.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn calculate_weight_goal_progress(start: f64, current: f64, target: f64) -> Progress {
    if start == target {
        return Progress::NO_TARGET;
    }

    let percentage = (start - current) / (start - target) * 100.;
    if percentage >= 100. {
        Progress::ACHIEVED
    } else {
        Progress::new(percentage, ProgressStatus::InProgress)
    }
}
