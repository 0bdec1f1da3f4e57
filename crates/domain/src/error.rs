#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum CreateError {
    #[error("conflict")]
    Conflict,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl From<UpdateError> for CreateError {
    fn from(value: UpdateError) -> Self {
        match value {
            UpdateError::Conflict => CreateError::Conflict,
            UpdateError::Storage(storage) => CreateError::Storage(storage),
            UpdateError::Other(other) => CreateError::Other(other),
        }
    }
}

impl From<ReadError> for CreateError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::Storage(storage) => CreateError::Storage(storage),
            ReadError::Other(other) => CreateError::Other(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum UpdateError {
    #[error("conflict")]
    Conflict,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum DeleteError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("{0} already exists")]
    Conflict(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

/// Rejected input of the validated calculation entry points.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum InvalidInputError {
    #[error("Weight must be positive ({0} kg)")]
    NonPositiveWeight(f64),
    #[error("Height must be positive ({0} cm)")]
    NonPositiveHeight(f64),
    #[error("Age must be positive")]
    NonPositiveAge,
    #[error("Weekly change must not be negative ({0} kg)")]
    NegativeWeeklyChange(f64),
    #[error("Unknown gender \"{0}\"")]
    UnknownGender(String),
    #[error("Unknown activity level \"{0}\"")]
    UnknownActivityLevel(String),
    #[error("Unknown goal \"{0}\"")]
    UnknownGoal(String),
    #[error("Unknown progress kind \"{0}\"")]
    UnknownProgressKind(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_error_from_update_error() {
        assert!(matches!(
            CreateError::from(UpdateError::Conflict),
            CreateError::Conflict
        ));
        assert!(matches!(
            CreateError::from(UpdateError::Storage(StorageError::Unavailable(
                "locked".to_string()
            ))),
            CreateError::Storage(StorageError::Unavailable(_))
        ));
        assert!(matches!(
            CreateError::from(UpdateError::Other("foo".into())),
            CreateError::Other(error) if error.to_string() == "foo"
        ));
    }

    #[test]
    fn test_create_error_from_read_error() {
        assert!(matches!(
            CreateError::from(ReadError::Storage(StorageError::Unavailable("locked".to_string()))),
            CreateError::Storage(StorageError::Unavailable(_))
        ));
        assert!(matches!(
            CreateError::from(ReadError::Other("foo".into())),
            CreateError::Other(error) if error.to_string() == "foo"
        ));
    }

    #[test]
    fn test_invalid_input_error_display() {
        assert_eq!(
            InvalidInputError::NonPositiveWeight(-1.0).to_string(),
            "Weight must be positive (-1 kg)"
        );
        assert_eq!(
            InvalidInputError::UnknownGoal("bulk".to_string()).to_string(),
            "Unknown goal \"bulk\""
        );
    }
}
