use thiserror::Error;

#[derive(Error, Debug)]
pub enum DexError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid map type: {value}")]
    InvalidMapType { value: String },

    #[error("Data file '{file_name}' could not be found")]
    SourceNotFound { file_name: String },

    #[error("Data has not been loaded yet")]
    NotLoaded,

    #[error("Data is still loading")]
    LoadInProgress,

    #[error("Data has already been loaded")]
    AlreadyLoaded,

    #[error("Background load task failed: {message}")]
    LoadTaskFailed { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    State,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DexError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DexError::IoError(_) | DexError::SourceNotFound { .. } => ErrorCategory::Io,
            DexError::ConfigError { .. }
            | DexError::ConfigValidationError { .. }
            | DexError::InvalidConfigValueError { .. }
            | DexError::InvalidMapType { .. } => ErrorCategory::Configuration,
            DexError::NotLoaded
            | DexError::LoadInProgress
            | DexError::AlreadyLoaded
            | DexError::LoadTaskFailed { .. } => ErrorCategory::State,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DexError::NotLoaded | DexError::LoadInProgress | DexError::AlreadyLoaded => {
                ErrorSeverity::Low
            }
            DexError::SourceNotFound { .. } | DexError::InvalidMapType { .. } => {
                ErrorSeverity::Medium
            }
            DexError::IoError(_)
            | DexError::ConfigError { .. }
            | DexError::ConfigValidationError { .. }
            | DexError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            DexError::LoadTaskFailed { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DexError::IoError(_) => "Check that the data file exists and is readable",
            DexError::ConfigError { .. }
            | DexError::ConfigValidationError { .. }
            | DexError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line arguments"
            }
            DexError::InvalidMapType { .. } => {
                "Use one of: 1/hash, 2/sorted, 3/insertion (or HashMap, TreeMap, LinkedHashMap)"
            }
            DexError::SourceNotFound { .. } => {
                "Pass --file, set [data].default_path, or select the file manually"
            }
            DexError::NotLoaded => "Run 'load' first",
            DexError::LoadInProgress => "Wait for the load to finish",
            DexError::AlreadyLoaded => "Restart the program to load a different data set",
            DexError::LoadTaskFailed { .. } => "Restart the program and try again",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DexError::SourceNotFound { file_name } => {
                format!("Could not find the data file '{}' automatically", file_name)
            }
            DexError::NotLoaded => "No data loaded yet".to_string(),
            DexError::LoadInProgress => "Data is still loading, please wait".to_string(),
            DexError::AlreadyLoaded => "Data is already loaded".to_string(),
            other => other.to_string(),
        }
    }

    /// 依嚴重程度決定程式結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, DexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_errors_are_low_severity() {
        assert_eq!(DexError::NotLoaded.severity(), ErrorSeverity::Low);
        assert_eq!(DexError::NotLoaded.category(), ErrorCategory::State);
        assert_eq!(DexError::LoadInProgress.exit_code(), 0);
    }

    #[test]
    fn test_source_not_found_message() {
        let err = DexError::SourceNotFound {
            file_name: "data.csv".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Io);
        assert_eq!(err.exit_code(), 2);
        assert!(err.user_friendly_message().contains("data.csv"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: DexError = io.into();
        assert!(matches!(err, DexError::IoError(_)));
        assert_eq!(err.severity(), ErrorSeverity::High);
    }
}
