use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::document::Format;

pub mod codes;

pub use codes::{describe_error_code, ErrorCode};

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// The error type for every patching operation
#[derive(Error, Debug)]
pub enum PatchError {
    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("[E{code:04}] File not found: {}", .path.display())]
    FileNotFound {
        code: u16,
        path: PathBuf,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("[E{code:04}] I/O error: {message}")]
    Io {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("[E{code:04}] {format} format error: {message}")]
    Format {
        code: u16,
        format: Format,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("[E{code:04}] Field '{field}' not found: {message}")]
    PathNotFound {
        code: u16,
        field: String,
        message: String,
    },

    #[error("[E{code:04}] Field '{field}' is not {expected}")]
    TypeMismatch {
        code: u16,
        field: String,
        expected: &'static str,
    },

    #[error("[E{code:04}] Encoding error: {message}")]
    Encoding {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("[E{code:04}] Step '{step}' failed: {message}")]
    Step {
        code: u16,
        step: String,
        message: String,
    },
}

impl PatchError {
    /// Create a configuration error with specific code
    pub fn config_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// A run parameter the current step needs was not supplied
    pub fn missing_parameter(name: &str) -> Self {
        Self::config_with_code(
            ErrorCode::CONFIG_MISSING_PARAMETER,
            format!("parameter '{}' was not provided", name),
        )
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound {
            code: ErrorCode::IO_FILE_NOT_FOUND,
            path: path.into(),
            source: None,
        }
    }

    /// Create an I/O error with specific code
    pub fn io_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Io {
            code,
            message: message.into(),
            path: None,
            source: None,
        }
    }

    /// Create a format error for the given document format
    pub fn format(format: Format, message: impl Into<String>) -> Self {
        let code = match format {
            Format::Yaml => ErrorCode::FORMAT_INVALID_YAML,
            Format::Json => ErrorCode::FORMAT_INVALID_JSON,
        };
        Self::format_with_code(code, format, message)
    }

    pub fn format_with_code(code: u16, format: Format, message: impl Into<String>) -> Self {
        Self::Format {
            code,
            format,
            message: message.into(),
            path: None,
            source: None,
        }
    }

    pub fn path_not_found(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PathNotFound {
            code: ErrorCode::PATH_NOT_FOUND,
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn type_mismatch(field: impl Into<String>, expected: &'static str) -> Self {
        Self::TypeMismatch {
            code: ErrorCode::PATH_TYPE_MISMATCH,
            field: field.into(),
            expected,
        }
    }

    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding {
            code: ErrorCode::FORMAT_INVALID_UTF8,
            message: message.into(),
            path: None,
            source: None,
        }
    }

    /// Create a step error with specific code
    pub fn step_with_code(code: u16, step: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Step {
            code,
            step: step.into(),
            message: message.into(),
        }
    }

    /// Add a source error to this error
    pub fn with_source(mut self, source: impl Into<BoxedSource>) -> Self {
        match &mut self {
            Self::Config { source: src, .. }
            | Self::FileNotFound { source: src, .. }
            | Self::Io { source: src, .. }
            | Self::Format { source: src, .. }
            | Self::Encoding { source: src, .. } => {
                *src = Some(source.into());
            }
            Self::PathNotFound { .. } | Self::TypeMismatch { .. } | Self::Step { .. } => {}
        }
        self
    }

    /// Attach the file the error relates to, when the variant carries one
    pub fn with_path(mut self, file: &Path) -> Self {
        match &mut self {
            Self::Io { path, .. } | Self::Format { path, .. } | Self::Encoding { path, .. } => {
                *path = Some(file.to_path_buf());
            }
            Self::FileNotFound { path, .. } => {
                *path = file.to_path_buf();
            }
            Self::Config { .. }
            | Self::PathNotFound { .. }
            | Self::TypeMismatch { .. }
            | Self::Step { .. } => {}
        }
        self
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 2,
            Self::FileNotFound { .. } | Self::Io { .. } => 3,
            Self::Format { .. } | Self::Encoding { .. } => 4,
            Self::PathNotFound { .. } | Self::TypeMismatch { .. } => 5,
            Self::Step { .. } => 6,
        }
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Config { code, .. }
            | Self::FileNotFound { code, .. }
            | Self::Io { code, .. }
            | Self::Format { code, .. }
            | Self::PathNotFound { code, .. }
            | Self::TypeMismatch { code, .. }
            | Self::Encoding { code, .. }
            | Self::Step { code, .. } => *code,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message, .. } => format!("Configuration problem: {}", message),
            Self::FileNotFound { path, .. } => {
                format!("Required file {} does not exist", path.display())
            }
            Self::Io { message, path, .. } => match path {
                Some(p) => format!("I/O error at {}: {}", p.display(), message),
                None => format!("I/O error: {}", message),
            },
            Self::Format {
                format,
                message,
                path,
                ..
            } => match path {
                Some(p) => format!("{} in {} is malformed: {}", format, p.display(), message),
                None => format!("{} document is malformed: {}", format, message),
            },
            Self::PathNotFound { field, message, .. } => {
                format!("Field '{}' is missing: {}", field, message)
            }
            Self::TypeMismatch {
                field, expected, ..
            } => format!("Field '{}' should be {}", field, expected),
            Self::Encoding { message, path, .. } => match path {
                Some(p) => format!("{} is not valid UTF-8: {}", p.display(), message),
                None => format!("Encoding error: {}", message),
            },
            Self::Step { step, message, .. } => format!("Step {} failed: {}", step, message),
        }
    }
}

/// Type alias for Results using PatchError
pub type Result<T> = std::result::Result<T, PatchError>;

impl From<std::io::Error> for PatchError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;

        let (code, message) = match err.kind() {
            ErrorKind::NotFound => (ErrorCode::IO_FILE_NOT_FOUND, "File or directory not found"),
            ErrorKind::PermissionDenied => (ErrorCode::IO_PERMISSION_DENIED, "Permission denied"),
            _ => (ErrorCode::IO_GENERIC, "I/O operation failed"),
        };

        PatchError::io_with_code(code, message).with_source(err)
    }
}

impl From<serde_yaml::Error> for PatchError {
    fn from(err: serde_yaml::Error) -> Self {
        PatchError::format(Format::Yaml, err.to_string()).with_source(err)
    }
}

impl From<serde_json::Error> for PatchError {
    fn from(err: serde_json::Error) -> Self {
        PatchError::format(Format::Json, err.to_string()).with_source(err)
    }
}

impl From<toml::de::Error> for PatchError {
    fn from(err: toml::de::Error) -> Self {
        PatchError::config_with_code(ErrorCode::CONFIG_INVALID_TOML, err.message().to_string())
            .with_source(err)
    }
}
