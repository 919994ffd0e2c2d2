/// Error code registry for upi-patch
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration and parameter errors
/// - 2000-2999: File I/O errors
/// - 3000-3999: Document format errors
/// - 4000-4999: Field path errors
/// - 5000-5999: Pipeline step errors
#[allow(dead_code)]
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_INVALID_TOML: u16 = 1002;
    pub const CONFIG_MISSING_PARAMETER: u16 = 1003;

    // File I/O errors (2000-2999)
    pub const IO_GENERIC: u16 = 2000;
    pub const IO_FILE_NOT_FOUND: u16 = 2001;
    pub const IO_PERMISSION_DENIED: u16 = 2002;
    pub const IO_WRITE_FAILED: u16 = 2003;

    // Document format errors (3000-3999)
    pub const FORMAT_INVALID_YAML: u16 = 3001;
    pub const FORMAT_INVALID_JSON: u16 = 3002;
    pub const FORMAT_SERIALIZE_FAILED: u16 = 3003;
    pub const FORMAT_INVALID_UTF8: u16 = 3004;

    // Field path errors (4000-4999)
    pub const PATH_NOT_FOUND: u16 = 4001;
    pub const PATH_TYPE_MISMATCH: u16 = 4002;

    // Pipeline step errors (5000-5999)
    pub const STEP_MISSING_INPUT: u16 = 5001;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        1001 => "Configuration file not found",
        1002 => "Invalid TOML syntax in configuration",
        1003 => "Required run parameter is missing",

        2000 => "Generic file I/O error",
        2001 => "Input file not found",
        2002 => "Permission denied",
        2003 => "Failed to write output file",

        3001 => "Invalid or unsupported YAML content",
        3002 => "Invalid JSON syntax",
        3003 => "Failed to serialize document",
        3004 => "Input is not valid UTF-8",

        4001 => "Field path not found in document",
        4002 => "Field has an unexpected type",

        5001 => "Pipeline step is missing an input document",

        _ => "Unknown error code",
    }
}
