//! Tessera error codes following a structured numbering system
//!
//! Error code ranges:
//! - TSR0001-TSR0099: Conversion errors (text or boxed input could not be read)
//! - TSR0100-TSR0199: Tag errors (accessor/tag mismatches, unknown type names)
//! - TSR0200-TSR0299: Operation errors (comparison, arithmetic)
//! - TSR0300-TSR0399: Inference errors (type sniffing)
//! - TSR0400-TSR0499: System errors (I/O, configuration)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    /// Check if this is a conversion error (0001-0099)
    pub const fn is_conversion_error(&self) -> bool {
        self.0 >= 1 && self.0 < 100
    }

    /// Check if this is a tag error (0100-0199)
    pub const fn is_tag_error(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    /// Check if this is an operation error (0200-0299)
    pub const fn is_operation_error(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Check if this is an inference error (0300-0399)
    pub const fn is_inference_error(&self) -> bool {
        self.0 >= 300 && self.0 < 400
    }

    /// Check if this is a system error (0400-0499)
    pub const fn is_system_error(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TSR{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Conversion errors (0001-0099)
    map.insert(1, ErrorInfo::new("Invalid numeric text"));
    map.insert(2, ErrorInfo::new("Invalid boolean text")
        .with_help("Accepted values: true, false, on, off, 1, 0, yes, no, y, n"));
    map.insert(3, ErrorInfo::new("Invalid date/time text"));
    map.insert(4, ErrorInfo::new("Invalid character text")
        .with_help("A Char value must be exactly one character"));
    map.insert(5, ErrorInfo::new("Invalid GUID text"));
    map.insert(6, ErrorInfo::new("Invalid hexadecimal text")
        .with_help("Binary text must contain an even number of hex digits, optionally prefixed with 0x"));
    map.insert(7, ErrorInfo::new("Invalid JSON document"));
    map.insert(8, ErrorInfo::new("Invalid XML document"));
    map.insert(9, ErrorInfo::new("Invalid geometry text"));
    map.insert(10, ErrorInfo::new("Value cannot be converted to the target kind"));

    // Tag errors (0100-0199)
    map.insert(100, ErrorInfo::new("Accessor does not match the active type tag")
        .with_help("Check the value's tag (or sniff the input) before using a typed accessor"));
    map.insert(101, ErrorInfo::new("Unknown type name"));

    // Operation errors (0200-0299)
    map.insert(200, ErrorInfo::new("Kind is not comparable"));
    map.insert(201, ErrorInfo::new("Kind is not combinable"));
    map.insert(202, ErrorInfo::new("Arithmetic overflow"));
    map.insert(203, ErrorInfo::new("Division by zero"));

    // Inference errors (0300-0399)
    map.insert(300, ErrorInfo::new("Column count mismatch"));

    // System errors (0400-0499)
    map.insert(400, ErrorInfo::new("Internal error"));
    map.insert(401, ErrorInfo::new("I/O error"));
    map.insert(402, ErrorInfo::new("Configuration error"));

    map
});

// Conversion errors
pub const TSR0001: ErrorCode = ErrorCode::new(1);
pub const TSR0002: ErrorCode = ErrorCode::new(2);
pub const TSR0003: ErrorCode = ErrorCode::new(3);
pub const TSR0004: ErrorCode = ErrorCode::new(4);
pub const TSR0005: ErrorCode = ErrorCode::new(5);
pub const TSR0006: ErrorCode = ErrorCode::new(6);
pub const TSR0007: ErrorCode = ErrorCode::new(7);
pub const TSR0008: ErrorCode = ErrorCode::new(8);
pub const TSR0009: ErrorCode = ErrorCode::new(9);
pub const TSR0010: ErrorCode = ErrorCode::new(10);

// Tag errors
pub const TSR0100: ErrorCode = ErrorCode::new(100);
pub const TSR0101: ErrorCode = ErrorCode::new(101);

// Operation errors
pub const TSR0200: ErrorCode = ErrorCode::new(200);
pub const TSR0201: ErrorCode = ErrorCode::new(201);
pub const TSR0202: ErrorCode = ErrorCode::new(202);
pub const TSR0203: ErrorCode = ErrorCode::new(203);

// Inference errors
pub const TSR0300: ErrorCode = ErrorCode::new(300);

// System errors
pub const TSR0400: ErrorCode = ErrorCode::new(400);
pub const TSR0401: ErrorCode = ErrorCode::new(401);
pub const TSR0402: ErrorCode = ErrorCode::new(402);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(TSR0001.to_string(), "TSR0001");
        assert_eq!(TSR0200.to_string(), "TSR0200");
    }

    #[test]
    fn test_error_categories() {
        assert!(TSR0001.is_conversion_error());
        assert!(!TSR0001.is_tag_error());

        assert!(TSR0100.is_tag_error());
        assert!(!TSR0100.is_conversion_error());

        assert!(TSR0200.is_operation_error());
        assert!(TSR0300.is_inference_error());
        assert!(TSR0400.is_system_error());
    }

    #[test]
    fn test_error_info() {
        assert_eq!(TSR0203.info().description, "Division by zero");
        assert!(TSR0002.info().help.is_some());
        assert_eq!(ErrorCode::new(999).info().description, "Unknown error");
    }
}
