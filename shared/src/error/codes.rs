//! Unified error codes for the menu platform
//!
//! Error codes are shared between the client engines and the UI layer and
//! are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Establishment errors
//! - 4xxx: Cart errors
//! - 5xxx: Catalog errors
//! - 6xxx: Asset errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Session has expired
    SessionExpired = 1003,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Actor does not own the record
    OwnershipRequired = 2002,

    // ==================== 3xxx: Establishment ====================
    /// Establishment not found
    EstablishmentNotFound = 3001,
    /// Menu record not found
    MenuNotFound = 3002,
    /// Slug has invalid format
    SlugInvalid = 3003,
    /// Slug already taken by another establishment
    SlugTaken = 3004,

    // ==================== 4xxx: Cart ====================
    /// Cart line not found at the given position
    CartLineNotFound = 4001,
    /// Cart is empty
    CartEmpty = 4002,
    /// Requested quantity is invalid
    QuantityInvalid = 4003,

    // ==================== 5xxx: Catalog ====================
    /// Category not found
    CategoryNotFound = 5001,
    /// Category has associated items
    CategoryHasItems = 5002,
    /// Menu item not found
    ItemNotFound = 5101,
    /// Menu item has invalid price
    ItemInvalidPrice = 5102,

    // ==================== 6xxx: Asset ====================
    /// Asset upload failed
    UploadFailed = 6001,
    /// File too large
    FileTooLarge = 6002,
    /// Unsupported file format
    UnsupportedFileFormat = 6003,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Network error
    NetworkError = 9002,
    /// Operation timeout
    TimeoutError = 9003,
    /// Backend service unavailable
    BackendUnavailable = 9004,
    /// Serialization/deserialization failed
    SerializationError = 9005,
    /// Durable client storage error
    StorageError = 9101,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "You must be signed in",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::SessionExpired => "Session has expired",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::OwnershipRequired => "You do not own this record",

            // Establishment
            ErrorCode::EstablishmentNotFound => "Establishment not found",
            ErrorCode::MenuNotFound => "Menu not found",
            ErrorCode::SlugInvalid => "Slug has invalid format",
            ErrorCode::SlugTaken => "Slug is already taken",

            // Cart
            ErrorCode::CartLineNotFound => "Cart line not found",
            ErrorCode::CartEmpty => "Cart is empty",
            ErrorCode::QuantityInvalid => "Quantity is invalid",

            // Catalog
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::CategoryHasItems => "Category has associated items",
            ErrorCode::ItemNotFound => "Menu item not found",
            ErrorCode::ItemInvalidPrice => "Menu item has invalid price",

            // Asset
            ErrorCode::UploadFailed => "Asset upload failed",
            ErrorCode::FileTooLarge => "File is too large",
            ErrorCode::UnsupportedFileFormat => "Unsupported file format",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::BackendUnavailable => "Backend service unavailable",
            ErrorCode::SerializationError => "Serialization failed",
            ErrorCode::StorageError => "Client storage error",
        }
    }
}

/// Error for invalid error code conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::SessionExpired),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::OwnershipRequired),

            // Establishment
            3001 => Ok(ErrorCode::EstablishmentNotFound),
            3002 => Ok(ErrorCode::MenuNotFound),
            3003 => Ok(ErrorCode::SlugInvalid),
            3004 => Ok(ErrorCode::SlugTaken),

            // Cart
            4001 => Ok(ErrorCode::CartLineNotFound),
            4002 => Ok(ErrorCode::CartEmpty),
            4003 => Ok(ErrorCode::QuantityInvalid),

            // Catalog
            5001 => Ok(ErrorCode::CategoryNotFound),
            5002 => Ok(ErrorCode::CategoryHasItems),
            5101 => Ok(ErrorCode::ItemNotFound),
            5102 => Ok(ErrorCode::ItemInvalidPrice),

            // Asset
            6001 => Ok(ErrorCode::UploadFailed),
            6002 => Ok(ErrorCode::FileTooLarge),
            6003 => Ok(ErrorCode::UnsupportedFileFormat),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::NetworkError),
            9003 => Ok(ErrorCode::TimeoutError),
            9004 => Ok(ErrorCode::BackendUnavailable),
            9005 => Ok(ErrorCode::SerializationError),
            9101 => Ok(ErrorCode::StorageError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
