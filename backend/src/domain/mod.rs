//! Domain primitives, ports, and use-cases.
//!
//! Purpose: define strongly typed user values and the transport-agnostic
//! error model, plus the ports that separate HTTP handlers from storage.
//!
//! Public surface:
//! - Error / ErrorCode: domain error payload and stable identifier.
//! - UserDraft, Username, EmailAddress: validated write-side user values.
//! - User, UserId: stored rows and their identifiers, served as read.
//! - UserService: implementation of the driving ports over a repository.
//! - TraceId: request-scoped correlation identifier.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EMAIL_MAX, EmailAddress, USERNAME_MAX, User, UserDraft, UserId, UserValidationError, Username,
};
pub use self::user_service::{USER_NOT_FOUND, UserService};

/// Convenient result alias for domain operations.
///
/// # Examples
/// ```
/// use users_api::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("User not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
