use std::borrow::Cow;
use std::error::Error;

use sqlx::postgres::PgDatabaseError;

/// SQLSTATE class 23: integrity constraint violation.
pub const INTEGRITY_CONSTRAINT_VIOLATION_CLASS: &str = "23";

/// Diagnostics a driver attaches to an integrity-constraint violation.
///
/// Either field may be missing; consumers must cope with both being `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityViolation<'a> {
    pub constraint_name: Option<&'a str>,
    pub detail: Option<Cow<'a, str>>,
}

/// Storage driver error that may carry an integrity violation.
pub trait DriverError: Error {
    /// `Some` only when the write was rejected by a uniqueness, foreign-key,
    /// check, not-null or primary-key constraint.
    fn integrity_violation(&self) -> Option<IntegrityViolation<'_>>;
}

impl DriverError for sqlx::Error {
    fn integrity_violation(&self) -> Option<IntegrityViolation<'_>> {
        let db_err = self.as_database_error()?;

        if !is_integrity_violation(db_err.code().as_deref()) {
            return None;
        }

        // Postgres keeps the offending key in the detail field, other
        // backends only have the primary message.
        let detail = detail_or_message(
            db_err
                .try_downcast_ref::<PgDatabaseError>()
                .and_then(PgDatabaseError::detail),
            db_err.message(),
        );

        Some(IntegrityViolation {
            constraint_name: db_err.constraint(),
            detail: Some(Cow::Borrowed(detail)),
        })
    }
}

fn detail_or_message<'a>(detail: Option<&'a str>, message: &'a str) -> &'a str {
    detail.filter(|d| !d.is_empty()).unwrap_or(message)
}

fn is_integrity_violation(sqlstate: Option<&str>) -> bool {
    sqlstate.map_or(false, |code| {
        code.starts_with(INTEGRITY_CONSTRAINT_VIOLATION_CLASS)
    })
}
