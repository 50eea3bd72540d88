//! Failure containment for calls into collaborator code.
//!
//! Capability hooks, factories and listeners are opaque. A call into any of
//! them either succeeds, returns an error, or panics; `isolate` folds the
//! last two into a single `Failure` so callers can log and carry on.
//! Hangs are not contained.

use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

use capstan_core::error::{Error, Result};

/// Why a contained call did not succeed.
#[derive(Debug)]
pub enum Failure {
    /// The call returned an error
    Error(Error),

    /// The call panicked
    Panic(String),
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Error(err) => write!(f, "{}", err),
            Failure::Panic(message) => write!(f, "panicked: {}", message),
        }
    }
}

/// Run `call`, turning both error returns and panics into `Failure`.
///
/// Unwind safety is asserted: callers only ever observe state that the
/// collaborator owns, and registry/reference state is updated after the
/// call based on its outcome.
pub fn isolate<T, F>(call: F) -> std::result::Result<T, Failure>
where
    F: FnOnce() -> Result<T>,
{
    match catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(Failure::Error(err)),
        Err(payload) => Err(Failure::Panic(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capstan_core::error::ListenerError;

    #[test]
    fn test_isolate_success() {
        assert_eq!(isolate(|| Ok(7)).unwrap(), 7);
    }

    #[test]
    fn test_isolate_error() {
        let result: std::result::Result<(), _> =
            isolate(|| Err(ListenerError::Rejected("no".into()).into()));
        match result {
            Err(Failure::Error(Error::Listener(_))) => {}
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_isolate_panic() {
        let result: std::result::Result<(), _> = isolate(|| panic!("boom {}", 1));
        match result {
            Err(Failure::Panic(message)) => assert_eq!(message, "boom 1"),
            other => panic!("unexpected outcome: {:?}", other),
        }

        let result: std::result::Result<(), _> = isolate(|| panic!("static"));
        assert_eq!(result.unwrap_err().to_string(), "panicked: static");
    }
}
