use std::error::Error;

use http::StatusCode;
use serde_json::{Map, Value};

use crate::error::{Rejection, StatusError};

/// Outcome of structurally inspecting a handler error
///
/// Downstream rendering dispatches on this tag only; nothing after
/// classification probes the error again.
#[derive(Debug)]
pub(crate) enum Classified {
    /// The error (or one of its sources) carried an HTTP status
    Known {
        status: StatusCode,
        message: String,
        /// Present only for JSON-capable errors
        payload: Option<Map<String, Value>>,
    },
    /// Nothing recognizable in the chain
    Opaque,
}

/// Inspect an error and its source chain for a status-bearing cause
///
/// The first [`Rejection`] or [`StatusError`] found wins, so a rejection
/// wrapped by an intermediate error classifies like a bare one. Total for
/// any input; never panics.
pub(crate) fn classify(error: &(dyn Error + 'static)) -> Classified {
    let mut current = Some(error);
    while let Some(cause) = current {
        if let Some(rejection) = cause.downcast_ref::<Rejection>() {
            return Classified::Known {
                status: rejection.status(),
                message: rejection.message().to_owned(),
                payload: Some(rejection.payload()),
            };
        }
        if let Some(bare) = cause.downcast_ref::<StatusError>() {
            return Classified::Known {
                status: bare.status(),
                message: bare.message().to_owned(),
                payload: None,
            };
        }
        current = cause.source();
    }
    Classified::Opaque
}
