//! Error normalization middleware for `tower` services
//!
//! [`NormalizeErrorLayer`] wraps a fallible service and converts every
//! error it emits into exactly one HTTP response. Errors are classified
//! by downcasting through their source chains: a [`Rejection`] carries a
//! status, a message, and a JSON payload; a [`StatusError`] carries only
//! a status and a message; anything else is treated as unknown. Client
//! faults (status below 500) are exposed to the caller, as JSON when the
//! request accepts it and as plain text otherwise. Server faults and
//! unknown errors are redacted to an empty body and reported to an
//! [`ErrorSink`], which logs through `tracing` by default.
//!
//! ```
//! use axum::Router;
//! use faultline::{BoxError, NormalizeErrorLayer, Rejection};
//! use http::StatusCode;
//! use tower::{Layer, service_fn};
//!
//! let lookup = service_fn(|_request: axum::extract::Request| async {
//!     Err::<axum::response::Response, BoxError>(
//!         Rejection::new(StatusCode::NOT_FOUND, "no such user")
//!             .with_field("id", 7)
//!             .into(),
//!     )
//! });
//!
//! let app: Router = Router::new()
//!     .route_service("/users/{id}", NormalizeErrorLayer::new().layer(lookup));
//! ```

#![allow(clippy::must_use_candidate)]

mod classify;
mod error;
mod layer;
mod negotiate;
mod sink;

pub use error::{Rejection, StatusError};
pub use layer::{BoxError, NormalizeError, NormalizeErrorLayer, failure_cause};
pub use negotiate::{AcceptHeader, Negotiator};
pub use sink::{ErrorSink, TracingSink};
