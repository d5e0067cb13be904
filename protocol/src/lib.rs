//! Wire types for the school administration REST boundary.
//!
//! Every request and response body the client exchanges with the backend is
//! modelled here so the client and its tests agree on one JSON shape.

pub mod envelope;
pub mod payloads;
pub mod user;

pub use envelope::{ApiEnvelope, EnvelopeError, ErrorBody};
pub use payloads::{ListQuery, LoginRequest, RegisterRequest, UpdatePasswordRequest};
pub use user::{PersonName, Role, UserProfile};
