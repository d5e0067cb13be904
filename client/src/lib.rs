//! Client core of the school administration front-end.
//!
//! Holds the session, gates navigation on it, and runs every backend call
//! through one authorizing pipeline. Views sit on top of [`AdminApp`].

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod guard;
pub mod notify;
pub mod pipeline;
pub mod router;
pub mod session;
pub mod view;

pub use app::AdminApp;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use guard::{GuardDecision, RouteGuard};
pub use pipeline::{ApiClient, PendingRequest};
pub use router::{Navigator, Router};
pub use session::{SessionState, SessionStore};
pub use view::ViewScope;
