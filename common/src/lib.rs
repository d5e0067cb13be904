//! School administration destinations and navigation.
//!
//! This crate defines every view the administration front-end can show, how
//! a location path maps onto it, and which navigation entries a role sees.
//! Nothing here performs I/O; the client crate drives it from session state.

pub mod navigation;
pub mod route;

pub use navigation::{visible_navigation, CapabilityTable, NavEntry};
pub use route::Route;
