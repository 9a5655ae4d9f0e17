//! Core traits for the Poweradmin engine
//!
//! - [`Transport`]: execute one HTTP exchange against the remote API
//! - [`Lifecycle`](crate::resources::Lifecycle) lives with the resources it governs

pub mod transport;

pub use transport::{ApiRequest, Method, RawResponse, Transport};
