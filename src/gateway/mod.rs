//! Fetch gateway module
//!
//! The transport seam of the controller. A gateway performs page fetches on
//! behalf of one or more sessions and can be asked to abandon the fetches of
//! a single session.
//!
//! - `FetchGateway` - async trait implemented by transports
//! - `UnsplashGateway` - HTTP implementation against the Unsplash photo API

mod types;
mod unsplash;

pub use types::{FetchGateway, PageRequest, PageResponse, SessionId};
pub use unsplash::UnsplashGateway;

#[cfg(test)]
mod tests;
