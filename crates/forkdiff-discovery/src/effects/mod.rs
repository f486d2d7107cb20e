//! I/O at the edge of discovery.
//!
//! [`HttpClient`] is the only seam that touches the network; [`Resolver`]
//! drives the pure functions in [`crate::core`] around it.

mod http;
mod resolver;

pub use http::HttpClient;
pub use resolver::Resolver;

#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
