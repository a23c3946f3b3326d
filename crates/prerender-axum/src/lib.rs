//! Axum integration: the middleware that serves prerendered snapshots
//! to crawlers and the error mapping for failed delegations.

pub mod error;
pub mod middleware;

pub use error::RenderError;
pub use middleware::{PrerenderState, prerender_middleware};
