//! Core decision-and-delegation engine for the prerender middleware:
//! crawler classification, render delegation, and the hook seams that
//! let a host application customize both.

pub mod classifier;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod request;
pub mod testutil;
pub mod traits;

pub use config::{
    ClassifierConfig, DEFAULT_CRAWLER_USER_AGENTS, DEFAULT_EXTENSIONS_TO_IGNORE,
    DEFAULT_SERVICE_URL, UpstreamConfig,
};
pub use error::PrerenderError;
pub use models::RenderedResponse;
pub use render::RenderService;
pub use request::RequestView;
pub use traits::{NoopHooks, RenderFetcher, RenderHooks};
