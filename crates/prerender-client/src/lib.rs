//! Reqwest-backed implementation of `prerender_core::RenderFetcher`.

mod fetcher;

pub use fetcher::ReqwestRenderFetcher;
