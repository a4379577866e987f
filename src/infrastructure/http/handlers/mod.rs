//! HTTP Handlers

mod ping;
mod rules;

pub use ping::*;
pub use rules::*;
