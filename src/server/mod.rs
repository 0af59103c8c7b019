//! Leaderboard backend: flat-file score store behind a small HTTP surface.
//!
//! ## Usage
//!
//! ```sh
//! quakks serve         # Port from the PORT env var, default 3000
//! quakks serve 8080    # Explicit port
//! ```

mod http;
mod store;

#[allow(unused_imports)]
pub use http::{handle_request, http_response, parse_request, run, ApiError, Request};
pub use store::ScoreStore;
