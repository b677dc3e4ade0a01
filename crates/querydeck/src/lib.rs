//! ## Crate layout
//! - `core`: builders, selection slots, SQL generation and the session driver.
//! - `config`: TOML configuration for the backend connection.
//! - `error`: public error taxonomy.
//! - `http`: the `Catalog` implementation over the backend's HTTP API.
//!
//! The `prelude` module carries what a front end needs to mount builders
//! against a live backend.

pub use querydeck_core as core;

pub mod config;
pub mod error;
pub mod http;

pub use config::Config;
pub use error::Error;
pub use http::HttpCatalog;

//
// Consts
//

/// Workspace version re-export for downstream tooling.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Config, Error, HttpCatalog,
        core::{prelude::*, session::Session},
    };
}
