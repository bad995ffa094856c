//! Export the `OpenAPI` schema as JSON for codegen.
//!
//! Usage: `cargo run --bin export_openapi > openapi.json`
//!
//! The API key header comes from the same configuration sources as the server.

#![allow(clippy::print_stdout, clippy::expect_used)]

use catalog_api::{config::Config, rest::api_doc};

fn main() {
    let config = Config::load().unwrap_or_default();
    print!(
        "{}",
        api_doc(&config.auth.header)
            .to_pretty_json()
            .expect("OpenAPI JSON serialization failed")
    );
}
