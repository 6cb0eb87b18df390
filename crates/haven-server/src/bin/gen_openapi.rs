//! Writes the OpenAPI specification to `openapi.json` in the workspace root.
//!
//! Run with: cargo run --bin gen-openapi -p haven-server
//!
//! The web client's typed API layer is generated from this file.

use std::fs;
use std::path::PathBuf;

fn main() {
    let json = haven_server::api::get_openapi_json();

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let output_path = manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("Could not find workspace root")
        .join("openapi.json");

    fs::write(&output_path, &json)
        .unwrap_or_else(|e| panic!("Failed to write to {}: {e}", output_path.display()));

    let path_count = serde_json::from_str::<serde_json::Value>(&json)
        .ok()
        .and_then(|spec| {
            spec.get("paths")
                .and_then(|p| p.as_object())
                .map(|p| p.len())
        })
        .unwrap_or(0);

    println!(
        "Wrote {} ({} paths)",
        output_path.display(),
        path_count
    );
}
