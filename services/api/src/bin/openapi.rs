//! services/api/src/bin/openapi.rs
//!
//! Writes the OpenAPI document to disk so clients can be generated without
//! starting the server. Usage: `openapi [OUTPUT]`, defaulting to `openapi.json`.

use api_lib::web::rest::openapi_json;
use std::path::PathBuf;

const DEFAULT_OUTPUT: &str = "openapi.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    let json = openapi_json()?;
    std::fs::write(&output, &json)?;
    println!("Wrote OpenAPI document ({} bytes) to {}", json.len(), output.display());
    Ok(())
}
