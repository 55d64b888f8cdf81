//! Build script for fiddlegen-bindings: generates wrappers from the sample catalog.
//!
//! Reads `catalog/sample.toml`, runs the generator with default settings and
//! writes the five artifacts into `OUT_DIR`, where `src/lib.rs` includes them.

use std::path::PathBuf;

use fiddlegen_core::{CatalogDump, GeneratorConfig};

fn main() {
    let manifest_dir =
        PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set"));
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR not set"));
    let catalog_path = manifest_dir.join("catalog").join("sample.toml");

    println!("cargo:rerun-if-changed={}", catalog_path.display());
    println!("cargo:rerun-if-changed=build.rs");

    let catalog = CatalogDump::from_file(&catalog_path)
        .unwrap_or_else(|e| panic!("failed to load {}: {e}", catalog_path.display()));

    let mut config = GeneratorConfig::default();
    config.output.dir = out_dir;

    if let Err(e) = fiddlegen_core::generate(&catalog, &config) {
        panic!("generating bindings failed: {e}");
    }
}
