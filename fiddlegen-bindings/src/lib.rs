//! Indicator bindings generated from `catalog/sample.toml`.
//!
//! The build script runs the generator; each artifact is mounted here as a
//! module named after its file stem:
//! - `bindings`: one wrapper struct and factory per eligible function
//! - `function_array` / `time_period_array`: the factory registries
//! - `ta_function`: the `TaFunction` trait
//! - `ta_stats`: catalog bounds
//!
//! Factories resolve functions through the library installed with
//! `fiddlegen_runtime::install_library`.

#[allow(dead_code, unused_imports, clippy::all)]
pub mod bindings {
    include!(concat!(env!("OUT_DIR"), "/bindings.rs"));
}

#[allow(clippy::all)]
pub mod function_array {
    include!(concat!(env!("OUT_DIR"), "/function_array.rs"));
}

#[allow(clippy::all)]
pub mod time_period_array {
    include!(concat!(env!("OUT_DIR"), "/time_period_array.rs"));
}

pub mod ta_function {
    include!(concat!(env!("OUT_DIR"), "/ta_function.rs"));
}

pub mod ta_stats {
    include!(concat!(env!("OUT_DIR"), "/ta_stats.rs"));
}

pub use function_array::FUNCTION_ARRAY;
pub use ta_function::TaFunction;
pub use time_period_array::TIME_PERIOD_FUNCTION_ARRAY;
