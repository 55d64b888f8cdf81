//! fiddlegen runtime: the helper layer under generated indicator bindings.
//!
//! Code emitted by `fiddlegen-core` never talks to a native library directly.
//! It goes through this crate:
//! - `NativeLibrary` / `NativeParams`: the native compute surface
//! - `install_library` / `function_handle`: the active library for the
//!   zero-argument factories
//! - `ParamHolder`: per-wrapper native state, panicking with context on failure
//! - `fiddle`: normalized-value arithmetic used by `fix_fiddle_value`
//! - `PRICE_SLOTS`: the fixed OHLCV slot table
//! - `fake`: a recording in-memory library for tests and dry runs

pub mod fake;
pub mod fiddle;
pub mod library;
pub mod native;
pub mod params;
pub mod price;

pub use fiddle::first_or_zero;
pub use library::{function_handle, install_library, try_function_handle, LibraryGuard};
pub use native::{CallResult, FuncHandle, NativeError, NativeLibrary, NativeParams, OutputBuffer};
pub use params::ParamHolder;
pub use price::{
    PriceInput, PRICE_SLOTS, PRICE_SLOT_CLOSE, PRICE_SLOT_COUNT, PRICE_SLOT_HIGH, PRICE_SLOT_LOW,
    PRICE_SLOT_OPEN, PRICE_SLOT_OPEN_INTEREST, PRICE_SLOT_VOLUME,
};
