//! Per-wrapper native parameter holder.

use tracing::trace;

use crate::native::{CallResult, FuncHandle, NativeError, NativeParams, OutputBuffer};
use crate::price::PriceInput;

/// Owns the native parameter state for one generated wrapper.
///
/// Every native failure is a fatal contract breach in the generated program
/// and panics with the function name and the failing operation.
pub struct ParamHolder {
    handle: FuncHandle,
    native: Option<Box<dyn NativeParams>>,
}

impl ParamHolder {
    /// A holder for `handle`; nothing is allocated until `alloc`.
    pub fn new(handle: FuncHandle) -> Self {
        Self {
            handle,
            native: None,
        }
    }

    pub fn function_name(&self) -> &str {
        self.handle.name()
    }

    pub fn is_allocated(&self) -> bool {
        self.native.is_some()
    }

    /// (Re)allocate the native state, discarding anything set before.
    pub fn alloc(&mut self) {
        trace!(function = %self.handle.name(), "allocating native parameters");
        match self.handle.alloc_params() {
            Ok(native) => self.native = Some(native),
            Err(err) => panic!(
                "{}: parameter holder allocation failed: {err}",
                self.handle.name()
            ),
        }
    }

    pub fn set_input_real(&mut self, index: usize, data: &[f64]) {
        self.with_native("set_input_real", |native| {
            native.set_input_real(index, data)
        });
    }

    pub fn set_input_price(&mut self, index: usize, price: PriceInput<'_>) {
        self.with_native("set_input_price", |native| {
            native.set_input_price(index, price)
        });
    }

    pub fn set_opt_input_integer(&mut self, index: usize, value: i32) {
        self.with_native("set_opt_input_integer", |native| {
            native.set_opt_input_integer(index, value)
        });
    }

    pub fn set_opt_input_real(&mut self, index: usize, value: f64) {
        self.with_native("set_opt_input_real", |native| {
            native.set_opt_input_real(index, value)
        });
    }

    pub fn call_function(
        &mut self,
        start: usize,
        end: usize,
        outputs: &mut [OutputBuffer<'_>],
    ) -> CallResult {
        trace!(
            function = %self.handle.name(),
            start,
            end,
            outputs = outputs.len(),
            "native compute"
        );
        let result = self.with_native("call_function", |native| native.call(start, end, outputs));
        trace!(
            function = %self.handle.name(),
            out_beg_idx = result.out_beg_idx,
            out_nb_element = result.out_nb_element,
            "native compute done"
        );
        result
    }

    fn with_native<T>(
        &mut self,
        operation: &'static str,
        f: impl FnOnce(&mut dyn NativeParams) -> Result<T, NativeError>,
    ) -> T {
        let Some(native) = self.native.as_mut() else {
            panic!(
                "{}: {operation} called before the parameter holder was allocated",
                self.handle.name()
            );
        };
        match f(native.as_mut()) {
            Ok(value) => value,
            Err(err) => panic!("{}: {operation} failed: {err}", self.handle.name()),
        }
    }
}
