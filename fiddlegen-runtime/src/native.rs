//! Native compute surface and structured error types.
//!
//! The `NativeLibrary` trait abstracts over the indicator library that actually
//! computes values, so generated bindings can run against the real library or
//! against `FakeLibrary` in tests.

use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use crate::price::PriceInput;

/// Errors reported by a native library.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NativeError {
    #[error("no native library installed on this thread")]
    NoLibrary,

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("bad parameter index {index} for {operation}")]
    BadParam {
        operation: &'static str,
        index: usize,
    },

    #[error("{operation} failed with return code {code}")]
    RetCode { operation: &'static str, code: i32 },

    #[error("output buffer {index} holds {capacity} elements, {required} required")]
    OutputTooSmall {
        index: usize,
        capacity: usize,
        required: usize,
    },
}

/// Outcome of one compute call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallResult {
    /// Index of the first input element that has an output value.
    pub out_beg_idx: usize,
    /// Number of output elements written (fewer than requested during warm-up).
    pub out_nb_element: usize,
}

/// Caller-allocated output buffer handed to the compute call.
#[derive(Debug)]
pub enum OutputBuffer<'a> {
    Real(&'a mut [f64]),
    Integer(&'a mut [i32]),
}

impl OutputBuffer<'_> {
    pub fn len(&self) -> usize {
        match self {
            OutputBuffer::Real(buf) => buf.len(),
            OutputBuffer::Integer(buf) => buf.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A native indicator library.
pub trait NativeLibrary {
    /// Whether the library knows a function by its catalog name.
    fn contains(&self, name: &str) -> bool;

    /// Allocate a fresh parameter holder for `name`.
    fn alloc_params(&self, name: &str) -> Result<Box<dyn NativeParams>, NativeError>;
}

/// Per-call native parameter state (inputs, optional inputs, outputs).
///
/// Implementations copy input data; callers may drop their buffers after a
/// setter returns.
pub trait NativeParams {
    fn set_input_real(&mut self, index: usize, data: &[f64]) -> Result<(), NativeError>;

    fn set_input_price(&mut self, index: usize, price: PriceInput<'_>) -> Result<(), NativeError>;

    fn set_opt_input_integer(&mut self, index: usize, value: i32) -> Result<(), NativeError>;

    fn set_opt_input_real(&mut self, index: usize, value: f64) -> Result<(), NativeError>;

    /// Compute over input elements `start..=end`, writing into `outputs`
    /// (positionally indexed by output index).
    fn call(
        &mut self,
        start: usize,
        end: usize,
        outputs: &mut [OutputBuffer<'_>],
    ) -> Result<CallResult, NativeError>;
}

/// A resolved function: catalog name plus the library that provides it.
#[derive(Clone)]
pub struct FuncHandle {
    name: String,
    library: Rc<dyn NativeLibrary>,
}

impl FuncHandle {
    pub fn new(name: impl Into<String>, library: Rc<dyn NativeLibrary>) -> Self {
        Self {
            name: name.into(),
            library,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alloc_params(&self) -> Result<Box<dyn NativeParams>, NativeError> {
        self.library.alloc_params(&self.name)
    }
}

impl fmt::Debug for FuncHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FuncHandle").field("name", &self.name).finish()
    }
}
