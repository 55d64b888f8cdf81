//! In-memory native library that records every call.
//!
//! `FakeLibrary` stands in for the real indicator library in tests and dry
//! runs. Its compute call is deterministic: each real output echoes the first
//! input series (input 0, or the close slot for a price tuple) shifted by a
//! lookback, plus the output index; integer outputs alternate `0` / `100`.
//! The lookback is either fixed or driven by an integer optional input the way
//! a period parameter drives a moving average (`period - 1`).

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::native::{CallResult, NativeError, NativeLibrary, NativeParams, OutputBuffer};
use crate::price::{PriceInput, PRICE_SLOT_CLOSE, PRICE_SLOT_COUNT};

/// One recorded native call.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeCall {
    Alloc {
        function: String,
    },
    SetInputReal {
        function: String,
        index: usize,
        data: Vec<f64>,
    },
    SetInputPrice {
        function: String,
        index: usize,
        slots: Vec<Vec<f64>>,
    },
    SetOptInteger {
        function: String,
        index: usize,
        value: i32,
    },
    SetOptReal {
        function: String,
        index: usize,
        value: f64,
    },
    Compute {
        function: String,
        start: usize,
        end: usize,
        outputs: usize,
    },
}

/// Compute behaviour of one fake function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FakeFunction {
    /// Integer optional input whose value `p` sets the lookback to `p - 1`.
    pub period_opt: Option<usize>,
    /// Lookback used when `period_opt` is unset.
    pub fixed_lookback: usize,
}

impl FakeFunction {
    pub fn fixed(lookback: usize) -> Self {
        Self {
            period_opt: None,
            fixed_lookback: lookback,
        }
    }

    pub fn period_driven(opt_index: usize) -> Self {
        Self {
            period_opt: Some(opt_index),
            fixed_lookback: 0,
        }
    }
}

type CallLog = Rc<RefCell<Vec<NativeCall>>>;

/// Recording in-memory native library.
#[derive(Debug, Default)]
pub struct FakeLibrary {
    functions: BTreeMap<String, FakeFunction>,
    fallback: Option<FakeFunction>,
    log: CallLog,
}

impl FakeLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_function(mut self, name: impl Into<String>, function: FakeFunction) -> Self {
        self.functions.insert(name.into(), function);
        self
    }

    /// Accept every function name, using `function` for names not registered.
    pub fn with_fallback(mut self, function: FakeFunction) -> Self {
        self.fallback = Some(function);
        self
    }

    /// Snapshot of every call recorded so far.
    pub fn calls(&self) -> Vec<NativeCall> {
        self.log.borrow().clone()
    }

    /// Number of compute calls recorded so far.
    pub fn compute_count(&self) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|call| matches!(call, NativeCall::Compute { .. }))
            .count()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    fn lookup(&self, name: &str) -> Option<FakeFunction> {
        self.functions.get(name).copied().or(self.fallback)
    }
}

impl NativeLibrary for FakeLibrary {
    fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    fn alloc_params(&self, name: &str) -> Result<Box<dyn NativeParams>, NativeError> {
        let spec = self
            .lookup(name)
            .ok_or_else(|| NativeError::UnknownFunction(name.to_string()))?;
        self.log.borrow_mut().push(NativeCall::Alloc {
            function: name.to_string(),
        });
        Ok(Box::new(FakeParams {
            function: name.to_string(),
            spec,
            log: Rc::clone(&self.log),
            inputs: BTreeMap::new(),
            price: None,
            opt_integers: BTreeMap::new(),
        }))
    }
}

struct FakeParams {
    function: String,
    spec: FakeFunction,
    log: CallLog,
    inputs: BTreeMap<usize, Vec<f64>>,
    price: Option<Vec<Vec<f64>>>,
    opt_integers: BTreeMap<usize, i32>,
}

impl FakeParams {
    fn record(&self, call: NativeCall) {
        self.log.borrow_mut().push(call);
    }

    fn lookback(&self) -> usize {
        match self.spec.period_opt {
            Some(index) => {
                let period = self.opt_integers.get(&index).copied().unwrap_or(1).max(1);
                period as usize - 1
            }
            None => self.spec.fixed_lookback,
        }
    }

    fn source(&self) -> Option<&[f64]> {
        if let Some(price) = &self.price {
            return price.get(PRICE_SLOT_CLOSE).map(Vec::as_slice);
        }
        self.inputs.get(&0).map(Vec::as_slice)
    }
}

impl NativeParams for FakeParams {
    fn set_input_real(&mut self, index: usize, data: &[f64]) -> Result<(), NativeError> {
        self.record(NativeCall::SetInputReal {
            function: self.function.clone(),
            index,
            data: data.to_vec(),
        });
        self.inputs.insert(index, data.to_vec());
        Ok(())
    }

    fn set_input_price(&mut self, index: usize, price: PriceInput<'_>) -> Result<(), NativeError> {
        let slots: Vec<Vec<f64>> = price.slots().iter().map(|s| s.to_vec()).collect();
        debug_assert_eq!(slots.len(), PRICE_SLOT_COUNT);
        self.record(NativeCall::SetInputPrice {
            function: self.function.clone(),
            index,
            slots: slots.clone(),
        });
        self.price = Some(slots);
        Ok(())
    }

    fn set_opt_input_integer(&mut self, index: usize, value: i32) -> Result<(), NativeError> {
        self.record(NativeCall::SetOptInteger {
            function: self.function.clone(),
            index,
            value,
        });
        self.opt_integers.insert(index, value);
        Ok(())
    }

    fn set_opt_input_real(&mut self, index: usize, value: f64) -> Result<(), NativeError> {
        self.record(NativeCall::SetOptReal {
            function: self.function.clone(),
            index,
            value,
        });
        Ok(())
    }

    fn call(
        &mut self,
        start: usize,
        end: usize,
        outputs: &mut [OutputBuffer<'_>],
    ) -> Result<CallResult, NativeError> {
        self.record(NativeCall::Compute {
            function: self.function.clone(),
            start,
            end,
            outputs: outputs.len(),
        });

        let source = self.source().ok_or(NativeError::BadParam {
            operation: "call",
            index: 0,
        })?;
        if end < start || end >= source.len() {
            return Err(NativeError::RetCode {
                operation: "call",
                code: 2,
            });
        }

        let lookback = self.lookback();
        let first = start + lookback;
        let count = (end - start + 1).saturating_sub(lookback);

        for (output_index, buffer) in outputs.iter_mut().enumerate() {
            if buffer.len() < count {
                return Err(NativeError::OutputTooSmall {
                    index: output_index,
                    capacity: buffer.len(),
                    required: count,
                });
            }
            match buffer {
                OutputBuffer::Real(buf) => {
                    for (i, slot) in buf.iter_mut().take(count).enumerate() {
                        *slot = source[first + i] + output_index as f64;
                    }
                }
                OutputBuffer::Integer(buf) => {
                    for (i, slot) in buf.iter_mut().take(count).enumerate() {
                        *slot = if i % 2 == 0 { 0 } else { 100 };
                    }
                }
            }
        }

        Ok(CallResult {
            out_beg_idx: if count == 0 { 0 } else { first },
            out_nb_element: count,
        })
    }
}
