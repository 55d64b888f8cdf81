//! Eligibility classification.
//!
//! Two registries are generated from the catalog:
//! - **direct functions**: driven purely by an OHLCV price tuple, with no
//!   separately addressable real-array input
//! - **time-period functions**: driven by a plain real-array input, listed only
//!   when they also have a period-style optional input
//!
//! The predicates are pure functions of the descriptor. `ClassifiedFunction`
//! bundles a descriptor with every derived flag so emission and statistics
//! read the same classification.

use serde::Serialize;

use crate::descriptor::{FunctionDescriptor, InputKind};
use crate::names;

/// Whether any input is a plain real array.
pub fn contains_real_input(d: &FunctionDescriptor) -> bool {
    d.inputs.iter().any(|input| input.kind == InputKind::Real)
}

/// A price-tuple function with no real-array input.
pub fn is_direct_function(d: &FunctionDescriptor) -> bool {
    for input in &d.inputs {
        if input.kind == InputKind::Price {
            return !contains_real_input(d);
        }
    }
    false
}

/// A function with at least one real-array input.
pub fn is_time_period_function(d: &FunctionDescriptor) -> bool {
    contains_real_input(d)
}

/// Optional-input indexes whose display name contains `marker`, in order.
pub fn time_period_opt_indexes(d: &FunctionDescriptor, marker: &str) -> Vec<usize> {
    d.opt_inputs
        .iter()
        .enumerate()
        .filter(|(_, opt)| opt.display_name.contains(marker))
        .map(|(index, _)| index)
        .collect()
}

/// A descriptor plus everything the emitters derive from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedFunction {
    pub descriptor: FunctionDescriptor,
    pub direct: bool,
    pub time_period: bool,
    /// Optional inputs auto-sized to the input length by `go_single`.
    pub period_indexes: Vec<usize>,
    pub wrapper_type: String,
    pub factory: String,
}

impl ClassifiedFunction {
    pub fn classify(descriptor: FunctionDescriptor, period_marker: &str) -> Self {
        let direct = is_direct_function(&descriptor);
        let time_period = is_time_period_function(&descriptor);
        let period_indexes = time_period_opt_indexes(&descriptor, period_marker);
        let wrapper_type = names::wrapper_type_name(&descriptor.camel_case_name);
        let factory = names::factory_name(&descriptor.camel_case_name);
        Self {
            descriptor,
            direct,
            time_period,
            period_indexes,
            wrapper_type,
            factory,
        }
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// Gets a wrapper at all.
    pub fn is_eligible(&self) -> bool {
        self.direct || self.time_period
    }

    /// Listed in the direct-function registry.
    pub fn in_function_array(&self) -> bool {
        self.direct
    }

    /// Listed in the time-period registry; also gates the `go_single` body.
    pub fn in_time_period_array(&self) -> bool {
        self.time_period && !self.period_indexes.is_empty()
    }
}
