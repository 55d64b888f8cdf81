//! Function descriptors: the catalog's metadata for one function.
//!
//! Kinds are closed sum types, so every dispatch site in the emitters is an
//! exhaustive `match` and an unhandled kind is a compile error. Indexes are
//! positions in the descriptor sequences; counts are the sequence lengths.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of a required input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    /// One real-valued array.
    Real,
    /// Six aligned arrays (open, high, low, close, volume, open interest)
    /// passed as one unit.
    Price,
}

/// Kind of an output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    Real,
    Integer,
}

/// One (label, value) entry of an enumerated optional input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumPair {
    pub label: String,
    pub value: i32,
}

/// Kind of an optional input, with its suggested value space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptInputKind {
    IntegerRange {
        suggested_start: i32,
        suggested_end: i32,
    },
    RealRange {
        suggested_start: f64,
        suggested_end: f64,
    },
    IntegerList {
        values: Vec<EnumPair>,
    },
}

impl OptInputKind {
    /// Whether the native library takes this parameter as an integer.
    pub fn is_integer(&self) -> bool {
        match self {
            OptInputKind::IntegerRange { .. } | OptInputKind::IntegerList { .. } => true,
            OptInputKind::RealRange { .. } => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDescriptor {
    pub name: String,
    pub kind: InputKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptInputDescriptor {
    pub name: String,
    pub display_name: String,
    pub default_value: f64,
    pub kind: OptInputKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDescriptor {
    pub name: String,
    pub kind: OutputKind,
}

/// Full metadata for one catalog function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    /// Catalog name, used to resolve the native handle (e.g. `SMA`).
    pub name: String,
    /// Camel-case identifier (e.g. `Sma`, `HtDcPeriod`).
    pub camel_case_name: String,
    /// Group the catalog lists the function under. Filled in by the catalog.
    #[serde(default)]
    pub group: String,
    /// Human-readable description.
    #[serde(default)]
    pub hint: String,
    #[serde(default)]
    pub inputs: Vec<InputDescriptor>,
    #[serde(default)]
    pub opt_inputs: Vec<OptInputDescriptor>,
    #[serde(default)]
    pub outputs: Vec<OutputDescriptor>,
}

/// A descriptor the generator cannot translate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DescriptorError {
    #[error("function has an empty name")]
    EmptyName,

    #[error("{function}: camel-case name '{camel}' has no identifier characters")]
    BadIdentifier { function: String, camel: String },

    #[error("{function}: more than one price input (inputs {first} and {second})")]
    MultiplePriceInputs {
        function: String,
        first: usize,
        second: usize,
    },

    #[error("{function}: function declares no outputs")]
    NoOutputs { function: String },

    #[error("{function}: optional input {index} has an empty value list")]
    EmptyValueList { function: String, index: usize },

    #[error("{function}: optional input {index} has non-finite {field} ({value})")]
    NonFinite {
        function: String,
        index: usize,
        field: &'static str,
        value: f64,
    },
}

impl FunctionDescriptor {
    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn num_opt_inputs(&self) -> usize {
        self.opt_inputs.len()
    }

    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Index of the price-tuple input, if any.
    pub fn price_input_index(&self) -> Option<usize> {
        self.inputs.iter().position(|i| i.kind == InputKind::Price)
    }

    /// Check the invariants the emitters rely on.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        if self.name.trim().is_empty() {
            return Err(DescriptorError::EmptyName);
        }
        if !self.camel_case_name.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(DescriptorError::BadIdentifier {
                function: self.name.clone(),
                camel: self.camel_case_name.clone(),
            });
        }

        let mut prices = self
            .inputs
            .iter()
            .enumerate()
            .filter(|(_, input)| input.kind == InputKind::Price)
            .map(|(index, _)| index);
        if let (Some(first), Some(second)) = (prices.next(), prices.next()) {
            return Err(DescriptorError::MultiplePriceInputs {
                function: self.name.clone(),
                first,
                second,
            });
        }

        if self.outputs.is_empty() {
            return Err(DescriptorError::NoOutputs {
                function: self.name.clone(),
            });
        }

        for (index, opt) in self.opt_inputs.iter().enumerate() {
            self.check_finite(index, "default value", opt.default_value)?;
            match &opt.kind {
                OptInputKind::IntegerRange { .. } => {}
                OptInputKind::RealRange {
                    suggested_start,
                    suggested_end,
                } => {
                    self.check_finite(index, "suggested start", *suggested_start)?;
                    self.check_finite(index, "suggested end", *suggested_end)?;
                }
                OptInputKind::IntegerList { values } => {
                    if values.is_empty() {
                        return Err(DescriptorError::EmptyValueList {
                            function: self.name.clone(),
                            index,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn check_finite(&self, index: usize, field: &'static str, value: f64) -> Result<(), DescriptorError> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(DescriptorError::NonFinite {
                function: self.name.clone(),
                index,
                field,
                value,
            })
        }
    }
}
