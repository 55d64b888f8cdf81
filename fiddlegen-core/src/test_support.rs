//! Descriptor builders shared by unit tests.

use crate::descriptor::{
    EnumPair, FunctionDescriptor, InputDescriptor, InputKind, OptInputDescriptor, OptInputKind,
    OutputDescriptor, OutputKind,
};

fn period_opt(display: &str) -> OptInputDescriptor {
    OptInputDescriptor {
        name: format!("optIn{}", display.replace(' ', "")),
        display_name: display.to_string(),
        default_value: 14.0,
        kind: OptInputKind::IntegerRange {
            suggested_start: 2,
            suggested_end: 30,
        },
    }
}

fn real_output() -> OutputDescriptor {
    OutputDescriptor {
        name: "outReal".into(),
        kind: OutputKind::Real,
    }
}

/// One real input, one integer-range optional input per display name, one real output.
pub fn real_function(name: &str, camel: &str, opts: &[&str]) -> FunctionDescriptor {
    FunctionDescriptor {
        name: name.into(),
        camel_case_name: camel.into(),
        group: String::new(),
        hint: String::new(),
        inputs: vec![InputDescriptor {
            name: "inReal".into(),
            kind: InputKind::Real,
        }],
        opt_inputs: opts.iter().map(|d| period_opt(d)).collect(),
        outputs: vec![real_output()],
    }
}

/// One price input, one integer-range optional input per display name, one real output.
pub fn price_function(name: &str, camel: &str, opts: &[&str]) -> FunctionDescriptor {
    FunctionDescriptor {
        inputs: vec![InputDescriptor {
            name: "inPriceHLC".into(),
            kind: InputKind::Price,
        }],
        ..real_function(name, camel, opts)
    }
}

/// A function exercising every kind: two real inputs, all three optional
/// kinds, a real and an integer output.
pub fn every_kind_function() -> FunctionDescriptor {
    FunctionDescriptor {
        name: "MIXED".into(),
        camel_case_name: "Mixed".into(),
        group: "Test".into(),
        hint: String::new(),
        inputs: vec![
            InputDescriptor {
                name: "inReal0".into(),
                kind: InputKind::Real,
            },
            InputDescriptor {
                name: "inReal1".into(),
                kind: InputKind::Real,
            },
        ],
        opt_inputs: vec![
            period_opt("Time Period"),
            OptInputDescriptor {
                name: "optInNbDev".into(),
                display_name: "Deviations".into(),
                default_value: 2.0,
                kind: OptInputKind::RealRange {
                    suggested_start: -2.0,
                    suggested_end: 2.0,
                },
            },
            OptInputDescriptor {
                name: "optInMAType".into(),
                display_name: "MA Type".into(),
                default_value: 0.0,
                kind: OptInputKind::IntegerList {
                    values: vec![
                        EnumPair {
                            label: "SMA".into(),
                            value: 0,
                        },
                        EnumPair {
                            label: "EMA".into(),
                            value: 1,
                        },
                        EnumPair {
                            label: "WMA".into(),
                            value: 2,
                        },
                    ],
                },
            },
        ],
        outputs: vec![
            real_output(),
            OutputDescriptor {
                name: "outInteger".into(),
                kind: OutputKind::Integer,
            },
        ],
    }
}
