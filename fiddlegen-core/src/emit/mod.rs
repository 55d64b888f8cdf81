//! Source emitters for the five generated artifacts.
//!
//! Every emitter writes plain Rust source into an `io::Write` sink. The files
//! are mounted as sibling modules named after their file stems and reference
//! each other through `super::`. Headers use `//` comments only, so each file
//! can be pulled in with `include!`.

use std::io::{self, Write};

use crate::fingerprint::CatalogFingerprint;

pub mod contract;
pub mod registry;
pub mod stats;
pub mod wrapper;

pub const BINDINGS_FILE: &str = "bindings.rs";
pub const FUNCTION_ARRAY_FILE: &str = "function_array.rs";
pub const TIME_PERIOD_ARRAY_FILE: &str = "time_period_array.rs";
pub const CONTRACT_FILE: &str = "ta_function.rs";
pub const STATS_FILE: &str = "ta_stats.rs";

/// One of the generated files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Artifact {
    Bindings,
    FunctionArray,
    TimePeriodArray,
    Contract,
    Stats,
}

impl Artifact {
    /// Every artifact, in emission order.
    pub const ALL: [Artifact; 5] = [
        Artifact::Bindings,
        Artifact::FunctionArray,
        Artifact::TimePeriodArray,
        Artifact::Contract,
        Artifact::Stats,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Artifact::Bindings => BINDINGS_FILE,
            Artifact::FunctionArray => FUNCTION_ARRAY_FILE,
            Artifact::TimePeriodArray => TIME_PERIOD_ARRAY_FILE,
            Artifact::Contract => CONTRACT_FILE,
            Artifact::Stats => STATS_FILE,
        }
    }
}

/// Settings shared by all emitters for one run.
#[derive(Debug, Clone, Copy)]
pub struct EmitContext<'a> {
    /// Path the generated code imports the runtime crate under.
    pub runtime_crate: &'a str,
    pub fingerprint: &'a CatalogFingerprint,
}

/// `// @generated` header naming the artifact and the catalog fingerprint.
pub fn write_header(out: &mut impl Write, ctx: &EmitContext<'_>, what: &str) -> io::Result<()> {
    writeln!(
        out,
        "// @generated by fiddlegen {}. Do not edit by hand.",
        env!("CARGO_PKG_VERSION")
    )?;
    writeln!(out, "// {what}")?;
    writeln!(out, "// catalog fingerprint: {}", ctx.fingerprint)?;
    writeln!(out)
}

/// Body of a Rust string literal.
pub(crate) fn escape_str(s: &str) -> String {
    s.chars().flat_map(char::escape_default).collect()
}

/// Body of a Rust format-string literal (braces doubled).
pub(crate) fn escape_fmt(s: &str) -> String {
    escape_str(s).replace('{', "{{").replace('}', "}}")
}

/// Single-line text safe for a `///` comment.
pub(crate) fn doc_text(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A float literal that reads back as the same `f64`.
pub(crate) fn f64_literal(v: f64) -> String {
    let s = format!("{v:?}");
    if s.contains(&['.', 'e', 'E'][..]) {
        s
    } else {
        format!("{s}.0")
    }
}
