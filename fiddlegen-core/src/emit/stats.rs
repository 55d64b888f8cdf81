//! Catalog statistics and their emission as constants.

use std::io::{self, Write};

use serde::Serialize;

use crate::classify::ClassifiedFunction;

use super::{write_header, EmitContext};

/// Maxima and counts over the eligible functions of one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    /// Largest optional-input count.
    pub max_fiddle_values: usize,
    /// Largest output count.
    pub max_output_values: usize,
    /// Entries in the direct-function registry.
    pub num_functions: usize,
    /// Entries in the time-period registry.
    pub num_time_period_functions: usize,
}

impl CatalogStats {
    pub fn compute(functions: &[ClassifiedFunction]) -> Self {
        functions.iter().fold(Self::default(), |mut stats, f| {
            let d = &f.descriptor;
            stats.max_fiddle_values = stats.max_fiddle_values.max(d.num_opt_inputs());
            stats.max_output_values = stats.max_output_values.max(d.num_outputs());
            if f.in_function_array() {
                stats.num_functions += 1;
            }
            if f.in_time_period_array() {
                stats.num_time_period_functions += 1;
            }
            stats
        })
    }
}

pub fn write_stats(
    out: &mut impl Write,
    ctx: &EmitContext<'_>,
    stats: &CatalogStats,
) -> io::Result<()> {
    write_header(out, ctx, "Catalog statistics.")?;
    writeln!(out, "/// Largest number of fiddle values of any wrapper.")?;
    writeln!(out, "pub const MAX_FIDDLE_VALUES: usize = {};", stats.max_fiddle_values)?;
    writeln!(out, "/// Largest number of outputs of any wrapper.")?;
    writeln!(out, "pub const MAX_OUTPUT_VALUES: usize = {};", stats.max_output_values)?;
    writeln!(out, "/// Length of `FUNCTION_ARRAY`.")?;
    writeln!(out, "pub const NUM_FUNCTIONS: usize = {};", stats.num_functions)?;
    writeln!(out, "/// Length of `TIME_PERIOD_FUNCTION_ARRAY`.")?;
    writeln!(
        out,
        "pub const NUM_TIME_PERIOD_FUNCTIONS: usize = {};",
        stats.num_time_period_functions
    )
}
