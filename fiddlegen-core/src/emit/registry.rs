//! Registry emission: ordered arrays of wrapper factories.

use std::io::{self, Write};

use crate::classify::ClassifiedFunction;

use super::{write_header, EmitContext};

/// Which of the two registries a file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registry {
    /// Price-tuple functions.
    Function,
    /// Real-input functions with a period parameter.
    TimePeriod,
}

impl Registry {
    pub fn static_name(self) -> &'static str {
        match self {
            Registry::Function => "FUNCTION_ARRAY",
            Registry::TimePeriod => "TIME_PERIOD_FUNCTION_ARRAY",
        }
    }

    fn doc(self) -> &'static str {
        match self {
            Registry::Function => "Factories for functions driven purely by a price tuple.",
            Registry::TimePeriod => {
                "Factories for real-input functions with a period parameter."
            }
        }
    }
}

/// Write one registry; `entries` must already be filtered and in catalog order.
pub fn write_registry<'f>(
    out: &mut impl Write,
    ctx: &EmitContext<'_>,
    registry: Registry,
    entries: impl IntoIterator<Item = &'f ClassifiedFunction>,
) -> io::Result<()> {
    write_header(out, ctx, registry.doc())?;
    writeln!(out, "use super::ta_function::TaFunction;")?;
    writeln!(out)?;
    writeln!(out, "/// {} Catalog order.", registry.doc())?;
    writeln!(
        out,
        "pub static {}: &[fn() -> Box<dyn TaFunction>] = &[",
        registry.static_name()
    )?;
    for f in entries {
        writeln!(out, "    super::bindings::{},", f.factory)?;
    }
    writeln!(out, "];")
}
