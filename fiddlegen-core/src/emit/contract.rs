//! The `TaFunction` trait every generated wrapper implements.

use std::io::{self, Write};

use super::{write_header, EmitContext};

const CONTRACT: &str = r#"/// Common interface over every generated indicator wrapper.
///
/// Callers feed input series, tune the optional parameters through normalized
/// "fiddle values" and run the native computation. A wrapper owns native
/// parameter state and is meant for a single owner: it is not `Send` and must
/// not be shared across threads.
///
/// Misuse (an out-of-range index, mismatched input lengths, a fiddle vector of
/// the wrong size) is a programming error and panics with the function name.
pub trait TaFunction {
    /// Allocate native parameter state, clear every buffer and reseed the
    /// fiddle values from the catalog defaults. Factories call this once.
    fn init(&mut self);

    fn num_inputs(&self) -> usize;

    /// Store a real-array input and register it with the native call. A price
    /// tuple index is ignored here; use `set_price_input_data`.
    fn set_input_data(&mut self, index: usize, data: &[f64]);

    /// Store the six OHLCV(+OI) series in slots 0..6 and register them as the
    /// price-tuple input. No-op for functions without one.
    fn set_price_input_data(
        &mut self,
        open: &[f64],
        high: &[f64],
        low: &[f64],
        close: &[f64],
        volume: &[f64],
        open_interest: &[f64],
    );

    fn num_fiddle_values(&self) -> usize;

    /// Current raw values of the optional parameters, in catalog order.
    fn fiddle_values(&self) -> &[f64];

    /// Map a normalized `in_value` in [0, 1] onto the parameter's valid domain.
    fn fix_fiddle_value(&self, fiddle_value_index: usize, in_value: f64) -> f64;

    /// Replace every fiddle value at once; `values.len()` must equal
    /// `num_fiddle_values()`.
    fn set_fiddle_values(&mut self, values: &[f64]);

    fn num_output_values(&self) -> usize;

    /// Run over the whole input range and return the valid elements of output
    /// `out_index` as `f64`.
    fn go(&mut self, out_index: usize) -> Vec<f64>;

    /// Size every period parameter to the input length, run, and return the
    /// first element of the output, or 0.0 when it is missing or not finite.
    /// Always 0.0 for functions without a period parameter.
    fn go_single(&mut self, output_index: usize) -> f64;
}
"#;

pub fn write_contract(out: &mut impl Write, ctx: &EmitContext<'_>) -> io::Result<()> {
    write_header(out, ctx, "Contract shared by every generated wrapper.")?;
    out.write_all(CONTRACT.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::CatalogFingerprint;

    #[test]
    fn contract_lists_every_operation() {
        let fp = CatalogFingerprint("0".into());
        let ctx = EmitContext {
            runtime_crate: "fiddlegen_runtime",
            fingerprint: &fp,
        };
        let mut out = Vec::new();
        write_contract(&mut out, &ctx).unwrap();
        let text = String::from_utf8(out).unwrap();
        for op in [
            "fn init(&mut self);",
            "fn num_inputs(&self) -> usize;",
            "fn set_input_data(&mut self, index: usize, data: &[f64]);",
            "fn set_price_input_data(",
            "fn num_fiddle_values(&self) -> usize;",
            "fn fiddle_values(&self) -> &[f64];",
            "fn fix_fiddle_value(&self, fiddle_value_index: usize, in_value: f64) -> f64;",
            "fn set_fiddle_values(&mut self, values: &[f64]);",
            "fn num_output_values(&self) -> usize;",
            "fn go(&mut self, out_index: usize) -> Vec<f64>;",
            "fn go_single(&mut self, output_index: usize) -> f64;",
        ] {
            assert!(text.contains(op), "missing {op}");
        }
    }

    #[test]
    fn go_single_doc_describes_element_zero() {
        assert!(CONTRACT.contains("first element of the output, or 0.0 when it is missing or not finite"));
        assert!(!CONTRACT.contains("first finite value"));
    }
}
