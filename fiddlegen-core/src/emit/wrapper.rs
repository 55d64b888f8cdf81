//! Per-function wrapper emission for `bindings.rs`.
//!
//! Each eligible function produces one block: a wrapper struct, its
//! `TaFunction` impl, a zero-argument factory and a separator line.

use std::io::{self, Write};

use fiddlegen_runtime::PRICE_SLOTS;

use crate::classify::ClassifiedFunction;
use crate::descriptor::{InputKind, OptInputKind, OutputKind};

use super::{doc_text, escape_fmt, escape_str, f64_literal, write_header, EmitContext};

const SEPARATOR: &str =
    "// -----------------------------------------------------------------------------";

/// Header and imports at the top of `bindings.rs`.
pub fn write_preamble(out: &mut impl Write, ctx: &EmitContext<'_>) -> io::Result<()> {
    write_header(out, ctx, "Indicator wrappers, one per eligible catalog function.")?;
    writeln!(out, "use std::collections::HashMap;")?;
    writeln!(out)?;
    writeln!(out, "use super::ta_function::TaFunction;")?;
    writeln!(out, "use {} as rt;", ctx.runtime_crate)?;
    writeln!(out)
}

/// The full block for one function.
pub fn write_wrapper(out: &mut impl Write, f: &ClassifiedFunction) -> io::Result<()> {
    write_struct(out, f)?;
    writeln!(out)?;
    writeln!(out, "impl TaFunction for {} {{", f.wrapper_type)?;
    write_init(out, f)?;
    writeln!(out)?;
    write_num_inputs(out, f)?;
    writeln!(out)?;
    write_set_input_data(out, f)?;
    writeln!(out)?;
    write_set_price_input_data(out, f)?;
    writeln!(out)?;
    write_fiddle_accessors(out, f)?;
    writeln!(out)?;
    write_fix_fiddle_value(out, f)?;
    writeln!(out)?;
    write_num_output_values(out, f)?;
    writeln!(out)?;
    write_go(out, f)?;
    writeln!(out)?;
    write_go_single(out, f)?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    write_factory(out, f)?;
    writeln!(out)?;
    writeln!(out, "{SEPARATOR}")?;
    writeln!(out)
}

fn write_struct(out: &mut impl Write, f: &ClassifiedFunction) -> io::Result<()> {
    let d = &f.descriptor;
    let hint = doc_text(&d.hint);
    if hint.is_empty() {
        writeln!(out, "/// `{}` wrapper.", d.name)?;
    } else {
        writeln!(out, "/// {hint} (`{}`).", d.name)?;
    }
    if !d.group.is_empty() {
        writeln!(out, "///")?;
        writeln!(out, "/// Group: {}.", doc_text(&d.group))?;
    }
    writeln!(out, "#[allow(dead_code)]")?;
    writeln!(out, "pub struct {} {{", f.wrapper_type)?;
    writeln!(out, "    params: rt::ParamHolder,")?;
    writeln!(out, "    real_input_by_index: HashMap<usize, Vec<f64>>,")?;
    writeln!(out, "    integer_output_by_index: HashMap<usize, Vec<i32>>,")?;
    writeln!(out, "    real_output_by_index: HashMap<usize, Vec<f64>>,")?;
    writeln!(out, "    fiddle_values: Vec<f64>,")?;
    writeln!(out, "}}")
}

fn default_fiddle_values(f: &ClassifiedFunction) -> String {
    let opts = &f.descriptor.opt_inputs;
    if opts.is_empty() {
        return "Vec::new()".to_string();
    }
    let values: Vec<String> = opts.iter().map(|o| f64_literal(o.default_value)).collect();
    format!("vec![{}]", values.join(", "))
}

fn write_init(out: &mut impl Write, f: &ClassifiedFunction) -> io::Result<()> {
    writeln!(out, "    fn init(&mut self) {{")?;
    writeln!(out, "        self.params.alloc();")?;
    writeln!(out, "        self.real_input_by_index = HashMap::new();")?;
    writeln!(out, "        self.real_output_by_index = HashMap::new();")?;
    writeln!(out, "        self.integer_output_by_index = HashMap::new();")?;
    writeln!(out, "        self.fiddle_values = {};", default_fiddle_values(f))?;
    writeln!(out, "    }}")
}

fn write_num_inputs(out: &mut impl Write, f: &ClassifiedFunction) -> io::Result<()> {
    writeln!(out, "    fn num_inputs(&self) -> usize {{")?;
    writeln!(out, "        {}", f.descriptor.num_inputs())?;
    writeln!(out, "    }}")
}

fn write_set_input_data(out: &mut impl Write, f: &ClassifiedFunction) -> io::Result<()> {
    let d = &f.descriptor;
    let name = escape_fmt(&d.name);
    let data = if f.time_period { "data" } else { "_data" };
    writeln!(out, "    fn set_input_data(&mut self, index: usize, {data}: &[f64]) {{")?;
    writeln!(out, "        match index {{")?;
    for (i, input) in d.inputs.iter().enumerate() {
        match input.kind {
            InputKind::Real => {
                writeln!(out, "            {i} => {{")?;
                writeln!(out, "                self.real_input_by_index.insert({i}, data.to_vec());")?;
                writeln!(out, "                self.params.set_input_real({i}, data);")?;
                writeln!(out, "            }}")?;
            }
            InputKind::Price => {
                writeln!(out, "            // price tuple: set through set_price_input_data")?;
                writeln!(out, "            {i} => {{}}")?;
            }
        }
    }
    writeln!(
        out,
        "            _ => panic!(\"{name}: set_input_data: invalid input index {{index}} (function has {} inputs)\"),",
        d.num_inputs()
    )?;
    writeln!(out, "        }}")?;
    writeln!(out, "    }}")
}

fn write_set_price_input_data(out: &mut impl Write, f: &ClassifiedFunction) -> io::Result<()> {
    let price_index = f.descriptor.price_input_index();
    let prefix = if price_index.is_some() { "" } else { "_" };
    writeln!(out, "    fn set_price_input_data(")?;
    writeln!(out, "        &mut self,")?;
    for (param, _) in PRICE_SLOTS {
        writeln!(out, "        {prefix}{param}: &[f64],")?;
    }
    match price_index {
        None => writeln!(out, "    ) {{")?,
        Some(index) => {
            writeln!(out, "    ) {{")?;
            for (param, slot) in PRICE_SLOTS {
                writeln!(
                    out,
                    "        self.real_input_by_index.insert({slot}, {param}.to_vec());"
                )?;
            }
            writeln!(out, "        self.params.set_input_price(")?;
            writeln!(out, "            {index},")?;
            writeln!(out, "            rt::PriceInput {{")?;
            for (param, _) in PRICE_SLOTS {
                writeln!(out, "                {param},")?;
            }
            writeln!(out, "            }},")?;
            writeln!(out, "        );")?;
        }
    }
    writeln!(out, "    }}")
}

fn write_fiddle_accessors(out: &mut impl Write, f: &ClassifiedFunction) -> io::Result<()> {
    let name = escape_fmt(&f.descriptor.name);
    let count = f.descriptor.num_opt_inputs();
    writeln!(out, "    fn num_fiddle_values(&self) -> usize {{")?;
    writeln!(out, "        {count}")?;
    writeln!(out, "    }}")?;
    writeln!(out)?;
    writeln!(out, "    fn fiddle_values(&self) -> &[f64] {{")?;
    writeln!(out, "        &self.fiddle_values")?;
    writeln!(out, "    }}")?;
    writeln!(out)?;
    writeln!(out, "    fn set_fiddle_values(&mut self, values: &[f64]) {{")?;
    writeln!(out, "        if values.len() != {count} {{")?;
    writeln!(
        out,
        "            panic!(\"{name}: set_fiddle_values: expected {count} fiddle values, got {{}}\", values.len());"
    )?;
    writeln!(out, "        }}")?;
    writeln!(out, "        self.fiddle_values = values.to_vec();")?;
    writeln!(out, "    }}")
}

fn fix_expression(kind: &OptInputKind) -> String {
    match kind {
        OptInputKind::IntegerRange {
            suggested_start,
            suggested_end,
        } => format!("rt::fiddle::integer_range({suggested_start}, {suggested_end}, in_value)"),
        OptInputKind::RealRange {
            suggested_start,
            suggested_end,
        } => format!(
            "rt::fiddle::real_range({}, {}, in_value)",
            f64_literal(*suggested_start),
            f64_literal(*suggested_end)
        ),
        OptInputKind::IntegerList { values } => {
            let values: Vec<String> = values.iter().map(|pair| pair.value.to_string()).collect();
            format!("rt::fiddle::integer_list(&[{}], in_value)", values.join(", "))
        }
    }
}

fn write_fix_fiddle_value(out: &mut impl Write, f: &ClassifiedFunction) -> io::Result<()> {
    let d = &f.descriptor;
    let name = escape_fmt(&d.name);
    let in_value = if d.opt_inputs.is_empty() { "_in_value" } else { "in_value" };
    writeln!(
        out,
        "    fn fix_fiddle_value(&self, fiddle_value_index: usize, {in_value}: f64) -> f64 {{"
    )?;
    writeln!(out, "        match fiddle_value_index {{")?;
    for (i, opt) in d.opt_inputs.iter().enumerate() {
        writeln!(out, "            // {}", doc_text(&opt.display_name))?;
        writeln!(out, "            {i} => {},", fix_expression(&opt.kind))?;
    }
    writeln!(
        out,
        "            _ => panic!(\"{name}: fix_fiddle_value: invalid fiddle value index {{fiddle_value_index}} (function has {} fiddle values)\"),",
        d.num_opt_inputs()
    )?;
    writeln!(out, "        }}")?;
    writeln!(out, "    }}")
}

fn write_num_output_values(out: &mut impl Write, f: &ClassifiedFunction) -> io::Result<()> {
    writeln!(out, "    fn num_output_values(&self) -> usize {{")?;
    writeln!(out, "        {}", f.descriptor.num_outputs())?;
    writeln!(out, "    }}")
}

/// Input slots whose lengths must agree before a compute call.
pub fn checked_input_slots(f: &ClassifiedFunction) -> usize {
    let d = &f.descriptor;
    match d.price_input_index() {
        Some(_) => d.num_inputs().max(PRICE_SLOTS.len()),
        None => d.num_inputs(),
    }
}

fn write_go(out: &mut impl Write, f: &ClassifiedFunction) -> io::Result<()> {
    let d = &f.descriptor;
    let name = escape_fmt(&d.name);
    writeln!(out, "    fn go(&mut self, out_index: usize) -> Vec<f64> {{")?;

    let slots = checked_input_slots(f);
    if slots > 1 {
        writeln!(out, "        for i in 1..{slots} {{")?;
        writeln!(out, "            let previous_index = i - 1;")?;
        writeln!(
            out,
            "            let previous = self.real_input_by_index.get(&previous_index).map_or(0, Vec::len);"
        )?;
        writeln!(
            out,
            "            let current = self.real_input_by_index.get(&i).map_or(0, Vec::len);"
        )?;
        writeln!(out, "            if current != previous {{")?;
        writeln!(
            out,
            "                panic!(\"{name}: go: input data has different lengths (input {{previous_index}} has {{previous}} elements, input {{i}} has {{current}} elements)\");"
        )?;
        writeln!(out, "            }}")?;
        writeln!(out, "        }}")?;
        writeln!(out)?;
    }

    writeln!(
        out,
        "        let input_len = self.real_input_by_index.get(&0).map_or(0, Vec::len);"
    )?;
    writeln!(out, "        if input_len == 0 {{")?;
    writeln!(out, "            panic!(\"{name}: go: no input data set\");")?;
    writeln!(out, "        }}")?;
    writeln!(out, "        let start_index: usize = 0;")?;
    writeln!(out, "        let end_index = input_len - 1;")?;
    writeln!(out, "        let size = end_index - start_index + 1;")?;

    if !d.opt_inputs.is_empty() {
        writeln!(out)?;
        for (i, opt) in d.opt_inputs.iter().enumerate() {
            if opt.kind.is_integer() {
                writeln!(
                    out,
                    "        self.params.set_opt_input_integer({i}, self.fiddle_values[{i}] as i32);"
                )?;
            } else {
                writeln!(
                    out,
                    "        self.params.set_opt_input_real({i}, self.fiddle_values[{i}]);"
                )?;
            }
        }
    }

    writeln!(out)?;
    for (i, output) in d.outputs.iter().enumerate() {
        match output.kind {
            OutputKind::Real => {
                writeln!(out, "        let mut real_output_{i} = vec![0.0_f64; size];")?
            }
            OutputKind::Integer => {
                writeln!(out, "        let mut integer_output_{i} = vec![0_i32; size];")?
            }
        }
    }
    writeln!(out, "        let result = self.params.call_function(")?;
    writeln!(out, "            start_index,")?;
    writeln!(out, "            end_index,")?;
    writeln!(out, "            &mut [")?;
    for (i, output) in d.outputs.iter().enumerate() {
        match output.kind {
            OutputKind::Real => {
                writeln!(out, "                rt::OutputBuffer::Real(&mut real_output_{i}),")?
            }
            OutputKind::Integer => writeln!(
                out,
                "                rt::OutputBuffer::Integer(&mut integer_output_{i}),"
            )?,
        }
    }
    writeln!(out, "            ],")?;
    writeln!(out, "        );")?;
    for (i, output) in d.outputs.iter().enumerate() {
        match output.kind {
            OutputKind::Real => writeln!(
                out,
                "        self.real_output_by_index.insert({i}, real_output_{i});"
            )?,
            OutputKind::Integer => writeln!(
                out,
                "        self.integer_output_by_index.insert({i}, integer_output_{i});"
            )?,
        }
    }
    writeln!(out, "        let num_elements = result.out_nb_element;")?;
    writeln!(out)?;

    writeln!(out, "        match out_index {{")?;
    for (i, output) in d.outputs.iter().enumerate() {
        match output.kind {
            OutputKind::Real => writeln!(
                out,
                "            {i} => self.real_output_by_index[&{i}][..num_elements].to_vec(),"
            )?,
            OutputKind::Integer => {
                writeln!(out, "            {i} => self.integer_output_by_index[&{i}][..num_elements]")?;
                writeln!(out, "                .iter()")?;
                writeln!(out, "                .map(|&value| f64::from(value))")?;
                writeln!(out, "                .collect(),")?;
            }
        }
    }
    writeln!(
        out,
        "            _ => panic!(\"{name}: go: invalid output index {{out_index}} (function has {} outputs)\"),",
        d.num_outputs()
    )?;
    writeln!(out, "        }}")?;
    writeln!(out, "    }}")
}

fn write_go_single(out: &mut impl Write, f: &ClassifiedFunction) -> io::Result<()> {
    if !f.in_time_period_array() {
        writeln!(out, "    fn go_single(&mut self, _output_index: usize) -> f64 {{")?;
        writeln!(out, "        0.0")?;
        return writeln!(out, "    }}");
    }
    writeln!(out, "    fn go_single(&mut self, output_index: usize) -> f64 {{")?;
    writeln!(
        out,
        "        let input_len = self.real_input_by_index.get(&0).map_or(0, Vec::len) as f64;"
    )?;
    for i in &f.period_indexes {
        writeln!(out, "        self.fiddle_values[{i}] = input_len;")?;
    }
    writeln!(out, "        rt::first_or_zero(&self.go(output_index))")?;
    writeln!(out, "    }}")
}

fn write_factory(out: &mut impl Write, f: &ClassifiedFunction) -> io::Result<()> {
    let name = escape_str(&f.descriptor.name);
    writeln!(out, "/// New `{}` wrapper bound to the active native library.", f.descriptor.name)?;
    writeln!(out, "pub fn {}() -> Box<dyn TaFunction> {{", f.factory)?;
    writeln!(out, "    let mut ret = {} {{", f.wrapper_type)?;
    writeln!(out, "        params: rt::ParamHolder::new(rt::function_handle(\"{name}\")),")?;
    writeln!(out, "        real_input_by_index: HashMap::new(),")?;
    writeln!(out, "        integer_output_by_index: HashMap::new(),")?;
    writeln!(out, "        real_output_by_index: HashMap::new(),")?;
    writeln!(out, "        fiddle_values: Vec::new(),")?;
    writeln!(out, "    }};")?;
    writeln!(out, "    ret.init();")?;
    writeln!(out, "    Box::new(ret)")?;
    writeln!(out, "}}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ClassifiedFunction;
    use crate::test_support::{every_kind_function, price_function, real_function};

    fn render(f: &ClassifiedFunction) -> String {
        let mut out = Vec::new();
        write_wrapper(&mut out, f).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn fix_fiddle_value_dispatches_per_kind() {
        let f = ClassifiedFunction::classify(every_kind_function(), "Period");
        let text = render(&f);
        assert!(text.contains("0 => rt::fiddle::integer_range(2, 30, in_value),"));
        assert!(text.contains("1 => rt::fiddle::real_range(-2.0, 2.0, in_value),"));
        assert!(text.contains("2 => rt::fiddle::integer_list(&[0, 1, 2], in_value),"));
        assert!(text.contains("self.fiddle_values = vec![14.0, 2.0, 0.0];"));
    }

    #[test]
    fn go_sets_opt_inputs_by_kind_and_allocates_outputs() {
        let f = ClassifiedFunction::classify(every_kind_function(), "Period");
        let text = render(&f);
        assert!(text.contains("self.params.set_opt_input_integer(0, self.fiddle_values[0] as i32);"));
        assert!(text.contains("self.params.set_opt_input_real(1, self.fiddle_values[1]);"));
        assert!(text.contains("self.params.set_opt_input_integer(2, self.fiddle_values[2] as i32);"));
        assert!(text.contains("let mut real_output_0 = vec![0.0_f64; size];"));
        assert!(text.contains("let mut integer_output_1 = vec![0_i32; size];"));
        assert!(text.contains("for i in 1..2 {"));
        assert!(text.contains(".map(|&value| f64::from(value))"));
    }

    #[test]
    fn go_single_overwrites_period_inputs_only() {
        let f = ClassifiedFunction::classify(every_kind_function(), "Period");
        let text = render(&f);
        assert!(text.contains("self.fiddle_values[0] = input_len;"));
        assert!(!text.contains("self.fiddle_values[1] = input_len;"));
        assert!(text.contains("rt::first_or_zero(&self.go(output_index))"));
    }

    #[test]
    fn go_single_is_a_stub_without_period_input() {
        let f = ClassifiedFunction::classify(real_function("ADD", "Add", &[]), "Period");
        let text = render(&f);
        assert!(text.contains("fn go_single(&mut self, _output_index: usize) -> f64 {\n        0.0\n    }"));
        assert!(text.contains("fn fix_fiddle_value(&self, fiddle_value_index: usize, _in_value: f64)"));
        assert!(text.contains("self.fiddle_values = Vec::new();"));
        // a single input has nothing to compare against
        assert!(!text.contains("different lengths"));
    }

    #[test]
    fn price_function_copies_six_slots_in_order() {
        let f = ClassifiedFunction::classify(price_function("ATR", "Atr", &["Time Period"]), "Period");
        let text = render(&f);

        let order: Vec<usize> = PRICE_SLOTS
            .iter()
            .map(|(param, slot)| {
                text.find(&format!("self.real_input_by_index.insert({slot}, {param}.to_vec());"))
                    .unwrap()
            })
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
        assert!(text.contains("self.params.set_input_price(\n            0,"));
        assert!(text.contains("for i in 1..6 {"));
        assert!(text.contains(
            "(input {previous_index} has {previous} elements, input {i} has {current} elements)"
        ));
        assert!(text.contains("fn set_input_data(&mut self, index: usize, _data: &[f64])"));
        // direct functions never auto-size periods
        assert!(text.contains("fn go_single(&mut self, _output_index: usize) -> f64"));
    }

    #[test]
    fn real_function_ignores_price_tuple() {
        let f = ClassifiedFunction::classify(real_function("SMA", "Sma", &["Time Period"]), "Period");
        let text = render(&f);
        assert!(text.contains("        _open: &[f64],"));
        assert!(text.contains("        _open_interest: &[f64],\n    ) {\n    }"));
        assert!(!text.contains("set_input_price"));
    }

    #[test]
    fn factory_and_struct_use_derived_names() {
        let mut d = real_function("SMA", "Sma", &["Time Period"]);
        d.hint = "Simple Moving Average".into();
        d.group = "Overlap Studies".into();
        let f = ClassifiedFunction::classify(d, "Period");
        let text = render(&f);
        assert!(text.starts_with("/// Simple Moving Average (`SMA`).\n///\n/// Group: Overlap Studies.\n"));
        assert!(text.contains("pub struct SmaWrapper {"));
        assert!(text.contains("impl TaFunction for SmaWrapper {"));
        assert!(text.contains("pub fn sma() -> Box<dyn TaFunction> {"));
        assert!(text.contains("rt::ParamHolder::new(rt::function_handle(\"SMA\"))"));
        assert!(text.trim_end().ends_with(SEPARATOR));
    }

    #[test]
    fn panics_name_the_function() {
        let f = ClassifiedFunction::classify(real_function("SMA", "Sma", &["Time Period"]), "Period");
        let text = render(&f);
        assert!(text.contains("panic!(\"SMA: go: invalid output index {out_index} (function has 1 outputs)\")"));
        assert!(text.contains("panic!(\"SMA: set_input_data: invalid input index {index} (function has 1 inputs)\")"));
        assert!(text.contains("panic!(\"SMA: fix_fiddle_value: invalid fiddle value index"));
    }
}
