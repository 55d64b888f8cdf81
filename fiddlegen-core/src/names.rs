//! Rust identifiers derived from catalog camel-case names.

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "static", "struct", "super", "trait", "true", "try", "type", "typeof",
    "union", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Wrapper struct name: `HtDcPeriod` → `HtDcPeriodWrapper`.
pub fn wrapper_type_name(camel: &str) -> String {
    let mut name: String = camel.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert_str(0, "Fn");
    }
    let mut chars = name.chars();
    let head = chars.next().map(|c| c.to_ascii_uppercase());
    head.into_iter().chain(chars).chain("Wrapper".chars()).collect()
}

/// Factory function name: `Cdl3BlackCrows` → `cdl3_black_crows`.
pub fn factory_name(camel: &str) -> String {
    let mut name = snake_case(camel);
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert_str(0, "fn_");
    }
    if KEYWORDS.contains(&name.as_str()) {
        name.push('_');
    }
    name
}

fn snake_case(camel: &str) -> String {
    let chars: Vec<char> = camel.chars().collect();
    let mut out = String::with_capacity(camel.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            continue;
        }
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            let boundary = prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower);
            if boundary && !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
        }
        out.push(c.to_ascii_lowercase());
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapper_names() {
        assert_eq!(wrapper_type_name("Sma"), "SmaWrapper");
        assert_eq!(wrapper_type_name("htDcPeriod"), "HtDcPeriodWrapper");
        assert_eq!(wrapper_type_name("3Crows"), "Fn3CrowsWrapper");
        assert_eq!(wrapper_type_name("Ht_Sine"), "HtSineWrapper");
    }

    #[test]
    fn factory_names() {
        assert_eq!(factory_name("Sma"), "sma");
        assert_eq!(factory_name("AdOsc"), "ad_osc");
        assert_eq!(factory_name("HtDcPeriod"), "ht_dc_period");
        assert_eq!(factory_name("Cdl3BlackCrows"), "cdl3_black_crows");
        assert_eq!(factory_name("CdlXSideGap3Methods"), "cdl_x_side_gap3_methods");
        assert_eq!(factory_name("MinMaxIndex"), "min_max_index");
        assert_eq!(factory_name("Log10"), "log10");
        assert_eq!(factory_name("MACDExt"), "macd_ext");
    }

    #[test]
    fn factory_names_avoid_keywords_and_digits() {
        assert_eq!(factory_name("Mod"), "mod_");
        assert_eq!(factory_name("Type"), "type_");
        assert_eq!(factory_name("3Crows"), "fn_3_crows");
    }
}
