//! Catalog fingerprinting: deterministic identification of a classified catalog.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classify::ClassifiedFunction;

/// BLAKE3 hash of the canonical JSON of the classified function list.
///
/// Written into every artifact header so consumers can tell which catalog a
/// set of bindings came from. Same catalog + same configuration, same hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogFingerprint(pub String);

impl CatalogFingerprint {
    pub fn of(functions: &[ClassifiedFunction]) -> Self {
        // Serializing plain structs and Vecs cannot fail.
        let json = serde_json::to_vec(functions).unwrap_or_default();
        Self(blake3::hash(&json).to_hex().to_string())
    }

    /// First 16 hex characters, for log lines.
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(16)]
    }
}

impl fmt::Display for CatalogFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{price_function, real_function};

    fn classified() -> Vec<ClassifiedFunction> {
        vec![
            ClassifiedFunction::classify(real_function("SMA", "Sma", &["Time Period"]), "Period"),
            ClassifiedFunction::classify(price_function("ATR", "Atr", &["Time Period"]), "Period"),
        ]
    }

    #[test]
    fn deterministic() {
        assert_eq!(
            CatalogFingerprint::of(&classified()),
            CatalogFingerprint::of(&classified())
        );
        assert_eq!(CatalogFingerprint::of(&classified()).0.len(), 64);
    }

    #[test]
    fn sensitive_to_ranges_and_order() {
        let base = CatalogFingerprint::of(&classified());

        let mut changed = classified();
        changed[0].descriptor.opt_inputs[0].default_value = 15.0;
        assert_ne!(base, CatalogFingerprint::of(&changed));

        let mut reordered = classified();
        reordered.reverse();
        assert_ne!(base, CatalogFingerprint::of(&reordered));
    }

    #[test]
    fn short_form() {
        let fp = CatalogFingerprint::of(&classified());
        assert_eq!(fp.short().len(), 16);
        assert!(fp.0.starts_with(fp.short()));
    }
}
