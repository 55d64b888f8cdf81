//! The catalog walk: groups → functions → ban-list → descriptor → classify.
//!
//! One walk produces the ordered list of eligible functions that every
//! emitter and the statistics pass consume.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::catalog::{CatalogError, MetadataAccessor};
use crate::classify::ClassifiedFunction;
use crate::config::CatalogConfig;

/// Everything one walk over the catalog found.
#[derive(Debug, Clone, Default)]
pub struct CatalogWalk {
    /// Eligible functions in catalog order (group order, then function order).
    pub functions: Vec<ClassifiedFunction>,
    /// Names skipped because they are on the ban-list.
    pub banned: Vec<String>,
    /// Names skipped because they fit neither registry.
    pub ineligible: Vec<String>,
    /// Names skipped because a restriction list was configured.
    pub deselected: Vec<String>,
}

impl CatalogWalk {
    pub fn function_array(&self) -> impl Iterator<Item = &ClassifiedFunction> {
        self.functions.iter().filter(|f| f.in_function_array())
    }

    pub fn time_period_array(&self) -> impl Iterator<Item = &ClassifiedFunction> {
        self.functions.iter().filter(|f| f.in_time_period_array())
    }
}

/// Walk the whole catalog once.
pub fn walk_catalog(
    accessor: &MetadataAccessor<'_>,
    config: &CatalogConfig,
) -> Result<CatalogWalk, CatalogError> {
    let mut walk = CatalogWalk::default();
    let mut idents: HashMap<String, String> = HashMap::new();

    for group in accessor.list_groups() {
        for name in accessor.list_functions(&group) {
            if config.is_banned(&name) {
                warn!(function = %name, "skipping banned function");
                walk.banned.push(name);
                continue;
            }
            if !config.is_selected(&name) {
                walk.deselected.push(name);
                continue;
            }

            let handle = accessor.resolve_handle(&name)?;
            let descriptor = accessor.describe(&handle)?;
            let classified = ClassifiedFunction::classify(descriptor, &config.period_marker);

            if !classified.is_eligible() {
                debug!(function = %name, "function fits neither registry");
                walk.ineligible.push(name);
                continue;
            }

            for ident in [&classified.factory, &classified.wrapper_type] {
                if let Some(first) = idents.insert(ident.clone(), name.clone()) {
                    return Err(CatalogError::DuplicateIdentifier {
                        ident: ident.clone(),
                        first,
                        second: name,
                    });
                }
            }

            debug!(
                function = %name,
                group = %group,
                direct = classified.direct,
                time_period = classified.time_period,
                "classified function"
            );
            walk.functions.push(classified);
        }
    }

    Ok(walk)
}
