//! The generation pipeline: walk, fingerprint, emit, commit.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, info_span};

use crate::catalog::{Catalog, CatalogError, MetadataAccessor};
use crate::config::{ConfigError, GeneratorConfig};
use crate::emit::contract::write_contract;
use crate::emit::registry::{write_registry, Registry};
use crate::emit::stats::{write_stats, CatalogStats};
use crate::emit::wrapper::{write_preamble, write_wrapper};
use crate::emit::{Artifact, EmitContext};
use crate::fingerprint::CatalogFingerprint;
use crate::sink::{ArtifactSinks, SinkError};
use crate::walk::{walk_catalog, CatalogWalk};

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] SinkError),
}

/// What a run produced.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub out_dir: PathBuf,
    pub files: Vec<PathBuf>,
    pub fingerprint: CatalogFingerprint,
    pub stats: CatalogStats,
    /// Wrappers emitted into `bindings.rs`.
    pub wrappers: usize,
    pub banned: Vec<String>,
    pub ineligible: Vec<String>,
    pub deselected: Vec<String>,
}

/// A walk plus everything derived from it, ready to emit.
#[derive(Debug, Clone)]
pub struct Plan {
    pub walk: CatalogWalk,
    pub fingerprint: CatalogFingerprint,
    pub stats: CatalogStats,
}

impl Plan {
    pub fn new(walk: CatalogWalk) -> Self {
        let fingerprint = CatalogFingerprint::of(&walk.functions);
        let stats = CatalogStats::compute(&walk.functions);
        Self {
            walk,
            fingerprint,
            stats,
        }
    }

    /// Walk `catalog` with the catalog section of `config`.
    pub fn build(catalog: &dyn Catalog, config: &GeneratorConfig) -> Result<Self, GenerateError> {
        config.validate()?;
        let walk = walk_catalog(&MetadataAccessor::new(catalog), &config.catalog)?;
        Ok(Self::new(walk))
    }

    /// Write one artifact.
    pub fn emit(
        &self,
        artifact: Artifact,
        out: &mut impl Write,
        runtime_crate: &str,
    ) -> io::Result<()> {
        let ctx = EmitContext {
            runtime_crate,
            fingerprint: &self.fingerprint,
        };
        match artifact {
            Artifact::Bindings => {
                write_preamble(out, &ctx)?;
                for f in &self.walk.functions {
                    debug!(function = %f.name(), wrapper = %f.wrapper_type, "emitting wrapper");
                    write_wrapper(out, f)?;
                }
                Ok(())
            }
            Artifact::FunctionArray => {
                write_registry(out, &ctx, Registry::Function, self.walk.function_array())
            }
            Artifact::TimePeriodArray => {
                write_registry(out, &ctx, Registry::TimePeriod, self.walk.time_period_array())
            }
            Artifact::Contract => write_contract(out, &ctx),
            Artifact::Stats => write_stats(out, &ctx, &self.stats),
        }
    }

    /// Every artifact rendered in memory, in emission order.
    pub fn render(&self, runtime_crate: &str) -> io::Result<Vec<(Artifact, String)>> {
        Artifact::ALL
            .into_iter()
            .map(|artifact| {
                let mut out = Vec::new();
                self.emit(artifact, &mut out, runtime_crate)?;
                let text = String::from_utf8(out)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
                Ok((artifact, text))
            })
            .collect()
    }
}

/// Full run: walk the catalog and write all five artifacts into
/// `config.output.dir`.
///
/// Every artifact is written and synced to a temporary file before any target
/// is replaced, and each replacement is an atomic rename of that one file.
pub fn generate(
    catalog: &dyn Catalog,
    config: &GeneratorConfig,
) -> Result<GenerationReport, GenerateError> {
    let out_dir = config.output.dir.clone();
    let span = info_span!("generate", out_dir = %out_dir.display());
    let _guard = span.enter();

    let plan = Plan::build(catalog, config)?;

    fs::create_dir_all(&out_dir).map_err(|e| SinkError::new(&out_dir, e))?;
    let mut sinks = ArtifactSinks::open(&out_dir)?;
    for (artifact, sink) in sinks.iter_mut() {
        plan.emit(artifact, sink, &config.output.runtime_crate)
            .map_err(|e| SinkError::new(sink.target(), e))?;
    }
    let files = sinks.commit_all()?;

    let report = GenerationReport {
        out_dir,
        files,
        fingerprint: plan.fingerprint.clone(),
        stats: plan.stats,
        wrappers: plan.walk.functions.len(),
        banned: plan.walk.banned.clone(),
        ineligible: plan.walk.ineligible.clone(),
        deselected: plan.walk.deselected.clone(),
    };

    info!(
        wrappers = report.wrappers,
        direct = report.stats.num_functions,
        time_period = report.stats.num_time_period_functions,
        banned = report.banned.len(),
        ineligible = report.ineligible.len(),
        fingerprint = %report.fingerprint.short(),
        "generation complete"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogDump;
    use crate::test_support::{price_function, real_function};

    fn dump() -> CatalogDump {
        let mut dump = CatalogDump::default();
        dump.push("Overlap Studies", real_function("SMA", "Sma", &["Time Period"]));
        dump.push("Volatility", price_function("ATR", "Atr", &["Time Period"]));
        dump
    }

    #[test]
    fn generate_writes_every_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = GeneratorConfig::default();
        config.output.dir = dir.path().join("out");

        let report = generate(&dump(), &config).unwrap();
        assert_eq!(report.files.len(), 5);
        assert_eq!(report.wrappers, 2);
        for artifact in Artifact::ALL {
            let path = config.output.dir.join(artifact.file_name());
            let text = fs::read_to_string(&path).unwrap();
            assert!(text.contains(&report.fingerprint.0));
            assert!(!config.output.dir.join(format!("{}.tmp", artifact.file_name())).exists());
        }
    }

    #[test]
    fn invalid_config_is_rejected_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = GeneratorConfig::default();
        config.output.dir = dir.path().join("out");
        config.catalog.period_marker.clear();

        let err = generate(&dump(), &config).unwrap_err();
        assert!(matches!(err, GenerateError::Config(_)));
        assert!(!config.output.dir.exists());
    }

    #[test]
    fn render_follows_emission_order() {
        let plan = Plan::build(&dump(), &GeneratorConfig::default()).unwrap();
        let rendered = plan.render("fiddlegen_runtime").unwrap();
        let order: Vec<Artifact> = rendered.iter().map(|(a, _)| *a).collect();
        assert_eq!(order, Artifact::ALL.to_vec());
        assert!(rendered[0].1.contains("use fiddlegen_runtime as rt;"));
    }
}
