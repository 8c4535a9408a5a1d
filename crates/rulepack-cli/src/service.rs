use crate::config::{Config, ResolvedPaths};
use anyhow::{Context, Result};
use rulepack_fs::{FileSystem, LocalFileSystem};
use rulepack_loader::{DocumentExtension, ModeLoader, RuleLoader};
use rulepack_writer::{OutputPaths, OutputWriter, WriteReport};
use std::sync::Arc;
use tracing::{info, warn};

/// Aggregation service - loads both input directories and writes the artifacts
pub struct AggregateService {
    config: Config,
}

impl AggregateService {
    /// Create a new aggregation service
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run one aggregation pass against the local disk
    pub async fn run(&self) -> Result<WriteReport> {
        let paths = self.config.resolve()?;
        self.run_with(Arc::new(LocalFileSystem::new()), &paths).await
    }

    /// Run one aggregation pass against any filesystem
    pub async fn run_with(
        &self,
        fs: Arc<dyn FileSystem>,
        paths: &ResolvedPaths,
    ) -> Result<WriteReport> {
        info!("Aggregating project at {:?}", paths.root);

        let extension = DocumentExtension::new(&self.config.loader.extension);
        let mode_loader = ModeLoader::new(Arc::clone(&fs))?.with_extension(extension.clone());
        let rule_loader = RuleLoader::new(Arc::clone(&fs)).with_extension(extension);

        // The loaders share nothing, so both directories are read at once
        let (modes, rules) = tokio::join!(
            mode_loader.load(&paths.modes_dir),
            rule_loader.load(&paths.rules_dir)
        );
        let modes = modes.context("Failed to load modes")?;
        let rules = rules.context("Failed to load rules")?;

        let writer = OutputWriter::new(
            fs,
            OutputPaths {
                modes: paths.modes_output.clone(),
                rules: paths.rules_output.clone(),
            },
            &paths.root,
        )
        .with_sorted_modes(self.config.loader.sort_modes);

        let report = writer
            .write(modes, &rules)
            .await
            .context("Failed to write outputs")?;

        if report.duplicate_slugs > 0 {
            warn!(
                "{} mode slug(s) are defined more than once",
                report.duplicate_slugs
            );
        }

        info!(
            "Aggregation complete: {} modes, {} rule documents -> {:?}, {:?}",
            report.modes,
            report.rules,
            writer.paths().modes,
            writer.paths().rules
        );

        Ok(report)
    }
}
