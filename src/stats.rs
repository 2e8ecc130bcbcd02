/*!
[InetStats] keeps a registry in sync with its snapshot file: it restores the snapshot when one
is usable, and builds (and saves) a new one otherwise.
*/
use crate::build::build_registry;
use crate::config::InetStatsConfig;
use crate::dataset::{Dataset, DatasetSource};
use crate::error::InetStatsError;
use crate::models::{Maintainer, Organisation};
use crate::parser::StageStats;
use crate::registry::MaintainerRegistry;
use crate::snapshot::Snapshot;
use log::error;

pub struct InetStats {
    config: InetStatsConfig,
    registry: MaintainerRegistry,
}

impl InetStats {
    /// Starts with an empty registry; call one of the rebuild methods to fill it.
    pub fn new(config: InetStatsConfig) -> InetStats {
        InetStats {
            config,
            registry: MaintainerRegistry::new(),
        }
    }

    /// Restores the configured snapshot, downloading the dumps and building it if needed.
    ///
    /// A missing snapshot is built from the cached dumps; an unusable one is rebuilt after
    /// downloading every dump again.
    pub fn load(config: InetStatsConfig) -> Result<InetStats, InetStatsError> {
        let cached = config.remote_source();
        let reloading = config.remote_source().force_reload();
        InetStats::load_with_sources(config, &cached, &reloading)
    }

    /// Like [InetStats::load], reading dumps from `source` whenever a build is needed.
    pub fn load_with_source<S>(
        config: InetStatsConfig,
        source: &S,
    ) -> Result<InetStats, InetStatsError>
    where
        S: DatasetSource + ?Sized,
    {
        InetStats::load_with_sources(config, source, source)
    }

    /// Restores the configured snapshot. A missing snapshot is built from `build_source`. A
    /// snapshot from another schema version, or one that cannot be decoded, is rebuilt from
    /// `update_source`. I/O errors while reading the snapshot are returned.
    pub fn load_with_sources<B, U>(
        config: InetStatsConfig,
        build_source: &B,
        update_source: &U,
    ) -> Result<InetStats, InetStatsError>
    where
        B: DatasetSource + ?Sized,
        U: DatasetSource + ?Sized,
    {
        let mut stats = InetStats::new(config);
        if !stats.config.snapshot_path.exists() {
            stats.rebuild_from(build_source)?;
            return Ok(stats);
        }
        match Snapshot::load(&stats.config.snapshot_path) {
            Ok(snapshot) => stats.registry = snapshot.maintainers,
            Err(e) if e.is_incompatible_snapshot() => {
                error!(
                    "unusable snapshot {}: {}; updating",
                    stats.config.snapshot_path.display(),
                    e
                );
                stats.rebuild_from(update_source)?;
            }
            Err(e) => return Err(e),
        }
        Ok(stats)
    }

    /// Builds from the (possibly cached) dumps and replaces the snapshot.
    pub fn rebuild(&mut self) -> Result<Vec<(Dataset, StageStats)>, InetStatsError> {
        let source = self.config.remote_source();
        self.rebuild_from(&source)
    }

    /// Downloads all dumps again, then rebuilds.
    pub fn update(&mut self) -> Result<Vec<(Dataset, StageStats)>, InetStatsError> {
        let source = self.config.remote_source().force_reload();
        self.rebuild_from(&source)
    }

    /// Builds from `source` and replaces the snapshot. The current registry is kept if the
    /// build or the save fails.
    pub fn rebuild_from<S>(
        &mut self,
        source: &S,
    ) -> Result<Vec<(Dataset, StageStats)>, InetStatsError>
    where
        S: DatasetSource + ?Sized,
    {
        let report = build_registry(source, &self.config.build)?;
        let snapshot = Snapshot::new(report.registry);
        snapshot.save(&self.config.snapshot_path)?;
        self.registry = snapshot.maintainers;
        Ok(report.stages)
    }

    pub fn config(&self) -> &InetStatsConfig {
        &self.config
    }

    pub fn registry(&self) -> &MaintainerRegistry {
        &self.registry
    }

    pub fn into_registry(self) -> MaintainerRegistry {
        self.registry
    }

    pub fn maintainers(&self) -> impl Iterator<Item = &Maintainer> {
        self.registry.maintainers()
    }

    pub fn organisations(&self) -> impl Iterator<Item = &Organisation> {
        self.registry.organisations()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::MemorySource;

    fn config(dir: &std::path::Path) -> InetStatsConfig {
        InetStatsConfig::default()
            .with_cache_dir(dir)
            .with_snapshot_path(dir.join("inetstats.json.gz"))
    }

    fn source(org: &str) -> MemorySource {
        MemorySource::new().with(
            Dataset::Organisation,
            format!("org-name: {}\norg-type: LIR\nmnt-by: EX-MNT\n", org),
        )
    }

    #[test]
    fn test_builds_when_snapshot_missing() {
        let dir = tempfile::tempdir().unwrap();
        let stats = InetStats::load_with_source(config(dir.path()), &source("First")).unwrap();
        assert_eq!(stats.organisations().next().unwrap().name, "First");
        assert!(stats.config().snapshot_path.exists());
    }

    #[test]
    fn test_prefers_existing_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        InetStats::load_with_source(config(dir.path()), &source("First")).unwrap();

        // the second source is never read because the snapshot is usable
        let stats = InetStats::load_with_source(config(dir.path()), &source("Second")).unwrap();
        assert_eq!(stats.organisations().next().unwrap().name, "First");
    }

    #[test]
    fn test_rebuilds_incompatible_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path()).with_snapshot_path(dir.path().join("old.json"));
        std::fs::write(
            &config.snapshot_path,
            r#"{"version": 0, "maintainers": {}}"#,
        )
        .unwrap();

        let stats = InetStats::load_with_source(config.clone(), &source("Fresh")).unwrap();
        assert_eq!(stats.maintainers().count(), 1);

        let snapshot = Snapshot::load(&config.snapshot_path).unwrap();
        assert_eq!(&snapshot.maintainers, stats.registry());
    }

    #[test]
    fn test_incompatible_snapshot_uses_update_source() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path()).with_snapshot_path(dir.path().join("inetstats.json"));

        let stats =
            InetStats::load_with_sources(config.clone(), &source("Cached"), &source("Updated"))
                .unwrap();
        assert_eq!(stats.organisations().next().unwrap().name, "Cached");

        std::fs::write(&config.snapshot_path, b"not a snapshot").unwrap();
        let stats =
            InetStats::load_with_sources(config.clone(), &source("Cached"), &source("Updated"))
                .unwrap();
        assert_eq!(stats.organisations().next().unwrap().name, "Updated");
    }

    #[test]
    fn test_failed_rebuild_keeps_registry() {
        let dir = tempfile::tempdir().unwrap();
        let mut stats = InetStats::load_with_source(config(dir.path()), &source("First")).unwrap();

        let mut strict = config(dir.path());
        strict.build = strict.build.strict_org_types();
        stats.config = strict;
        let bad = MemorySource::new().with(
            Dataset::Organisation,
            "org-name: Second\norg-type: BOGUS\nmnt-by: EX-MNT\n",
        );
        assert!(stats.rebuild_from(&bad).is_err());
        assert_eq!(stats.organisations().next().unwrap().name, "First");
    }
}
