use crate::dataset::{RemoteSource, DEFAULT_BASE_URL};
use std::path::PathBuf;

/// Options of a single build pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildConfig {
    /// Abort the build on an unknown `org-type` instead of collecting a warning.
    pub strict_org_types: bool,
    /// Process the datasets on separate threads and merge the results.
    pub parallel: bool,
}

impl BuildConfig {
    pub fn strict_org_types(self) -> BuildConfig {
        BuildConfig {
            strict_org_types: true,
            ..self
        }
    }

    pub fn parallel(self) -> BuildConfig {
        BuildConfig {
            parallel: true,
            ..self
        }
    }
}

/// Where dumps come from and where the built model is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InetStatsConfig {
    pub base_url: String,
    pub cache_dir: PathBuf,
    pub snapshot_path: PathBuf,
    /// Download the dumps again even if cached copies exist.
    pub force_reload: bool,
    pub build: BuildConfig,
}

impl Default for InetStatsConfig {
    fn default() -> Self {
        let tmp = std::env::temp_dir();
        InetStatsConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            snapshot_path: tmp.join("inetstats.json.gz"),
            cache_dir: tmp,
            force_reload: false,
            build: BuildConfig::default(),
        }
    }
}

impl InetStatsConfig {
    pub fn with_base_url(self, base_url: &str) -> InetStatsConfig {
        InetStatsConfig {
            base_url: base_url.to_string(),
            ..self
        }
    }

    pub fn with_cache_dir(self, cache_dir: impl Into<PathBuf>) -> InetStatsConfig {
        InetStatsConfig {
            cache_dir: cache_dir.into(),
            ..self
        }
    }

    pub fn with_snapshot_path(self, snapshot_path: impl Into<PathBuf>) -> InetStatsConfig {
        InetStatsConfig {
            snapshot_path: snapshot_path.into(),
            ..self
        }
    }

    pub fn with_build(self, build: BuildConfig) -> InetStatsConfig {
        InetStatsConfig { build, ..self }
    }

    pub fn force_reload(self) -> InetStatsConfig {
        InetStatsConfig {
            force_reload: true,
            ..self
        }
    }

    pub fn remote_source(&self) -> RemoteSource {
        RemoteSource {
            base_url: self.base_url.clone(),
            cache_dir: self.cache_dir.clone(),
            force_reload: self.force_reload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = InetStatsConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.cache_dir, std::env::temp_dir());
        assert_eq!(
            config.snapshot_path,
            std::env::temp_dir().join("inetstats.json.gz")
        );
        assert!(!config.force_reload);
        assert_eq!(config.build, BuildConfig::default());
    }

    #[test]
    fn test_builders() {
        let config = InetStatsConfig::default()
            .with_base_url("https://example.net/dumps")
            .with_cache_dir("/var/cache/inetstats")
            .with_snapshot_path("/var/lib/inetstats.json")
            .with_build(BuildConfig::default().strict_org_types().parallel())
            .force_reload();

        assert!(config.build.strict_org_types);
        assert!(config.build.parallel);

        let source = config.remote_source();
        assert_eq!(source.base_url, "https://example.net/dumps");
        assert_eq!(source.cache_dir, PathBuf::from("/var/cache/inetstats"));
        assert!(source.force_reload);
    }
}
