/*!
The five RIPE split dumps and where to read them from.

A [DatasetSource] is the only way the build reaches the outside world: [RemoteSource] downloads
the dumps into a cache directory, [LocalSource] reads an existing directory of dumps, and
[MemorySource] serves text held in memory.
*/
use crate::error::InetStatsError;
use crate::io::{download_cached, get_reader};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::io::{BufRead, Cursor};
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://ftp.ripe.net/ripe/dbase/split/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Organisation,
    Inetnum,
    Inet6num,
    Route,
    Route6,
}

impl Dataset {
    /// All datasets, in build order.
    pub const ALL: [Dataset; 5] = [
        Dataset::Organisation,
        Dataset::Inetnum,
        Dataset::Inet6num,
        Dataset::Route,
        Dataset::Route6,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Dataset::Organisation => "organisation",
            Dataset::Inetnum => "inetnum",
            Dataset::Inet6num => "inet6num",
            Dataset::Route => "route",
            Dataset::Route6 => "route6",
        }
    }

    /// Name of the compressed dump, e.g. `ripe.db.inetnum.gz`.
    pub fn file_name(&self) -> String {
        format!("ripe.db.{}.gz", self.name())
    }
}

impl Display for Dataset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Provides the decompressed content of a dataset.
pub trait DatasetSource: Sync {
    fn open(&self, dataset: Dataset) -> Result<Box<dyn BufRead + Send>, InetStatsError>;
}

/// Downloads dumps from `base_url` into `cache_dir`, reusing cached files unless
/// `force_reload` is set.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    pub base_url: String,
    pub cache_dir: PathBuf,
    pub force_reload: bool,
}

impl RemoteSource {
    pub fn new(base_url: &str, cache_dir: impl Into<PathBuf>) -> RemoteSource {
        RemoteSource {
            base_url: base_url.to_string(),
            cache_dir: cache_dir.into(),
            force_reload: false,
        }
    }

    pub fn force_reload(self) -> RemoteSource {
        RemoteSource {
            force_reload: true,
            ..self
        }
    }

    pub fn url(&self, dataset: Dataset) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            dataset.file_name()
        )
    }

    pub fn cache_path(&self, dataset: Dataset) -> PathBuf {
        self.cache_dir.join(dataset.file_name())
    }
}

impl DatasetSource for RemoteSource {
    fn open(&self, dataset: Dataset) -> Result<Box<dyn BufRead + Send>, InetStatsError> {
        let local_path = self.cache_path(dataset);
        download_cached(&self.url(dataset), &local_path, self.force_reload)?;
        get_reader(&local_path.to_string_lossy())
    }
}

/// Reads dumps from a local directory, either compressed (`ripe.db.route.gz`) or not
/// (`ripe.db.route`).
#[derive(Debug, Clone)]
pub struct LocalSource {
    pub dir: PathBuf,
}

impl LocalSource {
    pub fn new(dir: impl Into<PathBuf>) -> LocalSource {
        LocalSource { dir: dir.into() }
    }
}

impl DatasetSource for LocalSource {
    fn open(&self, dataset: Dataset) -> Result<Box<dyn BufRead + Send>, InetStatsError> {
        let compressed = self.dir.join(dataset.file_name());
        let path = if compressed.exists() {
            compressed
        } else {
            self.dir.join(format!("ripe.db.{}", dataset.name()))
        };
        get_reader(&path.to_string_lossy())
    }
}

/// Serves datasets from memory. Datasets that were never inserted read as empty.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    data: HashMap<Dataset, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> MemorySource {
        MemorySource::default()
    }

    pub fn with(mut self, dataset: Dataset, content: impl Into<Vec<u8>>) -> MemorySource {
        self.insert(dataset, content);
        self
    }

    pub fn insert(&mut self, dataset: Dataset, content: impl Into<Vec<u8>>) {
        self.data.insert(dataset, content.into());
    }
}

impl DatasetSource for MemorySource {
    fn open(&self, dataset: Dataset) -> Result<Box<dyn BufRead + Send>, InetStatsError> {
        let content = self.data.get(&dataset).cloned().unwrap_or_default();
        Ok(Box::new(Cursor::new(content)))
    }
}
