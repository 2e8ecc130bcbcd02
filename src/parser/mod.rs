/*!
Record parsing and the dataset stages that fold records into a [MaintainerRegistry].

Each stage implements [RecordProcessor] and keeps the state of the object currently being read
in a [BlockState]. Objects have no explicit terminator; a block ends when the next block-start
attribute (`org-name`, `inetnum`, `route`, ...) is seen or the stream ends.
*/
pub mod inetnum;
pub mod organisation;
pub mod record;
pub mod route;
pub mod utils;

pub use inetnum::AddressAggregator;
pub use organisation::OrganisationBuilder;
pub use record::{Record, RecordReader};
pub use route::RouteAggregator;

use crate::error::InetStatsError;
use crate::registry::MaintainerRegistry;

/// Per-object state of a stage.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum BlockState<T> {
    /// No block-start attribute seen yet.
    #[default]
    Outside,
    /// The current block started with a malformed value; its attributes are ignored.
    Skipped,
    /// The current block is valid.
    Open(T),
}

/// Counters reported by a stage after it consumed its dataset.
#[derive(Debug, Default)]
pub struct StageStats {
    /// Records (lines with a colon) seen.
    pub records: u64,
    /// Block-start records seen.
    pub blocks: u64,
    /// `mnt-by` records that updated a maintainer.
    pub credited: u64,
    /// Malformed block-start values plus `mnt-by` records outside a valid block.
    pub skipped: u64,
    /// Dataset-quality problems that did not abort the stage.
    pub warnings: Vec<InetStatsError>,
}

/// A consumer of one dataset's record stream.
pub trait RecordProcessor {
    fn process(
        &mut self,
        registry: &mut MaintainerRegistry,
        record: &Record,
    ) -> Result<(), InetStatsError>;

    /// Called once after the last record, to close the block still open.
    fn finish(self, registry: &mut MaintainerRegistry) -> StageStats;
}

/// Feeds a whole record stream through `processor`.
///
/// Stops at the first error; the registry may then hold a partial result and should be
/// discarded by the caller.
pub fn run_stage<P, I>(
    mut processor: P,
    records: I,
    registry: &mut MaintainerRegistry,
) -> Result<StageStats, InetStatsError>
where
    P: RecordProcessor,
    I: IntoIterator<Item = Result<Record, InetStatsError>>,
{
    for record in records {
        processor.process(registry, &record?)?;
    }
    Ok(processor.finish(registry))
}
