/*!
Accumulates per-country address counts from the `inetnum` and `inet6num` datasets.
*/
use crate::error::InetStatsError;
use crate::models::Afi;
use crate::parser::utils::range_size;
use crate::parser::{BlockState, Record, RecordProcessor, StageStats};
use crate::registry::MaintainerRegistry;
use log::debug;
use num_bigint::BigUint;

#[derive(Debug, Clone, PartialEq, Eq)]
struct AddressBlock {
    size: BigUint,
    country: String,
}

/// Stage for an address-block dataset.
///
/// Every `mnt-by` of a block credits the block size to that maintainer, under the most recent
/// `country` of the block (empty string if none). A `mnt-by` repeated within one block credits
/// the block again. Blocks whose range cannot be parsed credit nothing.
pub struct AddressAggregator {
    afi: Afi,
    block: BlockState<AddressBlock>,
    stats: StageStats,
}

impl AddressAggregator {
    pub fn new(afi: Afi) -> AddressAggregator {
        AddressAggregator {
            afi,
            block: BlockState::Outside,
            stats: StageStats::default(),
        }
    }
}

impl RecordProcessor for AddressAggregator {
    fn process(
        &mut self,
        registry: &mut MaintainerRegistry,
        record: &Record,
    ) -> Result<(), InetStatsError> {
        self.stats.records += 1;
        match record.attr.as_str() {
            "inetnum" | "inet6num" => {
                self.stats.blocks += 1;
                self.block = match range_size(self.afi, &record.value) {
                    Some(size) => BlockState::Open(AddressBlock {
                        size,
                        country: String::new(),
                    }),
                    None => {
                        debug!("skipping malformed {} range {}", self.afi, record.value);
                        self.stats.skipped += 1;
                        BlockState::Skipped
                    }
                };
            }
            "country" => {
                if let BlockState::Open(block) = &mut self.block {
                    block.country = record.value.clone();
                }
            }
            "mnt-by" => match &self.block {
                BlockState::Open(block) => {
                    registry.get_or_create(&record.value).add_addresses(
                        self.afi,
                        &block.country,
                        &block.size,
                    );
                    self.stats.credited += 1;
                }
                _ => {
                    self.stats.skipped += 1;
                }
            },
            _ => {}
        }
        Ok(())
    }

    fn finish(self, _registry: &mut MaintainerRegistry) -> StageStats {
        self.stats
    }
}
