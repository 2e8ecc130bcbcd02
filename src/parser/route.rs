/*!
Accumulates routed address totals from the `route` and `route6` datasets.
*/
use crate::error::InetStatsError;
use crate::models::Afi;
use crate::parser::utils::prefix_size;
use crate::parser::{BlockState, Record, RecordProcessor, StageStats};
use crate::registry::MaintainerRegistry;
use log::debug;
use num_bigint::BigUint;

/// Stage for a route dataset. A `route: 192.0.2.0/24` object credits 2^(32-24) addresses
/// to each of its `mnt-by` maintainers.
pub struct RouteAggregator {
    afi: Afi,
    block: BlockState<BigUint>,
    stats: StageStats,
}

impl RouteAggregator {
    pub fn new(afi: Afi) -> RouteAggregator {
        RouteAggregator {
            afi,
            block: BlockState::Outside,
            stats: StageStats::default(),
        }
    }
}

impl RecordProcessor for RouteAggregator {
    fn process(
        &mut self,
        registry: &mut MaintainerRegistry,
        record: &Record,
    ) -> Result<(), InetStatsError> {
        self.stats.records += 1;
        match record.attr.as_str() {
            "route" | "route6" => {
                self.stats.blocks += 1;
                self.block = match prefix_size(self.afi, &record.value) {
                    Some(size) => BlockState::Open(size),
                    None => {
                        debug!("skipping malformed {} prefix {}", self.afi, record.value);
                        self.stats.skipped += 1;
                        BlockState::Skipped
                    }
                };
            }
            "mnt-by" => match &self.block {
                BlockState::Open(size) => {
                    registry
                        .get_or_create(&record.value)
                        .add_routes(self.afi, size);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{run_stage, RecordReader};

    fn aggregate(registry: &mut MaintainerRegistry, afi: Afi, text: &str) -> StageStats {
        run_stage(
            RouteAggregator::new(afi),
            RecordReader::new(text.as_bytes()),
            registry,
        )
        .unwrap()
    }

    #[test]
    fn test_ipv4_routes() {
        let text = "\
route: 192.0.2.0/24
descr: Example
origin: AS64496
mnt-by: EX-MNT

route: 198.51.100.0/23
origin: AS64496
mnt-by: ex-mnt
";
        let mut registry = MaintainerRegistry::new();
        let stats = aggregate(&mut registry, Afi::Ipv4, text);
        let mnt = registry.get("EX-MNT").unwrap();
        assert_eq!(mnt.ipv4_routes, BigUint::from(256u32 + 512));
        assert_eq!(mnt.ipv6_routes, BigUint::default());
        assert_eq!(stats.blocks, 2);
        assert_eq!(stats.credited, 2);
    }

    #[test]
    fn test_ipv6_routes() {
        let text = "\
route6: 2001:db8::/32
origin: AS64496
mnt-by: EX-MNT
";
        let mut registry = MaintainerRegistry::new();
        aggregate(&mut registry, Afi::Ipv6, text);
        assert_eq!(
            registry.get("EX-MNT").unwrap().ipv6_routes,
            BigUint::from(1u8) << 96u32
        );
    }

    #[test]
    fn test_malformed_prefix_is_noop() {
        let text = "\
route: 192.0.2.0/24
mnt-by: OTHER-MNT
route: 192.0.2.0
mnt-by: EX-MNT
route: 192.0.2.0/xx
mnt-by: EX-MNT
";
        let mut registry = MaintainerRegistry::new();
        let stats = aggregate(&mut registry, Afi::Ipv4, text);
        assert!(registry.get("EX-MNT").is_none());
        assert_eq!(
            registry.get("OTHER-MNT").unwrap().ipv4_routes,
            BigUint::from(256u32)
        );
        assert_eq!(stats.skipped, 4);
    }

    #[test]
    fn test_maintainer_before_first_route() {
        let mut registry = MaintainerRegistry::new();
        let stats = aggregate(&mut registry, Afi::Ipv4, "mnt-by: EX-MNT\n");
        assert!(registry.is_empty());
        assert_eq!(stats.skipped, 1);
    }

    #[test]
    fn test_repeated_maintainer_double_counts() {
        let text = "route: 192.0.2.0/24\nmnt-by: EX-MNT\nmnt-by: EX-MNT\n";
        let mut registry = MaintainerRegistry::new();
        aggregate(&mut registry, Afi::Ipv4, text);
        assert_eq!(
            registry.get("EX-MNT").unwrap().ipv4_routes,
            BigUint::from(512u32)
        );
    }
}
