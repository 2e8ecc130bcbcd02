/*!
Builds [Organisation]s from the `organisation` dataset and links them to their maintainers.
*/
use crate::error::InetStatsError;
use crate::models::{normalize_name, OrgType, Organisation};
use crate::parser::{BlockState, Record, RecordProcessor, StageStats};
use crate::registry::MaintainerRegistry;
use log::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
struct OrgBlock {
    org: Organisation,
    /// Normalized `mnt-by` values, one entry per line.
    maintainers: Vec<String>,
}

/// Stage for the `organisation` dataset.
///
/// An organisation is attached to its maintainers when its object ends, so `org-type` and
/// `mnt-by` may come in either order. An `org-type` outside [OrgType] is an
/// [InetStatsError::UnknownOrgType]: with `strict` it aborts the stage, otherwise it is
/// collected in [StageStats::warnings] and the organisation keeps an unset type.
pub struct OrganisationBuilder {
    strict: bool,
    block: BlockState<OrgBlock>,
    stats: StageStats,
}

impl OrganisationBuilder {
    pub fn new(strict: bool) -> OrganisationBuilder {
        OrganisationBuilder {
            strict,
            block: BlockState::Outside,
            stats: StageStats::default(),
        }
    }

    fn close_block(&mut self, registry: &mut MaintainerRegistry) {
        if let BlockState::Open(block) = std::mem::replace(&mut self.block, BlockState::Outside)
        {
            for name in &block.maintainers {
                registry
                    .get_or_create(name)
                    .organisations
                    .push(block.org.clone());
            }
        }
    }
}

impl RecordProcessor for OrganisationBuilder {
    fn process(
        &mut self,
        registry: &mut MaintainerRegistry,
        record: &Record,
    ) -> Result<(), InetStatsError> {
        self.stats.records += 1;
        match record.attr.as_str() {
            "org-name" => {
                self.close_block(registry);
                self.stats.blocks += 1;
                self.block = BlockState::Open(OrgBlock {
                    org: Organisation::new(record.value.as_str()),
                    maintainers: vec![],
                });
            }
            "org-type" => {
                let BlockState::Open(block) = &mut self.block else {
                    debug!("org-type {} outside of an organisation", record.value);
                    return Ok(());
                };
                if block.org.org_type.is_some() {
                    return Ok(());
                }
                match OrgType::from_rpsl(&record.value) {
                    Some(org_type) => block.org.org_type = Some(org_type),
                    None => {
                        let err = InetStatsError::UnknownOrgType {
                            org_name: block.org.name.clone(),
                            value: record.value.clone(),
                        };
                        if self.strict {
                            return Err(err);
                        }
                        warn!("{}", err);
                        self.stats.warnings.push(err);
                    }
                }
            }
            "mnt-by" => match &mut self.block {
                BlockState::Open(block) => {
                    block.maintainers.push(normalize_name(&record.value));
                    self.stats.credited += 1;
                }
                _ => {
                    debug!("mnt-by {} outside of an organisation", record.value);
                    self.stats.skipped += 1;
                }
            },
            _ => {}
        }
        Ok(())
    }

    fn finish(mut self, registry: &mut MaintainerRegistry) -> StageStats {
        self.close_block(registry);
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{run_stage, RecordReader};

    fn build(text: &str, strict: bool) -> Result<(MaintainerRegistry, StageStats), InetStatsError> {
        let mut registry = MaintainerRegistry::new();
        let stats = run_stage(
            OrganisationBuilder::new(strict),
            RecordReader::new(text.as_bytes()),
            &mut registry,
        )?;
        Ok((registry, stats))
    }

    #[test]
    fn test_two_organisations_one_maintainer() {
        let text = "\
org-name: Example Corp
org-type: LIR
mnt-by: EX-MNT

org-name: Other
org-type: OTHER
mnt-by: EX-MNT
";
        let (registry, stats) = build(text, false).unwrap();
        assert_eq!(registry.len(), 1);
        let mnt = registry.get("EX-MNT").unwrap();
        assert_eq!(
            mnt.organisations,
            vec![
                Organisation {
                    name: "Example Corp".to_string(),
                    org_type: Some(OrgType::Lir),
                },
                Organisation {
                    name: "Other".to_string(),
                    org_type: Some(OrgType::Other),
                },
            ]
        );
        assert_eq!(stats.blocks, 2);
        assert_eq!(stats.credited, 2);
        assert!(stats.warnings.is_empty());
    }

    #[test]
    fn test_type_after_maintainer() {
        let text = "\
org-name: Example Corp
mnt-by: ex-mnt
org-type: lir
";
        let (registry, _) = build(text, false).unwrap();
        let org = &registry.get("EX-MNT").unwrap().organisations[0];
        assert_eq!(org.org_type, Some(OrgType::Lir));
    }

    #[test]
    fn test_multiple_maintainers() {
        let text = "\
org-name: Example Corp
org-type: LIR
mnt-by: RIPE-NCC-HM-MNT
mnt-by: EX-MNT
mnt-by: ex-mnt
";
        let (registry, stats) = build(text, false).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("EX-MNT").unwrap().organisations.len(), 2);
        assert_eq!(
            registry.get("RIPE-NCC-HM-MNT").unwrap().organisations[0].name,
            "Example Corp"
        );
        assert_eq!(stats.credited, 3);
        assert_eq!(registry.organisations().count(), 3);
    }

    #[test]
    fn test_records_before_first_organisation() {
        let text = "\
org-type: LIR
mnt-by: EX-MNT
org-name: Example Corp
mnt-by: OTHER-MNT
";
        let (registry, stats) = build(text, false).unwrap();
        assert!(registry.get("EX-MNT").is_none());
        assert_eq!(registry.get("OTHER-MNT").unwrap().organisations.len(), 1);
        assert_eq!(stats.skipped, 1);
    }

    #[test]
    fn test_missing_type_stays_unset() {
        let (registry, _) = build("org-name: Example Corp\nmnt-by: EX-MNT\n", false).unwrap();
        assert_eq!(registry.get("EX-MNT").unwrap().organisations[0].org_type, None);
    }

    #[test]
    fn test_organisation_without_maintainer() {
        let (registry, stats) = build("org-name: Orphan\norg-type: OTHER\n", false).unwrap();
        assert!(registry.is_empty());
        assert_eq!(stats.blocks, 1);
    }

    #[test]
    fn test_unknown_type_lenient() {
        let text = "\
org-name: Example Corp
org-type: SPONSOR
mnt-by: EX-MNT
";
        let (registry, stats) = build(text, false).unwrap();
        let org = &registry.get("EX-MNT").unwrap().organisations[0];
        assert_eq!(org.org_type, None);
        assert_eq!(stats.warnings.len(), 1);
        assert!(matches!(
            &stats.warnings[0],
            InetStatsError::UnknownOrgType { org_name, value }
                if org_name == "Example Corp" && value == "SPONSOR"
        ));
    }

    #[test]
    fn test_unknown_type_strict() {
        let text = "\
org-name: Example Corp
org-type: SPONSOR
mnt-by: EX-MNT
";
        let err = build(text, true).unwrap_err();
        assert!(matches!(err, InetStatsError::UnknownOrgType { .. }));
    }
}
