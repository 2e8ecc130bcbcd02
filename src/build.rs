/*!
Runs the five dataset stages into a fresh [MaintainerRegistry].

The registry is only handed out once every stage has succeeded; a failing stage discards the
whole build.
*/
use crate::config::BuildConfig;
use crate::dataset::{Dataset, DatasetSource};
use crate::error::InetStatsError;
use crate::models::Afi;
use crate::parser::{
    run_stage, AddressAggregator, OrganisationBuilder, RecordReader, RouteAggregator, StageStats,
};
use crate::registry::MaintainerRegistry;
use log::info;
use rayon::prelude::*;
use std::time::Instant;

/// The result of a successful build.
#[derive(Debug)]
pub struct BuildReport {
    pub registry: MaintainerRegistry,
    /// Per-dataset counters, in build order.
    pub stages: Vec<(Dataset, StageStats)>,
}

impl BuildReport {
    /// Dataset-quality problems collected by all stages.
    pub fn warnings(&self) -> impl Iterator<Item = &InetStatsError> {
        self.stages.iter().flat_map(|(_, stats)| stats.warnings.iter())
    }
}

/// Builds a registry from all datasets of `source`.
pub fn build_registry<S>(source: &S, config: &BuildConfig) -> Result<BuildReport, InetStatsError>
where
    S: DatasetSource + ?Sized,
{
    if config.parallel {
        return build_registry_parallel(source, config);
    }

    let start = Instant::now();
    let mut registry = MaintainerRegistry::new();
    let mut stages = Vec::with_capacity(Dataset::ALL.len());
    for dataset in Dataset::ALL {
        let stats = process_dataset(source, dataset, config, &mut registry)?;
        stages.push((dataset, stats));
    }
    info!(
        "built {} maintainers in {:.1?}",
        registry.len(),
        start.elapsed()
    );
    Ok(BuildReport { registry, stages })
}

/// Builds every dataset into its own registry on the rayon pool, then merges them in build
/// order. The result equals that of [build_registry].
pub fn build_registry_parallel<S>(
    source: &S,
    config: &BuildConfig,
) -> Result<BuildReport, InetStatsError>
where
    S: DatasetSource + ?Sized,
{
    let start = Instant::now();
    let parts = Dataset::ALL
        .par_iter()
        .map(|&dataset| -> Result<_, InetStatsError> {
            let mut registry = MaintainerRegistry::new();
            let stats = process_dataset(source, dataset, config, &mut registry)?;
            Ok((dataset, registry, stats))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut registry = MaintainerRegistry::new();
    let mut stages = Vec::with_capacity(parts.len());
    for (dataset, part, stats) in parts {
        registry.merge(part);
        stages.push((dataset, stats));
    }
    info!(
        "built {} maintainers in {:.1?} (parallel)",
        registry.len(),
        start.elapsed()
    );
    Ok(BuildReport { registry, stages })
}

/// Streams one dataset through the stage responsible for it.
pub fn process_dataset<S>(
    source: &S,
    dataset: Dataset,
    config: &BuildConfig,
    registry: &mut MaintainerRegistry,
) -> Result<StageStats, InetStatsError>
where
    S: DatasetSource + ?Sized,
{
    info!("processing {} dataset", dataset);
    let records = RecordReader::new(source.open(dataset)?);
    let stats = match dataset {
        Dataset::Organisation => run_stage(
            OrganisationBuilder::new(config.strict_org_types),
            records,
            registry,
        )?,
        Dataset::Inetnum => run_stage(AddressAggregator::new(Afi::Ipv4), records, registry)?,
        Dataset::Inet6num => run_stage(AddressAggregator::new(Afi::Ipv6), records, registry)?,
        Dataset::Route => run_stage(RouteAggregator::new(Afi::Ipv4), records, registry)?,
        Dataset::Route6 => run_stage(RouteAggregator::new(Afi::Ipv6), records, registry)?,
    };
    info!(
        "{}: {} records, {} objects, {} credited, {} skipped, {} warnings",
        dataset,
        stats.records,
        stats.blocks,
        stats.credited,
        stats.skipped,
        stats.warnings.len()
    );
    Ok(stats)
}
