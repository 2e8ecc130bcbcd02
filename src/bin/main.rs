use std::cmp::Reverse;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use inetstats::{
    Afi, BuildConfig, InetStats, InetStatsConfig, InetStatsError, LocalSource, Maintainer,
};
use itertools::Itertools;
use num_bigint::BigUint;
use thiserror::Error;

/// inetstats summarizes RIPE database dumps per maintainer.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Opts {
    /// Directory where downloaded dumps are cached
    #[clap(short, long, global = true)]
    cache_dir: Option<PathBuf>,

    /// Snapshot file of the built model, gzip-compressed if it ends in .gz
    #[clap(short, long, global = true)]
    snapshot: Option<PathBuf>,

    /// Base URL of the split dumps
    #[clap(long, global = true)]
    base_url: Option<String>,

    /// Read dumps from this directory instead of downloading them
    #[clap(long, global = true)]
    local: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the model from the dumps and save a snapshot
    Build {
        /// Download the dumps again even if cached
        #[clap(short, long)]
        update: bool,

        /// Fail on unknown org-type values instead of warning
        #[clap(long)]
        strict: bool,

        /// Process the datasets in parallel
        #[clap(short, long)]
        parallel: bool,
    },
    /// List maintainers
    Maintainers {
        /// Number of maintainers to show, 0 for all
        #[clap(short, long, default_value_t = 20)]
        limit: usize,

        /// Sort order (descending)
        #[clap(long, value_enum, default_value_t = SortKey::Ipv4)]
        sort: SortKey,

        /// Output as JSON
        #[clap(long)]
        json: bool,
    },
    /// List organisations maintained by a maintainer
    Orgs {
        maintainer: String,

        /// Output as JSON
        #[clap(long)]
        json: bool,
    },
    /// Show the per-country breakdown of a maintainer
    Show {
        maintainer: String,

        /// Output as JSON
        #[clap(long)]
        json: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SortKey {
    Ipv4,
    Ipv6,
    Routes4,
    Routes6,
    Orgs,
}

impl SortKey {
    fn key(&self, mnt: &Maintainer) -> BigUint {
        match self {
            SortKey::Ipv4 => mnt.total_ipv4_addresses(),
            SortKey::Ipv6 => mnt.total_ipv6_addresses(),
            SortKey::Routes4 => mnt.ipv4_routes.clone(),
            SortKey::Routes6 => mnt.ipv6_routes.clone(),
            SortKey::Orgs => BigUint::from(mnt.organisations.len()),
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    InetStats(#[from] InetStatsError),
    #[error("maintainer {0} not found")]
    UnknownMaintainer(String),
    #[error("cannot encode output: {0}")]
    Output(#[from] serde_json::Error),
}

fn main() {
    let opts: Opts = Opts::parse();

    env_logger::init();

    if let Err(e) = run(opts) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(opts: Opts) -> Result<(), CliError> {
    let mut config = InetStatsConfig::default();
    if let Some(dir) = opts.cache_dir {
        config = config.with_cache_dir(dir);
    }
    if let Some(path) = opts.snapshot {
        config = config.with_snapshot_path(path);
    }
    if let Some(url) = opts.base_url {
        config = config.with_base_url(url.as_str());
    }
    let local = opts.local.map(LocalSource::new);

    let stats = match opts.command {
        Command::Build {
            update,
            strict,
            parallel,
        } => {
            let mut build = BuildConfig::default();
            if strict {
                build = build.strict_org_types();
            }
            if parallel {
                build = build.parallel();
            }
            let mut stats = InetStats::new(config.with_build(build));
            let stages = match (&local, update) {
                (Some(source), _) => stats.rebuild_from(source)?,
                (None, true) => stats.update()?,
                (None, false) => stats.rebuild()?,
            };
            for (dataset, s) in stages {
                println!(
                    "{:<14} {:>10} records {:>9} objects {:>9} credited {:>7} skipped {:>5} warnings",
                    dataset.to_string(),
                    s.records,
                    s.blocks,
                    s.credited,
                    s.skipped,
                    s.warnings.len()
                );
            }
            println!(
                "{} maintainers saved to {}",
                stats.registry().len(),
                stats.config().snapshot_path.display()
            );
            return Ok(());
        }
        _ => match &local {
            Some(source) => InetStats::load_with_source(config, source)?,
            None => InetStats::load(config)?,
        },
    };

    match opts.command {
        Command::Build { .. } => {}
        Command::Maintainers { limit, sort, json } => {
            let sorted = stats
                .maintainers()
                .sorted_by_cached_key(|m| Reverse(sort.key(m)));
            let limit = if limit == 0 { usize::MAX } else { limit };
            let selected: Vec<&Maintainer> = sorted.take(limit).collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&selected)?);
            } else {
                println!(
                    "{:<28} {:>5} {:>12} {:>42} {:>12} {:>42}",
                    "maintainer", "orgs", "ipv4", "ipv6", "routes4", "routes6"
                );
                for mnt in selected {
                    println!(
                        "{:<28} {:>5} {:>12} {:>42} {:>12} {:>42}",
                        mnt.name,
                        mnt.organisations.len(),
                        mnt.total_ipv4_addresses(),
                        mnt.total_ipv6_addresses(),
                        mnt.ipv4_routes,
                        mnt.ipv6_routes
                    );
                }
            }
        }
        Command::Orgs { maintainer, json } => {
            let mnt = find_maintainer(&stats, &maintainer)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&mnt.organisations)?);
            } else {
                for org in &mnt.organisations {
                    let org_type = org
                        .org_type
                        .map(|t| t.description())
                        .unwrap_or("unknown");
                    println!("{:<60} {}", org.name, org_type);
                }
            }
        }
        Command::Show { maintainer, json } => {
            let mnt = find_maintainer(&stats, &maintainer)?;
            if json {
                println!("{}", serde_json::to_string_pretty(mnt)?);
            } else {
                println!("{} ({} organisations)", mnt.name, mnt.organisations.len());
                println!("routes: {} IPv4, {} IPv6", mnt.ipv4_routes, mnt.ipv6_routes);
                for afi in [Afi::Ipv4, Afi::Ipv6] {
                    let countries = mnt
                        .addresses(afi)
                        .iter()
                        .sorted_by(|a, b| b.1.cmp(a.1))
                        .map(|(country, count)| {
                            let country = if country.is_empty() {
                                "??"
                            } else {
                                country.as_str()
                            };
                            format!("{}={}", country, count)
                        })
                        .join(" ");
                    println!("{}: {}", afi, countries);
                }
            }
        }
    }
    Ok(())
}

fn find_maintainer<'a>(stats: &'a InetStats, name: &str) -> Result<&'a Maintainer, CliError> {
    stats
        .registry()
        .get(name)
        .ok_or_else(|| CliError::UnknownMaintainer(name.trim().to_uppercase()))
}
