/*!
inetstats builds per-maintainer statistics from the RIPE database split dumps.

For every maintainer (the `mnt-by` value of RPSL objects) it collects:
- the organisations it maintains, from `ripe.db.organisation`,
- the number of IPv4/IPv6 addresses it holds per country, from `ripe.db.inetnum` and
  `ripe.db.inet6num`,
- the number of addresses covered by the routes it registers, from `ripe.db.route` and
  `ripe.db.route6`.

# Examples

## Build from memory

Any [DatasetSource] can feed a build. [MemorySource] is handy for small inputs:

```
use inetstats::{build_registry, BuildConfig, Dataset, MemorySource};
use num_bigint::BigUint;

let source = MemorySource::new()
    .with(Dataset::Organisation, "org-name: Example Corp\norg-type: LIR\nmnt-by: EX-MNT\n")
    .with(Dataset::Inetnum, "inetnum: 10.0.0.0 - 10.0.0.255\ncountry: SE\nmnt-by: ex-mnt\n");

let report = build_registry(&source, &BuildConfig::default()).unwrap();
let mnt = report.registry.get("EX-MNT").unwrap();
assert_eq!(mnt.organisations[0].name, "Example Corp");
assert_eq!(mnt.ipv4_addresses["SE"], BigUint::from(256u32));
```

## Download, build and cache

[InetStats] downloads the dumps into a cache directory, builds the registry and keeps a
snapshot of it, so later runs only restore the snapshot:

```no_run
use inetstats::{InetStats, InetStatsConfig};

let stats = InetStats::load(InetStatsConfig::default()).unwrap();
for mnt in stats.maintainers() {
    println!("{}: {} IPv4 addresses", mnt.name, mnt.total_ipv4_addresses());
}
```

## Parse a single dump

```no_run
use inetstats::RecordReader;

for record in RecordReader::from_path("ripe.db.route.gz").unwrap() {
    let record = record.unwrap();
    if record.attr == "route" {
        println!("{}", record.value);
    }
}
```
*/

pub mod build;
pub mod config;
pub mod dataset;
pub mod error;
mod io;
pub mod models;
pub mod parser;
pub mod registry;
pub mod snapshot;
pub mod stats;

pub use build::{build_registry, build_registry_parallel, BuildReport};
pub use config::{BuildConfig, InetStatsConfig};
pub use dataset::{Dataset, DatasetSource, LocalSource, MemorySource, RemoteSource};
pub use error::InetStatsError;
pub use models::{Afi, Maintainer, OrgType, Organisation};
pub use parser::{Record, RecordReader, StageStats};
pub use registry::MaintainerRegistry;
pub use snapshot::{Snapshot, SNAPSHOT_VERSION};
pub use stats::InetStats;
