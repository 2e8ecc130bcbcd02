use crate::models::rpsl::serde_impl::{count, count_map};
use crate::models::{Afi, Organisation};
use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate statistics of one maintainer (`mnt-by` value).
///
/// All counters only ever grow while a registry is being built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maintainer {
    /// Normalized (trimmed, upper-case) maintainer name.
    pub name: String,
    /// Organisations maintained, in the order they were encountered.
    pub organisations: Vec<Organisation>,
    /// Country code to number of IPv4 addresses in `inetnum` blocks.
    #[serde(with = "count_map")]
    pub ipv4_addresses: BTreeMap<String, BigUint>,
    /// Country code to number of IPv6 addresses in `inet6num` blocks.
    #[serde(with = "count_map")]
    pub ipv6_addresses: BTreeMap<String, BigUint>,
    /// Number of addresses covered by `route` objects.
    #[serde(with = "count")]
    pub ipv4_routes: BigUint,
    /// Number of addresses covered by `route6` objects.
    #[serde(with = "count")]
    pub ipv6_routes: BigUint,
}

impl Maintainer {
    /// Creates an empty maintainer. `name` is normalized the same way the registry does.
    pub fn new(name: &str) -> Maintainer {
        Maintainer {
            name: normalize_name(name),
            ..Default::default()
        }
    }

    pub fn addresses(&self, afi: Afi) -> &BTreeMap<String, BigUint> {
        match afi {
            Afi::Ipv4 => &self.ipv4_addresses,
            Afi::Ipv6 => &self.ipv6_addresses,
        }
    }

    pub fn routes(&self, afi: Afi) -> &BigUint {
        match afi {
            Afi::Ipv4 => &self.ipv4_routes,
            Afi::Ipv6 => &self.ipv6_routes,
        }
    }

    /// Sum of the per-country address counts of one family.
    pub fn total_addresses(&self, afi: Afi) -> BigUint {
        self.addresses(afi).values().sum()
    }

    pub fn total_ipv4_addresses(&self) -> BigUint {
        self.total_addresses(Afi::Ipv4)
    }

    pub fn total_ipv6_addresses(&self) -> BigUint {
        self.total_addresses(Afi::Ipv6)
    }

    pub fn add_addresses(&mut self, afi: Afi, country: &str, count: &BigUint) {
        let map = match afi {
            Afi::Ipv4 => &mut self.ipv4_addresses,
            Afi::Ipv6 => &mut self.ipv6_addresses,
        };
        *map.entry(country.to_string()).or_insert_with(BigUint::zero) += count;
    }

    pub fn add_routes(&mut self, afi: Afi, count: &BigUint) {
        match afi {
            Afi::Ipv4 => self.ipv4_routes += count,
            Afi::Ipv6 => self.ipv6_routes += count,
        }
    }

    /// Folds another aggregate of the same maintainer into this one.
    pub(crate) fn merge(&mut self, other: Maintainer) {
        self.organisations.extend(other.organisations);
        for (country, count) in other.ipv4_addresses {
            self.add_addresses(Afi::Ipv4, &country, &count);
        }
        for (country, count) in other.ipv6_addresses {
            self.add_addresses(Afi::Ipv6, &country, &count);
        }
        self.ipv4_routes += other.ipv4_routes;
        self.ipv6_routes += other.ipv6_routes;
    }
}

/// Maintainer names are compared case-insensitively and without surrounding whitespace.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase()
}
