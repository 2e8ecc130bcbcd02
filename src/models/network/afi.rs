use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::net::IpAddr;

/// AFI -- Address Family Identifier
///
/// Selects which dataset flavour a stage works on: `inetnum`/`route` for IPv4,
/// `inet6num`/`route6` for IPv6.
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash, Serialize, Deserialize)]
pub enum Afi {
    Ipv4,
    Ipv6,
}

impl Afi {
    /// Number of bits in an address of this family.
    pub const fn bit_width(&self) -> u8 {
        match self {
            Afi::Ipv4 => 32,
            Afi::Ipv6 => 128,
        }
    }

    /// Parses `s` as an address of this family and returns its numeric value.
    ///
    /// Returns `None` if `s` is not an address or belongs to the other family.
    pub fn address_value(&self, s: &str) -> Option<u128> {
        match (self, s.trim().parse::<IpAddr>().ok()?) {
            (Afi::Ipv4, IpAddr::V4(addr)) => Some(u32::from(addr) as u128),
            (Afi::Ipv6, IpAddr::V6(addr)) => Some(u128::from(addr)),
            _ => None,
        }
    }
}

impl From<IpAddr> for Afi {
    #[inline]
    fn from(value: IpAddr) -> Self {
        match value {
            IpAddr::V4(_) => Afi::Ipv4,
            IpAddr::V6(_) => Afi::Ipv6,
        }
    }
}

impl Display for Afi {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Afi::Ipv4 => write!(f, "IPv4"),
            Afi::Ipv6 => write!(f, "IPv6"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_afi_from() {
        assert_eq!(
            Afi::from(IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))),
            Afi::Ipv4
        );
        assert_eq!(
            Afi::from(IpAddr::V6(std::net::Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 1))),
            Afi::Ipv6
        );
    }

    #[test]
    fn test_bit_width() {
        assert_eq!(Afi::Ipv4.bit_width(), 32);
        assert_eq!(Afi::Ipv6.bit_width(), 128);
    }

    #[test]
    fn test_address_value() {
        assert_eq!(Afi::Ipv4.address_value("10.0.0.1"), Some(0x0a00_0001));
        assert_eq!(Afi::Ipv4.address_value(" 255.255.255.255 "), Some(u32::MAX as u128));
        assert_eq!(Afi::Ipv6.address_value("::1"), Some(1));
        assert_eq!(Afi::Ipv6.address_value("ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff"), Some(u128::MAX));

        // wrong family
        assert_eq!(Afi::Ipv4.address_value("2001:db8::"), None);
        assert_eq!(Afi::Ipv6.address_value("10.0.0.1"), None);
        // garbage
        assert_eq!(Afi::Ipv4.address_value("garbage"), None);
    }
}
