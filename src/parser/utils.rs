/*!
Provides value-level helpers shared by the dataset stages.
*/
use crate::models::Afi;
use ipnet::IpNet;
use num_bigint::BigUint;
use num_traits::One;

/// Decodes a raw line as ISO-8859-1, the encoding of the RIPE split dumps.
///
/// Every byte maps to the code point of the same value, so decoding never fails.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Number of addresses in an `inetnum`/`inet6num` range such as `10.0.0.0 - 10.0.0.255`.
///
/// Returns `None` when the value is not two endpoints of family `afi`, or when the
/// range is reversed.
pub fn range_size(afi: Afi, value: &str) -> Option<BigUint> {
    let (start, end) = value.split_once('-')?;
    let start = afi.address_value(start)?;
    let end = afi.address_value(end)?;
    if end < start {
        return None;
    }
    // computed in BigUint so that `::/0` (2^128 addresses) does not overflow
    Some(BigUint::from(end - start) + BigUint::one())
}

/// Number of addresses covered by a `route`/`route6` prefix such as `192.0.2.0/24`.
///
/// Returns `None` for values without a valid prefix length, or whose address belongs to
/// the other family.
pub fn prefix_size(afi: Afi, value: &str) -> Option<BigUint> {
    let prefix = value.trim().parse::<IpNet>().ok()?;
    if Afi::from(prefix.addr()) != afi {
        return None;
    }
    let host_bits = afi.bit_width() - prefix.prefix_len();
    Some(BigUint::one() << host_bits as u32)
}
