//! IPv4-mapped IPv6 addresses.
//!
//! A dual-stack socket sees IPv4 peers as IPv6 addresses made of
//!
//!  1. an 80-bit prefix of zeros,
//!  2. 16 bits of ones,
//!  3. the IPv4 address in the remaining, least significant 32 bits.
//!
//! [`is_ipv4_mapped`] only classifies; it does not validate. Callers branch
//! on it before calling [`unmap_ipv4`], whose result is meaningless for any
//! other address.

use crate::addr::{Ipv4Addr, Ipv6Addr};

/// Encodes `ipv4` as `::ffff:a.b.c.d`.
///
/// # Examples
///
/// ```
/// use dualstack_ip::{map_ipv4, Ipv4Addr};
///
/// let mapped = map_ipv4(Ipv4Addr::new(10, 0, 0, 1));
/// assert_eq!(mapped.groups(), [0, 0, 0, 0, 0, 0xffff, 0x0a00, 0x0001]);
/// ```
pub const fn map_ipv4(ipv4: Ipv4Addr) -> Ipv6Addr {
    let host = ipv4.to_host();
    Ipv6Addr::new(0, 0, 0, 0, 0, 0xffff, (host >> 16) as u16, host as u16)
}

/// Recovers the IPv4 address from the last four octets of `ipv6`.
///
/// Octets 12..16 are moved in wire order into the network order scalar, so
/// octet 12 becomes the first octet of the IPv4 address on either host
/// endianness.
pub const fn unmap_ipv4(ipv6: &Ipv6Addr) -> Ipv4Addr {
    let o = ipv6.octets();
    Ipv4Addr::from_octets([o[12], o[13], o[14], o[15]])
}

/// `true` iff the first 64 bits are zero, the next 16 bits are zero and the
/// 16 bits after those are all ones.
pub const fn is_ipv4_mapped(ipv6: &Ipv6Addr) -> bool {
    let words = ipv6.words();
    words[0] == 0 && words[1] == 0 && ipv6.group(4) == 0 && ipv6.group(5) == 0xffff
}

impl Ipv4Addr {
    /// Same as [`map_ipv4`].
    pub const fn to_ipv6_mapped(self) -> Ipv6Addr {
        map_ipv4(self)
    }
}

impl Ipv6Addr {
    /// The embedded IPv4 address if this is an IPv4-mapped address.
    pub const fn to_ipv4_mapped(&self) -> Option<Ipv4Addr> {
        if is_ipv4_mapped(self) {
            Some(unmap_ipv4(self))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_layout() {
        let mapped = map_ipv4(Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(mapped.groups(), [0, 0, 0, 0, 0, 0xffff, 0x0a00, 0x0001]);
        assert_eq!(mapped.octets()[10..], [0xff, 0xff, 10, 0, 0, 1]);
    }

    #[test]
    fn round_trip() {
        for v in [0u32, 1, 0x0a00_0001, 0xc0a8_0102, 0x7fff_ffff, 0x8000_0000, u32::MAX] {
            let ipv4 = Ipv4Addr::from_host(v);
            let mapped = map_ipv4(ipv4);
            assert!(is_ipv4_mapped(&mapped));
            assert_eq!(unmap_ipv4(&mapped), ipv4);
            assert_eq!(mapped.to_ipv4_mapped(), Some(ipv4));
        }
        // a spread of raw scalars, whatever their meaning
        let mut v = 0x1234_5678u32;
        for _ in 0..1000 {
            v = v.wrapping_mul(1_103_515_245).wrapping_add(12345);
            let ipv4 = Ipv4Addr::from_raw(v);
            assert_eq!(unmap_ipv4(&ipv4.to_ipv6_mapped()), ipv4);
        }
    }

    #[test]
    fn unmap_is_not_byte_swapped() {
        let ipv4 = unmap_ipv4(&Ipv6Addr::new(0, 0, 0, 0, 0, 0xffff, 0xc0a8, 0x0102));
        assert_eq!(ipv4, Ipv4Addr::new(192, 168, 1, 2));
        assert_eq!(ipv4.addr1(), 192);
        assert_eq!(ipv4.addr4(), 2);
    }

    #[test]
    fn classification() {
        assert!(!is_ipv4_mapped(&Ipv6Addr::UNSPECIFIED));
        assert!(!is_ipv4_mapped(&Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0xffff, 1, 2)));
        assert!(!is_ipv4_mapped(&Ipv6Addr::new(0, 0, 0, 0, 1, 0xffff, 1, 2)));
        assert!(!is_ipv4_mapped(&Ipv6Addr::new(0, 0, 0, 0, 0, 0xfffe, 1, 2)));
        // IPv4-compatible form is not mapped
        assert!(!is_ipv4_mapped(&Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0x0a00, 1)));
        assert_eq!(Ipv6Addr::new(0, 0, 0, 1, 0, 0xffff, 1, 2).to_ipv4_mapped(), None);
    }
}
