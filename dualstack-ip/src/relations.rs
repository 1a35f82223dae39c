//! Address relations used by routing, socket binding and filtering.
//!
//! Equality is the derived `PartialEq`: a scalar compare for IPv4 and a
//! compare of all sixteen octets for IPv6. Nothing here compares across
//! families.

use crate::addr::{Family, IpAddr, Ipv4Addr, Ipv6Addr, NetAddr};
use crate::consts::{IPV4_ADDR_LEN, IPV6_ADDR_LEN};

impl Ipv4Addr {
    /// Compares two addresses under a netmask: bits inside the mask must
    /// match, bits outside it are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use dualstack_ip::Ipv4Addr;
    ///
    /// let mask = Ipv4Addr::new(255, 255, 255, 0);
    /// let a = Ipv4Addr::new(192, 168, 1, 2);
    /// assert!(a.mask_eq(&Ipv4Addr::new(192, 168, 1, 200), &mask));
    /// assert!(!a.mask_eq(&Ipv4Addr::new(192, 168, 2, 2), &mask));
    /// ```
    #[inline]
    pub const fn mask_eq(&self, other: &Ipv4Addr, mask: &Ipv4Addr) -> bool {
        (self.raw() & mask.raw()) == (other.raw() & mask.raw())
    }

    /// The network part of the address: `192.168.1.2` under
    /// `255.255.255.0` is `192.168.1.0`.
    #[inline]
    pub const fn masked(&self, mask: &Ipv4Addr) -> Ipv4Addr {
        Ipv4Addr::from_raw(self.raw() & mask.raw())
    }
}

impl Ipv6Addr {
    /// Compares two addresses under a netmask, one 16-bit group at a time;
    /// all eight groups have to match.
    pub fn mask_eq(&self, other: &Ipv6Addr, mask: &Ipv6Addr) -> bool {
        let (a, b, m) = (self.raw_groups(), other.raw_groups(), mask.raw_groups());
        (0..8).all(|i| (a[i] & m[i]) == (b[i] & m[i]))
    }

    pub fn masked(&self, mask: &Ipv6Addr) -> Ipv6Addr {
        let (mut a, m) = (self.raw_groups(), mask.raw_groups());
        for (g, m) in a.iter_mut().zip(m.iter()) {
            *g &= *m;
        }
        Ipv6Addr::from_raw_groups(a)
    }

    /// Compares the leading `length` bits of two addresses.
    ///
    /// Only whole bytes take part: the length is rounded down to a multiple
    /// of eight, so the low bits of a partial trailing byte are never looked
    /// at. Lengths past 128 compare the whole address.
    ///
    /// # Examples
    ///
    /// ```
    /// use dualstack_ip::Ipv6Addr;
    ///
    /// let a = Ipv6Addr::new(0x2001, 0xdb8, 0, 1, 0, 0, 0, 1);
    /// let b = Ipv6Addr::new(0x2001, 0xdb8, 0, 1, 0, 0, 0, 2);
    /// assert!(a.prefix_eq(&b, 64));
    /// assert!(!a.prefix_eq(&b, 128));
    /// ```
    pub fn prefix_eq(&self, other: &Ipv6Addr, length: usize) -> bool {
        let nbytes = (length >> 3).min(IPV6_ADDR_LEN);
        self.octets()[..nbytes] == other.octets()[..nbytes]
    }
}

impl NetAddr for Ipv4Addr {
    const FAMILY: Family = Family::Inet;
    const LEN: usize = IPV4_ADDR_LEN;
    const UNSPECIFIED: Self = Ipv4Addr::UNSPECIFIED;

    fn mask_eq(&self, other: &Self, mask: &Self) -> bool {
        Ipv4Addr::mask_eq(self, other, mask)
    }

    fn masked(&self, mask: &Self) -> Self {
        Ipv4Addr::masked(self, mask)
    }
}

impl NetAddr for Ipv6Addr {
    const FAMILY: Family = Family::Inet6;
    const LEN: usize = IPV6_ADDR_LEN;
    const UNSPECIFIED: Self = Ipv6Addr::UNSPECIFIED;

    fn mask_eq(&self, other: &Self, mask: &Self) -> bool {
        Ipv6Addr::mask_eq(self, other, mask)
    }

    fn masked(&self, mask: &Self) -> Self {
        Ipv6Addr::masked(self, mask)
    }
}

impl IpAddr {
    /// Netmask comparison of two addresses of the same family. Addresses of
    /// different families, or a mask of the wrong family, never match.
    pub fn mask_eq(&self, other: &IpAddr, mask: &IpAddr) -> bool {
        match (*self, *other, *mask) {
            #[cfg(feature = "ipv4")]
            (IpAddr::V4(a), IpAddr::V4(b), IpAddr::V4(m)) => a.mask_eq(&b, &m),
            #[cfg(feature = "ipv6")]
            (IpAddr::V6(a), IpAddr::V6(b), IpAddr::V6(m)) => a.mask_eq(&b, &m),
            #[allow(unreachable_patterns)]
            _ => false,
        }
    }

    /// Leading-bits comparison. IPv4 addresses compare their first
    /// `length >> 3` octets the same way IPv6 ones do.
    pub fn prefix_eq(&self, other: &IpAddr, length: usize) -> bool {
        match (*self, *other) {
            #[cfg(feature = "ipv4")]
            (IpAddr::V4(a), IpAddr::V4(b)) => {
                let nbytes = (length >> 3).min(IPV4_ADDR_LEN);
                a.octets()[..nbytes] == b.octets()[..nbytes]
            }
            #[cfg(feature = "ipv6")]
            (IpAddr::V6(a), IpAddr::V6(b)) => a.prefix_eq(&b, length),
            #[allow(unreachable_patterns)]
            _ => false,
        }
    }
}
