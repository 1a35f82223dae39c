use core::fmt;

use net_shim::{htonl, htons, ntohl, ntohs};

use crate::consts::{IPV4_ADDR_LEN, IPV4_HDRLEN, IPV6_ADDR_LEN, IPV6_HDRLEN};

/// Address family of a socket or interface.
///
/// Address values do not carry their family; whoever owns them (a socket, a
/// device, a route) does, and picks the matching operations once.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Family {
    /// PF_INET
    Inet,
    /// PF_INET6
    Inet6,
}

impl Family {
    pub const fn addr_len(self) -> usize {
        match self {
            Family::Inet => IPV4_ADDR_LEN,
            Family::Inet6 => IPV6_ADDR_LEN,
        }
    }

    /// Size of the fixed part of this family's header.
    pub const fn header_len(self) -> usize {
        match self {
            Family::Inet => IPV4_HDRLEN,
            Family::Inet6 => IPV6_HDRLEN,
        }
    }

    /// Maps a header version number (4 or 6) to its family.
    pub fn from_version(version: u8) -> Option<Family> {
        match version {
            4 => Some(Family::Inet),
            6 => Some(Family::Inet6),
            _ => None,
        }
    }
}

/// Operations every address family provides to family-generic code
/// (bindings, header views). Implemented in [`crate::relations`].
pub trait NetAddr: Copy + Eq + fmt::Debug {
    const FAMILY: Family;
    const LEN: usize;
    const UNSPECIFIED: Self;

    /// `true` iff both addresses agree on every bit selected by `mask`.
    fn mask_eq(&self, other: &Self, mask: &Self) -> bool;

    /// The bits of `self` selected by `mask`; the rest are cleared.
    fn masked(&self, mask: &Self) -> Self;

    fn is_unspecified(&self) -> bool {
        *self == Self::UNSPECIFIED
    }
}

/// An IP address of either compiled-in family.
///
/// A build with only one family enabled has only that variant, so code
/// matching on it needs no dead arm for the other.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum IpAddr {
    #[cfg(feature = "ipv4")]
    V4(Ipv4Addr),
    #[cfg(feature = "ipv6")]
    V6(Ipv6Addr),
}

impl IpAddr {
    pub fn family(&self) -> Family {
        match *self {
            #[cfg(feature = "ipv4")]
            IpAddr::V4(_) => Family::Inet,
            #[cfg(feature = "ipv6")]
            IpAddr::V6(_) => Family::Inet6,
        }
    }

    pub fn is_unspecified(&self) -> bool {
        match *self {
            #[cfg(feature = "ipv4")]
            IpAddr::V4(a) => a.is_unspecified(),
            #[cfg(feature = "ipv6")]
            IpAddr::V6(a) => a.is_unspecified(),
        }
    }
}

impl fmt::Display for IpAddr {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            #[cfg(feature = "ipv4")]
            IpAddr::V4(ref a) => fmt::Display::fmt(a, fmt),
            #[cfg(feature = "ipv6")]
            IpAddr::V6(ref a) => fmt::Display::fmt(a, fmt),
        }
    }
}

#[cfg(feature = "ipv4")]
impl From<Ipv4Addr> for IpAddr {
    fn from(ipv4: Ipv4Addr) -> IpAddr {
        IpAddr::V4(ipv4)
    }
}

#[cfg(feature = "ipv6")]
impl From<Ipv6Addr> for IpAddr {
    fn from(ipv6: Ipv6Addr) -> IpAddr {
        IpAddr::V6(ipv6)
    }
}

cfg_if! {
    if #[cfg(target_endian = "big")] {
        // 11223344: the first octet sits in the most significant byte
        #[inline(always)]
        const fn octet_shift(idx: u32) -> u32 {
            24 - 8 * idx
        }
    } else {
        // 44332211: the first octet sits in the least significant byte
        #[inline(always)]
        const fn octet_shift(idx: u32) -> u32 {
            8 * idx
        }
    }
}

/// An IPv4 address.
///
/// The value is the `in_addr_t` scalar: its in-memory bytes are the four
/// octets in transmit order on any host, so it can be compared and masked as
/// a plain integer without conversion.
///
/// # Examples
///
/// ```
/// use dualstack_ip::Ipv4Addr;
///
/// let addr = Ipv4Addr::new(192, 168, 1, 2);
/// assert_eq!(addr.octets(), [192, 168, 1, 2]);
/// assert_eq!(addr.to_host(), 0xc0a8_0102);
/// ```
#[repr(transparent)]
#[derive(Clone, Copy, Eq, PartialEq, Hash, Default)]
pub struct Ipv4Addr {
    // network byte order
    inner: u32,
}

impl Ipv4Addr {
    pub const UNSPECIFIED: Ipv4Addr = Ipv4Addr { inner: 0 };
    pub const BROADCAST: Ipv4Addr = Ipv4Addr { inner: u32::MAX };

    /// Creates an IPv4 address from four octets, most significant first:
    /// the result is `a.b.c.d`.
    pub const fn new(a: u8, b: u8, c: u8, d: u8) -> Ipv4Addr {
        Ipv4Addr::from_host((a as u32) << 24 | (b as u32) << 16 | (c as u32) << 8 | d as u32)
    }

    /// Wraps a scalar that is already in network byte order.
    pub const fn from_raw(raw: u32) -> Ipv4Addr {
        Ipv4Addr { inner: raw }
    }

    /// The network byte order scalar.
    pub const fn raw(self) -> u32 {
        self.inner
    }

    /// Converts a host order scalar (`0x7f000001` for 127.0.0.1).
    pub const fn from_host(value: u32) -> Ipv4Addr {
        Ipv4Addr {
            inner: htonl(value),
        }
    }

    /// The address as a host order scalar, suitable for arithmetic.
    pub const fn to_host(self) -> u32 {
        ntohl(self.inner)
    }

    pub const fn from_octets(octets: [u8; 4]) -> Ipv4Addr {
        Ipv4Addr {
            inner: u32::from_ne_bytes(octets),
        }
    }

    pub const fn octets(self) -> [u8; 4] {
        self.inner.to_ne_bytes()
    }

    /// Folds the two raw 16-bit words an IPv4 header stores an address in.
    ///
    /// The words are taken as they sit in memory, so the octet order of the
    /// wire is preserved.
    pub const fn from_halves(halves: [u16; 2]) -> Ipv4Addr {
        let [a, b] = halves[0].to_ne_bytes();
        let [c, d] = halves[1].to_ne_bytes();
        Ipv4Addr::from_octets([a, b, c, d])
    }

    pub const fn halves(self) -> [u16; 2] {
        let [a, b, c, d] = self.octets();
        [u16::from_ne_bytes([a, b]), u16::from_ne_bytes([c, d])]
    }

    /// First octet (`a` of `a.b.c.d`).
    #[inline]
    pub const fn addr1(self) -> u8 {
        (self.inner >> octet_shift(0)) as u8
    }

    #[inline]
    pub const fn addr2(self) -> u8 {
        (self.inner >> octet_shift(1)) as u8
    }

    #[inline]
    pub const fn addr3(self) -> u8 {
        (self.inner >> octet_shift(2)) as u8
    }

    /// Fourth octet (`d` of `a.b.c.d`).
    #[inline]
    pub const fn addr4(self) -> u8 {
        (self.inner >> octet_shift(3)) as u8
    }

    /// Returns [`true`] for 0.0.0.0.
    pub const fn is_unspecified(self) -> bool {
        self.inner == 0
    }

    /// Returns [`true`] for 255.255.255.255.
    pub const fn is_broadcast(self) -> bool {
        self.inner == u32::MAX
    }

    /// Returns [`true`] for 224.0.0.0/4.
    pub const fn is_multicast(self) -> bool {
        self.addr1() & 0xf0 == 0xe0
    }

    /// Returns [`true`] for 127.0.0.0/8.
    pub const fn is_loopback(self) -> bool {
        self.addr1() == 127
    }
}

impl From<[u8; 4]> for Ipv4Addr {
    fn from(octets: [u8; 4]) -> Ipv4Addr {
        Ipv4Addr::from_octets(octets)
    }
}

impl fmt::Display for Ipv4Addr {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(
            fmt,
            "{}.{}.{}.{}",
            self.addr1(),
            self.addr2(),
            self.addr3(),
            self.addr4()
        )
    }
}

impl fmt::Debug for Ipv4Addr {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, fmt)
    }
}

/// An IPv6 address.
///
/// Stored as eight 16-bit groups, each in network byte order. The octet and
/// 32-bit word views are computed from that one array.
///
/// # Examples
///
/// ```
/// use dualstack_ip::Ipv6Addr;
///
/// let addr = Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 1);
/// assert_eq!(addr.groups(), [0xfe80, 0, 0, 0, 0, 0, 0, 1]);
/// assert_eq!(addr.octets()[..2], [0xfe, 0x80]);
/// ```
#[repr(C)]
#[derive(Clone, Copy, Eq, PartialEq, Hash, Default)]
pub struct Ipv6Addr {
    inner: [u16; 8],
}

impl Ipv6Addr {
    pub const UNSPECIFIED: Ipv6Addr = Ipv6Addr { inner: [0; 8] };

    /// Creates an IPv6 address from eight host order groups: the result is
    /// `a:b:c:d:e:f:g:h`.
    #[allow(clippy::many_single_char_names, clippy::too_many_arguments)]
    pub const fn new(a: u16, b: u16, c: u16, d: u16, e: u16, f: u16, g: u16, h: u16) -> Ipv6Addr {
        Ipv6Addr {
            inner: [
                htons(a),
                htons(b),
                htons(c),
                htons(d),
                htons(e),
                htons(f),
                htons(g),
                htons(h),
            ],
        }
    }

    /// Wraps groups that are already in network byte order.
    pub const fn from_raw_groups(raw: [u16; 8]) -> Ipv6Addr {
        Ipv6Addr { inner: raw }
    }

    /// The groups as stored, in network byte order.
    pub const fn raw_groups(&self) -> [u16; 8] {
        self.inner
    }

    /// Group `idx` (0..8) as a host order value.
    ///
    /// # Panics
    ///
    /// When `idx >= 8`.
    pub const fn group(&self, idx: usize) -> u16 {
        ntohs(self.inner[idx])
    }

    /// All eight groups as host order values.
    pub const fn groups(&self) -> [u16; 8] {
        let mut out = [0u16; 8];
        let mut i = 0;
        while i < 8 {
            out[i] = ntohs(self.inner[i]);
            i += 1;
        }
        out
    }

    pub const fn from_octets(octets: [u8; 16]) -> Ipv6Addr {
        let mut inner = [0u16; 8];
        let mut i = 0;
        while i < 8 {
            inner[i] = u16::from_ne_bytes([octets[2 * i], octets[2 * i + 1]]);
            i += 1;
        }
        Ipv6Addr { inner }
    }

    /// The sixteen octets in transmit order.
    pub const fn octets(&self) -> [u8; 16] {
        let mut out = [0u8; 16];
        let mut i = 0;
        while i < 8 {
            let [hi, lo] = self.inner[i].to_ne_bytes();
            out[2 * i] = hi;
            out[2 * i + 1] = lo;
            i += 1;
        }
        out
    }

    /// The four 32-bit words as stored, in network byte order.
    pub const fn words(&self) -> [u32; 4] {
        let o = self.octets();
        let mut out = [0u32; 4];
        let mut i = 0;
        while i < 4 {
            out[i] = u32::from_ne_bytes([o[4 * i], o[4 * i + 1], o[4 * i + 2], o[4 * i + 3]]);
            i += 1;
        }
        out
    }

    /// Returns [`true`] for `::`.
    pub const fn is_unspecified(&self) -> bool {
        let mut i = 0;
        while i < 8 {
            if self.inner[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Returns [`true`] for `::1`.
    pub const fn is_loopback(&self) -> bool {
        let g = self.groups();
        g[0] == 0
            && g[1] == 0
            && g[2] == 0
            && g[3] == 0
            && g[4] == 0
            && g[5] == 0
            && g[6] == 0
            && g[7] == 1
    }

    /// Returns [`true`] for ff00::/8.
    pub const fn is_multicast(&self) -> bool {
        self.octets()[0] == 0xff
    }

    /// Returns [`true`] for fe80::/10.
    pub const fn is_unicast_link_local(&self) -> bool {
        self.group(0) & 0xffc0 == 0xfe80
    }
}

impl From<[u8; 16]> for Ipv6Addr {
    fn from(octets: [u8; 16]) -> Ipv6Addr {
        Ipv6Addr::from_octets(octets)
    }
}

impl From<[u16; 8]> for Ipv6Addr {
    /// Host order groups, as in [`Ipv6Addr::new`].
    #[allow(clippy::many_single_char_names)]
    fn from(groups: [u16; 8]) -> Ipv6Addr {
        let [a, b, c, d, e, f, g, h] = groups;
        Ipv6Addr::new(a, b, c, d, e, f, g, h)
    }
}

impl From<Ipv6Addr> for u128 {
    fn from(ip: Ipv6Addr) -> u128 {
        u128::from_be_bytes(ip.octets())
    }
}

impl From<u128> for Ipv6Addr {
    fn from(ip: u128) -> Ipv6Addr {
        Ipv6Addr::from_octets(ip.to_be_bytes())
    }
}

impl fmt::Display for Ipv6Addr {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let segments = self.groups();
        match segments {
            // special cases for :: and ::1, otherwise they're formatted
            // as ::0.0.0.[01]
            [0, 0, 0, 0, 0, 0, 0, 0] => write!(fmt, "::"),
            [0, 0, 0, 0, 0, 0, 0, 1] => write!(fmt, "::1"),
            [0, 0, 0, 0, 0, 0xffff, g, h] => write!(
                fmt,
                "::ffff:{}.{}.{}.{}",
                (g >> 8) as u8,
                g as u8,
                (h >> 8) as u8,
                h as u8
            ),
            _ => {
                let (zeros_at, zeros_len) = longest_zero_run(&segments);

                if zeros_len > 1 {
                    fmt_groups(&segments[..zeros_at], fmt)?;
                    fmt.write_str("::")?;
                    fmt_groups(&segments[zeros_at + zeros_len..], fmt)
                } else {
                    fmt_groups(&segments, fmt)
                }
            }
        }
    }
}

impl fmt::Debug for Ipv6Addr {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, fmt)
    }
}

fn longest_zero_run(segments: &[u16; 8]) -> (usize, usize) {
    let mut longest_span_len = 0;
    let mut longest_span_at = 0;
    let mut cur_span_len = 0;
    let mut cur_span_at = 0;

    for (i, &seg) in segments.iter().enumerate() {
        if seg == 0 {
            if cur_span_len == 0 {
                cur_span_at = i;
            }
            cur_span_len += 1;
            if cur_span_len > longest_span_len {
                longest_span_len = cur_span_len;
                longest_span_at = cur_span_at;
            }
        } else {
            cur_span_len = 0;
        }
    }

    (longest_span_at, longest_span_len)
}

fn fmt_groups(segments: &[u16], fmt: &mut fmt::Formatter) -> fmt::Result {
    if let Some((first, rest)) = segments.split_first() {
        write!(fmt, "{:x}", first)?;
        for seg in rest {
            write!(fmt, ":{:x}", seg)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::format;

    #[test]
    fn ipv4_octets_round_trip() {
        for (a, b, c, d) in [(192, 168, 1, 2), (10, 0, 0, 1), (0, 0, 0, 0), (255, 1, 128, 7)] {
            let addr = Ipv4Addr::new(a, b, c, d);
            assert_eq!(
                (addr.addr1(), addr.addr2(), addr.addr3(), addr.addr4()),
                (a, b, c, d)
            );
            assert_eq!(addr.octets(), [a, b, c, d]);
        }
    }

    #[test]
    fn ipv4_memory_is_network_order() {
        let addr = Ipv4Addr::new(192, 168, 1, 2);
        assert_eq!(addr.raw().to_ne_bytes(), [192, 168, 1, 2]);
        assert_eq!(addr.to_host(), 0xc0a8_0102);
        assert_eq!(Ipv4Addr::from_raw(addr.raw()), addr);
        assert_eq!(Ipv4Addr::from_host(0x7f00_0001), Ipv4Addr::new(127, 0, 0, 1));
    }

    #[test]
    fn ipv4_halves_keep_wire_order() {
        let addr = Ipv4Addr::new(10, 20, 30, 40);
        let halves = addr.halves();
        assert_eq!(halves[0].to_ne_bytes(), [10, 20]);
        assert_eq!(halves[1].to_ne_bytes(), [30, 40]);
        assert_eq!(Ipv4Addr::from_halves(halves), addr);
    }

    #[test]
    fn ipv4_predicates() {
        assert!(Ipv4Addr::UNSPECIFIED.is_unspecified());
        assert!(Ipv4Addr::BROADCAST.is_broadcast());
        assert!(Ipv4Addr::new(224, 0, 0, 1).is_multicast());
        assert!(!Ipv4Addr::new(192, 168, 0, 1).is_multicast());
        assert!(Ipv4Addr::new(127, 0, 0, 1).is_loopback());
    }

    #[test]
    fn ipv6_views_agree() {
        let addr = Ipv6Addr::new(0x2001, 0x0db8, 0x1234, 0x5678, 0x9abc, 0xdef0, 0x0102, 0x0304);
        assert_eq!(
            addr.octets(),
            [
                0x20, 0x01, 0x0d, 0xb8, 0x12, 0x34, 0x56, 0x78, 0x9a, 0xbc, 0xde, 0xf0, 0x01,
                0x02, 0x03, 0x04
            ]
        );
        assert_eq!(addr.words()[0].to_ne_bytes(), [0x20, 0x01, 0x0d, 0xb8]);
        assert_eq!(addr.words()[3].to_ne_bytes(), [0x01, 0x02, 0x03, 0x04]);
        assert_eq!(addr.raw_groups()[1].to_ne_bytes(), [0x0d, 0xb8]);
        assert_eq!(addr.group(4), 0x9abc);
        assert_eq!(Ipv6Addr::from(addr.octets()), addr);
        assert_eq!(Ipv6Addr::from(addr.groups()), addr);
        assert_eq!(Ipv6Addr::from(u128::from(addr)), addr);
        assert_eq!(u128::from(addr) >> 112, 0x2001);
    }

    #[test]
    fn ipv6_predicates() {
        assert!(Ipv6Addr::UNSPECIFIED.is_unspecified());
        assert!(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 1).is_loopback());
        assert!(Ipv6Addr::new(0xff02, 0, 0, 0, 0, 0, 0, 1).is_multicast());
        assert!(Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 7).is_unicast_link_local());
        assert!(!Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 7).is_unicast_link_local());
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Ipv4Addr::new(10, 0, 0, 1)), "10.0.0.1");
        assert_eq!(format!("{}", Ipv6Addr::UNSPECIFIED), "::");
        assert_eq!(format!("{}", Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 1)), "::1");
        assert_eq!(
            format!("{}", Ipv6Addr::new(0xff02, 0, 0, 0, 0, 0, 0, 2)),
            "ff02::2"
        );
        assert_eq!(
            format!("{}", Ipv6Addr::new(0, 0, 0, 0, 0, 0xffff, 0x0a00, 0x0001)),
            "::ffff:10.0.0.1"
        );
        assert_eq!(
            format!("{}", Ipv6Addr::new(0x2001, 0xdb8, 0, 1, 2, 3, 4, 5)),
            "2001:db8:0:1:2:3:4:5"
        );
    }

    #[test]
    fn family_lengths() {
        assert_eq!(Family::Inet.header_len(), 20);
        assert_eq!(Family::Inet6.header_len(), 40);
        assert_eq!(Family::Inet6.addr_len(), 16);
        assert_eq!(Family::from_version(6), Some(Family::Inet6));
        assert_eq!(Family::from_version(5), None);
    }

    #[cfg(all(feature = "ipv4", feature = "ipv6"))]
    #[test]
    fn union_family_tag() {
        let v4 = IpAddr::from(Ipv4Addr::new(10, 0, 0, 1));
        let v6 = IpAddr::from(Ipv6Addr::UNSPECIFIED);
        assert_eq!(v4.family(), Family::Inet);
        assert_eq!(v6.family(), Family::Inet6);
        assert!(v6.is_unspecified());
        assert_ne!(v4, v6);
    }
}
