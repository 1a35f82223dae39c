//! Wire-format IP headers.
//!
//! The ingress layer hands over a raw buffer plus the protocol family it
//! was received for; [`IpHeader::new_checked`] maps the buffer onto that
//! family's layout. Nothing is validated beyond the buffer holding the fixed
//! header: version, length and checksum checks consume the extracted fields.

#[cfg(feature = "ipv4")]
pub mod ipv4;
#[cfg(feature = "ipv4")]
pub use ipv4::{FragFlags, Ipv4Fields, Ipv4Header};

#[cfg(feature = "ipv6")]
pub mod ipv6;
#[cfg(feature = "ipv6")]
pub use ipv6::{Ipv6Fields, Ipv6Header};

use crate::addr::{Family, IpAddr};
use crate::consts::{IPV4_VERSION, IPV6_VERSION, IP_VERSION_MASK};
use crate::{CodecError, CodecResult};

/// Family announced by the version bits of the first octet, if any.
///
/// A hint for callers that validate; the codec itself goes by the family it
/// is given.
pub fn sniff_family(buf: &[u8]) -> Option<Family> {
    match buf.first().map(|b| b & IP_VERSION_MASK) {
        Some(IPV4_VERSION) => Some(Family::Inet),
        Some(IPV6_VERSION) => Some(Family::Inet6),
        _ => None,
    }
}

/// A header view of the family the caller declared.
#[derive(Debug, Clone, Copy)]
pub enum IpHeader<B> {
    #[cfg(feature = "ipv4")]
    V4(Ipv4Header<B>),
    #[cfg(feature = "ipv6")]
    V6(Ipv6Header<B>),
}

impl<B: AsRef<[u8]>> IpHeader<B> {
    pub fn new_checked(family: Family, buf: B) -> CodecResult<Self> {
        match family {
            #[cfg(feature = "ipv4")]
            Family::Inet => Ok(IpHeader::V4(Ipv4Header::new_checked(buf)?)),
            #[cfg(feature = "ipv6")]
            Family::Inet6 => Ok(IpHeader::V6(Ipv6Header::new_checked(buf)?)),
            #[allow(unreachable_patterns)]
            _ => Err(CodecError::Unsupported(family)),
        }
    }

    pub fn family(&self) -> Family {
        match self {
            #[cfg(feature = "ipv4")]
            IpHeader::V4(_) => Family::Inet,
            #[cfg(feature = "ipv6")]
            IpHeader::V6(_) => Family::Inet6,
        }
    }

    /// Version bits as found in the buffer, unchecked.
    pub fn version(&self) -> u8 {
        match self {
            #[cfg(feature = "ipv4")]
            IpHeader::V4(h) => h.version(),
            #[cfg(feature = "ipv6")]
            IpHeader::V6(h) => h.version(),
        }
    }

    /// IPv4 protocol or IPv6 next header.
    pub fn protocol(&self) -> u8 {
        match self {
            #[cfg(feature = "ipv4")]
            IpHeader::V4(h) => h.protocol(),
            #[cfg(feature = "ipv6")]
            IpHeader::V6(h) => h.next_header(),
        }
    }

    /// IPv4 TTL or IPv6 hop limit.
    pub fn ttl(&self) -> u8 {
        match self {
            #[cfg(feature = "ipv4")]
            IpHeader::V4(h) => h.ttl(),
            #[cfg(feature = "ipv6")]
            IpHeader::V6(h) => h.hop_limit(),
        }
    }

    pub fn src_addr(&self) -> IpAddr {
        match self {
            #[cfg(feature = "ipv4")]
            IpHeader::V4(h) => IpAddr::V4(h.src_addr()),
            #[cfg(feature = "ipv6")]
            IpHeader::V6(h) => IpAddr::V6(h.src_addr()),
        }
    }

    pub fn dst_addr(&self) -> IpAddr {
        match self {
            #[cfg(feature = "ipv4")]
            IpHeader::V4(h) => IpAddr::V4(h.dst_addr()),
            #[cfg(feature = "ipv6")]
            IpHeader::V6(h) => IpAddr::V6(h.dst_addr()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniff() {
        assert_eq!(sniff_family(&[0x45]), Some(Family::Inet));
        assert_eq!(sniff_family(&[0x60, 0]), Some(Family::Inet6));
        assert_eq!(sniff_family(&[0x00]), None);
        assert_eq!(sniff_family(&[]), None);
    }

    #[cfg(all(feature = "ipv4", feature = "ipv6"))]
    #[test]
    fn declared_family_wins() {
        use crate::addr::{Ipv4Addr, Ipv6Addr};

        let mut buf = [0u8; 40];
        {
            let mut v6 = Ipv6Header::new_unchecked(&mut buf[..]);
            v6.set_version(6);
            v6.set_hop_limit(9);
            v6.set_next_header(17);
            v6.set_src_addr(Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 1));
        }

        let hdr = IpHeader::new_checked(Family::Inet6, &buf[..]).unwrap();
        assert_eq!(hdr.family(), Family::Inet6);
        assert_eq!(hdr.version(), 6);
        assert_eq!(hdr.ttl(), 9);
        assert_eq!(hdr.protocol(), 17);
        assert_eq!(
            hdr.src_addr(),
            IpAddr::V6(Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 1))
        );

        // same bytes read as IPv4: well formed, meaningless
        let hdr = IpHeader::new_checked(Family::Inet, &buf[..20]).unwrap();
        assert_eq!(hdr.version(), 6);
        assert_eq!(hdr.ttl(), 0xfe);
        assert_eq!(hdr.protocol(), 0x80);
        assert_eq!(hdr.src_addr(), IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    }

    #[cfg(all(feature = "ipv4", feature = "ipv6"))]
    #[test]
    fn truncated_for_declared_family() {
        let buf = [0x45u8; 30];
        assert!(IpHeader::new_checked(Family::Inet, &buf[..]).is_ok());
        assert!(matches!(
            IpHeader::new_checked(Family::Inet6, &buf[..]),
            Err(CodecError::Truncated { need: 40, have: 30, .. })
        ));
    }

    #[cfg(not(feature = "ipv6"))]
    #[test]
    fn ipv6_compiled_out() {
        let buf = [0x60u8; 40];
        assert!(matches!(
            IpHeader::new_checked(Family::Inet6, &buf[..]),
            Err(CodecError::Unsupported(Family::Inet6))
        ));
        let hdr = IpHeader::new_checked(Family::Inet, &buf[..]).unwrap();
        assert_eq!(hdr.family(), Family::Inet);
    }

    #[cfg(not(feature = "ipv4"))]
    #[test]
    fn ipv4_compiled_out() {
        let buf = [0x45u8; 40];
        assert!(matches!(
            IpHeader::new_checked(Family::Inet, &buf[..]),
            Err(CodecError::Unsupported(Family::Inet))
        ));
        let hdr = IpHeader::new_checked(Family::Inet6, &buf[..]).unwrap();
        assert_eq!(hdr.family(), Family::Inet6);
    }
}
