//! The fixed IPv6 header (40 bytes).
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |Version| Traffic Class |           Flow Label                  |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |         Payload Length        |  Next Header  |   Hop Limit   |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                    Source Address (128 bits)                  |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                 Destination Address (128 bits)                |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```

use core::ops::Range;

use crate::addr::{Family, Ipv6Addr};
use crate::consts::IPV6_HDRLEN;
use crate::log;
use crate::{CodecError, CodecResult};

mod field {
    use core::ops::Range;

    // version (4) + traffic class, high nibble
    pub const VTC: usize = 0;
    // traffic class, low nibble + flow label, high nibble
    pub const TCF: usize = 1;
    pub const FLOW: usize = 2;
    pub const LEN: usize = 4;
    pub const PROTO: usize = 6;
    pub const TTL: usize = 7;
    pub const SRC: Range<usize> = 8..24;
    pub const DST: Range<usize> = 24..40;
}

pub const FLOW_LABEL_MASK: u32 = 0x000f_ffff;

/// A view of an IPv6 header at the start of `B`, accessed octet-wise.
#[derive(Debug, Clone, Copy)]
pub struct Ipv6Header<B> {
    buf: B,
}

impl<B: AsRef<[u8]>> Ipv6Header<B> {
    pub fn new_unchecked(buf: B) -> Self {
        Self { buf }
    }

    /// Wraps `buf` if it can hold the 40-byte fixed header. Extension
    /// headers and payload are left to the caller.
    pub fn new_checked(buf: B) -> CodecResult<Self> {
        let have = buf.as_ref().len();
        if have < IPV6_HDRLEN {
            log::debug!("IPv6 header truncated: {} of {} bytes", have, IPV6_HDRLEN);
            return Err(CodecError::Truncated {
                family: Family::Inet6,
                need: IPV6_HDRLEN,
                have,
            });
        }
        Ok(Self { buf })
    }

    pub fn into_inner(self) -> B {
        self.buf
    }

    fn read_addr(&self, at: Range<usize>) -> Ipv6Addr {
        let mut octets = [0u8; 16];
        octets.copy_from_slice(&self.buf.as_ref()[at]);
        Ipv6Addr::from_octets(octets)
    }

    pub fn version(&self) -> u8 {
        self.buf.as_ref()[field::VTC] >> 4
    }

    pub fn traffic_class(&self) -> u8 {
        let b = self.buf.as_ref();
        (b[field::VTC] << 4) | (b[field::TCF] >> 4)
    }

    /// The 20-bit flow label.
    pub fn flow_label(&self) -> u32 {
        let b = self.buf.as_ref();
        ((b[field::TCF] & 0x0f) as u32) << 16
            | (b[field::FLOW] as u32) << 8
            | b[field::FLOW + 1] as u32
    }

    /// Declared payload length, extension headers included. Not compared
    /// against the buffer.
    pub fn payload_len(&self) -> u16 {
        let b = self.buf.as_ref();
        u16::from_be_bytes([b[field::LEN], b[field::LEN + 1]])
    }

    pub fn next_header(&self) -> u8 {
        self.buf.as_ref()[field::PROTO]
    }

    pub fn hop_limit(&self) -> u8 {
        self.buf.as_ref()[field::TTL]
    }

    pub fn src_addr(&self) -> Ipv6Addr {
        self.read_addr(field::SRC)
    }

    pub fn dst_addr(&self) -> Ipv6Addr {
        self.read_addr(field::DST)
    }

    pub fn src_eq(&self, addr: &Ipv6Addr) -> bool {
        self.buf.as_ref()[field::SRC] == addr.octets()
    }

    pub fn dst_eq(&self, addr: &Ipv6Addr) -> bool {
        self.buf.as_ref()[field::DST] == addr.octets()
    }

    pub fn fields(&self) -> Ipv6Fields {
        Ipv6Fields {
            traffic_class: self.traffic_class(),
            flow_label: self.flow_label(),
            payload_len: self.payload_len(),
            next_header: self.next_header(),
            hop_limit: self.hop_limit(),
            src_addr: self.src_addr(),
            dst_addr: self.dst_addr(),
        }
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> Ipv6Header<B> {
    pub fn set_version(&mut self, version: u8) {
        let b = self.buf.as_mut();
        b[field::VTC] = (b[field::VTC] & 0x0f) | (version << 4);
    }

    pub fn set_traffic_class(&mut self, tc: u8) {
        let b = self.buf.as_mut();
        b[field::VTC] = (b[field::VTC] & 0xf0) | (tc >> 4);
        b[field::TCF] = (b[field::TCF] & 0x0f) | (tc << 4);
    }

    /// Bits above the low 20 are dropped.
    pub fn set_flow_label(&mut self, label: u32) {
        let label = label & FLOW_LABEL_MASK;
        let b = self.buf.as_mut();
        b[field::TCF] = (b[field::TCF] & 0xf0) | (label >> 16) as u8;
        b[field::FLOW] = (label >> 8) as u8;
        b[field::FLOW + 1] = label as u8;
    }

    pub fn set_payload_len(&mut self, len: u16) {
        self.buf.as_mut()[field::LEN..field::LEN + 2].copy_from_slice(&len.to_be_bytes());
    }

    pub fn set_next_header(&mut self, proto: u8) {
        self.buf.as_mut()[field::PROTO] = proto;
    }

    pub fn set_hop_limit(&mut self, ttl: u8) {
        self.buf.as_mut()[field::TTL] = ttl;
    }

    pub fn set_src_addr(&mut self, addr: Ipv6Addr) {
        self.buf.as_mut()[field::SRC].copy_from_slice(&addr.octets());
    }

    pub fn set_dst_addr(&mut self, addr: Ipv6Addr) {
        self.buf.as_mut()[field::DST].copy_from_slice(&addr.octets());
    }
}

/// The fixed IPv6 header fields; the version is implied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv6Fields {
    pub traffic_class: u8,
    pub flow_label: u32,
    pub payload_len: u16,
    pub next_header: u8,
    pub hop_limit: u8,
    pub src_addr: Ipv6Addr,
    pub dst_addr: Ipv6Addr,
}

impl Ipv6Fields {
    /// Writes every field into `header`, version 6 included.
    pub fn emit<B: AsRef<[u8]> + AsMut<[u8]>>(&self, header: &mut Ipv6Header<B>) {
        header.set_version(6);
        header.set_traffic_class(self.traffic_class);
        header.set_flow_label(self.flow_label);
        header.set_payload_len(self.payload_len);
        header.set_next_header(self.next_header);
        header.set_hop_limit(self.hop_limit);
        header.set_src_addr(self.src_addr);
        header.set_dst_addr(self.dst_addr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::IP_PROTO_ICMP6;

    // fe80::1 -> ff02::1, ICMPv6, traffic class 0xab, flow 0xcdef1
    static PACKET: [u8; 40] = [
        0x6a, 0xbc, 0xde, 0xf1, 0x00, 0x20, 0x3a, 0xff, 0xfe, 0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0x01, 0xff, 0x02, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x01,
    ];

    #[test]
    fn parse_fields() {
        let hdr = Ipv6Header::new_checked(&PACKET[..]).unwrap();
        assert_eq!(hdr.version(), 6);
        assert_eq!(hdr.traffic_class(), 0xab);
        assert_eq!(hdr.flow_label(), 0xcdef1);
        assert_eq!(hdr.payload_len(), 32);
        assert_eq!(hdr.next_header(), IP_PROTO_ICMP6);
        assert_eq!(hdr.hop_limit(), 255);
        assert_eq!(hdr.src_addr(), Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 1));
        assert_eq!(hdr.dst_addr(), Ipv6Addr::new(0xff02, 0, 0, 0, 0, 0, 0, 1));
        assert!(hdr.src_eq(&Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 1)));
        assert!(!hdr.dst_eq(&Ipv6Addr::new(0xff02, 0, 0, 0, 0, 0, 0, 2)));
    }

    #[test]
    fn truncated() {
        assert_eq!(
            Ipv6Header::new_checked(&PACKET[..39]).unwrap_err(),
            CodecError::Truncated {
                family: Family::Inet6,
                need: 40,
                have: 39
            }
        );
    }

    #[test]
    fn unaligned_buffer() {
        let mut storage = [0u8; 41];
        storage[1..].copy_from_slice(&PACKET);
        let hdr = Ipv6Header::new_checked(&storage[1..]).unwrap();
        assert_eq!(hdr.flow_label(), 0xcdef1);
        assert_eq!(hdr.dst_addr(), Ipv6Addr::new(0xff02, 0, 0, 0, 0, 0, 0, 1));
    }

    #[test]
    fn setters_do_not_bleed() {
        let mut bytes = PACKET;
        let mut hdr = Ipv6Header::new_unchecked(&mut bytes[..]);
        hdr.set_traffic_class(0x12);
        assert_eq!(hdr.version(), 6);
        assert_eq!(hdr.flow_label(), 0xcdef1);
        assert_eq!(hdr.traffic_class(), 0x12);

        hdr.set_flow_label(0xfff_ffff);
        assert_eq!(hdr.flow_label(), 0xfffff);
        assert_eq!(hdr.traffic_class(), 0x12);

        hdr.set_version(4);
        assert_eq!(hdr.traffic_class(), 0x12);
        assert_eq!(hdr.version(), 4);
    }

    #[test]
    fn fields_are_lossless() {
        let fields = Ipv6Header::new_unchecked(&PACKET[..]).fields();
        let mut out = [0u8; 40];
        fields.emit(&mut Ipv6Header::new_unchecked(&mut out[..]));
        assert_eq!(out, PACKET);
    }
}
