//! The IPv4 header.
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |Version|  IHL  |Type of Service|          Total Length         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |         Identification        |Flags|      Fragment Offset    |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |  Time to Live |    Protocol   |         Header Checksum       |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                       Source Address                          |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                    Destination Address                        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```

use bitflags::bitflags;
use net_shim::{htons, ntohs};

use crate::addr::{Family, Ipv4Addr};
use crate::consts::*;
use crate::log;
use crate::{CodecError, CodecResult};

mod field {
    use core::ops::Range;

    pub const VHL: usize = 0;
    pub const TOS: usize = 1;
    pub const LEN: usize = 2;
    pub const IPID: usize = 4;
    pub const IPOFFSET: usize = 6;
    pub const TTL: usize = 8;
    pub const PROTO: usize = 9;
    pub const CHKSUM: usize = 10;
    pub const SRC: Range<usize> = 12..16;
    pub const DST: Range<usize> = 16..20;
}

bitflags! {
    /// Flag bits of the flags + fragment offset field.
    pub struct FragFlags: u16 {
        const RESERVED = IP_FLAG_RESERVED;
        const DONT_FRAGMENT = IP_FLAG_DONTFRAG;
        const MORE_FRAGMENTS = IP_FLAG_MOREFRAGS;
    }
}

/// A view of an IPv4 header at the start of `B`.
///
/// Every multi-byte field is read and written one octet at a time, so the
/// buffer may start at any offset. The view never checks what it reads.
#[derive(Debug, Clone, Copy)]
pub struct Ipv4Header<B> {
    buf: B,
}

impl<B: AsRef<[u8]>> Ipv4Header<B> {
    /// Wraps `buf` without looking at it; accessors panic on a buffer
    /// shorter than [`IPV4_HDRLEN`].
    pub fn new_unchecked(buf: B) -> Self {
        Self { buf }
    }

    /// Wraps `buf` if it can hold the fixed header.
    pub fn new_checked(buf: B) -> CodecResult<Self> {
        let have = buf.as_ref().len();
        if have < IPV4_HDRLEN {
            log::debug!("IPv4 header truncated: {} of {} bytes", have, IPV4_HDRLEN);
            return Err(CodecError::Truncated {
                family: Family::Inet,
                need: IPV4_HDRLEN,
                have,
            });
        }
        Ok(Self { buf })
    }

    pub fn into_inner(self) -> B {
        self.buf
    }

    #[inline]
    fn read_u16(&self, at: usize) -> u16 {
        let b = self.buf.as_ref();
        u16::from_be_bytes([b[at], b[at + 1]])
    }

    #[inline]
    fn read_addr(&self, at: core::ops::Range<usize>) -> Ipv4Addr {
        let b = &self.buf.as_ref()[at];
        Ipv4Addr::from_octets([b[0], b[1], b[2], b[3]])
    }

    /// Version and header length octet, unsplit.
    pub fn vhl(&self) -> u8 {
        self.buf.as_ref()[field::VHL]
    }

    pub fn version(&self) -> u8 {
        self.vhl() >> 4
    }

    /// Header length field, in 32-bit words.
    pub fn ihl(&self) -> u8 {
        self.vhl() & 0x0f
    }

    /// Declared header length in bytes.
    pub fn header_len(&self) -> usize {
        self.ihl() as usize * 4
    }

    pub fn tos(&self) -> u8 {
        self.buf.as_ref()[field::TOS]
    }

    /// Declared total length. Not compared against the buffer.
    pub fn total_len(&self) -> u16 {
        self.read_u16(field::LEN)
    }

    pub fn ident(&self) -> u16 {
        self.read_u16(field::IPID)
    }

    /// The whole 16-bit flags + fragment offset field.
    pub fn frag_field(&self) -> u16 {
        self.read_u16(field::IPOFFSET)
    }

    pub fn flags(&self) -> FragFlags {
        FragFlags::from_bits_truncate(self.frag_field())
    }

    /// Fragment offset in 8-byte units.
    pub fn frag_offset(&self) -> u16 {
        self.frag_field() & IP_FRAG_OFFSET_MASK
    }

    pub fn ttl(&self) -> u8 {
        self.buf.as_ref()[field::TTL]
    }

    pub fn protocol(&self) -> u8 {
        self.buf.as_ref()[field::PROTO]
    }

    /// The checksum word exactly as it sits in memory (network order), for
    /// one's complement sums that run over raw 16-bit words.
    pub fn checksum_raw(&self) -> u16 {
        let b = self.buf.as_ref();
        u16::from_ne_bytes([b[field::CHKSUM], b[field::CHKSUM + 1]])
    }

    pub fn checksum(&self) -> u16 {
        ntohs(self.checksum_raw())
    }

    pub fn src_addr(&self) -> Ipv4Addr {
        self.read_addr(field::SRC)
    }

    pub fn dst_addr(&self) -> Ipv4Addr {
        self.read_addr(field::DST)
    }

    pub fn src_eq(&self, addr: &Ipv4Addr) -> bool {
        self.src_addr() == *addr
    }

    pub fn dst_eq(&self, addr: &Ipv4Addr) -> bool {
        self.dst_addr() == *addr
    }

    /// Copies every fixed field out of the buffer.
    pub fn fields(&self) -> Ipv4Fields {
        Ipv4Fields {
            vhl: self.vhl(),
            tos: self.tos(),
            total_len: self.total_len(),
            ident: self.ident(),
            frag_field: self.frag_field(),
            ttl: self.ttl(),
            protocol: self.protocol(),
            checksum: self.checksum(),
            src_addr: self.src_addr(),
            dst_addr: self.dst_addr(),
        }
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> Ipv4Header<B> {
    #[inline]
    fn write_u16(&mut self, at: usize, value: u16) {
        self.buf.as_mut()[at..at + 2].copy_from_slice(&value.to_be_bytes());
    }

    pub fn set_vhl(&mut self, vhl: u8) {
        self.buf.as_mut()[field::VHL] = vhl;
    }

    pub fn set_version(&mut self, version: u8) {
        let vhl = (self.vhl() & 0x0f) | (version << 4);
        self.set_vhl(vhl);
    }

    pub fn set_ihl(&mut self, ihl: u8) {
        let vhl = (self.vhl() & 0xf0) | (ihl & 0x0f);
        self.set_vhl(vhl);
    }

    pub fn set_tos(&mut self, tos: u8) {
        self.buf.as_mut()[field::TOS] = tos;
    }

    pub fn set_total_len(&mut self, len: u16) {
        self.write_u16(field::LEN, len);
    }

    pub fn set_ident(&mut self, ident: u16) {
        self.write_u16(field::IPID, ident);
    }

    pub fn set_frag_field(&mut self, value: u16) {
        self.write_u16(field::IPOFFSET, value);
    }

    /// Writes flags and offset together; offset bits above 13 are dropped.
    pub fn set_frag(&mut self, flags: FragFlags, offset: u16) {
        self.set_frag_field(flags.bits() | (offset & IP_FRAG_OFFSET_MASK));
    }

    pub fn set_ttl(&mut self, ttl: u8) {
        self.buf.as_mut()[field::TTL] = ttl;
    }

    pub fn set_protocol(&mut self, protocol: u8) {
        self.buf.as_mut()[field::PROTO] = protocol;
    }

    pub fn set_checksum_raw(&mut self, raw: u16) {
        self.buf.as_mut()[field::CHKSUM..field::CHKSUM + 2].copy_from_slice(&raw.to_ne_bytes());
    }

    pub fn set_checksum(&mut self, checksum: u16) {
        self.set_checksum_raw(htons(checksum));
    }

    pub fn set_src_addr(&mut self, addr: Ipv4Addr) {
        self.buf.as_mut()[field::SRC].copy_from_slice(&addr.octets());
    }

    pub fn set_dst_addr(&mut self, addr: Ipv4Addr) {
        self.buf.as_mut()[field::DST].copy_from_slice(&addr.octets());
    }
}

/// The fixed IPv4 header fields as plain values (host order).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Fields {
    pub vhl: u8,
    pub tos: u8,
    pub total_len: u16,
    pub ident: u16,
    pub frag_field: u16,
    pub ttl: u8,
    pub protocol: u8,
    pub checksum: u16,
    pub src_addr: Ipv4Addr,
    pub dst_addr: Ipv4Addr,
}

impl Ipv4Fields {
    /// Writes every field into `header`.
    pub fn emit<B: AsRef<[u8]> + AsMut<[u8]>>(&self, header: &mut Ipv4Header<B>) {
        header.set_vhl(self.vhl);
        header.set_tos(self.tos);
        header.set_total_len(self.total_len);
        header.set_ident(self.ident);
        header.set_frag_field(self.frag_field);
        header.set_ttl(self.ttl);
        header.set_protocol(self.protocol);
        header.set_checksum(self.checksum);
        header.set_src_addr(self.src_addr);
        header.set_dst_addr(self.dst_addr);
    }
}
