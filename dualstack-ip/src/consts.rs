//! Consts shared by the header codec and its consumers

/// Mask selecting the version bits of the first header octet.
/// Wide enough to tell 4 from 6, which is all the stack asks of it.
pub const IP_VERSION_MASK: u8 = 0x70;
pub const IPV4_VERSION: u8 = 0x40;
pub const IPV6_VERSION: u8 = 0x60;

// values of the IPv4 protocol / IPv6 next-header field
pub const IP_PROTO_ICMP: u8 = 1;
pub const IP_PROTO_IGMP: u8 = 2;
pub const IP_PROTO_TCP: u8 = 6;
pub const IP_PROTO_UDP: u8 = 17;
pub const IP_PROTO_ICMP6: u8 = 58;

// flag bits of the 16-bit IPv4 flags + fragment offset field
pub const IP_FLAG_RESERVED: u16 = 0x8000;
pub const IP_FLAG_DONTFRAG: u16 = 0x4000;
pub const IP_FLAG_MOREFRAGS: u16 = 0x2000;
pub const IP_FRAG_OFFSET_MASK: u16 = 0x1fff;

pub const IPV4_HDRLEN: usize = 20;
pub const IPV6_HDRLEN: usize = 40;

pub const IPV4_ADDR_LEN: usize = 4;
pub const IPV6_ADDR_LEN: usize = 16;
