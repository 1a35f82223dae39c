//! Host <-> network byte order conversion.
//!
//! Multi-byte IP fields travel big-endian. Whether a conversion swaps bytes
//! is decided once, from the target's endianness.

cfg_if! {
    if #[cfg(target_endian = "big")] {
        /// `true` when the host already stores integers in network order.
        pub const HOST_BIG_ENDIAN: bool = true;

        #[inline(always)]
        pub const fn htons(v: u16) -> u16 {
            v
        }

        #[inline(always)]
        pub const fn htonl(v: u32) -> u32 {
            v
        }
    } else {
        /// `true` when the host already stores integers in network order.
        pub const HOST_BIG_ENDIAN: bool = false;

        #[inline(always)]
        pub const fn htons(v: u16) -> u16 {
            v.swap_bytes()
        }

        #[inline(always)]
        pub const fn htonl(v: u32) -> u32 {
            v.swap_bytes()
        }
    }
}

/// Network to host order, 16 bits. The conversion is its own inverse.
#[inline(always)]
pub const fn ntohs(v: u16) -> u16 {
    htons(v)
}

/// Network to host order, 32 bits.
#[inline(always)]
pub const fn ntohl(v: u32) -> u32 {
    htonl(v)
}
