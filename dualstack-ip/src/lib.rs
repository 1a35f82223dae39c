#![no_std]
//! Address and header layer of a small dual-stack IP implementation.
//!
//! Addresses are value types held in network byte order. Header views read
//! and write fields octet by octet over caller-owned buffers, and never
//! validate what they read: version, length and checksum checks belong to
//! the protocol engines consuming these values.

#[cfg(not(any(feature = "ipv4", feature = "ipv6")))]
compile_error!("at least one of the features `ipv4` and `ipv6` must be enabled");

#[macro_use]
extern crate cfg_if;

/// Protocol numbers, version nibbles, header sizes
pub mod consts;

/// Address value types shared by both families
pub mod addr;
pub use addr::{Family, IpAddr, Ipv4Addr, Ipv6Addr, NetAddr};

/// Equality, netmask and prefix comparison
pub mod relations;

/// IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`)
pub mod mapped;
pub use mapped::{is_ipv4_mapped, map_ipv4, unmap_ipv4};

/// Wire-format header views
pub mod header;

pub mod binding;
pub use binding::IpBinding;

/// Process-wide constant addresses
pub mod well_known;

#[cfg(feature = "statistics")]
pub mod stats;

pub use net_shim::log;

/// The error type of the header codec.
///
/// Addresses and relations are total; only mapping a buffer onto a header
/// layout can fail, and only because the buffer cannot hold the fixed part.
#[derive(thiserror_no_std::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    #[error("{family:?} header needs {need} bytes, buffer holds {have}")]
    Truncated {
        family: Family,
        need: usize,
        have: usize,
    },

    #[error("{0:?} support is not compiled in")]
    Unsupported(Family),
}

pub type CodecResult<T> = Result<T, CodecError>;
