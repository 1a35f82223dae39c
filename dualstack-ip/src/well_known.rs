//! Well-known addresses referenced by address configuration and neighbor
//! discovery.
//!
//! Each is written once, the first time it is touched, and only read after
//! that. Stack startup calls [`init`] before any networking activity so that
//! the write never races a reader.

use lazy_static::lazy_static;

#[allow(unused_imports)]
use crate::addr::{Ipv4Addr, Ipv6Addr};
use crate::log;

lazy_static! {
    static ref IPV6_ALLONES: Ipv6Addr = Ipv6Addr::from_raw_groups([0xffff; 8]);
    static ref IPV6_ALLZEROS: Ipv6Addr = Ipv6Addr::UNSPECIFIED;
}

#[cfg(feature = "ipv4")]
lazy_static! {
    static ref IPV4_ALLONES: Ipv4Addr = Ipv4Addr::BROADCAST;
    static ref IPV4_ALLZEROS: Ipv4Addr = Ipv4Addr::UNSPECIFIED;
}

#[cfg(any(feature = "icmpv6-autoconf", feature = "icmpv6-router"))]
lazy_static! {
    static ref IPV6_ALLNODES: Ipv6Addr = Ipv6Addr::new(0xff02, 0, 0, 0, 0, 0, 0, 1);
    static ref IPV6_ALLROUTERS: Ipv6Addr = Ipv6Addr::new(0xff02, 0, 0, 0, 0, 0, 0, 2);
}

#[cfg(feature = "icmpv6-autoconf")]
lazy_static! {
    static ref IPV6_LLNETMASK: Ipv6Addr = Ipv6Addr::new(0xffff, 0xffff, 0xffff, 0xffff, 0, 0, 0, 0);
}

/// The call-once startup hook. Later calls do nothing.
pub fn init() {
    lazy_static::initialize(&IPV6_ALLONES);
    lazy_static::initialize(&IPV6_ALLZEROS);

    #[cfg(feature = "ipv4")]
    {
        lazy_static::initialize(&IPV4_ALLONES);
        lazy_static::initialize(&IPV4_ALLZEROS);
    }

    #[cfg(any(feature = "icmpv6-autoconf", feature = "icmpv6-router"))]
    {
        lazy_static::initialize(&IPV6_ALLNODES);
        lazy_static::initialize(&IPV6_ALLROUTERS);
    }

    #[cfg(feature = "icmpv6-autoconf")]
    lazy_static::initialize(&IPV6_LLNETMASK);

    log::info!("well-known IP addresses ready");
}

/// ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff
pub fn ipv6_all_ones() -> &'static Ipv6Addr {
    &IPV6_ALLONES
}

/// `::`
pub fn ipv6_all_zeros() -> &'static Ipv6Addr {
    &IPV6_ALLZEROS
}

#[cfg(feature = "ipv4")]
pub fn ipv4_all_ones() -> &'static Ipv4Addr {
    &IPV4_ALLONES
}

#[cfg(feature = "ipv4")]
pub fn ipv4_all_zeros() -> &'static Ipv4Addr {
    &IPV4_ALLZEROS
}

/// All link-local nodes, ff02::1.
#[cfg(any(feature = "icmpv6-autoconf", feature = "icmpv6-router"))]
pub fn ipv6_all_nodes() -> &'static Ipv6Addr {
    &IPV6_ALLNODES
}

/// All link-local routers, ff02::2.
#[cfg(any(feature = "icmpv6-autoconf", feature = "icmpv6-router"))]
pub fn ipv6_all_routers() -> &'static Ipv6Addr {
    &IPV6_ALLROUTERS
}

/// Netmask of a link-local address, ffff:ffff:ffff:ffff::.
#[cfg(feature = "icmpv6-autoconf")]
pub fn ipv6_ll_netmask() -> &'static Ipv6Addr {
    &IPV6_LLNETMASK
}
