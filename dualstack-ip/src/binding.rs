//! Addresses a connection is bound to.

use crate::addr::NetAddr;

/// The remote address of a connection and, on multi-homed hosts, the local
/// address it was bound to.
///
/// An unspecified local address accepts traffic on every interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IpBinding<A: NetAddr> {
    #[cfg(feature = "multinic")]
    pub laddr: A,
    pub raddr: A,
}

impl<A: NetAddr> IpBinding<A> {
    /// Unbound in both directions.
    pub const UNBOUND: Self = Self {
        #[cfg(feature = "multinic")]
        laddr: A::UNSPECIFIED,
        raddr: A::UNSPECIFIED,
    };

    pub fn new(raddr: A) -> Self {
        Self {
            #[cfg(feature = "multinic")]
            laddr: A::UNSPECIFIED,
            raddr,
        }
    }

    #[cfg(feature = "multinic")]
    pub fn with_local(laddr: A, raddr: A) -> Self {
        Self { laddr, raddr }
    }

    /// Bound to a local address other than the unspecified one.
    #[cfg(feature = "multinic")]
    pub fn is_locally_bound(&self) -> bool {
        !self.laddr.is_unspecified()
    }

    #[cfg(not(feature = "multinic"))]
    pub fn is_locally_bound(&self) -> bool {
        false
    }

    /// `true` if the connection has no peer yet or `peer` is its peer.
    pub fn matches_remote(&self, peer: &A) -> bool {
        self.raddr.is_unspecified() || self.raddr == *peer
    }

    /// `true` if a packet sent to `local` belongs to this binding.
    #[cfg(feature = "multinic")]
    pub fn matches_local(&self, local: &A) -> bool {
        self.laddr.is_unspecified() || self.laddr == *local
    }

    /// Single interface: every local address belongs to the binding.
    #[cfg(not(feature = "multinic"))]
    pub fn matches_local(&self, _local: &A) -> bool {
        true
    }

    /// Both ends of an incoming packet, `src` being the peer.
    pub fn accepts(&self, src: &A, dst: &A) -> bool {
        self.matches_remote(src) && self.matches_local(dst)
    }
}

impl<A: NetAddr> Default for IpBinding<A> {
    fn default() -> Self {
        Self::UNBOUND
    }
}
