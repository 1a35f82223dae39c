//! Per-family IP layer counters.
//!
//! Counters wrap on overflow. The protocol engines own one set per family and
//! bump it through `record`; nothing here synchronizes.

pub type StatCounter = u32;

/// Events counted at the IPv4 layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ipv4Event {
    Dropped,
    Received,
    Sent,
    /// Bad version or header length.
    VhlError,
    /// Fragment that could not be reassembled.
    FragError,
    ChecksumError,
    /// Unsupported upper-layer protocol.
    ProtoError,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ipv4Stats {
    pub drop: StatCounter,
    pub recv: StatCounter,
    pub sent: StatCounter,
    pub vhlerr: StatCounter,
    pub fragerr: StatCounter,
    pub chkerr: StatCounter,
    pub protoerr: StatCounter,
}

impl Ipv4Stats {
    pub const fn new() -> Self {
        Self {
            drop: 0,
            recv: 0,
            sent: 0,
            vhlerr: 0,
            fragerr: 0,
            chkerr: 0,
            protoerr: 0,
        }
    }

    pub fn record(&mut self, event: Ipv4Event) {
        let counter = match event {
            Ipv4Event::Dropped => &mut self.drop,
            Ipv4Event::Received => &mut self.recv,
            Ipv4Event::Sent => &mut self.sent,
            Ipv4Event::VhlError => &mut self.vhlerr,
            Ipv4Event::FragError => &mut self.fragerr,
            Ipv4Event::ChecksumError => &mut self.chkerr,
            Ipv4Event::ProtoError => &mut self.protoerr,
        };
        *counter = counter.wrapping_add(1);
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Events counted at the IPv6 layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ipv6Event {
    Dropped,
    Received,
    Sent,
    VhlError,
    ProtoError,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ipv6Stats {
    pub drop: StatCounter,
    pub recv: StatCounter,
    pub sent: StatCounter,
    pub vhlerr: StatCounter,
    pub protoerr: StatCounter,
}

impl Ipv6Stats {
    pub const fn new() -> Self {
        Self {
            drop: 0,
            recv: 0,
            sent: 0,
            vhlerr: 0,
            protoerr: 0,
        }
    }

    pub fn record(&mut self, event: Ipv6Event) {
        let counter = match event {
            Ipv6Event::Dropped => &mut self.drop,
            Ipv6Event::Received => &mut self.recv,
            Ipv6Event::Sent => &mut self.sent,
            Ipv6Event::VhlError => &mut self.vhlerr,
            Ipv6Event::ProtoError => &mut self.protoerr,
        };
        *counter = counter.wrapping_add(1);
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipv4_counts() {
        let mut stats = Ipv4Stats::new();
        stats.record(Ipv4Event::Received);
        stats.record(Ipv4Event::Received);
        stats.record(Ipv4Event::ChecksumError);
        stats.record(Ipv4Event::Dropped);
        assert_eq!(stats.recv, 2);
        assert_eq!(stats.chkerr, 1);
        assert_eq!(stats.drop, 1);
        assert_eq!(stats.sent, 0);

        stats.reset();
        assert_eq!(stats, Ipv4Stats::default());
    }

    #[test]
    fn ipv6_counts_wrap() {
        let mut stats = Ipv6Stats {
            sent: StatCounter::MAX,
            ..Ipv6Stats::new()
        };
        stats.record(Ipv6Event::Sent);
        stats.record(Ipv6Event::ProtoError);
        assert_eq!(stats.sent, 0);
        assert_eq!(stats.protoerr, 1);
    }
}
