//! Bus fingerprint observed at session start.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Address of a message on a specific bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignalAddress {
    pub bus: u8,
    pub address: u32,
}

/// Pedal interceptor feedback message.
pub const GAS_INTERCEPTOR: SignalAddress = SignalAddress {
    bus: 0,
    address: 0x201,
};

/// Message addresses seen on each bus, with their payload lengths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    buses: BTreeMap<u8, BTreeMap<u32, u8>>,
}

impl Fingerprint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(mut self, bus: u8, address: u32, len: u8) -> Self {
        self.observe(bus, address, len);
        self
    }

    pub fn observe(&mut self, bus: u8, address: u32, len: u8) {
        self.buses.entry(bus).or_default().insert(address, len);
    }

    pub fn has(&self, bus: u8, address: u32) -> bool {
        self.buses
            .get(&bus)
            .is_some_and(|messages| messages.contains_key(&address))
    }

    pub fn contains(&self, signal: SignalAddress) -> bool {
        self.has(signal.bus, signal.address)
    }

    /// Observed addresses on `bus`, ascending.
    pub fn addresses(&self, bus: u8) -> impl Iterator<Item = u32> + '_ {
        self.buses
            .get(&bus)
            .into_iter()
            .flat_map(|messages| messages.keys().copied())
    }

    pub fn is_empty(&self) -> bool {
        self.buses.values().all(BTreeMap::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fingerprint() {
        let fp = Fingerprint::new();
        assert!(fp.is_empty());
        assert!(!fp.contains(GAS_INTERCEPTOR));
        assert_eq!(fp.addresses(0).count(), 0);
    }

    #[test]
    fn test_interceptor_only_on_its_bus() {
        let fp = Fingerprint::new().with_message(2, 0x201, 6);
        assert!(fp.has(2, 0x201));
        assert!(!fp.contains(GAS_INTERCEPTOR));
    }

    #[test]
    fn test_addresses_sorted() {
        let fp = Fingerprint::new()
            .with_message(0, 0x3F1, 8)
            .with_message(0, 0x0C9, 8)
            .with_message(0, 0x201, 6);
        let addrs: Vec<u32> = fp.addresses(0).collect();
        assert_eq!(addrs, vec![0x0C9, 0x201, 0x3F1]);
    }

    #[test]
    fn test_json_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let fp = Fingerprint::new().with_message(0, 0x201, 6);
        let json = serde_json::to_string(&fp)?;
        let back: Fingerprint = serde_json::from_str(&json)?;
        assert_eq!(fp, back);
        Ok(())
    }
}
