// crates/zigbee-addr/src/types.rs
use core::fmt;

// --- Reserved Short Address Values (ZigBee Spec, 3.6.5) ---

/// Network address of the ZigBee coordinator.
pub const COORDINATOR: ShortAddress = ShortAddress(0x0000);

/// Broadcast to all devices in the PAN.
pub const BROADCAST_ALL: ShortAddress = ShortAddress(0xFFFF);

/// Broadcast to all devices with macRxOnWhenIdle = TRUE.
pub const BROADCAST_RX_ON_WHEN_IDLE: ShortAddress = ShortAddress(0xFFFD);

/// Broadcast to all routers and the coordinator.
pub const BROADCAST_ROUTERS: ShortAddress = ShortAddress(0xFFFC);

/// Low-power routers only. Obsolete in ZigBee PRO but still reserved.
pub const BROADCAST_LOW_POWER_ROUTERS: ShortAddress = ShortAddress(0xFFFB);

/// First value of the reserved range. Everything from here up is either
/// reserved or a broadcast address.
pub const SHORT_ADDRESS_RESERVED_MIN: u16 = 0xFFF8;

/// An extended address of all zeroes is never assigned to a device.
pub const EXTENDED_ADDRESS_NONE: ExtendedAddress = ExtendedAddress(0);

/// An extended address of all ones is used as a wildcard.
pub const EXTENDED_ADDRESS_WILDCARD: ExtendedAddress = ExtendedAddress(u64::MAX);

/// A 16-bit network address, assigned when a node joins the mesh.
///
/// Unique only within the current network and liable to change if the node
/// rejoins or an address conflict is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShortAddress(pub u16);

impl ShortAddress {
    /// Returns true for values that name a single device.
    pub fn is_unicast(&self) -> bool {
        self.0 < SHORT_ADDRESS_RESERVED_MIN
    }

    /// Returns true for the three broadcast values defined by the network layer.
    pub fn is_broadcast(&self) -> bool {
        matches!(
            *self,
            BROADCAST_ALL | BROADCAST_RX_ON_WHEN_IDLE | BROADCAST_ROUTERS
        )
    }
}

impl From<ShortAddress> for u16 {
    fn from(addr: ShortAddress) -> Self {
        addr.0
    }
}

impl fmt::Display for ShortAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06X}", self.0)
    }
}

/// A 64-bit IEEE (EUI-64) address, fixed for the lifetime of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExtendedAddress(pub u64);

impl ExtendedAddress {
    /// Returns true unless the value is all zeroes or all ones.
    pub fn is_valid(&self) -> bool {
        *self != EXTENDED_ADDRESS_NONE && *self != EXTENDED_ADDRESS_WILDCARD
    }
}

impl From<ExtendedAddress> for u64 {
    fn from(addr: ExtendedAddress) -> Self {
        addr.0
    }
}

impl fmt::Display for ExtendedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.0.to_be_bytes();
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]
        )
    }
}

/// Which of the two address forms a value is, or which one is wanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressKind {
    Short,
    Extended,
}

/// Either form of a node address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Address {
    Short(ShortAddress),
    Extended(ExtendedAddress),
}

impl Address {
    pub fn kind(&self) -> AddressKind {
        match self {
            Address::Short(_) => AddressKind::Short,
            Address::Extended(_) => AddressKind::Extended,
        }
    }

    /// Returns true if the address names exactly one device. Broadcast,
    /// reserved and wildcard values are rejected.
    pub fn is_well_formed(&self) -> bool {
        match self {
            Address::Short(s) => s.is_unicast(),
            Address::Extended(e) => e.is_valid(),
        }
    }
}

impl From<ShortAddress> for Address {
    fn from(addr: ShortAddress) -> Self {
        Address::Short(addr)
    }
}

impl From<ExtendedAddress> for Address {
    fn from(addr: ExtendedAddress) -> Self {
        Address::Extended(addr)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::Short(s) => write!(f, "nwk {}", s),
            Address::Extended(e) => write!(f, "ieee {}", e),
        }
    }
}

/// Both addresses of one device, as proven by a successful exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressPair {
    pub short: ShortAddress,
    pub extended: ExtendedAddress,
}

impl AddressPair {
    pub fn new(short: ShortAddress, extended: ExtendedAddress) -> Self {
        Self { short, extended }
    }

    /// Returns true if `addr` is one of the two halves of this pair.
    pub fn contains(&self, addr: &Address) -> bool {
        match addr {
            Address::Short(s) => *s == self.short,
            Address::Extended(e) => *e == self.extended,
        }
    }

    /// Returns true if the two pairs share either address.
    pub(crate) fn overlaps(&self, other: &AddressPair) -> bool {
        self.short == other.short || self.extended == other.extended
    }
}

impl fmt::Display for AddressPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.short, self.extended)
    }
}
