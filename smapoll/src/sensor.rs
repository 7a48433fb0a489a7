/// NaN sentinel for unsigned 32-bit channels
pub const U32_NAN: u32 = 0xFFFF_FFFF;
/// NaN sentinel for signed 32-bit channels
pub const S32_NAN: u32 = 0x8000_0000;

/// Register address of the device serial number, read once at startup
pub const SERIAL_NUMBER_ADDRESS: u16 = 30057;

/// Channel carrying the lifetime production counter
pub const PRODUCTION_CHANNEL: ChannelId = ChannelId::new(1);
/// Channel whose display string pairs AC power with the lifetime counter
pub const AC_POWER_CHANNEL: ChannelId = ChannelId::new(4);

/// Stable channel identifier, the join key against the external registry.
///
/// Type-safe wrapper around `u8`, unique per sensor and stable across
/// restarts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChannelId {
    /// underlying raw value
    pub value: u8,
}

impl ChannelId {
    /// create a [ChannelId] from a raw value
    pub const fn new(value: u8) -> Self {
        ChannelId { value }
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Closed set of channel kinds.
///
/// Each variant carries the registry-creation parameters it needs (see
/// [`crate::registry::DisplayClass`]); adding a kind is a compile-time
/// checked exercise because every mapping is an exhaustive match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SensorKind {
    /// the lifetime production counter
    Counter,
    /// signed instantaneous power
    SignedPower,
    /// current in amperes
    Current,
    /// percentage, e.g. battery state of charge
    Percentage,
    /// composite widget with a custom display unit
    CustomUnit(&'static str),
    /// any other named registry kind
    Generic(&'static str),
}

/// Static description of one measurement channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SensorSpec {
    /// register start address; a 32-bit value spans `[address, address + 1]`
    pub address: u16,
    /// stable identifier in the external channel registry
    pub channel: ChannelId,
    /// human-readable channel name, used at registry creation
    pub name: &'static str,
    /// positive scale factor applied before display
    pub divisor: u32,
    /// fractional digits emitted when `divisor != 1`
    pub decimals: u32,
    /// bit pattern meaning "no valid reading"; also selects signedness
    pub nan_sentinel: u32,
    /// output representation tag
    pub kind: SensorKind,
}

impl SensorSpec {
    const fn new(
        address: u16,
        channel: u8,
        divisor: u32,
        decimals: u32,
        nan_sentinel: u32,
        name: &'static str,
        kind: SensorKind,
    ) -> Self {
        SensorSpec {
            address,
            channel: ChannelId::new(channel),
            name,
            divisor,
            decimals,
            nan_sentinel,
            kind,
        }
    }

    /// whether this channel is a signed 32-bit quantity
    pub fn is_signed(&self) -> bool {
        self.nan_sentinel == S32_NAN
    }
}

const BASE_SENSORS: &[SensorSpec] = &[
    SensorSpec::new(30529, 1, 1, 1, U32_NAN, "Solar Production", SensorKind::Counter),
    SensorSpec::new(30773, 2, 1, 1, S32_NAN, "DC Power A", SensorKind::SignedPower),
    SensorSpec::new(30961, 3, 1, 1, S32_NAN, "DC Power B", SensorKind::SignedPower),
    SensorSpec::new(30775, 4, 1, 1, S32_NAN, "AC Power", SensorKind::Generic("kWh")),
    SensorSpec::new(30953, 5, 10, 1, S32_NAN, "Temperature", SensorKind::Generic("Temperature")),
];

const EXTENDED_SENSORS: &[SensorSpec] = &[
    SensorSpec::new(30777, 6, 1, 1, S32_NAN, "Power L1", SensorKind::SignedPower),
    SensorSpec::new(30779, 7, 1, 1, S32_NAN, "Power L2", SensorKind::SignedPower),
    SensorSpec::new(30781, 8, 1, 1, S32_NAN, "Power L3", SensorKind::SignedPower),
    SensorSpec::new(30783, 9, 100, 0, U32_NAN, "Voltage L1", SensorKind::Generic("Voltage")),
    SensorSpec::new(30785, 10, 100, 0, U32_NAN, "Voltage L2", SensorKind::Generic("Voltage")),
    SensorSpec::new(30787, 11, 100, 0, U32_NAN, "Voltage L3", SensorKind::Generic("Voltage")),
    SensorSpec::new(30803, 12, 100, 2, U32_NAN, "Grid frequency", SensorKind::CustomUnit("Hz")),
    SensorSpec::new(30807, 13, 1, 0, S32_NAN, "Reactive power L1", SensorKind::CustomUnit("VAr")),
    SensorSpec::new(30809, 14, 1, 0, S32_NAN, "Reactive power L2", SensorKind::CustomUnit("VAr")),
    SensorSpec::new(30811, 15, 1, 0, S32_NAN, "Reactive power L3", SensorKind::CustomUnit("VAr")),
    SensorSpec::new(30815, 16, 1, 0, S32_NAN, "Apparent power L1", SensorKind::CustomUnit("VA")),
    SensorSpec::new(30817, 17, 1, 0, S32_NAN, "Apparent power L2", SensorKind::CustomUnit("VA")),
    SensorSpec::new(30819, 18, 1, 0, S32_NAN, "Apparent power L3", SensorKind::CustomUnit("VA")),
    SensorSpec::new(30769, 19, 1000, 3, S32_NAN, "Current String A", SensorKind::Current),
    SensorSpec::new(30957, 20, 1000, 3, S32_NAN, "Current String B", SensorKind::Current),
    SensorSpec::new(30771, 21, 100, 0, S32_NAN, "Voltage String A", SensorKind::Generic("Voltage")),
    SensorSpec::new(30959, 22, 100, 0, S32_NAN, "Voltage String B", SensorKind::Generic("Voltage")),
];

const BATTERY_SENSORS: &[SensorSpec] = &[
    SensorSpec::new(30845, 23, 1, 0, U32_NAN, "Battery state of charge", SensorKind::Percentage),
    SensorSpec::new(30849, 24, 10, 1, S32_NAN, "Battery temperature", SensorKind::Generic("Temperature")),
    SensorSpec::new(31393, 25, 1, 0, U32_NAN, "Battery charge power", SensorKind::SignedPower),
    SensorSpec::new(31395, 26, 1, 0, U32_NAN, "Battery discharge power", SensorKind::SignedPower),
];

/// Build the active sensor table.
///
/// The base set is always present; the extended grid/string channels and the
/// battery channels are opt-in.
pub fn sensor_table(extended: bool, battery: bool) -> Vec<SensorSpec> {
    let mut specs = BASE_SENSORS.to_vec();
    if extended {
        specs.extend_from_slice(EXTENDED_SENSORS);
    }
    if battery {
        specs.extend_from_slice(BATTERY_SENSORS);
    }
    specs
}
