use crate::sensor::{ChannelId, SensorKind};

/// Registry-creation parameters for one channel kind.
///
/// `Typed` carries the host's numeric widget type/subtype plus optional
/// display-unit metadata (opaque to the core); `Named` selects a widget by
/// its registered name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayClass {
    /// numeric widget type with optional unit options
    Typed {
        /// host widget type
        type_id: u8,
        /// host widget subtype
        subtype: u8,
        /// opaque display-unit metadata, e.g. `"1;Hz"`
        options: Option<String>,
    },
    /// widget selected by registered name
    Named(&'static str),
}

impl SensorKind {
    /// registry-creation parameters for this kind
    pub fn display_class(&self) -> DisplayClass {
        match self {
            SensorKind::Counter => DisplayClass::Typed {
                type_id: 0x71,
                subtype: 0x00,
                options: None,
            },
            SensorKind::SignedPower => DisplayClass::Named("Usage"),
            SensorKind::Current => DisplayClass::Typed {
                type_id: 243,
                subtype: 23,
                options: None,
            },
            SensorKind::Percentage => DisplayClass::Named("Percentage"),
            SensorKind::CustomUnit(unit) => DisplayClass::Typed {
                type_id: 243,
                subtype: 31,
                options: Some(format!("1;{unit}")),
            },
            SensorKind::Generic(name) => DisplayClass::Named(name),
        }
    }
}

/// Behavioral contract of the external channel registry.
///
/// The registry is addressed exclusively by [ChannelId]; `stored_value` is
/// queried once at startup to recover the persisted lifetime counter.
pub trait ChannelRegistry {
    /// whether a channel is already registered
    fn exists(&self, channel: ChannelId) -> bool;

    /// register a new channel
    fn create(&mut self, channel: ChannelId, name: &str, class: DisplayClass);

    /// push a new display string to a channel
    fn update(&mut self, channel: ChannelId, value: &str);

    /// last stored display string of a channel, if any
    fn stored_value(&self, channel: ChannelId) -> Option<String>;
}
