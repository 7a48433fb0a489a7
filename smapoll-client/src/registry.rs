//! In-process channel registry standing in for the host UI: remembers the
//! last value per channel and reports everything through `tracing`.

use std::collections::HashMap;

use tracing::info;

use smapoll::{ChannelId, ChannelRegistry, DisplayClass};

struct Channel {
    name: String,
    last_value: Option<String>,
}

#[derive(Default)]
pub(crate) struct LogRegistry {
    channels: HashMap<ChannelId, Channel>,
}

impl ChannelRegistry for LogRegistry {
    fn exists(&self, channel: ChannelId) -> bool {
        self.channels.contains_key(&channel)
    }

    fn create(&mut self, channel: ChannelId, name: &str, class: DisplayClass) {
        info!(%channel, name, ?class, "channel created");
        self.channels.insert(
            channel,
            Channel {
                name: name.to_string(),
                last_value: None,
            },
        );
    }

    fn update(&mut self, channel: ChannelId, value: &str) {
        if let Some(entry) = self.channels.get_mut(&channel) {
            info!(%channel, name = %entry.name, value, "channel update");
            entry.last_value = Some(value.to_string());
        }
    }

    fn stored_value(&self, channel: ChannelId) -> Option<String> {
        self.channels.get(&channel).and_then(|c| c.last_value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smapoll::SensorKind;

    #[test]
    fn updates_round_trip_through_stored_value() {
        let mut registry = LogRegistry::default();
        let channel = ChannelId::new(4);
        assert!(!registry.exists(channel));

        registry.create(channel, "AC Power", SensorKind::Generic("kWh").display_class());
        assert!(registry.exists(channel));
        assert_eq!(registry.stored_value(channel), None);

        registry.update(channel, "134;98765");
        assert_eq!(registry.stored_value(channel), Some("134;98765".to_string()));
    }

    #[test]
    fn updates_to_unknown_channels_are_dropped() {
        let mut registry = LogRegistry::default();
        registry.update(ChannelId::new(9), "230");
        assert_eq!(registry.stored_value(ChannelId::new(9)), None);
    }
}
