use crate::counter::ProductionCounter;
use crate::sensor::{SensorKind, SensorSpec, AC_POWER_CHANNEL, S32_NAN};

/// Normalize a raw decoded reading for one channel.
///
/// In order: NaN substitution (the counter channel reuses the stored
/// counter, all others substitute zero), then two's-complement sign
/// recovery for signed channels. A valid reading on the counter channel
/// also updates the counter.
pub fn normalize(spec: &SensorSpec, raw: u32, counter: &mut ProductionCounter) -> i64 {
    let substituted = match spec.kind {
        SensorKind::Counter => {
            if raw == spec.nan_sentinel {
                // no valid reading: reuse the last known-good total
                return counter.value() as i64;
            }
            counter.update(u64::from(raw));
            raw
        }
        _ => {
            if raw == spec.nan_sentinel {
                0
            } else {
                raw
            }
        }
    };

    let mut value = i64::from(substituted);
    // the sentinel itself was already substituted above, so this branch only
    // sees genuine negative readings decoded as unsigned
    if spec.nan_sentinel == S32_NAN && value > i64::from(S32_NAN) {
        value -= 1_i64 << 32;
    }
    value
}

/// Format a normalized value for the channel registry.
///
/// The AC-power channel always emits `"<value>;<counter>"`. Unit-divisor
/// channels emit the plain integer; everything else emits
/// `value / divisor` with exactly `decimals` fractional digits. Pure
/// function of its inputs.
pub fn format_value(spec: &SensorSpec, value: i64, counter: &ProductionCounter) -> String {
    if spec.channel == AC_POWER_CHANNEL {
        return format!("{};{}", value, counter.value());
    }
    if spec.divisor == 1 {
        return value.to_string();
    }
    format_scaled(value, spec.divisor, spec.decimals)
}

/// Fixed-point division in pure integer arithmetic, rounding half to even.
fn format_scaled(value: i64, divisor: u32, decimals: u32) -> String {
    let negative = value < 0;
    let numerator = u128::from(value.unsigned_abs()) * 10_u128.pow(decimals);
    let divisor = u128::from(divisor);

    let mut quotient = numerator / divisor;
    let remainder = numerator % divisor;
    match (remainder * 2).cmp(&divisor) {
        std::cmp::Ordering::Greater => quotient += 1,
        std::cmp::Ordering::Equal => {
            if quotient % 2 == 1 {
                quotient += 1;
            }
        }
        std::cmp::Ordering::Less => {}
    }

    let sign = if negative && quotient != 0 { "-" } else { "" };
    if decimals == 0 {
        return format!("{sign}{quotient}");
    }
    let scale = 10_u128.pow(decimals);
    format!(
        "{sign}{}.{:0width$}",
        quotient / scale,
        quotient % scale,
        width = decimals as usize
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::{sensor_table, ChannelId, U32_NAN};

    fn spec_by_channel(channel: u8) -> SensorSpec {
        sensor_table(true, true)
            .into_iter()
            .find(|s| s.channel == ChannelId::new(channel))
            .unwrap()
    }

    #[test]
    fn counter_nan_reuses_stored_total() {
        let spec = spec_by_channel(1);
        let mut counter = ProductionCounter::new(98765);
        assert_eq!(normalize(&spec, U32_NAN, &mut counter), 98765);
        assert_eq!(counter.value(), 98765);
    }

    #[test]
    fn counter_reading_is_returned_and_stored() {
        let spec = spec_by_channel(1);
        let mut counter = ProductionCounter::new(10);
        assert_eq!(normalize(&spec, 123_456, &mut counter), 123_456);
        assert_eq!(counter.value(), 123_456);
    }

    #[test]
    fn unsigned_channel_nan_becomes_zero() {
        let spec = spec_by_channel(9); // Voltage L1, U32 sentinel
        let mut counter = ProductionCounter::default();
        assert_eq!(normalize(&spec, U32_NAN, &mut counter), 0);
    }

    #[test]
    fn signed_channel_nan_becomes_zero() {
        let spec = spec_by_channel(4); // AC power, S32 sentinel
        let mut counter = ProductionCounter::default();
        assert_eq!(normalize(&spec, S32_NAN, &mut counter), 0);
    }

    #[test]
    fn sign_recovery_on_signed_channels() {
        let spec = spec_by_channel(2); // DC power, S32 sentinel
        let mut counter = ProductionCounter::default();
        assert_eq!(normalize(&spec, 0xFFFF_FFFF, &mut counter), -1);
        assert_eq!(normalize(&spec, 0x7FFF_FFFF, &mut counter), 2_147_483_647);
        assert_eq!(normalize(&spec, 0xFFFF_FF38, &mut counter), -200);
    }

    #[test]
    fn no_sign_recovery_on_unsigned_channels() {
        let spec = spec_by_channel(9);
        let mut counter = ProductionCounter::default();
        assert_eq!(normalize(&spec, 0xFFFF_FFFE, &mut counter), 4_294_967_294);
    }

    #[test]
    fn ac_power_pairs_with_counter() {
        let spec = spec_by_channel(4);
        let counter = ProductionCounter::new(98765);
        let display = format_value(&spec, 134, &counter);
        assert_eq!(display, "134;98765");

        let fields: Vec<&str> = display.split(';').collect();
        assert_eq!(fields.len(), 2);
        assert!(fields[0].parse::<i64>().is_ok());
        assert_eq!(fields[1].parse::<u64>().unwrap(), counter.value());
    }

    #[test]
    fn ac_power_pairs_negative_values_too() {
        let spec = spec_by_channel(4);
        let counter = ProductionCounter::new(5);
        assert_eq!(format_value(&spec, -42, &counter), "-42;5");
    }

    #[test]
    fn unit_divisor_emits_plain_integer() {
        let spec = spec_by_channel(2);
        let counter = ProductionCounter::default();
        assert_eq!(format_value(&spec, -250, &counter), "-250");
        assert_eq!(format_value(&spec, 4321, &counter), "4321");
    }

    #[test]
    fn divisor_and_decimals_applied() {
        let freq = spec_by_channel(12); // divisor 100, 2 decimals
        let counter = ProductionCounter::default();
        assert_eq!(format_value(&freq, 1000, &counter), "10.00");
        assert_eq!(format_value(&freq, 4999, &counter), "49.99");

        let temp = spec_by_channel(5); // divisor 10, 1 decimal
        assert_eq!(format_value(&temp, 355, &counter), "35.5");

        let amps = spec_by_channel(19); // divisor 1000, 3 decimals
        assert_eq!(format_value(&amps, 8_125, &counter), "8.125");
    }

    #[test]
    fn zero_decimals_drops_the_point() {
        let volts = spec_by_channel(9); // divisor 100, 0 decimals
        let counter = ProductionCounter::default();
        assert_eq!(format_value(&volts, 23_012, &counter), "230");
    }

    #[test]
    fn rounding_is_half_to_even() {
        assert_eq!(format_scaled(125, 10, 1), "12.5");
        assert_eq!(format_scaled(1250, 100, 1), "12.5");
        assert_eq!(format_scaled(1250, 1000, 2), "1.25");
        // half cases round to the even neighbour
        assert_eq!(format_scaled(125, 100, 1), "1.2");
        assert_eq!(format_scaled(135, 100, 1), "1.4");
        // and the same for negative values
        assert_eq!(format_scaled(-125, 100, 1), "-1.2");
        assert_eq!(format_scaled(-126, 100, 1), "-1.3");
    }

    #[test]
    fn negative_rounding_to_zero_has_no_sign() {
        assert_eq!(format_scaled(-4, 1000, 2), "0.00");
    }

    #[test]
    fn formatting_is_idempotent() {
        let spec = spec_by_channel(12);
        let counter = ProductionCounter::new(7);
        assert_eq!(
            format_value(&spec, 4_999, &counter),
            format_value(&spec, 4_999, &counter)
        );
    }
}
