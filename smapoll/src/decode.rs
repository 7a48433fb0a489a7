use crate::error::InvalidRegisterData;

/// Decode an ordered register pair `[hi, lo]` into a 32-bit unsigned value.
///
/// Byte order and word order are both big-endian, fixed by the device
/// family. Registers beyond the first pair are ignored; fewer than two is
/// [`InvalidRegisterData`].
pub fn decode_u32(registers: &[u16]) -> Result<u32, InvalidRegisterData> {
    match registers {
        [hi, lo, ..] => Ok((u32::from(*hi) << 16) | u32::from(*lo)),
        _ => Err(InvalidRegisterData {
            expected: 2,
            received: registers.len(),
        }),
    }
}
