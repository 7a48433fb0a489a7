use crate::error::PersistedStateParseError;

/// Last known-good value of the lifetime production channel.
///
/// The counter is recovered once at startup from the AC-power channel's
/// stored `"<acPower>;<total>"` string and updated in memory every time the
/// production channel yields a valid reading. A NaN reading reuses the last
/// value instead of resetting it, so the counter never regresses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProductionCounter {
    value: u64,
}

impl ProductionCounter {
    /// create a counter with a known starting value
    pub const fn new(value: u64) -> Self {
        ProductionCounter { value }
    }

    /// Recover the counter from a stored display string.
    ///
    /// The stored format is `"<acPower>;<total>"`; the second field is
    /// parsed as a float and truncated, matching the format emitted for the
    /// AC-power channel.
    pub fn recover(stored: &str) -> Result<Self, PersistedStateParseError> {
        let err = || PersistedStateParseError {
            stored: stored.to_string(),
        };
        let field = stored.split(';').nth(1).ok_or_else(err)?;
        let parsed: f64 = field.trim().parse().map_err(|_| err())?;
        if !parsed.is_finite() || parsed < 0.0 {
            return Err(err());
        }
        Ok(ProductionCounter {
            value: parsed as u64,
        })
    }

    /// current counter value
    pub fn value(&self) -> u64 {
        self.value
    }

    /// store a new known-good value
    pub fn update(&mut self, value: u64) {
        self.value = value;
    }
}
