/*
 * The signal phases and operating modes, plus the fixed timing table of the
 * normal-mode cycle.
 */

/// One of the discrete states of the visual signal cycle. Night mode only
/// ever shows `Yellow`; the other two phases are unused there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SignalPhase {
    Green,
    Yellow,
    Red,
}

impl SignalPhase {
    /// The phase that follows this one in the normal-mode cycle.
    pub fn next(self) -> Self {
        match self {
            SignalPhase::Green => SignalPhase::Yellow,
            SignalPhase::Yellow => SignalPhase::Red,
            SignalPhase::Red => SignalPhase::Green,
        }
    }

    /// How long the phase stays active in normal mode before the cycle
    /// controller advances.
    pub fn dwell_ms(self) -> u64 {
        match self {
            SignalPhase::Green => 5_000,
            SignalPhase::Yellow => 2_000,
            SignalPhase::Red => 5_000,
        }
    }
}

/// Which of the two state machines is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatingMode {
    /// Free-running Green -> Yellow -> Red cycle.
    Normal,
    /// Flashing yellow, one second on, one second off.
    Night,
}

/// Half of the night-mode flash period, for the on half and the off half.
pub const NIGHT_FLASH_HALF_MS: u64 = 1_000;

impl OperatingMode {
    pub fn toggled(self) -> Self {
        match self {
            OperatingMode::Normal => OperatingMode::Night,
            OperatingMode::Night => OperatingMode::Normal,
        }
    }

    /// The canonical phase a mode starts in when it is entered.
    pub fn entry_phase(self) -> SignalPhase {
        match self {
            OperatingMode::Normal => SignalPhase::Green,
            OperatingMode::Night => SignalPhase::Yellow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_order() {
        assert_eq!(SignalPhase::Green.next(), SignalPhase::Yellow);
        assert_eq!(SignalPhase::Yellow.next(), SignalPhase::Red);
        assert_eq!(SignalPhase::Red.next(), SignalPhase::Green);
    }

    #[test]
    fn cycle_period_is_twelve_seconds() {
        let mut phase = SignalPhase::Green;
        let mut total = 0;
        for _ in 0..3 {
            total += phase.dwell_ms();
            phase = phase.next();
        }
        assert_eq!(phase, SignalPhase::Green);
        assert_eq!(total, 12_000);
    }

    #[test]
    fn entry_phases() {
        assert_eq!(OperatingMode::Normal.entry_phase(), SignalPhase::Green);
        assert_eq!(OperatingMode::Night.entry_phase(), SignalPhase::Yellow);
    }

    #[test]
    fn toggling_is_an_involution() {
        assert_eq!(OperatingMode::Normal.toggled(), OperatingMode::Night);
        assert_eq!(OperatingMode::Normal.toggled().toggled(), OperatingMode::Normal);
    }
}
