//! Pulse classes and their timing profiles.
//!
//! The receiver distinguishes exactly three pulse widths: SHORT (data `0`),
//! LONG (data `1`) and SYNC (frame delimiter). A pulse class describes a
//! timing profile, not a value — the width thresholds live in
//! [`crate::consts`] so they can be retuned per receiver generation without
//! touching protocol logic.
//!
//! ## The single-fallback-class limitation
//!
//! SHORT is emitted with no explicit wait at all: the carrier is enabled and
//! immediately disabled, producing the shortest pulse the host's instruction
//! timing allows. Some hosts cannot time sub-hardware-floor delays
//! accurately, and an inaccurate explicit wait is worse than a fast
//! unmeasured one, because the receiver's LONG threshold sits well above the
//! floor. Only one class can opt out this way: if two classes both fell back
//! to the hardware floor their widths would be indistinguishable on the
//! wire. This is a protocol constraint, not a bug to fix with more timing
//! precision.

use crate::consts::{LONG_HALF_PERIOD_US, SYNC_HALF_PERIOD_US};

/// One of the three pulse widths the receiver can discriminate.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum PulseClass {
    ///   Data `0`. Untimed: carrier on then immediately off (hardware-floor
    ///   width, ~400 µs on the reference host).
    Short,
    ///   Data `1`. Timed at [`LONG_HALF_PERIOD_US`] per half-phase,
    ///   ~850 µs measured.
    Long,
    ///   Frame delimiter. Timed at [`SYNC_HALF_PERIOD_US`] per half-phase,
    ///   ~1.3 ms measured.
    Sync,
}

impl PulseClass {
    /// Whether the on/off phases of this class are actively timed.
    ///
    /// `false` means the toggle happens back-to-back with no added delay.
    /// Exactly one class may answer `false` (see the module docs).
    pub const fn uses_explicit_wait(self) -> bool {
        !matches!(self, PulseClass::Short)
    }

    /// Duration of each of the on-phase and off-phase, in microseconds.
    ///
    /// Zero for the untimed class; the timing engine must consult
    /// [`uses_explicit_wait`](Self::uses_explicit_wait) rather than treat
    /// zero as "wait for no time".
    pub const fn half_period_micros(self) -> u32 {
        match self {
            PulseClass::Short => 0,
            PulseClass::Long => LONG_HALF_PERIOD_US,
            PulseClass::Sync => SYNC_HALF_PERIOD_US,
        }
    }

    /// The pulse class encoding one data bit.
    pub const fn for_bit(bit: bool) -> PulseClass {
        if bit { PulseClass::Long } else { PulseClass::Short }
    }
}
