//! Constants used across the OOK link protocol implementation.
//!
//! This module defines the calibration and framing constants shared by the
//! pulse timing engine, the frame encoder and the command sequencer.
//!
//! These values are receiver-hardware-specific: they encode the pulse-width
//! discrimination thresholds and sampling windows of one generation of
//! submersible receiver board. Retuning for a different receiver happens
//! here, never in protocol logic.
//!
//! ## Key Concepts
//!
//! - **Half-periods**: a timed pulse holds the carrier on for one half-period
//!   and off for one more; the resulting on-time is what the receiver
//!   measures.
//! - **Frame shape**: every frame is exactly 2 SYNC + 16 data + 1 trailing
//!   SHORT pulse, independent of its value.
//! - **Inter-frame gap**: the receiver samples in 35 ms windows; frames
//!   spaced closer than that are not latched.
//! - **Stop frame**: the dedicated bit pattern the sequencer's safety tail
//!   transmits, equal to the STOP command run through the redundancy rule.

/// Carrier frequency of the RF link in Hertz.
///
/// Generated by an external clock peripheral; recorded here because the
/// receiver's pulse thresholds were calibrated against this carrier.
pub const CARRIER_FREQ_HZ: u32 = 40_680_000;

/// Half-period wait for a LONG pulse, in microseconds.
///
/// Produces a measured pulse of roughly 850 µs including toggle overhead.
/// LONG encodes a `1` data bit.
pub const LONG_HALF_PERIOD_US: u32 = 450;

/// Half-period wait for a SYNC pulse, in microseconds.
///
/// Produces a measured pulse of roughly 1.3 ms, well above the LONG
/// threshold, so the receiver can recognize the frame delimiter.
pub const SYNC_HALF_PERIOD_US: u32 = 900;

/// Nominal width of a SHORT pulse, in microseconds.
///
/// Informational: SHORT is not explicitly timed (see
/// [`PulseClass::uses_explicit_wait`](crate::pulse::PulseClass::uses_explicit_wait));
/// this is the hardware-floor width observed on the reference host, and it
/// sits safely below the receiver's LONG discrimination threshold.
pub const SHORT_NOMINAL_WIDTH_US: u32 = 400;

/// Minimum spacing between consecutive frames, in milliseconds.
///
/// This matches the receiver's sampling window; it also paces the hold
/// loop's retransmissions.
pub const INTER_FRAME_GAP_MS: u32 = 35;

/// Number of SYNC pulses opening every frame.
pub const FRAME_SYNC_PULSES: u16 = 2;

/// Number of data pulses per frame, one per frame bit, MSB first.
pub const FRAME_DATA_PULSES: u16 = 16;

/// Number of trailing SHORT pulses terminating every frame.
pub const FRAME_TRAILER_PULSES: u16 = 1;

/// Total pulses per frame, for any frame value.
pub const FRAME_TOTAL_PULSES: u16 = FRAME_SYNC_PULSES + FRAME_DATA_PULSES + FRAME_TRAILER_PULSES;

/// Bit pattern of the dedicated stop frame.
///
/// Low byte `0x00` (no motion bits), high byte `0xFF` (its complement).
/// The sequencer's stop tail always transmits this constant directly rather
/// than going through the command codec; the two paths produce identical
/// bits and are kept distinct only for call-site clarity.
pub const STOP_FRAME_BITS: u16 = 0xFF00;

/// Number of stop frames the sequencer appends after every command.
///
/// Redundancy against a missed reception: the vehicle must stop even if the
/// receiver drops two of the three.
pub const STOP_REPEATS: u8 = 3;

/// Default hold duration for a command, in milliseconds.
///
/// Short enough that the hold loop never runs; the two unconditional
/// initial transmissions are all that goes out before the stop tail.
pub const DEFAULT_HOLD_MS: u32 = 10;

/// Hold duration used by host keyboard glue for each keypress, in
/// milliseconds.
pub const HOST_HOLD_MS: u32 = 3000;

/// Command bits the receiver ignores.
///
/// The top two mask bits are reserved by the wire protocol and never set by
/// any [`Command`](crate::command::Command).
pub const COMMAND_RESERVED_MASK: u8 = 0xC0;
