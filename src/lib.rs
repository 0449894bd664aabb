//! # subrc
//!
//! A portable, no_std Rust driver for the transmit side of a proprietary
//! On-Off Keying (OOK) remote-control link used by low-cost toy submersibles
//! operating on a 40.680 MHz carrier.
//!
//! This driver implements a software bit-banged OOK encoder using:
//! - `embedded-hal` traits for carrier control and timing
//! - pulse-width encoding with three pulse classes (SYNC, LONG, SHORT)
//! - optional critical sections around single pulses with `critical-section`
//!
//! ## Crate features
//! | Feature                   | Description |
//! |---------------------------|-------------|
//! | `std`                     | Disables `#![no_std]` support |
//! | `critical-pulse` (default)| Wraps each pulse in `critical_section::with` so no interrupt can stretch a pulse width |
//! | `defmt-0-3`               | Uses `defmt` logging |
//! | `log`                     | Uses `log` logging |
//!
//! ## Software Features
//!
//! - **Pulse timing engine** driving any `embedded_hal::digital::OutputPin`
//!   as the carrier enable line, with blocking `DelayNs` waits
//! - 16-bit redundant frames: low byte = command bitmask, high byte = its
//!   bitwise complement (the receiver's only error check)
//! - Hold-and-stop sequencing: repeated retransmission while a command is
//!   asserted, then an unconditional triple STOP tail
//!
//! ## Usage
//!
//! ```rust
//! # use embedded_hal_mock::eh1::digital::{Mock as Pin, State as PinState, Transaction as PinTransaction};
//! # use embedded_hal_mock::eh1::delay::NoopDelay;
//! use subrc::driver::OokTx;
//!
//! # let mut transitions = vec![PinTransaction::set(PinState::Low)];
//! # for _ in 0..19 {
//! #     transitions.push(PinTransaction::set(PinState::High));
//! #     transitions.push(PinTransaction::set(PinState::Low));
//! # }
//! # let carrier = Pin::new(&transitions);
//! let mut tx = OokTx::new(carrier, NoopDelay::new()).unwrap();
//! tx.send_stop(); // one 19-pulse STOP frame
//! # let (mut carrier, _) = tx.release();
//! # carrier.done();
//! ```
//!
//! ## Integration Notes
//!
//! - Pulse widths are in the 0.4–1.3 ms range; the carrier pin must settle in
//!   tens of microseconds or the receiver cannot discriminate pulse classes
//! - All waits are blocking; one `send_command` call owns the calling thread
//!   until its stop tail has gone out
//! - The SHORT pulse class deliberately skips explicit waits (see
//!   [`pulse::PulseClass::uses_explicit_wait`]) — only one class may do so
//!
//! ## Status
//!
//! Calibrated against one receiver generation; retune [`consts`] for others.
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "critical-pulse")]
pub use critical_section;

pub mod command;
pub mod consts;
pub mod driver;
pub mod error;
pub mod pulse;
