//! Error types for the transmit driver.
//!
//! The taxonomy is deliberately minimal. The link is open-loop — there is no
//! acknowledgment channel, so delivery failure is undetectable by
//! construction and the transmission path is total. The only fallible point
//! is bringing the carrier line into its parked state at construction, and
//! that failure is fatal: a half-configured radio link is unsafe to operate,
//! so callers are expected to halt rather than retry.

use thiserror::Error;

/// Errors raised by [`OokTx`](crate::driver::OokTx).
#[derive(Debug, Error)]
pub enum TxError<E: core::fmt::Debug> {
    /// The carrier line could not be parked at construction.
    ///
    /// Carries the HAL pin error. Fatal: the driver was not constructed and
    /// the controlling process should halt.
    #[error("carrier generator failed to initialize")]
    CarrierInit(E),
}
