//! OOK transmit driver for the submersible remote-control link.
//!
//! This module provides the [`OokTx`] struct, which bit-bangs the link's
//! pulse-width protocol onto a carrier-enable pin. It owns the carrier line
//! for the life of the process and drives it with blocking waits — there is
//! no queueing, preemption or cancellation of an in-flight transmission.
//!
//! ## Features
//!
//! - Pulse timing engine emitting SYNC/LONG/SHORT bursts with class-specific
//!   on/off timing
//! - Frame encoder producing the fixed 19-pulse frame shape
//!   (2 SYNC + 16 data MSB-first + 1 trailing SHORT)
//! - Command sequencer implementing hold-by-retransmission and the
//!   unconditional triple-STOP safety tail
//!
//! ## Example
//!
//! ```rust
//! # use embedded_hal_mock::eh1::digital::{Mock as Pin, State as PinState, Transaction as PinTransaction};
//! # use embedded_hal_mock::eh1::delay::NoopDelay;
//! use subrc::command::Command;
//! use subrc::driver::OokTx;
//!
//! # let mut transitions = vec![PinTransaction::set(PinState::Low)];
//! # for _ in 0..5 * 19 {
//! #     transitions.push(PinTransaction::set(PinState::High));
//! #     transitions.push(PinTransaction::set(PinState::Low));
//! # }
//! # let carrier = Pin::new(&transitions);
//! let mut tx = OokTx::new(carrier, NoopDelay::new()).unwrap();
//! tx.send_command(Command::Forward, 0); // 2 command frames + 3 stop frames
//! # let (mut carrier, _) = tx.release();
//! # carrier.done();
//! ```
//!
//! ## Design Notes
//!
//! Transmission is open-loop: the receiver has no acknowledgment channel, so
//! pin errors after construction are discarded rather than propagated. The
//! only fallible operation is [`OokTx::new`], which parks the carrier low.
//!
//! With the `critical-pulse` feature, each single pulse runs inside
//! `critical_section::with`, so no interrupt can stretch a pulse's on/off
//! window and desynchronize the receiver for that frame. Without it, hosts
//! with non-deterministic scheduling accept jitter as a correctness risk.

use crate::command::{Command, Frame};
use crate::consts::{
    FRAME_SYNC_PULSES, FRAME_TRAILER_PULSES, INTER_FRAME_GAP_MS, STOP_REPEATS,
};
use crate::error::TxError;
use crate::pulse::PulseClass;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Transmit-side encoder for the submersible's OOK link.
///
/// `OokTx` exclusively owns the carrier-enable pin (`TX`) and a blocking
/// delay provider (`D`). Pin high = carrier on, pin low = carrier off; the
/// receiver decodes only the width of the resulting carrier bursts.
///
/// ## Timing
///
/// Every wait is a blocking delay on the calling thread. One
/// [`send_command`](Self::send_command) call runs its entire pulse train —
/// initial double-send, hold retransmissions, stop tail — to completion
/// before returning. Pulses within a frame and frames within a command are
/// strictly ordered and never interleaved.
///
/// ## Type Parameters
///
/// - `TX`: a type implementing [`embedded_hal::digital::OutputPin`] wired to
///   the carrier generator's enable input
/// - `D`: a type implementing [`embedded_hal::delay::DelayNs`]
#[derive(Debug)]
pub struct OokTx<TX, D>
where
    TX: OutputPin,
    D: DelayNs,
{
    carrier: TX,
    delay: D,

    /// Counter of frames transmitted in full, wrapping.
    pub frames_sent: u16,

    /// Counter of completed command sequences (including their stop tails),
    /// wrapping.
    pub commands_sent: u16,
}

impl<TX, D> OokTx<TX, D>
where
    TX: OutputPin,
    D: DelayNs,
{
    /// Creates a new driver and parks the carrier off.
    ///
    /// # Errors
    /// [`TxError::CarrierInit`] if the carrier line cannot be driven low.
    /// This is fatal: a half-configured radio link is unsafe to operate, so
    /// callers should halt rather than retry.
    pub fn new(mut carrier: TX, delay: D) -> Result<Self, TxError<TX::Error>> {
        carrier.set_low().map_err(TxError::CarrierInit)?;
        Ok(Self {
            carrier,
            delay,
            frames_sent: 0,
            commands_sent: 0,
        })
    }

    /// Releases the carrier pin and delay provider.
    pub fn release(self) -> (TX, D) {
        (self.carrier, self.delay)
    }

    /// One carrier burst of the given class. Must not be preempted.
    fn pulse_once(&mut self, class: PulseClass) {
        if class.uses_explicit_wait() {
            let half = class.half_period_micros();
            let _ = self.carrier.set_high();
            self.delay.delay_us(half);
            let _ = self.carrier.set_low();
            self.delay.delay_us(half);
        } else {
            // Hardware-floor pulse: the toggle itself is the width.
            let _ = self.carrier.set_high();
            let _ = self.carrier.set_low();
        }
    }

    /// Emits `count` pulses of one class.
    ///
    /// For a timed class each pulse is carrier-on for the class half-period,
    /// then carrier-off for the same; the untimed class toggles
    /// back-to-back. With the `critical-pulse` feature, each pulse's on/off
    /// window runs inside a critical section.
    pub fn emit_pulses(&mut self, class: PulseClass, count: u16) {
        for _ in 0..count {
            #[cfg(feature = "critical-pulse")]
            critical_section::with(|_| self.pulse_once(class));
            #[cfg(not(feature = "critical-pulse"))]
            self.pulse_once(class);
        }
    }

    /// Transmits one complete frame: 2 SYNC, 16 data pulses MSB-first
    /// (LONG = 1, SHORT = 0), 1 trailing SHORT.
    ///
    /// Always emits exactly 19 pulses and always runs to completion once
    /// started; no partial frames exist on the wire.
    pub fn send_frame(&mut self, frame: Frame) {
        self.emit_pulses(PulseClass::Sync, FRAME_SYNC_PULSES);
        for bit in frame.bits() {
            self.emit_pulses(PulseClass::for_bit(bit), 1);
        }
        self.emit_pulses(PulseClass::Short, FRAME_TRAILER_PULSES);
        self.frames_sent = self.frames_sent.wrapping_add(1);
    }

    /// Transmits one dedicated stop frame.
    ///
    /// Uses [`Frame::STOP`] directly, never the command codec; the bits are
    /// identical either way, the constant exists for call-site clarity.
    pub fn send_stop(&mut self) {
        self.send_frame(Frame::STOP);
    }

    /// Asserts a command for `hold_ms` milliseconds, then stops the vehicle.
    ///
    /// The sequence, exactly:
    /// 1. Encode and transmit the command frame once.
    /// 2. Wait one inter-frame gap (35 ms) and transmit it again — the
    ///    receiver latches a command only after two consistent frames.
    /// 3. While nominal elapsed time is under `hold_ms`: wait one gap and
    ///    retransmit. Holding is pure repetition; there is no "maintain
    ///    state" on the wire.
    /// 4. Unconditionally transmit [`Frame::STOP`] three times, each after
    ///    one gap, so the vehicle stops even if a stop frame is lost.
    ///
    /// A `hold_ms` shorter than the initial double-send still produces the
    /// two command frames and the full stop tail, so wire time per call is
    /// bounded below regardless of the requested duration.
    ///
    /// Elapsed time is accounted nominally by summing the inter-frame gaps,
    /// which keeps retransmission counts deterministic: expect roughly
    /// `hold_ms / 35` hold retransmissions after the double-send.
    /// [`DEFAULT_HOLD_MS`](crate::consts::DEFAULT_HOLD_MS) never enters the
    /// hold loop; host keypress glue uses
    /// [`HOST_HOLD_MS`](crate::consts::HOST_HOLD_MS).
    pub fn send_command(&mut self, command: Command, hold_ms: u32) {
        #[cfg(feature = "log")]
        log::debug!("sending {:?}, hold {} ms", command, hold_ms);

        let frame = Frame::encode(command);
        self.send_frame(frame);

        self.inter_frame_gap();
        let mut elapsed_ms = INTER_FRAME_GAP_MS;
        self.send_frame(frame);

        while elapsed_ms < hold_ms {
            self.inter_frame_gap();
            elapsed_ms += INTER_FRAME_GAP_MS;
            self.send_frame(frame);
        }

        #[cfg(feature = "log")]
        log::trace!("hold done after {} ms, sending stop tail", elapsed_ms);

        for _ in 0..STOP_REPEATS {
            self.inter_frame_gap();
            self.send_stop();
        }
        self.commands_sent = self.commands_sent.wrapping_add(1);
    }

    fn inter_frame_gap(&mut self) {
        self.delay.delay_ms(INTER_FRAME_GAP_MS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{
        DEFAULT_HOLD_MS, FRAME_TOTAL_PULSES, LONG_HALF_PERIOD_US, STOP_FRAME_BITS,
        SYNC_HALF_PERIOD_US,
    };
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use std::cell::RefCell;
    use std::rc::Rc;

    const GAP_NS: u32 = INTER_FRAME_GAP_MS * 1_000_000;

    /// Everything the carrier line and the delay provider observe, in order.
    #[derive(PartialEq, Eq, Clone, Copy, Debug)]
    enum Event {
        On,
        Off,
        Wait(u32),
    }

    #[derive(Default)]
    struct Trace(Rc<RefCell<Vec<Event>>>);

    impl Trace {
        fn pin(&self) -> TracePin {
            TracePin(Rc::clone(&self.0))
        }

        fn delay(&self) -> TraceDelay {
            TraceDelay(Rc::clone(&self.0))
        }

        fn events(&self) -> Vec<Event> {
            self.0.borrow().clone()
        }
    }

    struct TracePin(Rc<RefCell<Vec<Event>>>);

    impl ErrorType for TracePin {
        type Error = Infallible;
    }

    impl OutputPin for TracePin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().push(Event::Off);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().push(Event::On);
            Ok(())
        }
    }

    struct TraceDelay(Rc<RefCell<Vec<Event>>>);

    impl DelayNs for TraceDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.0.borrow_mut().push(Event::Wait(ns));
        }
    }

    /// Replays a recorded event stream back into pulse classes, checking
    /// that every timed pulse has symmetric on/off phases and that the only
    /// waits outside pulses are inter-frame gaps.
    fn classify(events: &[Event]) -> Vec<PulseClass> {
        let mut pulses = Vec::new();
        let mut i = 0;
        while i < events.len() {
            match events[i] {
                Event::On => {
                    if let Some(&Event::Wait(ns)) = events.get(i + 1) {
                        assert_eq!(events[i + 2], Event::Off, "timed pulse must drop carrier");
                        assert_eq!(events[i + 3], Event::Wait(ns), "off phase must match on");
                        let class = if ns == SYNC_HALF_PERIOD_US * 1_000 {
                            PulseClass::Sync
                        } else if ns == LONG_HALF_PERIOD_US * 1_000 {
                            PulseClass::Long
                        } else {
                            panic!("unknown half-period {ns} ns");
                        };
                        pulses.push(class);
                        i += 4;
                    } else {
                        assert_eq!(events[i + 1], Event::Off, "untimed pulse must drop carrier");
                        pulses.push(PulseClass::Short);
                        i += 2;
                    }
                }
                // Initial park from the constructor.
                Event::Off => i += 1,
                Event::Wait(ns) => {
                    assert_eq!(ns, GAP_NS, "stray wait outside a pulse");
                    i += 1;
                }
            }
        }
        pulses
    }

    /// Splits a pulse train into frames and decodes each back to its bits.
    fn decode_frames(pulses: &[PulseClass]) -> Vec<u16> {
        assert_eq!(pulses.len() % FRAME_TOTAL_PULSES as usize, 0, "partial frame on the wire");
        pulses
            .chunks(FRAME_TOTAL_PULSES as usize)
            .map(|frame| {
                assert_eq!(frame[0], PulseClass::Sync);
                assert_eq!(frame[1], PulseClass::Sync);
                assert_eq!(frame[18], PulseClass::Short, "missing frame trailer");
                let mut value = 0u16;
                for &pulse in &frame[2..18] {
                    value <<= 1;
                    match pulse {
                        PulseClass::Long => value |= 1,
                        PulseClass::Short => {}
                        PulseClass::Sync => panic!("SYNC inside data pulses"),
                    }
                }
                value
            })
            .collect()
    }

    fn gap_count(events: &[Event]) -> usize {
        events.iter().filter(|&&e| e == Event::Wait(GAP_NS)).count()
    }

    struct StuckPin;

    #[derive(Debug)]
    struct StuckError;

    impl embedded_hal::digital::Error for StuckError {
        fn kind(&self) -> embedded_hal::digital::ErrorKind {
            embedded_hal::digital::ErrorKind::Other
        }
    }

    impl ErrorType for StuckPin {
        type Error = StuckError;
    }

    impl OutputPin for StuckPin {
        fn set_low(&mut self) -> Result<(), StuckError> {
            Err(StuckError)
        }

        fn set_high(&mut self) -> Result<(), StuckError> {
            Err(StuckError)
        }
    }

    #[test]
    fn test_new_parks_carrier_low() {
        let carrier = PinMock::new(&[PinTransaction::set(PinState::Low)]);
        let tx = OokTx::new(carrier, NoopDelay::new()).unwrap();

        assert_eq!(tx.frames_sent, 0);
        let (mut carrier, _) = tx.release();
        carrier.done();
    }

    #[test]
    fn test_new_reports_fatal_carrier_init() {
        let result = OokTx::new(StuckPin, NoopDelay::new());
        assert!(matches!(result, Err(TxError::CarrierInit(StuckError))));
    }

    #[test]
    fn test_emit_pulses_sync_burst_toggles_carrier() {
        let carrier = PinMock::new(&[
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ]);
        let mut tx = OokTx::new(carrier, NoopDelay::new()).unwrap();

        tx.emit_pulses(PulseClass::Sync, 2);

        let (mut carrier, _) = tx.release();
        carrier.done();
    }

    #[test]
    fn test_pulse_timing_profiles() {
        let trace = Trace::default();
        let mut tx = OokTx::new(trace.pin(), trace.delay()).unwrap();

        tx.emit_pulses(PulseClass::Sync, 1);
        tx.emit_pulses(PulseClass::Long, 1);
        tx.emit_pulses(PulseClass::Short, 1);

        assert_eq!(
            trace.events(),
            vec![
                Event::Off, // park
                Event::On,
                Event::Wait(SYNC_HALF_PERIOD_US * 1_000),
                Event::Off,
                Event::Wait(SYNC_HALF_PERIOD_US * 1_000),
                Event::On,
                Event::Wait(LONG_HALF_PERIOD_US * 1_000),
                Event::Off,
                Event::Wait(LONG_HALF_PERIOD_US * 1_000),
                Event::On,
                Event::Off,
            ]
        );
    }

    #[test]
    fn test_send_frame_is_always_19_pulses() {
        for frame in [Frame::encode(Command::Stop), Frame::encode(Command::Down), Frame::STOP] {
            let trace = Trace::default();
            let mut tx = OokTx::new(trace.pin(), trace.delay()).unwrap();

            tx.send_frame(frame);

            let pulses = classify(&trace.events());
            assert_eq!(pulses.len(), FRAME_TOTAL_PULSES as usize);
            assert_eq!(pulses[0], PulseClass::Sync);
            assert_eq!(pulses[1], PulseClass::Sync);
            assert_eq!(pulses[18], PulseClass::Short);
        }
    }

    #[test]
    fn test_send_frame_forward_bit_pattern() {
        let trace = Trace::default();
        let mut tx = OokTx::new(trace.pin(), trace.delay()).unwrap();

        tx.send_frame(Frame::encode(Command::Forward));

        let pulses = classify(&trace.events());
        let rendered: String = pulses[2..18]
            .iter()
            .map(|&p| if p == PulseClass::Long { '1' } else { '0' })
            .collect();
        assert_eq!(rendered, "1111111000000001");
        assert_eq!(decode_frames(&pulses), vec![0xFE01]);
    }

    #[test]
    fn test_send_command_zero_hold_minimum_wire_activity() {
        let trace = Trace::default();
        let mut tx = OokTx::new(trace.pin(), trace.delay()).unwrap();

        tx.send_command(Command::Forward, 0);

        let events = trace.events();
        let frames = decode_frames(&classify(&events));
        // Two unconditional sends, then exactly three stop frames.
        assert_eq!(frames, vec![0xFE01, 0xFE01, STOP_FRAME_BITS, STOP_FRAME_BITS, STOP_FRAME_BITS]);
        // One gap before the confirmation send, one before each stop frame.
        assert_eq!(gap_count(&events), 4);
    }

    #[test]
    fn test_send_command_hold_loop_retransmits() {
        let trace = Trace::default();
        let mut tx = OokTx::new(trace.pin(), trace.delay()).unwrap();

        tx.send_command(Command::Forward, 100);

        let frames = decode_frames(&classify(&trace.events()));
        // 2 initial + floor(100 / 35) = 2 hold retransmissions + 3 stops.
        assert_eq!(frames.len(), 7);
        assert!(frames[..4].iter().all(|&f| f == 0xFE01));
        assert!(frames[4..].iter().all(|&f| f == STOP_FRAME_BITS));
    }

    #[test]
    fn test_default_hold_never_enters_hold_loop() {
        let trace = Trace::default();
        let mut tx = OokTx::new(trace.pin(), trace.delay()).unwrap();

        tx.send_command(Command::Up, DEFAULT_HOLD_MS);

        let frames = decode_frames(&classify(&trace.events()));
        assert_eq!(frames.len(), 5);
    }

    #[test]
    fn test_send_command_stop_is_idempotent() {
        let trace = Trace::default();
        let mut tx = OokTx::new(trace.pin(), trace.delay()).unwrap();

        tx.send_command(Command::Stop, 0);
        tx.send_command(Command::Stop, 0);

        let frames = decode_frames(&classify(&trace.events()));
        assert_eq!(frames.len(), 10);
        assert!(frames.iter().all(|&f| f == STOP_FRAME_BITS));
    }

    #[test]
    fn test_counters_advance() {
        let trace = Trace::default();
        let mut tx = OokTx::new(trace.pin(), trace.delay()).unwrap();

        tx.send_command(Command::Left, 0);

        assert_eq!(tx.frames_sent, 5);
        assert_eq!(tx.commands_sent, 1);
    }
}
