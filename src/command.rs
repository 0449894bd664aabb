//! Logical commands and their 16-bit wire frames.
//!
//! A command is a single-bit bitmask the receiver decodes positionally; the
//! wire frame carries the mask in its low byte and the mask's bitwise
//! complement in its high byte. That redundancy is the receiver's entire
//! error check — the high byte is never an independent field.
//!
//! ## Functions
//!
//! - [`Command::from_ascii`]: host keyboard glue mapping
//! - [`Frame::encode`]: the command codec
//! - [`Frame::bits`]: MSB-first bit walk used by the frame encoder
//!
//! ## Limitations
//!
//! The codec does not validate combinations; callers are responsible for
//! sending single, well-formed bitmasks. The two reserved mask bits
//! ([`COMMAND_RESERVED_MASK`](crate::consts::COMMAND_RESERVED_MASK)) are
//! never set by any variant.

use crate::consts::STOP_FRAME_BITS;

/// A logical vehicle command, one mask bit per action.
///
/// `Stop` is the empty mask; the receiver treats any frame with no motion
/// bits as "all motors off".
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
#[repr(u8)]
pub enum Command {
    /// All motors off.
    Stop = 0x00,
    /// Main propeller forward.
    Forward = 0x01,
    /// Main propeller reverse.
    Back = 0x02,
    /// Rudder left.
    Left = 0x04,
    /// Rudder right.
    Right = 0x08,
    /// Ballast/dive motor up.
    Up = 0x10,
    /// Ballast/dive motor down.
    Down = 0x20,
}

impl Command {
    /// The raw wire bitmask for this command.
    pub const fn mask(self) -> u8 {
        self as u8
    }

    /// Maps a host input character to its command.
    ///
    /// `f`/`b`/`u`/`d`/`l`/`r` select the six motion commands; anything else
    /// yields `None` and is to be silently ignored by the caller.
    pub const fn from_ascii(byte: u8) -> Option<Command> {
        match byte {
            b'f' => Some(Command::Forward),
            b'b' => Some(Command::Back),
            b'u' => Some(Command::Up),
            b'd' => Some(Command::Down),
            b'l' => Some(Command::Left),
            b'r' => Some(Command::Right),
            _ => None,
        }
    }
}

/// One 16-bit protocol frame, immutable once constructed.
///
/// Invariant: the high byte is always the bitwise complement of the low
/// byte. Both constructors ([`encode`](Frame::encode) and [`STOP`](Frame::STOP))
/// uphold it; there is no way to build a frame that violates it.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Frame(u16);

impl Frame {
    /// The dedicated stop frame the sequencer's safety tail transmits.
    ///
    /// Identical bits to `Frame::encode(Command::Stop)`; kept as a named
    /// constant so the stop path never depends on the codec.
    pub const STOP: Frame = Frame(STOP_FRAME_BITS);

    /// Encodes a command into its redundant wire frame.
    pub const fn encode(command: Command) -> Frame {
        let mask = command.mask();
        Frame((((!mask) as u16) << 8) | mask as u16)
    }

    /// The full 16-bit frame value.
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// The command bitmask byte.
    pub const fn low_byte(self) -> u8 {
        self.0 as u8
    }

    /// The redundancy byte, complement of [`low_byte`](Self::low_byte).
    pub const fn high_byte(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Walks the frame bits in wire order: most significant first.
    pub fn bits(self) -> impl Iterator<Item = bool> {
        (0..16u16).rev().map(move |k| self.0 & (1 << k) != 0)
    }
}
