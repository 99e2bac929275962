//! Macintosh Plus integrated-keypad keyboard (M0110A)
//!
//! The keyboard's MPU scans a 10×8 active-low key matrix through two row-drive
//! ports and a column-read bus, and bit-bangs a two-wire clock/data serial link
//! to the host. The MPU program itself is treated as opaque; this models the
//! observable pin behavior it produces.

pub mod layout;

pub use layout::{Key, MATRIX_COLUMNS, MATRIX_LAYOUT, MATRIX_ROWS};

use bincode::{Decode, Encode};
use jperiph_common::num::{GetBit, U16Ext};
use jperiph_common::sync::EventQueue;

/// Size of the MPU program image. The image is static configuration loaded by the
/// surrounding machine; its contents are never interpreted here.
pub const MPU_PROGRAM_LEN: usize = 0x400;

/// Modifier key states (true = pressed). The four modifier keys are wired
/// directly to MPU input pins rather than through the scanned matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Encode, Decode)]
pub struct Modifiers {
    pub shift: bool,
    pub caps_lock: bool,
    pub option: bool,
    pub command: bool,
}

/// Source of physical key state, supplied by the surrounding input layer.
///
/// Row snapshots are active low (bit clear = key down) and are sampled fresh on
/// every matrix read; implementations must not require any notification before a
/// state change becomes visible.
pub trait KeyMatrix {
    /// Key states for one matrix row; `row` is always less than [`MATRIX_ROWS`].
    fn read_row(&self, row: usize) -> u8;

    fn modifiers(&self) -> Modifiers;
}

/// Host side of the two-wire link. Notified on line transitions only, never on
/// writes that leave a line at its current level.
pub trait HostPort {
    fn write_clock(&mut self, level: bool);

    fn write_data(&mut self, level: bool);
}

/// Keyboard controller state: row drive lines plus the three serial link lines.
///
/// Host-driven data line changes run on the host's timeline and are queued via
/// [`write_host_data`](Self::write_host_data); the external scheduler applies
/// them at the current instant by calling [`synchronize`](Self::synchronize).
#[derive(Debug, Clone, Encode, Decode)]
pub struct M0110aKeyboard {
    row_drive: u16,
    host_clock_out: bool,
    host_data_out: bool,
    host_data_in: bool,
    pending_host_data: EventQueue<bool>,
}

// No rows driven, serial lines idle high
const ROW_DRIVE_IDLE: u16 = 0x03FF;

impl M0110aKeyboard {
    #[must_use]
    pub fn new() -> Self {
        Self {
            row_drive: ROW_DRIVE_IDLE,
            host_clock_out: true,
            host_data_out: true,
            host_data_in: true,
            pending_host_data: EventQueue::new(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Write row drive bits 0-7 (active low).
    pub fn write_row_drive_low(&mut self, value: u8) {
        self.row_drive.set_lsb(value);
    }

    /// Write row drive bits 8-9 (argument bits 0-1, active low) and the host
    /// serial lines (bit 6 = clock, bit 7 = data).
    ///
    /// Line changes are edge triggered: a line is propagated to `host` only when
    /// the written level differs from the current drive state, and the clock edge
    /// is always evaluated and emitted before the data edge.
    pub fn write_control(&mut self, value: u8, host: &mut impl HostPort) {
        self.row_drive = (self.row_drive & 0x00FF) | (u16::from(value & 0x03) << 8);

        let clock = value.bit(6);
        if clock != self.host_clock_out {
            if clock {
                log::trace!(
                    "host clock out 0 -> 1 data={}",
                    u8::from(self.host_data_out && self.host_data_in)
                );
            } else {
                log::trace!("host clock out 1 -> 0");
            }
            self.host_clock_out = clock;
            host.write_clock(clock);
        }

        let data = value.bit(7);
        if data != self.host_data_out {
            log::trace!("host data out {} -> {}", u8::from(self.host_data_out), u8::from(data));
            self.host_data_out = data;
            host.write_data(data);
        }
    }

    /// Read the column bus: the AND of every driven row's key states.
    ///
    /// Rows participate when their drive bit is clear; with no rows driven the
    /// bus floats to 0xFF.
    #[must_use]
    pub fn read_columns(&self, matrix: &impl KeyMatrix) -> u8 {
        let mut result = 0xFF;
        for row in 0..MATRIX_ROWS {
            if !self.row_drive.bit(row as u8) {
                result &= matrix.read_row(row);
            }
        }

        log::trace!("read matrix: row drive = {:03X}, result = {result:02X}", self.row_drive);

        result
    }

    /// The host-driven data line as seen by the MPU's input port (inverted from
    /// the line level).
    #[must_use]
    pub fn read_host_data(&self) -> bool {
        !self.host_data_in
    }

    /// The MPU's modifier input port image: active-low Shift / Caps Lock /
    /// Option / Command on bits 2-5, the inverted host data line on bit 7.
    /// Unwired bits read high.
    #[must_use]
    pub fn read_modifier_port(&self, matrix: &impl KeyMatrix) -> u8 {
        let modifiers = matrix.modifiers();
        0x43 | (u8::from(!modifiers.shift) << 2)
            | (u8::from(!modifiers.caps_lock) << 3)
            | (u8::from(!modifiers.option) << 4)
            | (u8::from(!modifiers.command) << 5)
            | (u8::from(!self.host_data_in) << 7)
    }

    /// Host request to drive the data line. The host runs on its own timeline,
    /// so the level is queued rather than applied; it takes effect at the next
    /// [`synchronize`](Self::synchronize) call, after any earlier queued levels.
    pub fn write_host_data(&mut self, level: bool) {
        self.pending_host_data.push(level);
    }

    /// Apply all queued host data line levels in submission order. Invoked by
    /// the external scheduler at the current simulated instant.
    pub fn synchronize(&mut self) {
        while let Some(level) = self.pending_host_data.pop() {
            if level != self.host_data_in {
                log::trace!(
                    "host data in {} -> {}",
                    u8::from(self.host_data_in),
                    u8::from(level)
                );
                self.host_data_in = level;
            }
        }
    }
}

impl Default for M0110aKeyboard {
    fn default() -> Self {
        Self::new()
    }
}
