//! Contracts for the chip's collaborators: the two owned synthesis engines and
//! the external connections (ADPCM sample memory plus the auxiliary keyboard and
//! general-purpose I/O ports).

/// Byte-addressable backing store for ADPCM sample data. Supplied by the
/// surrounding machine (RAM or banked ROM); the chip never owns it.
pub trait SampleMemory {
    fn read_byte(&mut self, address: u32) -> u8;

    fn write_byte(&mut self, address: u32, value: u8);
}

/// External connections reached through the register file: sample memory plus
/// the keyboard and I/O port pass-throughs.
pub trait Y8950Bus: SampleMemory {
    fn keyboard_read(&mut self) -> u8;

    fn keyboard_write(&mut self, value: u8);

    fn io_read(&mut self) -> u8;

    fn io_write(&mut self, value: u8);
}

/// The OPL FM synthesis engine.
///
/// The engine owns its register file, operators, and timers; the chip reaches it
/// only through these operations. `clock` advances one operator cycle and
/// `output` is the summed mono output of all channels for the current cycle.
/// `status` reports the engine's raw flag register; `set_irq_mask` configures
/// which flags participate in the IRQ line, and `set_reset_status` forces flag
/// bits on (`set`) and off (`clear`) so the chip can keep the engine's visible
/// flag state in agreement with the combined chip-level view.
pub trait FmEngine {
    fn reset(&mut self);

    fn write(&mut self, register: u8, value: u8);

    fn clock(&mut self);

    fn output(&self) -> i32;

    fn status(&self) -> u8;

    fn set_irq_mask(&mut self, mask: u8);

    fn set_reset_status(&mut self, set: u8, clear: u8);
}

/// Raw status bits reported by [`AdpcmEngine::status`], remapped by the chip
/// into its own status byte.
pub mod adpcm_status {
    /// Playback reached the end of the sample.
    pub const EOS: u8 = 0x01;
    /// The data buffer is ready for another host transfer.
    pub const BRDY: u8 = 0x02;
    /// Playback in progress.
    pub const PLAYING: u8 = 0x04;
}

/// The ADPCM-B playback engine.
///
/// Register numbers are in the engine's own numbering (the chip translates its
/// address space before calling in). Register access and clocking may read or
/// write sample memory, so every such operation receives the memory collaborator.
pub trait AdpcmEngine {
    fn reset(&mut self);

    fn write(&mut self, register: u8, value: u8, memory: &mut dyn SampleMemory);

    fn read(&mut self, register: u8, memory: &mut dyn SampleMemory) -> u8;

    fn clock(&mut self, memory: &mut dyn SampleMemory);

    fn output(&self) -> i32;

    /// Raw engine status as [`adpcm_status`] bits.
    fn status(&self) -> u8;
}
