//! Yamaha Y8950 (MSX-AUDIO) sound chip
//!
//! The chip pairs an OPL FM synthesis engine with an ADPCM-B playback engine
//! behind a single address/data register port, combining both engines' event
//! flags into one status/IRQ register and both engines' audio into one mono DAC.
//! It also carries auxiliary keyboard and general-purpose I/O port pass-throughs
//! used by MSX machines.
//!
//! The two engines are existing subsystems reached through the contracts in
//! [`interface`]; this crate owns the register routing, status combination,
//! sample timing, and DAC quantization that sit between them and the host bus.

pub mod dac;
pub mod interface;

pub use interface::{AdpcmEngine, FmEngine, SampleMemory, Y8950Bus, adpcm_status};

use bincode::{Decode, Encode};
use std::collections::VecDeque;

pub const STATUS_TIMER_A: u8 = 0x40;
pub const STATUS_TIMER_B: u8 = 0x20;
pub const STATUS_ADPCM_EOS: u8 = 0x10;
pub const STATUS_ADPCM_BRDY: u8 = 0x08;
pub const STATUS_ADPCM_PLAYING: u8 = 0x01;

/// The interrupt-capable status bits; the playing flag is status-only.
pub const ALL_IRQS: u8 =
    STATUS_TIMER_A | STATUS_TIMER_B | STATUS_ADPCM_EOS | STATUS_ADPCM_BRDY;

// ADPCM-B registers start at this chip address; the engine numbers them from 0
const ADPCM_REGISTER_OFFSET: u8 = 0x07;

// One output sample per 4x prescale times 18 operator slots of the input clock
const CLOCK_DIVIDER: u32 = 72;

/// The chip: both engines plus the register/latch state multiplexing them.
///
/// Time is announced with [`tick`](Self::tick) and samples are synthesized
/// lazily; a data port write or a sample-memory bank change forces synthesis up
/// to the present first, so register changes land on the correct sample boundary
/// instead of retroactively altering already-covered time.
#[derive(Debug, Clone, Encode, Decode)]
pub struct Y8950<F, A> {
    fm: F,
    adpcm: A,
    address: u8,
    irq_mask: u8,
    io_direction: u8,
    clock_frequency: u32,
    pending_cycles: u64,
    sample_buffer: VecDeque<i16>,
}

impl<F: FmEngine, A: AdpcmEngine> Y8950<F, A> {
    #[must_use]
    pub fn new(clock_frequency: u32, fm: F, adpcm: A) -> Self {
        let mut chip = Self {
            fm,
            adpcm,
            address: 0,
            irq_mask: ALL_IRQS,
            io_direction: 0,
            clock_frequency,
            pending_cycles: 0,
            sample_buffer: VecDeque::new(),
        };

        chip.fm.set_irq_mask(ALL_IRQS);
        chip.reset();

        chip
    }

    /// Reset both engines and recombine status. Register latches keep their
    /// values, as on hardware.
    pub fn reset(&mut self) {
        self.fm.reset();
        self.adpcm.reset();

        self.combine_status();
    }

    /// Write the address port. Selects the destination of the next data port
    /// access; never validated.
    pub fn write_address_port(&mut self, value: u8) {
        self.address = value;
    }

    /// Write the data port, routing by the current address latch.
    pub fn write_data_port(&mut self, value: u8, bus: &mut impl Y8950Bus) {
        // Register changes take effect at the current sample boundary
        self.catch_up(bus);

        log::trace!("Write to register {:02X}: {value:02X}", self.address);

        match self.address {
            0x04 => {
                // IRQ flag control; bits written are enables in inverted form.
                // The FM engine holds the flag register itself, so it sees both
                // the new mask and the raw write
                self.irq_mask = !value & ALL_IRQS;
                self.fm.set_irq_mask(self.irq_mask);
                self.fm.write(0x04, value);
                self.combine_status();
            }
            0x06 => bus.keyboard_write(value),
            0x08 => {
                // Split register: low nibble to ADPCM-B, high bits to FM
                self.adpcm.write(self.address - ADPCM_REGISTER_OFFSET, value & 0x0F, bus);
                self.fm.write(0x08, value & 0xC0);
            }
            0x07 | 0x0A..=0x12 | 0x15..=0x17 => {
                self.adpcm.write(self.address - ADPCM_REGISTER_OFFSET, value, bus);
            }
            0x18 => self.io_direction = value & 0x0F,
            0x19 => bus.io_write(value & self.io_direction),
            _ => self.fm.write(self.address, value),
        }
    }

    /// Read the status port: the mask-filtered combination of both engines'
    /// flags, recomputed (and fed back to the FM engine) on every read.
    pub fn read_status_port(&mut self) -> u8 {
        self.combine_status()
    }

    /// Read the data port, routing by the current address latch. Only a few
    /// addresses are readable; anything else is answered with 0xFF.
    pub fn read_data_port(&mut self, bus: &mut impl Y8950Bus) -> u8 {
        match self.address {
            0x05 => bus.keyboard_read(),
            0x09 | 0x1A => self.adpcm.read(self.address - ADPCM_REGISTER_OFFSET, bus),
            0x19 => bus.io_read(),
            _ => {
                log::warn!("Unexpected data port read with address latch {:02X}", self.address);
                0xFF
            }
        }
    }

    /// Announce elapsed input clock cycles. Cheap; sample synthesis is deferred
    /// to the next flush point.
    pub fn tick(&mut self, cycles: u32) {
        self.pending_cycles += u64::from(cycles);
    }

    /// Synthesize all samples owed for announced time.
    pub fn catch_up(&mut self, bus: &mut impl Y8950Bus) {
        while self.pending_cycles >= u64::from(CLOCK_DIVIDER) {
            self.pending_cycles -= u64::from(CLOCK_DIVIDER);
            let sample = self.produce_sample(bus);
            self.sample_buffer.push_back(sample);
        }
    }

    /// Catch up and emit every synthesized sample in order. This is the audio
    /// driver's pull path.
    pub fn drain_samples(&mut self, bus: &mut impl Y8950Bus, mut output: impl FnMut(i16)) {
        self.catch_up(bus);

        while let Some(sample) = self.sample_buffer.pop_front() {
            output(sample);
        }
    }

    /// Advance both engines one cycle and produce one mono sample: the summed
    /// engine outputs pushed through the DAC quantization round trip, clamped at
    /// the DAC's signed 16-bit boundary.
    pub fn produce_sample(&mut self, bus: &mut impl Y8950Bus) -> i16 {
        self.fm.clock();
        self.adpcm.clock(bus);

        let mut sum = self.fm.output();
        sum += self.adpcm.output();

        dac::quantize(sum).clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
    }

    /// Output sample rate for the current input clock.
    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.clock_frequency / CLOCK_DIVIDER
    }

    /// The input clock changed; the sample rate follows it.
    pub fn notify_clock_changed(&mut self, clock_frequency: u32) {
        self.clock_frequency = clock_frequency;

        log::debug!("Clock {clock_frequency} Hz, sample rate {} Hz", self.sample_rate());
    }

    /// Sample memory banking changed; synthesize owed samples against the old
    /// bank before the swap becomes visible.
    pub fn notify_rom_bank_changed(&mut self, bus: &mut impl Y8950Bus) {
        self.catch_up(bus);
    }

    fn combine_status(&mut self) -> u8 {
        let mut status = self.fm.status();

        let adpcm = self.adpcm.status();
        if adpcm & adpcm_status::EOS != 0 {
            status |= STATUS_ADPCM_EOS;
        }
        if adpcm & adpcm_status::BRDY != 0 {
            status |= STATUS_ADPCM_BRDY;
        }
        if adpcm & adpcm_status::PLAYING != 0 {
            status |= STATUS_ADPCM_PLAYING;
        }

        status &= self.irq_mask;

        // Keep the FM engine's own flag register consistent with the combined
        // view; its flag-and-reset behavior is what the host observes
        self.fm.set_reset_status(status, !status);

        status
    }
}
