//! GPIO and ADC adapters for the input capability traits.

use defmt::{warn, Debug2Format};
use embassy_rp::adc::{Adc, Blocking, Channel};
use embedded_hal::digital::InputPin;
use heapless::Vec;
use pico_gamepad_core::{AdcChannel, AnalogInput, DigitalInput, Level, LineId};

/// Upper bound on bound button lines.
pub const MAX_BUTTONS: usize = 16;

/// Upper bound on analog channels (RP2040 has four external ADC inputs).
pub const MAX_AXES: usize = 4;

/// Button inputs indexed by line ID.
///
/// Pins are expected to be configured as inputs with the internal pull-up
/// enabled, so a pressed button reads low.
pub struct PinBank<P, const N: usize> {
    pins: Vec<(LineId, P), N>,
}

impl<P: InputPin, const N: usize> PinBank<P, N> {
    #[must_use]
    pub const fn new() -> Self {
        Self { pins: Vec::new() }
    }

    /// Attach `pin` as `line`. Fails with the line ID when the bank is full.
    pub fn bind(&mut self, line: LineId, pin: P) -> Result<(), LineId> {
        self.pins.push((line, pin)).map_err(|(line, _)| line)
    }

    /// Whether a pin has been attached for `line`.
    #[must_use]
    pub fn has_line(&self, line: LineId) -> bool {
        self.pins.iter().any(|(id, _)| *id == line)
    }
}

impl<P: InputPin, const N: usize> Default for PinBank<P, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: InputPin, const N: usize> DigitalInput for PinBank<P, N> {
    fn read_line(&mut self, line: LineId) -> Level {
        let Some((_, pin)) = self.pins.iter_mut().find(|(id, _)| *id == line) else {
            warn!("No pin bound for line {}", line);
            return Level::High;
        };
        // An unreadable pin counts as released.
        pin.is_high().map_or(Level::High, Level::from)
    }
}

struct AxisChannel<'d> {
    id: AdcChannel,
    channel: Channel<'d>,
    /// Last good reading, reused when a conversion fails.
    last: u16,
}

/// Joystick axes read through the blocking ADC driver.
pub struct AdcAxes<'d> {
    adc: Adc<'d, Blocking>,
    channels: Vec<AxisChannel<'d>, MAX_AXES>,
}

impl<'d> AdcAxes<'d> {
    #[must_use]
    pub fn new(adc: Adc<'d, Blocking>) -> Self {
        Self {
            adc,
            channels: Vec::new(),
        }
    }

    /// Attach an ADC pin channel as `id`. Fails with the ID when full.
    pub fn bind(&mut self, id: AdcChannel, channel: Channel<'d>) -> Result<(), AdcChannel> {
        self.channels
            .push(AxisChannel {
                id,
                channel,
                last: 0,
            })
            .map_err(|slot| slot.id)
    }
}

impl AnalogInput for AdcAxes<'_> {
    fn read_channel(&mut self, id: AdcChannel) -> u16 {
        let Some(slot) = self.channels.iter_mut().find(|c| c.id == id) else {
            warn!("No ADC pin bound for channel {}", id);
            return 0;
        };

        match self.adc.blocking_read(&mut slot.channel) {
            Ok(raw) => {
                slot.last = raw;
                raw
            }
            Err(e) => {
                warn!("ADC read on {} failed: {}", id, Debug2Format(&e));
                slot.last
            }
        }
    }
}
