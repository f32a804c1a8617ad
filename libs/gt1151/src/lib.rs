//! Polled driver for the GT1151 capacitive touch controller
//!
//! The controller is read over I2C once per UI poll instead of waiting for
//! its interrupt line, which keeps the whole UI on one thread. Raw panel
//! coordinates are rotated into display space before they reach the touch
//! state machine.

mod error;

pub use error::Error;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;
use touch_ui::{TouchSample, TouchSampler};

pub const DEFAULT_ADDRESS: u8 = 0x14;
pub const PRODUCT_ID_REG: u16 = 0x8140;
pub const COORD_REG: u16 = 0x814E;
pub const CMD_REG: u16 = 0x8040;
pub const SLEEP_CMD: u8 = 0x05;
/// Status byte, track id, then x and y as little endian u16
pub const TOUCH_DATA_LEN: usize = 9;

const STATUS_READY: u8 = 0x80;
const STATUS_COUNT_MASK: u8 = 0x0F;

pub const RESET_LOW_DURATION_MS: u32 = 10;
pub const RESET_HIGH_DURATION_MS: u32 = 50;

/// How the panel is mounted relative to the display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Map a raw panel coordinate into display space.
    ///
    /// `panel` is the controller's native resolution as (width, height).
    pub fn apply(self, x: i32, y: i32, panel: (u16, u16)) -> (i32, i32) {
        let width = i32::from(panel.0);
        let height = i32::from(panel.1);
        match self {
            Rotation::Deg0 => (x, y),
            Rotation::Deg90 => (height - 1 - y, x),
            Rotation::Deg180 => (width - 1 - x, height - 1 - y),
            Rotation::Deg270 => (y, width - 1 - x),
        }
    }
}

/// Pulse the controller's reset line.
pub fn reset<P: OutputPin, D: DelayNs>(rst: &mut P, delay: &mut D) -> Result<(), P::Error> {
    rst.set_low()?;
    delay.delay_ms(RESET_LOW_DURATION_MS);
    rst.set_high()?;
    delay.delay_ms(RESET_HIGH_DURATION_MS);
    Ok(())
}

pub struct Gt1151<I2C> {
    i2c: I2C,
    address: u8,
    rotation: Rotation,
    panel: (u16, u16),
    last: TouchSample,
}

impl<I2C: I2c> Gt1151<I2C> {
    pub fn new(i2c: I2C, rotation: Rotation, panel: (u16, u16)) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS, rotation, panel)
    }

    pub fn with_address(i2c: I2C, address: u8, rotation: Rotation, panel: (u16, u16)) -> Self {
        Self {
            i2c,
            address,
            rotation,
            panel,
            last: TouchSample::released(),
        }
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Read the four ASCII digits identifying the controller
    pub fn product_id(&mut self) -> Result<String, Error<I2C::Error>> {
        let mut id = [0u8; 4];
        self.i2c
            .write_read(self.address, &PRODUCT_ID_REG.to_be_bytes(), &mut id)?;
        if !id.iter().all(u8::is_ascii_digit) {
            return Err(Error::ProductId(id));
        }
        let id: String = id.iter().map(|&b| char::from(b)).collect();
        log::info!("Touchscreen Product ID: {id}");
        Ok(id)
    }

    /// Read one coordinate report.
    ///
    /// Returns `None` while the controller has no fresh report. A fresh
    /// report is acknowledged by clearing its status byte.
    pub fn read(&mut self) -> Result<Option<TouchSample>, Error<I2C::Error>> {
        let reg = COORD_REG.to_be_bytes();
        let mut data = [0u8; TOUCH_DATA_LEN];
        self.i2c.write_read(self.address, &reg, &mut data)?;

        let status = data[0];
        if status & STATUS_READY == 0 {
            return Ok(None);
        }
        self.i2c.write(self.address, &[reg[0], reg[1], 0])?;

        if status & STATUS_COUNT_MASK == 0 {
            return Ok(Some(TouchSample::released()));
        }
        let x = i32::from(u16::from_le_bytes([data[2], data[3]]));
        let y = i32::from(u16::from_le_bytes([data[4], data[5]]));
        let (x, y) = self.rotation.apply(x, y, self.panel);
        Ok(Some(TouchSample::at(x, y)))
    }

    pub fn sleep(&mut self) -> Result<(), Error<I2C::Error>> {
        let cmd = CMD_REG.to_be_bytes();
        self.i2c.write(self.address, &[cmd[0], cmd[1], SLEEP_CMD])?;
        Ok(())
    }
}

impl<I2C: I2c> TouchSampler for Gt1151<I2C> {
    /// Latest report, or the previous sample when none is ready or the bus
    /// failed
    fn sample(&mut self) -> TouchSample {
        match self.read() {
            Ok(Some(sample)) => self.last = sample,
            Ok(None) => {}
            Err(e) => log::error!("Error reading touch data: {e}"),
        }
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_maps_panel_corners() {
        let panel = (122, 250);
        assert_eq!(Rotation::Deg0.apply(0, 0, panel), (0, 0));
        assert_eq!(Rotation::Deg90.apply(0, 0, panel), (249, 0));
        assert_eq!(Rotation::Deg90.apply(121, 249, panel), (0, 121));
        assert_eq!(Rotation::Deg180.apply(0, 0, panel), (121, 249));
        assert_eq!(Rotation::Deg270.apply(0, 0, panel), (0, 121));
    }
}
