//! 16x2 HD44780 character LCD behind a PCF8574 I²C backpack.
//!
//! The expander drives the LCD in 4-bit mode:
//!
//! ```text
//!  PCF8574  P7 P6 P5 P4 | P3  P2  P1  P0
//!  LCD      D7 D6 D5 D4 | BL  EN  RW  RS
//! ```
//!
//! Every byte goes out as two nibbles, each latched by an EN pulse.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::info;

use crate::app::ports::{DisplayPort, DisplayRow};
use crate::error::DisplayError;

const BACKLIGHT: u8 = 0x08;
const ENABLE: u8 = 0x04;
const REGISTER_SELECT: u8 = 0x01;

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE_INCREMENT: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;
const CMD_SET_DDRAM: u8 = 0x80;

/// DDRAM address of column 0 on each row.
const ROW_OFFSETS: [u8; 2] = [0x00, 0x40];
/// DDRAM characters per row.
pub const ROW_CAPACITY: usize = 40;

pub struct Lcd1602<I, D> {
    i2c: I,
    delay: D,
    address: u8,
}

impl<I: I2c, D: DelayNs> Lcd1602<I, D> {
    pub fn new(i2c: I, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
        }
    }

    /// Power-on initialization by instruction (HD44780 datasheet, fig. 24),
    /// then clear with the backlight on.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.delay.delay_ms(50);
        self.expander_write(0)?;
        self.delay.delay_ms(1);

        // Three 8-bit function sets force a known state, then switch to 4-bit.
        self.write_nibble(0x30)?;
        self.delay.delay_us(4_500);
        self.write_nibble(0x30)?;
        self.delay.delay_us(4_500);
        self.write_nibble(0x30)?;
        self.delay.delay_us(150);
        self.write_nibble(0x20)?;

        self.command(CMD_FUNCTION_4BIT_2LINE)?;
        self.command(CMD_DISPLAY_ON)?;
        self.clear()?;
        self.command(CMD_ENTRY_MODE_INCREMENT)?;
        info!("LCD: ready at I2C 0x{:02X}", self.address);
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(CMD_CLEAR)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    /// Move the cursor.  Columns past the row's DDRAM are clamped to its
    /// last cell.
    pub fn set_cursor(&mut self, col: u8, row: DisplayRow) -> Result<(), DisplayError> {
        let col = col.min(ROW_CAPACITY as u8 - 1);
        self.command(CMD_SET_DDRAM | (ROW_OFFSETS[row as usize] + col))
    }

    /// Write text at the cursor.  Characters outside printable ASCII are
    /// shown as `?`; the controller's ROM has no mapping for them.
    pub fn print(&mut self, text: &str) -> Result<(), DisplayError> {
        for ch in text.chars() {
            let byte = if ch.is_ascii() && !ch.is_ascii_control() {
                ch as u8
            } else {
                b'?'
            };
            self.send(byte, REGISTER_SELECT)?;
        }
        Ok(())
    }

    fn command(&mut self, value: u8) -> Result<(), DisplayError> {
        self.send(value, 0)
    }

    fn send(&mut self, value: u8, mode: u8) -> Result<(), DisplayError> {
        self.write_nibble((value & 0xF0) | mode)?;
        self.write_nibble((value << 4) | mode)
    }

    fn write_nibble(&mut self, bits: u8) -> Result<(), DisplayError> {
        self.expander_write(bits | ENABLE)?;
        self.delay.delay_us(1);
        self.expander_write(bits & !ENABLE)?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn expander_write(&mut self, bits: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, &[bits | BACKLIGHT])
            .map_err(|_| DisplayError::Bus)
    }
}

impl<I: I2c, D: DelayNs> DisplayPort for Lcd1602<I, D> {
    fn write_line(&mut self, row: DisplayRow, text: &str) -> Result<(), DisplayError> {
        if text.chars().count() > ROW_CAPACITY {
            return Err(DisplayError::LineTooLong);
        }
        self.set_cursor(0, row)?;
        self.print(text)
    }
}
