//! Display renderer with change suppression.
//!
//! Every line is left-aligned and space-padded to at least [`LCD_COLS`]
//! characters so a shorter message fully overwrites a longer one.  Lines
//! are never truncated.  A row is only sent to the display when its padded
//! text differs from what is already there.

use core::fmt::Write;

use log::warn;

use crate::app::ports::{DisplayPort, DisplayRow};
use crate::error::DisplayError;

/// Visible columns on the 16x2 LCD.
pub const LCD_COLS: usize = 16;

/// HD44780 DDRAM holds 40 characters per row; anything past that would
/// wrap into the other row.
const ROW_CAPACITY: usize = 40;

type RowText = heapless::String<ROW_CAPACITY>;

/// Owns the last text written to each row.
pub struct DisplayRenderer {
    rows: [RowText; 2],
}

impl Default for DisplayRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayRenderer {
    /// Empty cache: the first render always writes both rows.
    pub fn new() -> Self {
        Self {
            rows: [RowText::new(), RowText::new()],
        }
    }

    /// Show `line1` / `line2`, writing only the rows that changed.
    /// Returns how many rows were physically written.
    ///
    /// A row whose write fails keeps its old cache entry and is retried on
    /// the next render.
    pub fn render(&mut self, line1: &str, line2: &str, display: &mut impl DisplayPort) -> u8 {
        let mut written = 0;
        for (row, line) in [(DisplayRow::Top, line1), (DisplayRow::Bottom, line2)] {
            match self.render_row(row, line, display) {
                Ok(true) => written += 1,
                Ok(false) => {}
                Err(e) => warn!("Display: row {:?} not updated: {}", row, e),
            }
        }
        written
    }

    /// Last text written to `row` (padded), empty before the first write.
    pub fn cached(&self, row: DisplayRow) -> &str {
        self.rows[row as usize].as_str()
    }

    fn render_row(
        &mut self,
        row: DisplayRow,
        line: &str,
        display: &mut impl DisplayPort,
    ) -> Result<bool, DisplayError> {
        let padded = pad(line)?;
        let slot = &mut self.rows[row as usize];
        if *slot == padded {
            return Ok(false);
        }
        display.write_line(row, &padded)?;
        *slot = padded;
        Ok(true)
    }
}

/// Left-align and pad with spaces to at least [`LCD_COLS`] characters.
fn pad(line: &str) -> Result<RowText, DisplayError> {
    let mut out = RowText::new();
    write!(out, "{:<width$}", line, width = LCD_COLS).map_err(|_| DisplayError::LineTooLong)?;
    Ok(out)
}
