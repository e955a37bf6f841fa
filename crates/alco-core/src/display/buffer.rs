//! In-RAM character grid with change detection.
//!
//! Mirrors what a 16x2 HD44780 shows: printing writes at the cursor and
//! advances it, text past the last column is lost, and `clear` blanks the
//! grid. The simulator renders it to the terminal whenever it is dirty.

use core::convert::Infallible;

use super::{COLUMNS, ROWS, TextDisplay};

const COLS: usize = COLUMNS as usize;
const LINES: usize = ROWS as usize;

/// Character grid implementing [`TextDisplay`].
#[derive(Debug, Clone)]
pub struct CharBuffer {
    cells: [[u8; COLS]; LINES],
    col: usize,
    row: usize,
    dirty: bool,
}

impl Default for CharBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl CharBuffer {
    /// Blank grid with the cursor at the origin.
    pub const fn new() -> Self {
        Self {
            cells: [[b' '; COLS]; LINES],
            col: 0,
            row: 0,
            dirty: false,
        }
    }

    /// Full text of a row, padded with spaces to the display width.
    ///
    /// Returns an empty string for rows outside the grid.
    pub fn row_text(&self, row: usize) -> &str {
        match self.cells.get(row) {
            // Only printable ASCII is ever stored
            Some(line) => core::str::from_utf8(line).unwrap_or(""),
            None => "",
        }
    }

    /// Current cursor position as `(col, row)`.
    pub fn cursor(&self) -> (usize, usize) {
        (self.col, self.row)
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn take_dirty(&mut self) -> bool {
        core::mem::take(&mut self.dirty)
    }

    fn put(&mut self, byte: u8) {
        if self.row < LINES && self.col < COLS {
            let byte = if byte.is_ascii_graphic() || byte == b' ' {
                byte
            } else {
                b'?'
            };
            if self.cells[self.row][self.col] != byte {
                self.cells[self.row][self.col] = byte;
                self.dirty = true;
            }
        }
        self.col = self.col.saturating_add(1);
    }
}

impl TextDisplay for CharBuffer {
    type Error = Infallible;

    async fn clear(&mut self) -> Result<(), Self::Error> {
        if self.cells.iter().flatten().any(|&c| c != b' ') {
            self.dirty = true;
        }
        self.cells = [[b' '; COLS]; LINES];
        self.col = 0;
        self.row = 0;
        Ok(())
    }

    async fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Self::Error> {
        self.col = col as usize;
        self.row = row as usize;
        Ok(())
    }

    async fn print(&mut self, text: &str) -> Result<(), Self::Error> {
        for byte in text.bytes() {
            self.put(byte);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    #[test]
    fn test_print_advances_cursor() {
        let mut buffer = CharBuffer::new();
        block_on(async {
            buffer.set_cursor(2, 1).await.unwrap();
            buffer.print("ab").await.unwrap();
            buffer.print("c").await.unwrap();
        });

        assert_eq!(buffer.row_text(1), "  abc           ");
        assert_eq!(buffer.cursor(), (5, 1));
    }

    #[test]
    fn test_overflow_is_dropped() {
        let mut buffer = CharBuffer::new();
        block_on(buffer.print("0123456789ABCDEFGHIJ")).unwrap();

        assert_eq!(buffer.row_text(0), "0123456789ABCDEF");
        assert_eq!(buffer.row_text(1), "                ");
    }

    #[test]
    fn test_dirty_tracking() {
        let mut buffer = CharBuffer::new();
        assert!(!buffer.take_dirty());

        block_on(buffer.print("x")).unwrap();
        assert!(buffer.take_dirty());
        assert!(!buffer.take_dirty());

        // Rewriting identical content is not a change
        block_on(async {
            buffer.set_cursor(0, 0).await.unwrap();
            buffer.print("x").await.unwrap();
        });
        assert!(!buffer.take_dirty());

        block_on(buffer.clear()).unwrap();
        assert!(buffer.take_dirty());
        assert_eq!(buffer.cursor(), (0, 0));
    }

    #[test]
    fn test_non_ascii_is_replaced() {
        let mut buffer = CharBuffer::new();
        block_on(buffer.print("é")).unwrap();
        // Two UTF-8 bytes, two placeholder cells
        assert_eq!(&buffer.row_text(0)[..2], "??");
    }
}
