//! # Input Reading
//!
//! Line-based input for the kiosk shell. Generic over `BufRead` so tests can
//! drive it from a `Cursor` while the binary wires it to stdin.
//!
//! The reader is deliberately forgiving: garbage menu input becomes `-1`
//! (which no menu maps to, so the shell re-prompts), while plates are
//! validated against the domain rules and rejected with a typed error.

use std::io::{self, BufRead, BufReader, Stdin};

use parkwise_core::validation::validate_reg_number;
use parkwise_core::ValidationError;

/// Reads attendant input line by line.
pub struct InputReader<R> {
    reader: R,
}

impl InputReader<BufReader<Stdin>> {
    /// Reader over the process stdin.
    pub fn stdin() -> Self {
        InputReader {
            reader: BufReader::new(io::stdin()),
        }
    }
}

impl<R: BufRead> InputReader<R> {
    /// Wraps any buffered reader (tests use `Cursor<&str>`).
    pub fn new(reader: R) -> Self {
        InputReader { reader }
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        self.reader.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    /// Reads a menu selection.
    ///
    /// ## Returns
    /// The parsed number, or `-1` for anything that isn't one. `-1` maps to
    /// no menu entry, so callers naturally fall into their "invalid choice"
    /// branch without a separate error path.
    pub fn read_selection(&mut self) -> io::Result<i32> {
        let line = self.read_line()?;
        Ok(line.parse::<i32>().unwrap_or(-1))
    }

    /// Reads and validates a vehicle registration number.
    pub fn read_vehicle_reg_number(&mut self) -> io::Result<Result<String, ValidationError>> {
        let line = self.read_line()?;
        Ok(validate_reg_number(&line))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(input: &str) -> InputReader<Cursor<&str>> {
        InputReader::new(Cursor::new(input))
    }

    #[test]
    fn test_read_selection_parses_numbers() {
        let mut input = reader("1\n2\n3\n");
        assert_eq!(input.read_selection().unwrap(), 1);
        assert_eq!(input.read_selection().unwrap(), 2);
        assert_eq!(input.read_selection().unwrap(), 3);
    }

    #[test]
    fn test_read_selection_maps_garbage_to_minus_one() {
        let mut input = reader("abc\n\n  \n4x\n");
        for _ in 0..4 {
            assert_eq!(input.read_selection().unwrap(), -1);
        }
    }

    #[test]
    fn test_read_selection_trims_whitespace() {
        let mut input = reader("  2  \n");
        assert_eq!(input.read_selection().unwrap(), 2);
    }

    #[test]
    fn test_read_vehicle_reg_number_validates() {
        let mut input = reader("AB-123-CD\n\nAB#99\n");

        assert_eq!(
            input.read_vehicle_reg_number().unwrap().unwrap(),
            "AB-123-CD"
        );
        assert!(input.read_vehicle_reg_number().unwrap().is_err());
        assert!(input.read_vehicle_reg_number().unwrap().is_err());
    }
}
