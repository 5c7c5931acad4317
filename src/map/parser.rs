//! Level parsing functionality for converting raw level text into a grid of cell values.

use crate::error::ParseError;

/// Highest value the 11-bit cell layout can express.
const MAX_CELL_VALUE: u32 = (1 << 11) - 1;

/// Parser for the comma-separated integer level format.
pub struct LevelParser;

impl LevelParser {
    /// Parses a single token into a cell value.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a non-negative integer or sets bits
    /// outside the cell layout.
    pub fn parse_value(token: &str, row: usize, column: usize) -> Result<u16, ParseError> {
        let trimmed = token.trim();
        let value: u32 = trimmed.parse().map_err(|_| ParseError::InvalidNumber {
            row,
            column,
            token: trimmed.to_string(),
        })?;

        if value > MAX_CELL_VALUE {
            return Err(ParseError::UnknownBits { row, column, value });
        }

        Ok(value as u16)
    }

    /// Parses raw level text into a rectangular, row-major grid of cell values.
    ///
    /// Blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error on the first malformed token, when rows differ in
    /// length, or when the level has no cells at all. No partial grid is returned.
    pub fn parse_grid(text: &str) -> Result<Vec<Vec<u16>>, ParseError> {
        let mut grid: Vec<Vec<u16>> = Vec::new();

        for line in text.lines().filter(|line| !line.trim().is_empty()) {
            let row = grid.len();
            let values = line
                .split(',')
                .enumerate()
                .map(|(column, token)| Self::parse_value(token, row, column))
                .collect::<Result<Vec<_>, _>>()?;

            if let Some(first) = grid.first() {
                if first.len() != values.len() {
                    return Err(ParseError::RaggedRow {
                        row,
                        expected: first.len(),
                        found: values.len(),
                    });
                }
            }

            grid.push(values);
        }

        if grid.is_empty() || grid[0].is_empty() {
            return Err(ParseError::Empty);
        }

        Ok(grid)
    }
}
