//! Cell styling shared by every matrix backend (image, text table).
//!
//! A cell is either empty, an IN adjustment (`+N`) or an OUT adjustment
//! (`-N`). The sign picks one of two fixed colors and the digits are what
//! gets printed in the cell.

use crate::error::{Error, Result};
use crate::matchup::Adjustment;
use crate::matrix::Matrix;

/// Fill color for cards brought in (#9abca7)
pub const IN_COLOR: [u8; 3] = [0x9a, 0xbc, 0xa7];
/// Fill color for cards taken out (#f7b2ad)
pub const OUT_COLOR: [u8; 3] = [0xf7, 0xb2, 0xad];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellTone {
    Empty,
    In,
    Out,
}

impl CellTone {
    /// Fill color, `None` for empty cells
    pub fn color(&self) -> Option<[u8; 3]> {
        match self {
            CellTone::Empty => None,
            CellTone::In => Some(IN_COLOR),
            CellTone::Out => Some(OUT_COLOR),
        }
    }

    /// Sign used by backends without color
    pub fn marker(&self) -> &'static str {
        match self {
            CellTone::Empty => "",
            CellTone::In => "+",
            CellTone::Out => "-",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellStyle {
    pub text: String,
    pub tone: CellTone,
}

/// Map one matrix cell to its display text and tone.
///
/// Anything other than `""`, `+N` or `-N` is an internal consistency error:
/// validated matchup rows never produce it.
pub fn cell_style(cell: &str) -> Result<CellStyle> {
    if cell.is_empty() {
        return Ok(CellStyle {
            text: String::new(),
            tone: CellTone::Empty,
        });
    }

    match Adjustment::parse(cell) {
        Some(adj) => Ok(CellStyle {
            text: adj.quantity().to_string(),
            tone: match adj {
                Adjustment::In(_) => CellTone::In,
                Adjustment::Out(_) => CellTone::Out,
            },
        }),
        None => {
            log::error!("Unexpected matrix cell value: {:?}", cell);
            Err(Error::InvalidCell(cell.to_string()))
        }
    }
}

/// Style every cell of `matrix`, row by row
pub fn styled_rows(matrix: &Matrix) -> Result<Vec<Vec<CellStyle>>> {
    matrix
        .rows()
        .iter()
        .map(|row| {
            row.cells
                .iter()
                .map(|cell| cell_style(cell))
                .collect::<Result<Vec<_>>>()
        })
        .collect()
}
