//! Layout loader: turns a character stream into the initial grid.

use thiserror::Error;

use crate::cell::CellType;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout source ended after {found} of {needed} cell tokens")]
    NotEnoughTokens { needed: usize, found: usize },
}

/// Consume characters one at a time, keeping only the cell tokens
/// `E S F C G`, until exactly `grid_size * grid_size` cells have been
/// read. Everything after the last needed token is ignored.
pub fn parse(source: &str, grid_size: usize) -> Result<Vec<CellType>, LayoutError> {
    let needed = grid_size * grid_size;
    let mut cells = Vec::with_capacity(needed);
    for c in source.chars() {
        if let Some(kind) = CellType::from_token(c) {
            cells.push(kind);
            if cells.len() == needed {
                break;
            }
        }
    }
    if cells.len() < needed {
        return Err(LayoutError::NotEnoughTokens {
            needed,
            found: cells.len(),
        });
    }
    Ok(cells)
}
