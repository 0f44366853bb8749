//! 4×3 channel grid plus rhythm strip.

use crate::types::{Channel, Rect};
use serde::Serialize;

pub const GRID_ROWS: usize = 4;
pub const GRID_COLS: usize = 3;

/// Cell rectangles in row-major order and the rhythm strip below them.
///
/// Adjacent cells share their boundaries exactly, so the 12 cells and the
/// rhythm strip tile the page without gaps or overlaps.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCells {
    pub cells: [[Rect; GRID_COLS]; GRID_ROWS],
    pub rhythm: Rect,
}

impl GridCells {
    /// Build from `GRID_COLS + 1` column and `GRID_ROWS + 1` row boundaries.
    ///
    /// The rhythm strip spans the full width from the last row boundary to
    /// `page.y1`.
    pub fn from_boundaries(
        page: &Rect,
        cols: &[f32; GRID_COLS + 1],
        rows: &[f32; GRID_ROWS + 1],
    ) -> Self {
        let mut cells = [[Rect::default(); GRID_COLS]; GRID_ROWS];
        for (r, row) in cells.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = Rect {
                    x0: cols[c],
                    y0: rows[r],
                    x1: cols[c + 1],
                    y1: rows[r + 1],
                };
            }
        }
        let rhythm = Rect {
            x0: page.x0,
            y0: rows[GRID_ROWS],
            x1: page.x1,
            y1: page.y1,
        };
        Self { cells, rhythm }
    }

    /// Evenly spaced grid above `rhythm_top`.
    pub fn uniform(page: &Rect, rhythm_top: f32) -> Self {
        let cols = even_boundaries::<{ GRID_COLS + 1 }>(page.x0, page.x1);
        let rows = even_boundaries::<{ GRID_ROWS + 1 }>(page.y0, rhythm_top);
        Self::from_boundaries(page, &cols, &rows)
    }

    pub fn cell(&self, row: usize, col: usize) -> Rect {
        self.cells[row][col]
    }

    /// All 13 named rectangles in channel order.
    pub fn named(&self) -> Vec<(Channel, Rect)> {
        Channel::ALL
            .iter()
            .map(|&ch| match ch.grid_position() {
                Some((r, c)) => (ch, self.cell(r, c)),
                None => (ch, self.rhythm),
            })
            .collect()
    }
}

/// `N` boundaries splitting `[start, end]` into `N - 1` equal bands.
///
/// The first and last entries are exactly `start` and `end`.
pub fn even_boundaries<const N: usize>(start: f32, end: f32) -> [f32; N] {
    let mut out = [start; N];
    let bands = (N - 1) as f32;
    for (i, b) in out.iter_mut().enumerate().skip(1) {
        *b = start + (end - start) * i as f32 / bands;
    }
    out[N - 1] = end;
    out
}
