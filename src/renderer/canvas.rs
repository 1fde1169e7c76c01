//! Character-cell frame buffer
//!
//! The play area (in pixels) is mapped onto a grid of terminal cells below a
//! one-row HUD. Drawing happens into the buffer; presenting is a separate step.

use crossterm::style::Color;

use crate::sim::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub color: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            color: Color::Reset,
        }
    }
}

/// Rows reserved above the playfield for the HUD
pub const HUD_ROWS: u16 = 1;

#[derive(Debug, Clone)]
pub struct Canvas {
    cols: u16,
    rows: u16,
    play_width: i32,
    play_height: i32,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(cols: u16, rows: u16, play_width: i32, play_height: i32) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(HUD_ROWS + 1);
        Self {
            cols,
            rows,
            play_width: play_width.max(1),
            play_height: play_height.max(1),
            cells: vec![Cell::default(); cols as usize * rows as usize],
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    pub fn get(&self, col: u16, row: u16) -> Option<Cell> {
        if col < self.cols && row < self.rows {
            Some(self.cells[row as usize * self.cols as usize + col as usize])
        } else {
            None
        }
    }

    pub fn put(&mut self, col: i32, row: i32, ch: char, color: Color) {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return;
        }
        let index = row as usize * self.cols as usize + col as usize;
        self.cells[index] = Cell { ch, color };
    }

    /// Write a string starting at a cell, clipped to the canvas
    pub fn text(&mut self, col: i32, row: i32, text: &str, color: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i32, row, ch, color);
        }
    }

    /// Write a string centred on a row
    pub fn text_centered(&mut self, row: i32, text: &str, color: Color) {
        let len = text.chars().count() as i32;
        self.text((self.cols as i32 - len) / 2, row, text, color);
    }

    fn playfield_rows(&self) -> i32 {
        (self.rows - HUD_ROWS) as i32
    }

    /// Cell column for a pixel x
    pub fn col_for(&self, x: i32) -> i32 {
        (x as i64 * self.cols as i64).div_euclid(self.play_width as i64) as i32
    }

    /// Cell row for a pixel y (HUD offset included)
    pub fn row_for(&self, y: i32) -> i32 {
        let rows = self.playfield_rows() as i64;
        (y as i64 * rows).div_euclid(self.play_height as i64) as i32 + HUD_ROWS as i32
    }

    /// Cells covered by a pixel rectangle as (col0, row0, col1, row1),
    /// exclusive at the far end and never empty
    pub fn project(&self, rect: &Rect) -> (i32, i32, i32, i32) {
        let col0 = self.col_for(rect.left());
        let row0 = self.row_for(rect.top());
        let col1 = self.col_for(rect.right() - 1).max(col0) + 1;
        let row1 = self.row_for(rect.bottom() - 1).max(row0) + 1;
        (col0, row0, col1, row1)
    }

    /// Fill the cells under a pixel rectangle, clipped to the playfield
    pub fn fill(&mut self, rect: &Rect, ch: char, color: Color) {
        let (col0, row0, col1, row1) = self.project(rect);
        for row in row0.max(HUD_ROWS as i32)..row1 {
            for col in col0..col1 {
                self.put(col, row, ch, color);
            }
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}
