use super::error::TicTacToeError;
use super::types::{Mark, Position};

pub const BOARD_SIZE: usize = 3;
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [[Mark; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [[Mark; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    /// Builds a board from loosely shaped row data, rejecting anything but 3x3.
    pub fn from_rows(rows: &[Vec<Mark>]) -> Result<Self, TicTacToeError> {
        if rows.len() != BOARD_SIZE {
            let cols = rows.first().map_or(0, |row| row.len());
            return Err(TicTacToeError::InvalidInput { rows: rows.len(), cols });
        }

        let mut cells = [[Mark::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (y, row) in rows.iter().enumerate() {
            if row.len() != BOARD_SIZE {
                return Err(TicTacToeError::InvalidInput {
                    rows: rows.len(),
                    cols: row.len(),
                });
            }
            cells[y].copy_from_slice(row);
        }

        Ok(Self { cells })
    }

    pub fn rows(&self) -> &[[Mark; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    pub fn get(&self, pos: Position) -> Option<Mark> {
        self.cells.get(pos.row).and_then(|row| row.get(pos.col)).copied()
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get(pos) == Some(Mark::Empty)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&cell| cell != Mark::Empty)
            .count()
    }

    pub fn is_full(&self) -> bool {
        self.occupied_count() == CELL_COUNT
    }

    /// X moves on an even number of occupied cells.
    pub fn side_to_move(&self) -> Mark {
        if self.occupied_count() % 2 == 0 {
            Mark::X
        } else {
            Mark::O
        }
    }

    pub fn available_moves(&self) -> Vec<Position> {
        let mut moves = Vec::with_capacity(CELL_COUNT);
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell == Mark::Empty {
                    moves.push(Position::new(row, col));
                }
            }
        }
        moves
    }

    /// Places the side-to-move's mark. The board is untouched on error.
    pub fn place(&mut self, pos: Position) -> Result<Mark, TicTacToeError> {
        let mark = self.side_to_move();
        self.place_mark(pos, mark)?;
        Ok(mark)
    }

    pub fn place_mark(&mut self, pos: Position, mark: Mark) -> Result<(), TicTacToeError> {
        match self.get(pos) {
            None => Err(TicTacToeError::OutOfBounds(pos)),
            Some(Mark::Empty) => {
                self.cells[pos.row][pos.col] = mark;
                Ok(())
            }
            Some(_) => Err(TicTacToeError::IllegalMove(pos)),
        }
    }

    pub fn clear(&mut self, pos: Position) -> Result<Mark, TicTacToeError> {
        let previous = self.get(pos).ok_or(TicTacToeError::OutOfBounds(pos))?;
        self.cells[pos.row][pos.col] = Mark::Empty;
        Ok(previous)
    }

    /// Copy with `mark` at `pos`. Unchecked: `pos` must be an empty cell on the board.
    pub(crate) fn with_mark(&self, pos: Position, mark: Mark) -> Self {
        debug_assert!(self.is_empty_at(pos), "with_mark on unavailable cell {}", pos);
        let mut next = *self;
        next.cells[pos.row][pos.col] = mark;
        next
    }
}

#[cfg(test)]
pub(crate) fn board_from_str(layout: &str) -> Board {
    let marks: Vec<Mark> = layout
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            'X' | 'x' => Mark::X,
            'O' | 'o' => Mark::O,
            _ => Mark::Empty,
        })
        .collect();
    assert_eq!(marks.len(), CELL_COUNT, "layout must describe 9 cells");

    let mut cells = [[Mark::Empty; BOARD_SIZE]; BOARD_SIZE];
    for (i, mark) in marks.into_iter().enumerate() {
        cells[i / BOARD_SIZE][i % BOARD_SIZE] = mark;
    }
    Board::from_cells(cells)
}
