use super::piece::{OccupiedCell, Piece, PieceKind};

const WIDTH: usize = 10;
const HEIGHT: usize = 20;

/// A single cell of the field or of a piece matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Block {
    /// Empty cell.
    #[default]
    Empty,
    /// Block of a specific piece kind.
    Piece(PieceKind),
}

impl Block {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Block::Empty
    }

    /// `0` for empty cells, otherwise the piece kind's color index (`1..=7`).
    #[must_use]
    pub fn color_index(self) -> u8 {
        match self {
            Block::Empty => 0,
            Block::Piece(kind) => kind.color_index(),
        }
    }
}

/// A single row of the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRow {
    cells: [Block; WIDTH],
}

impl FieldRow {
    const EMPTY: Self = Self {
        cells: [Block::Empty; WIDTH],
    };

    #[must_use]
    pub fn cells(&self) -> &[Block; WIDTH] {
        &self.cells
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|b| !b.is_empty())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|b| b.is_empty())
    }
}

/// The 10×20 grid of locked cells.
///
/// Row `0` is the top of the visible field. Cells above it (negative rows) are
/// never stored: pieces may hang there while spawning but nothing locks there.
///
/// # Example
///
/// ```
/// use stackfall_engine::{Field, Piece, PieceKind};
///
/// let mut field = Field::new();
/// let piece = Piece::spawn(PieceKind::I).simulate_drop_position(&field);
/// field.lock_piece(piece.occupied_cells());
/// assert_eq!(field.clear_full_lines(), 0);
/// assert!(!field.cell(3, 19).is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    rows: [FieldRow; HEIGHT],
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}

impl Field {
    pub const WIDTH: usize = WIDTH;
    pub const HEIGHT: usize = HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [FieldRow::EMPTY; HEIGHT],
    };

    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Returns the block at `(col, row)`.
    ///
    /// Panics if the coordinates are outside the field.
    #[must_use]
    pub fn cell(&self, col: usize, row: usize) -> Block {
        self.rows[row].cells[col]
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &FieldRow> + '_ {
        self.rows.iter()
    }

    /// Checks whether every cell is inside the walls and the floor and does not
    /// overlap a locked block.
    ///
    /// Cells above the visible field (`row < 0`) only need to be within the
    /// walls; they are never checked against occupancy.
    pub fn is_valid_placement<I>(&self, cells: I) -> bool
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        cells.into_iter().all(|(col, row)| {
            let Ok(col) = usize::try_from(col) else {
                return false;
            };
            if col >= Self::WIDTH {
                return false;
            }
            match usize::try_from(row) {
                Ok(row) => row < Self::HEIGHT && self.rows[row].cells[col].is_empty(),
                Err(_) => true,
            }
        })
    }

    /// Shorthand for [`Self::is_valid_placement`] on a piece's current cells.
    #[must_use]
    pub fn can_place(&self, piece: &Piece) -> bool {
        self.is_valid_placement(piece.occupied_cells().iter().map(|c| c.position()))
    }

    /// Writes the cells into the grid.
    ///
    /// Callers validate the placement first. Cells above the visible field are
    /// dropped; any other out-of-range cell is a bug and panics.
    pub fn lock_piece<I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = OccupiedCell>,
    {
        for cell in cells {
            let Ok(row) = usize::try_from(cell.row) else {
                continue;
            };
            let col = usize::try_from(cell.col).expect("locked cell left of the field");
            self.rows[row].cells[col] = Block::Piece(cell.kind);
        }
    }

    /// Removes every full row at once and returns how many were removed.
    ///
    /// Remaining rows keep their relative order and sink to the bottom; the
    /// freed rows at the top become empty.
    pub fn clear_full_lines(&mut self) -> usize {
        let mut count = 0;
        for y in (0..Self::HEIGHT).rev() {
            if self.rows[y].is_full() {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill(FieldRow::EMPTY);
        count
    }

    /// Empties every cell.
    pub fn reset(&mut self) {
        self.rows.fill(FieldRow::EMPTY);
    }

    /// Fills a whole row with the given block, for setting up positions.
    pub fn fill_row(&mut self, row: usize, block: Block) {
        self.rows[row].cells.fill(block);
    }

    /// Sets a single cell, for setting up positions.
    pub fn set_cell(&mut self, col: usize, row: usize, block: Block) {
        self.rows[row].cells[col] = block;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PiecePosition;

    const I: Block = Block::Piece(PieceKind::I);
    const T: Block = Block::Piece(PieceKind::T);

    fn color_grid(field: &Field) -> Vec<[u8; Field::WIDTH]> {
        field
            .rows()
            .map(|row| row.cells().map(Block::color_index))
            .collect()
    }

    #[test]
    fn test_initial_field_is_empty() {
        let field = Field::new();
        assert_eq!(field.rows().count(), Field::HEIGHT);
        assert!(field.rows().all(FieldRow::is_empty));
    }

    #[test]
    fn test_placement_rejects_walls_and_floor() {
        let field = Field::new();
        assert!(field.is_valid_placement([(0, 0), (9, 19)]));
        assert!(!field.is_valid_placement([(-1, 0)]));
        assert!(!field.is_valid_placement([(10, 0)]));
        assert!(!field.is_valid_placement([(0, 20)]));
        // one bad cell spoils the whole placement
        assert!(!field.is_valid_placement([(4, 4), (4, 20)]));
    }

    #[test]
    fn test_placement_above_field_ignores_occupancy() {
        let mut field = Field::new();
        field.fill_row(0, I);
        assert!(field.is_valid_placement([(4, -1), (5, -2)]));
        assert!(!field.is_valid_placement([(4, -1), (4, 0)]));
        // walls still apply above the field
        assert!(!field.is_valid_placement([(-1, -1)]));
        assert!(!field.is_valid_placement([(10, -3)]));
    }

    #[test]
    fn test_placement_rejects_locked_cells() {
        let mut field = Field::new();
        field.set_cell(3, 10, T);
        assert!(!field.is_valid_placement([(3, 10)]));
        assert!(field.is_valid_placement([(2, 10), (4, 10), (3, 9), (3, 11)]));
    }

    #[test]
    fn test_lock_piece_writes_color() {
        let mut field = Field::new();
        let piece = Piece::spawn(PieceKind::T);
        field.lock_piece(piece.occupied_cells());
        assert_eq!(field.cell(5, 0), T);
        assert_eq!(field.cell(4, 1).color_index(), 6);
        assert_eq!(field.cell(6, 1), T);
        assert!(field.cell(4, 0).is_empty());
    }

    #[test]
    fn test_lock_piece_drops_cells_above_field() {
        let mut field = Field::new();
        let piece = Piece::spawn(PieceKind::I)
            .rotated_right()
            .moved_to(PiecePosition::new(0, -2));
        field.lock_piece(piece.occupied_cells());
        assert_eq!(field.cell(0, 0), I);
        assert_eq!(field.cell(0, 1), I);
        assert!(field.cell(0, 2).is_empty());
    }

    #[test]
    fn test_clear_empty_field() {
        let mut field = Field::new();
        assert_eq!(field.clear_full_lines(), 0);
        assert_eq!(field, Field::new());
    }

    #[test]
    fn test_clear_partial_line_is_kept() {
        let mut field = Field::new();
        field.fill_row(19, I);
        field.set_cell(9, 19, Block::Empty);
        let before = field.clone();
        assert_eq!(field.clear_full_lines(), 0);
        assert_eq!(field, before);
    }

    #[test]
    fn test_clear_shifts_rows_above() {
        let mut field = Field::new();
        field.fill_row(19, I);
        field.set_cell(2, 18, T);
        field.set_cell(7, 17, T);

        assert_eq!(field.clear_full_lines(), 1);
        assert_eq!(field.cell(2, 19), T);
        assert_eq!(field.cell(7, 18), T);
        assert!(field.rows().take(18).all(FieldRow::is_empty));
    }

    #[test]
    fn test_clear_non_adjacent_rows_preserves_order() {
        let mut field = Field::new();
        // markers on kept rows: column = original row index % 10
        for row in 0..Field::HEIGHT {
            field.set_cell(row % Field::WIDTH, row, T);
        }
        let full_rows = [3, 7, 8, 19];
        for &row in &full_rows {
            field.fill_row(row, I);
        }
        let kept: Vec<_> = color_grid(&field)
            .into_iter()
            .enumerate()
            .filter(|(row, _)| !full_rows.contains(row))
            .map(|(_, cells)| cells)
            .collect();

        assert_eq!(field.clear_full_lines(), full_rows.len());

        let grid = color_grid(&field);
        let (top, rest) = grid.split_at(full_rows.len());
        assert!(top.iter().all(|row| row.iter().all(|&c| c == 0)));
        assert_eq!(rest, &kept[..]);
    }

    #[test]
    fn test_clear_every_row() {
        let mut field = Field::new();
        for row in 0..Field::HEIGHT {
            field.fill_row(row, I);
        }
        assert_eq!(field.clear_full_lines(), Field::HEIGHT);
        assert_eq!(field, Field::new());
    }

    #[test]
    fn test_reset() {
        let mut field = Field::new();
        field.fill_row(5, T);
        field.set_cell(0, 0, I);
        field.reset();
        assert_eq!(field, Field::new());
    }
}
