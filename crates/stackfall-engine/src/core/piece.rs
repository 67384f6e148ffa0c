use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};

use super::field::{Block, Field};

/// A falling tetromino: its kind, current cell matrix, and top-left anchor on the field.
///
/// Pieces are plain values. Movement and rotation return new `Piece` instances and
/// never validate anything themselves; the caller asks the [`Field`] whether the
/// result may be placed.
///
/// # Coordinate System
///
/// - The anchor is the field position of the matrix's top-left cell
/// - X increases rightward (columns), Y increases downward (rows)
/// - Rows above the visible field are negative
///
/// # Example
///
/// ```
/// use stackfall_engine::{Field, Piece, PieceKind};
///
/// let field = Field::new();
/// let piece = Piece::spawn(PieceKind::T);
/// let moved = piece.right().rotated_right();
/// assert!(field.can_place(&moved));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    matrix: PieceMatrix,
    position: PiecePosition,
}

impl Piece {
    /// Creates a piece of the given kind in its canonical orientation.
    ///
    /// The anchor is centered horizontally (`WIDTH / 2 - matrix_width / 2`) on the top row.
    #[must_use]
    pub fn spawn(kind: PieceKind) -> Self {
        let matrix = kind.spawn_matrix();
        Self {
            kind,
            matrix,
            position: PiecePosition::spawn_for(&matrix),
        }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn color_index(&self) -> u8 {
        self.kind.color_index()
    }

    #[must_use]
    pub fn matrix(&self) -> &PieceMatrix {
        &self.matrix
    }

    #[must_use]
    pub fn position(&self) -> PiecePosition {
        self.position
    }

    /// Returns this piece's matrix rotated 90° clockwise, leaving the piece untouched.
    #[must_use]
    pub fn rotated_matrix(&self) -> PieceMatrix {
        self.matrix.rotated_right()
    }

    /// Absolute field cells covered by this piece.
    #[must_use]
    pub fn occupied_cells(&self) -> ArrayVec<OccupiedCell, 4> {
        self.occupied_cells_with(&self.matrix, self.position)
    }

    /// Absolute field cells this piece would cover with another matrix or anchor.
    #[must_use]
    pub fn occupied_cells_with(
        &self,
        matrix: &PieceMatrix,
        position: PiecePosition,
    ) -> ArrayVec<OccupiedCell, 4> {
        matrix
            .occupied_offsets()
            .map(|(dx, dy)| OccupiedCell {
                col: position.x + dx,
                row: position.y + dy,
                kind: self.kind,
            })
            .collect()
    }

    /// Same piece placed at another anchor.
    #[must_use]
    pub fn moved_to(&self, position: PiecePosition) -> Self {
        Self { position, ..*self }
    }

    #[must_use]
    pub fn left(&self) -> Self {
        self.moved_to(self.position.left())
    }

    #[must_use]
    pub fn right(&self) -> Self {
        self.moved_to(self.position.right())
    }

    #[must_use]
    pub fn down(&self) -> Self {
        self.moved_to(self.position.down())
    }

    /// Same anchor, matrix rotated 90° clockwise. No kick offsets are tried.
    #[must_use]
    pub fn rotated_right(&self) -> Self {
        Self {
            matrix: self.rotated_matrix(),
            ..*self
        }
    }

    /// Lowest position reachable by moving straight down from here.
    ///
    /// Also used for the ghost preview. Returns `self` if it cannot move down at all.
    #[must_use]
    pub fn simulate_drop_position(&self, field: &Field) -> Self {
        let mut dropped = *self;
        loop {
            let next = dropped.down();
            if !field.can_place(&next) {
                return dropped;
            }
            dropped = next;
        }
    }
}

/// A single field cell covered by a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccupiedCell {
    pub col: i32,
    pub row: i32,
    pub kind: PieceKind,
}

impl OccupiedCell {
    #[must_use]
    pub fn position(self) -> (i32, i32) {
        (self.col, self.row)
    }

    #[must_use]
    pub fn color_index(self) -> u8 {
        self.kind.color_index()
    }
}

/// Anchor (top-left of the matrix) of a piece in field coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PiecePosition {
    x: i32,
    y: i32,
}

impl PiecePosition {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn spawn_for(matrix: &PieceMatrix) -> Self {
        let x = Field::WIDTH / 2 - matrix.width() / 2;
        Self::new(x as i32, 0)
    }

    #[must_use]
    pub const fn x(self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> i32 {
        self.y
    }

    #[must_use]
    pub const fn left(self) -> Self {
        Self::new(self.x - 1, self.y)
    }

    #[must_use]
    pub const fn right(self) -> Self {
        Self::new(self.x + 1, self.y)
    }

    #[must_use]
    pub const fn down(self) -> Self {
        Self::new(self.x, self.y + 1)
    }
}

/// Cell matrix of a piece in one orientation, stored in a fixed 4×4 buffer.
///
/// Only the top-left `width × height` cells are meaningful; the rest stay
/// [`Block::Empty`] so that equality compares orientations exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceMatrix {
    cells: [[Block; 4]; 4],
    width: usize,
    height: usize,
}

impl PieceMatrix {
    /// Builds a matrix from rows of color indices (`0` = empty).
    ///
    /// Every non-zero entry must equal `kind.color_index()`, which is checked at
    /// compile time for the canonical table.
    const fn from_rows(kind: PieceKind, rows: &[&[u8]]) -> Self {
        let height = rows.len();
        let width = rows[0].len();
        assert!(height <= 4 && width <= 4);
        let mut cells = [[Block::Empty; 4]; 4];
        let mut y = 0;
        while y < height {
            assert!(rows[y].len() == width);
            let mut x = 0;
            while x < width {
                let value = rows[y][x];
                assert!(value == 0 || value == kind.color_index());
                if value != 0 {
                    cells[y][x] = Block::Piece(kind);
                }
                x += 1;
            }
            y += 1;
        }
        Self {
            cells,
            width,
            height,
        }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns the block at `(x, y)`, or `Empty` outside the matrix.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Block {
        if x < self.width && y < self.height {
            self.cells[y][x]
        } else {
            Block::Empty
        }
    }

    /// Iterates over the matrix rows, each trimmed to `width`.
    pub fn rows(&self) -> impl Iterator<Item = &[Block]> + '_ {
        self.cells[..self.height]
            .iter()
            .map(|row| &row[..self.width])
    }

    /// Rotates 90° clockwise (transpose, then reverse each row).
    #[must_use]
    pub fn rotated_right(&self) -> Self {
        let mut cells = [[Block::Empty; 4]; 4];
        let (width, height) = (self.height, self.width);
        for (y, row) in cells.iter_mut().enumerate().take(height) {
            for (x, cell) in row.iter_mut().enumerate().take(width) {
                *cell = self.cells[self.height - 1 - x][y];
            }
        }
        Self {
            cells,
            width,
            height,
        }
    }

    /// Offsets `(dx, dy)` of the occupied cells, row by row.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn occupied_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.rows().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, block)| !block.is_empty())
                .map(move |(dx, _)| (dx as i32, dy as i32))
        })
    }
}

/// The seven tetromino kinds, in canonical table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// J-piece.
    J = 1,
    /// L-piece.
    L = 2,
    /// O-piece.
    O = 3,
    /// S-piece.
    S = 4,
    /// T-piece.
    T = 5,
    /// Z-piece.
    Z = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Fixed display color of this kind, `1..=7`. `0` is reserved for empty cells.
    #[must_use]
    pub const fn color_index(self) -> u8 {
        self as u8 + 1
    }

    /// The canonical (spawn) orientation of this kind.
    #[must_use]
    pub const fn spawn_matrix(self) -> PieceMatrix {
        SPAWN_MATRICES[self as usize]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::Z.as_char(), 'Z');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }
}

const SPAWN_MATRICES: [PieceMatrix; PieceKind::LEN] = {
    use PieceKind::{I, J, L, O, S, T, Z};
    [
        PieceMatrix::from_rows(I, &[&[1, 1, 1, 1]]),
        PieceMatrix::from_rows(J, &[&[2, 0, 0], &[2, 2, 2]]),
        PieceMatrix::from_rows(L, &[&[0, 0, 3], &[3, 3, 3]]),
        PieceMatrix::from_rows(O, &[&[4, 4], &[4, 4]]),
        PieceMatrix::from_rows(S, &[&[0, 5, 5], &[5, 5, 0]]),
        PieceMatrix::from_rows(T, &[&[0, 6, 0], &[6, 6, 6]]),
        PieceMatrix::from_rows(Z, &[&[7, 7, 0], &[0, 7, 7]]),
    ]
};
