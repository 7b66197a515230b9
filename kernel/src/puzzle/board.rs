//! 3x3 sliding-tile boards.

use std::fmt;
use std::str::FromStr;

/// Side length of the board.
pub const SIDE: usize = 3;
/// Number of cells.
pub const CELLS: usize = SIDE * SIDE;

/// The conventional goal: tiles 1..=8 in reading order, blank last.
pub const GOAL: Board = Board {
    tiles: [1, 2, 3, 4, 5, 6, 7, 8, 0],
};

/// Validation failure for a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Not exactly nine cells.
    WrongLength { found: usize },
    /// A cell value outside `0..=8`.
    OutOfRange { value: u32 },
    /// A value appears more than once.
    Duplicate { value: u8 },
    /// A cell in text form is not an integer.
    NotANumber { token: String },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength { found } => write!(f, "board needs {CELLS} cells, got {found}"),
            Self::OutOfRange { value } => write!(f, "tile {value} outside 0..=8"),
            Self::Duplicate { value } => write!(f, "tile {value} appears more than once"),
            Self::NotANumber { token } => write!(f, "not a tile number: {token:?}"),
        }
    }
}

impl std::error::Error for BoardError {}

/// Direction the blank moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Successor generation order.
    pub const ALL: [Move; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
        }
    }

    const fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated board: a permutation of `0..=8` with `0` as the blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Board {
    tiles: [u8; CELLS],
}

impl Board {
    /// Build from cells in reading order.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardError`] unless `tiles` is a permutation of `0..=8`.
    pub fn from_tiles(tiles: &[u8]) -> Result<Self, BoardError> {
        if tiles.len() != CELLS {
            return Err(BoardError::WrongLength { found: tiles.len() });
        }
        let mut seen = [false; CELLS];
        let mut out = [0u8; CELLS];
        for (i, &v) in tiles.iter().enumerate() {
            let idx = usize::from(v);
            if idx >= CELLS {
                return Err(BoardError::OutOfRange {
                    value: u32::from(v),
                });
            }
            if seen[idx] {
                return Err(BoardError::Duplicate { value: v });
            }
            seen[idx] = true;
            out[i] = v;
        }
        Ok(Self { tiles: out })
    }

    /// Build from a row-major grid.
    ///
    /// # Errors
    ///
    /// Same as [`Board::from_tiles`].
    pub fn from_rows(rows: [[u8; SIDE]; SIDE]) -> Result<Self, BoardError> {
        Self::from_tiles(&rows.concat())
    }

    #[must_use]
    pub fn tiles(&self) -> &[u8; CELLS] {
        &self.tiles
    }

    #[must_use]
    pub fn rows(&self) -> [[u8; SIDE]; SIDE] {
        let mut rows = [[0u8; SIDE]; SIDE];
        for (i, &v) in self.tiles.iter().enumerate() {
            rows[i / SIDE][i % SIDE] = v;
        }
        rows
    }

    #[must_use]
    pub fn tile(&self, row: usize, col: usize) -> u8 {
        self.tiles[row * SIDE + col]
    }

    /// `(row, col)` of `value`. Every value in `0..=8` is present.
    #[must_use]
    pub fn position_of(&self, value: u8) -> (usize, usize) {
        let i = self.tiles.iter().position(|&t| t == value).unwrap_or(0);
        (i / SIDE, i % SIDE)
    }

    #[must_use]
    pub fn blank(&self) -> (usize, usize) {
        self.position_of(0)
    }

    /// Canonical key: cells joined by commas, e.g. `1,2,3,4,0,6,7,5,8`.
    #[must_use]
    pub fn key(&self) -> String {
        self.tiles
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Board after moving the blank, or `None` if it would leave the grid.
    #[must_use]
    pub fn slide(&self, mv: Move) -> Option<Self> {
        let (r, c) = self.blank();
        let (dr, dc) = mv.delta();
        let nr = r.checked_add_signed(dr).filter(|&v| v < SIDE)?;
        let nc = c.checked_add_signed(dc).filter(|&v| v < SIDE)?;
        let mut tiles = self.tiles;
        tiles.swap(r * SIDE + c, nr * SIDE + nc);
        Some(Self { tiles })
    }

    /// Up to four neighbours in `UP, DOWN, LEFT, RIGHT` order.
    #[must_use]
    pub fn neighbors(&self) -> Vec<(Move, Self)> {
        Move::ALL
            .into_iter()
            .filter_map(|m| self.slide(m).map(|b| (m, b)))
            .collect()
    }

    /// Inversions among the non-blank tiles in reading order.
    #[must_use]
    pub fn inversions(&self) -> usize {
        let flat: Vec<u8> = self.tiles.iter().copied().filter(|&t| t != 0).collect();
        let mut count = 0;
        for i in 0..flat.len() {
            for j in i + 1..flat.len() {
                if flat[i] > flat[j] {
                    count += 1;
                }
            }
        }
        count
    }

    /// Whether `goal` is reachable from `self`. On an odd-width board the
    /// inversion parity is invariant under every slide.
    #[must_use]
    pub fn is_solvable_for(&self, goal: &Board) -> bool {
        self.inversions() % 2 == goal.inversions() % 2
    }

    #[must_use]
    pub fn is_solvable(&self) -> bool {
        self.is_solvable_for(&GOAL)
    }
}

impl Default for Board {
    fn default() -> Self {
        GOAL
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Accepts nine integers separated by commas and/or whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tiles = Vec::with_capacity(CELLS);
        for token in s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            let v: u32 = token.parse().map_err(|_| BoardError::NotANumber {
                token: token.to_string(),
            })?;
            let v = u8::try_from(v)
                .ok()
                .filter(|&b| usize::from(b) < CELLS)
                .ok_or(BoardError::OutOfRange { value: v })?;
            tiles.push(v);
        }
        Self::from_tiles(&tiles)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.rows().iter().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            let cells: Vec<String> = row
                .iter()
                .map(|&v| if v == 0 { "_".to_string() } else { v.to_string() })
                .collect();
            write!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}
