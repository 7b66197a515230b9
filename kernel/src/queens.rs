//! N-Queens board and the attack check.

use std::fmt;

/// Largest board the step engine accepts.
pub const MAX_BOARD_SIZE: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueensError {
    /// `n` outside `1..=MAX_BOARD_SIZE`.
    SizeOutOfRange { n: usize },
    OutOfBounds { row: usize, col: usize, n: usize },
}

impl fmt::Display for QueensError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeOutOfRange { n } => {
                write!(f, "board size {n} outside 1..={MAX_BOARD_SIZE}")
            }
            Self::OutOfBounds { row, col, n } => {
                write!(f, "cell ({row},{col}) outside a {n}x{n} board")
            }
        }
    }
}

impl std::error::Error for QueensError {}

/// An `n x n` board with at most one queen per row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueensBoard {
    n: usize,
    cols: Vec<Option<usize>>,
}

impl QueensBoard {
    /// # Errors
    ///
    /// [`QueensError::SizeOutOfRange`] unless `1 <= n <= MAX_BOARD_SIZE`.
    pub fn new(n: usize) -> Result<Self, QueensError> {
        if n == 0 || n > MAX_BOARD_SIZE {
            return Err(QueensError::SizeOutOfRange { n });
        }
        Ok(Self {
            n,
            cols: vec![None; n],
        })
    }

    #[must_use]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Column of the queen in `row`, if any.
    #[must_use]
    pub fn queen_in(&self, row: usize) -> Option<usize> {
        self.cols.get(row).copied().flatten()
    }

    /// `(row, col)` of every queen, by row.
    #[must_use]
    pub fn queens(&self) -> Vec<(usize, usize)> {
        self.cols
            .iter()
            .enumerate()
            .filter_map(|(r, c)| c.map(|c| (r, c)))
            .collect()
    }

    /// Put a queen at `(row, col)`, replacing any queen already in `row`.
    ///
    /// # Errors
    ///
    /// [`QueensError::OutOfBounds`] for a cell off the board.
    pub fn place(&mut self, row: usize, col: usize) -> Result<(), QueensError> {
        if row >= self.n || col >= self.n {
            return Err(QueensError::OutOfBounds {
                row,
                col,
                n: self.n,
            });
        }
        self.cols[row] = Some(col);
        Ok(())
    }

    pub fn remove(&mut self, row: usize) {
        if let Some(c) = self.cols.get_mut(row) {
            *c = None;
        }
    }

    /// Safe iff no queen in rows `0..row` shares the column or a diagonal.
    #[must_use]
    pub fn is_safe(&self, row: usize, col: usize) -> bool {
        self.cols
            .iter()
            .take(row)
            .enumerate()
            .filter_map(|(r, c)| c.map(|c| (r, c)))
            .all(|(r, c)| c != col && row - r != c.abs_diff(col))
    }

    /// First queen in rows `0..row` attacking `(row, col)`.
    #[must_use]
    pub fn attacker(&self, row: usize, col: usize) -> Option<(usize, usize)> {
        self.cols
            .iter()
            .take(row)
            .enumerate()
            .filter_map(|(r, c)| c.map(|c| (r, c)))
            .find(|&(r, c)| c == col || row - r == c.abs_diff(col))
    }

    /// Every row holds a queen and no two attack each other.
    #[must_use]
    pub fn is_valid_solution(&self) -> bool {
        let qs = self.queens();
        qs.len() == self.n
            && qs.iter().enumerate().all(|(i, &(r1, c1))| {
                qs[i + 1..]
                    .iter()
                    .all(|&(r2, c2)| c1 != c2 && r1.abs_diff(r2) != c1.abs_diff(c2))
            })
    }

    /// Rows rendered as `Q` and `.`.
    #[must_use]
    pub fn render_rows(&self) -> Vec<String> {
        self.cols
            .iter()
            .map(|c| {
                (0..self.n)
                    .map(|j| if *c == Some(j) { 'Q' } else { '.' })
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for QueensBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_rows().join("\n"))
    }
}
