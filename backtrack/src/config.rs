//! Board-size configuration.

use waypoint_kernel::queens::{QueensError, MAX_BOARD_SIZE};

/// Board size for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueensConfig {
    pub n: usize,
}

impl Default for QueensConfig {
    fn default() -> Self {
        Self { n: 4 }
    }
}

impl QueensConfig {
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self { n }
    }

    /// # Errors
    ///
    /// [`QueensError::SizeOutOfRange`] unless `1 <= n <= MAX_BOARD_SIZE`.
    pub fn validate(&self) -> Result<(), QueensError> {
        if self.n == 0 || self.n > MAX_BOARD_SIZE {
            return Err(QueensError::SizeOutOfRange { n: self.n });
        }
        Ok(())
    }
}
