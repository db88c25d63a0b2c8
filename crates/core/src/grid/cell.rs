//! Cell state enumeration
//!
//! Every grid position holds exactly one of three states. The discriminants
//! are fixed so grids can be exchanged as raw bytes.

use crate::error::FireSimError;
use serde::{Deserialize, Serialize};

/// State of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellState {
    /// No fuel (bare ground or burned out)
    #[default]
    Empty = 0,
    /// Unburned tree
    Tree = 1,
    /// Burning tree, burns out after one step
    Fire = 2,
}

impl CellState {
    /// All valid states in discriminant order
    pub const ALL: [CellState; 3] = [CellState::Empty, CellState::Tree, CellState::Fire];

    /// Raw discriminant
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Check if the cell is currently burning
    #[inline]
    pub const fn is_burning(self) -> bool {
        matches!(self, CellState::Fire)
    }
}

impl TryFrom<u8> for CellState {
    type Error = FireSimError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CellState::Empty),
            1 => Ok(CellState::Tree),
            2 => Ok(CellState::Fire),
            other => Err(FireSimError::InvalidCellState(other)),
        }
    }
}

impl From<CellState> for u8 {
    fn from(state: CellState) -> Self {
        state.as_u8()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid_values() {
        for state in CellState::ALL {
            assert_eq!(CellState::try_from(state.as_u8()).ok(), Some(state));
        }
    }

    #[test]
    fn test_decode_out_of_range_is_error() {
        for raw in [3_u8, 4, 128, 255] {
            match CellState::try_from(raw) {
                Err(FireSimError::InvalidCellState(v)) => assert_eq!(v, raw),
                other => panic!("expected InvalidCellState for {raw}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_only_fire_is_burning() {
        assert!(CellState::Fire.is_burning());
        assert!(!CellState::Tree.is_burning());
        assert!(!CellState::Empty.is_burning());
    }
}
