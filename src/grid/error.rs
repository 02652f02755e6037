use crate::{grid::MIN_SIZE, Pos};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("the grid size ({width}x{height}) is invalid, minimum ({min}x{min})", min = MIN_SIZE)]
    InvalidSize { width: i32, height: i32 },
    #[error("position ({}, {}) not found in grid ({width}, {height})", .pos.x, .pos.y)]
    OutOfRange { width: i32, height: i32, pos: Pos },
}

impl GridError {
    /// the offending position, when the error is about one.
    pub fn pos(&self) -> Option<Pos> {
        match self {
            GridError::OutOfRange { pos, .. } => Some(*pos),
            GridError::InvalidSize { .. } => None,
        }
    }
}

#[test]
fn test_messages() {
    let err = GridError::InvalidSize {
        width: -1,
        height: 3,
    };
    assert_eq!(
        err.to_string(),
        "the grid size (-1x3) is invalid, minimum (10x10)"
    );
    assert_eq!(err.pos(), None);

    let err = GridError::OutOfRange {
        width: 10,
        height: 12,
        pos: crate::pos!(10, -2),
    };
    assert_eq!(
        err.to_string(),
        "position (10, -2) not found in grid (10, 12)"
    );
    assert_eq!(err.pos(), Some(crate::pos!(10, -2)));
}
