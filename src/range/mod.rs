use std::{cmp, fmt};

/// Represents a position in source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    /// Line number (1-based)
    pub line: usize,
    /// Byte column within the line (1-based)
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }

    /// Creates a Range from this position to another position.
    pub fn to(self, end: Position) -> Range {
        Range::new(self, end)
    }
}

impl Default for Position {
    fn default() -> Self {
        Position { line: 1, column: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(start < end, "start must be less than end in Range::new");
        Range { start, end }
    }

    pub fn contains(&self, position: Position) -> bool {
        position >= self.start && position < self.end
    }

    /// Creates a range spanning from the earliest start to the latest end of two ranges.
    pub fn spanning(&self, range: Range) -> Range {
        Range {
            start: cmp::min(self.start, range.start),
            end: cmp::max(self.end, range.end),
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl fmt::Debug for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Trait for types that have a Range
pub trait Ranged {
    /// Returns the range of this item
    fn range(&self) -> Range;
}

impl Ranged for Range {
    fn range(&self) -> Range {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering() {
        assert!(Position::new(1, 5) < Position::new(2, 1));
        assert!(Position::new(3, 2) < Position::new(3, 10));
    }

    #[test]
    fn test_range_contains() {
        let range = Position::new(1, 3).to(Position::new(1, 8));
        assert!(range.contains(Position::new(1, 3)));
        assert!(range.contains(Position::new(1, 7)));
        assert!(!range.contains(Position::new(1, 8)));
        assert!(!range.contains(Position::new(2, 1)));
    }

    #[test]
    fn test_range_display() {
        let range = Position::new(2, 4).to(Position::new(2, 9));
        assert_eq!(range.to_string(), "2:4-2:9");
    }

    #[test]
    fn test_spanning_is_commutative() {
        let a = Position::new(1, 1).to(Position::new(1, 4));
        let b = Position::new(2, 3).to(Position::new(2, 7));
        assert_eq!(a.spanning(b), b.spanning(a));
        assert_eq!(a.spanning(b), Position::new(1, 1).to(Position::new(2, 7)));
    }
}
