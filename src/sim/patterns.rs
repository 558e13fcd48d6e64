//! Seed patterns
//!
//! Offsets are `(row, col)` relative to the pattern's top-left anchor.

/// Diagonal a glider travels along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    SouthEast,
    SouthWest,
    NorthEast,
    NorthWest,
}

impl Heading {
    /// Per-period displacement `(d_row, d_col)` after 4 generations
    pub fn drift(&self) -> (i32, i32) {
        match self {
            Heading::SouthEast => (1, 1),
            Heading::SouthWest => (1, -1),
            Heading::NorthEast => (-1, 1),
            Heading::NorthWest => (-1, -1),
        }
    }
}

/// Grid edge a pattern is injected from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    /// Heading that carries a glider from this edge into the grid
    pub fn inward_heading(&self) -> Heading {
        match self {
            Edge::Top => Heading::SouthEast,
            Edge::Bottom => Heading::NorthWest,
            Edge::Left => Heading::NorthEast,
            Edge::Right => Heading::SouthWest,
        }
    }
}

const GLIDER_SE: &[(usize, usize)] = &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)];
const GLIDER_SW: &[(usize, usize)] = &[(0, 1), (1, 0), (2, 0), (2, 1), (2, 2)];
const GLIDER_NE: &[(usize, usize)] = &[(0, 0), (0, 1), (0, 2), (1, 2), (2, 1)];
const GLIDER_NW: &[(usize, usize)] = &[(0, 0), (0, 1), (0, 2), (1, 0), (2, 1)];
const BLOCK: &[(usize, usize)] = &[(0, 0), (0, 1), (1, 0), (1, 1)];
const BEEHIVE: &[(usize, usize)] = &[(0, 1), (0, 2), (1, 0), (1, 3), (2, 1), (2, 2)];

/// A placeable pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// 5-cell spaceship, period 4
    Glider(Heading),
    /// 2x2 still life
    Block,
    /// 3x4 still life
    Beehive,
}

impl Shape {
    pub fn cells(&self) -> &'static [(usize, usize)] {
        match self {
            Shape::Glider(Heading::SouthEast) => GLIDER_SE,
            Shape::Glider(Heading::SouthWest) => GLIDER_SW,
            Shape::Glider(Heading::NorthEast) => GLIDER_NE,
            Shape::Glider(Heading::NorthWest) => GLIDER_NW,
            Shape::Block => BLOCK,
            Shape::Beehive => BEEHIVE,
        }
    }

    /// Bounding box `(rows, cols)`
    pub fn extent(&self) -> (usize, usize) {
        match self {
            Shape::Glider(_) => (3, 3),
            Shape::Block => (2, 2),
            Shape::Beehive => (3, 4),
        }
    }

    pub fn is_still_life(&self) -> bool {
        matches!(self, Shape::Block | Shape::Beehive)
    }
}
