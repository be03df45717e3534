/// Number of neighbours every cell is linked to (Moore neighbourhood).
pub const NEIGHBOR_COUNT: usize = 8;

/// Column/row offsets of the neighbourhood: left column, right column, then
/// the cells directly above and below.
const NEIGHBOR_OFFSETS: [(isize, isize); NEIGHBOR_COUNT] = [
    (-1, 0),
    (-1, -1),
    (-1, 1),
    (1, 0),
    (1, -1),
    (1, 1),
    (0, -1),
    (0, 1),
];

/// 8-bit RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque color from its RGB channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: u8::MAX }
    }

    /// Normalized channels, optionally decoded from sRGB to linear light.
    ///
    /// sRGB render targets expect linear values and re-encode on write, so
    /// the palette has to be decoded first to appear as authored.
    pub fn to_f32(self, linear: bool) -> [f32; 4] {
        let channel = |c: u8| {
            let v = c as f32 / 255.0;
            if linear {
                srgb_to_linear(v)
            } else {
                v
            }
        };
        [channel(self.r), channel(self.g), channel(self.b), self.a as f32 / 255.0]
    }
}

fn srgb_to_linear(v: f32) -> f32 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Axis-aligned draw rectangle in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Half-open containment: the left/top edges belong to the rectangle,
    /// the right/bottom edges don't, so touching rectangles never share a point.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }
}

/// How a single cell edit changes the alive flag
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellAction {
    SetAlive,
    SetDead,
    Toggle,
}

impl CellAction {
    /// Action that forces a cell into the given state
    pub fn set(alive: bool) -> Self {
        if alive {
            CellAction::SetAlive
        } else {
            CellAction::SetDead
        }
    }
}

/// One square of the board.
///
/// Neighbours are stored as indices into the owning grid's flat cell array,
/// resolved through `Grid::cell`.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub alive: bool,
    pub color: Color,
    pub col: usize,
    pub row: usize,
    neighbors: [usize; NEIGHBOR_COUNT],
}

impl Cell {
    /// Create a dead cell at (col, row) of a `width` x `height` torus
    pub fn new(col: usize, row: usize, width: usize, height: usize, color: Color) -> Self {
        Self {
            alive: false,
            color,
            col,
            row,
            neighbors: toroidal_neighbors(col, row, width, height),
        }
    }

    /// Grid indices of the eight surrounding cells
    pub fn neighbors(&self) -> &[usize; NEIGHBOR_COUNT] {
        &self.neighbors
    }

    pub fn apply(&mut self, action: CellAction) {
        self.alive = match action {
            CellAction::SetAlive => true,
            CellAction::SetDead => false,
            CellAction::Toggle => !self.alive,
        };
    }
}

/// Row-major indices of the Moore neighbourhood of (col, row), wrapping
/// around every edge.
pub fn toroidal_neighbors(
    col: usize,
    row: usize,
    width: usize,
    height: usize,
) -> [usize; NEIGHBOR_COUNT] {
    NEIGHBOR_OFFSETS.map(|(dc, dr)| {
        let c = (col as isize + dc).rem_euclid(width as isize) as usize;
        let r = (row as isize + dr).rem_euclid(height as isize) as usize;
        r * width + c
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interior_neighbors() {
        // (2, 2) on a 5x5 grid, index 12
        let mut n = toroidal_neighbors(2, 2, 5, 5).to_vec();
        n.sort_unstable();
        assert_eq!(n, vec![6, 7, 8, 11, 13, 16, 17, 18]);
    }

    #[test]
    fn test_corner_wraps_to_opposite_edges() {
        let mut n = toroidal_neighbors(0, 0, 4, 3).to_vec();
        n.sort_unstable();
        // Row 0: cols 3, 1. Row 1: cols 3, 0, 1. Row 2 (wrapped): cols 3, 0, 1.
        assert_eq!(n, vec![1, 3, 4, 5, 7, 8, 9, 11]);
    }

    #[test]
    fn test_rect_contains_is_half_open() {
        let rect = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(rect.contains(10.0, 10.0));
        assert!(rect.contains(14.9, 14.9));
        assert!(!rect.contains(15.0, 12.0));
        assert!(!rect.contains(12.0, 15.0));
        assert!(!rect.contains(9.9, 12.0));
    }

    #[test]
    fn test_cell_actions() {
        let mut cell = Cell::new(0, 0, 3, 3, Color::rgb(1, 2, 3));
        assert!(!cell.alive);
        cell.apply(CellAction::Toggle);
        assert!(cell.alive);
        cell.apply(CellAction::SetAlive);
        assert!(cell.alive);
        cell.apply(CellAction::SetDead);
        assert!(!cell.alive);
        assert_eq!(CellAction::set(true), CellAction::SetAlive);
        assert_eq!(CellAction::set(false), CellAction::SetDead);
    }

    #[test]
    fn test_color_conversion() {
        let white = Color::rgb(255, 255, 255).to_f32(true);
        for channel in white {
            assert!((channel - 1.0).abs() < 1e-5);
        }

        let grey = Color::rgb(128, 128, 128);
        let srgb = grey.to_f32(false)[0];
        let linear = grey.to_f32(true)[0];
        assert!((srgb - 0.502).abs() < 0.01);
        assert!((linear - 0.216).abs() < 0.01, "got {}", linear);
    }
}
