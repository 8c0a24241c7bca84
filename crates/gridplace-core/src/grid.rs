//! Grid-space types: cells, footprints, rotations, and map bounds.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A cell on the 2D grid. The layer (z) is fixed and not represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const ORIGIN: Cell = Cell { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// This cell shifted by `(dx, dy)`, or `None` if either coordinate
    /// would leave the `i32` range.
    pub fn checked_offset(&self, dx: i32, dy: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

// ---------------------------------------------------------------------------
// Footprint
// ---------------------------------------------------------------------------

/// The rectangular size of an object on the grid, in cells.
///
/// `width` runs along +x and `depth` along +y from the anchor cell. Height is
/// always one layer and is not stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Footprint {
    pub width: u32,
    pub depth: u32,
}

impl Footprint {
    /// Largest width or depth a footprint may cover. Anything wider covers
    /// no cells and never fits.
    pub const MAX_EXTENT: u32 = i32::MAX as u32;

    pub fn new(width: u32, depth: u32) -> Self {
        Self { width, depth }
    }

    /// A 1x1 footprint.
    pub fn single() -> Self {
        Self { width: 1, depth: 1 }
    }

    /// True if either extent is zero (the footprint covers no cells).
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.depth == 0
    }

    /// Number of cells covered.
    pub fn area(&self) -> usize {
        self.width as usize * self.depth as usize
    }

    /// Return a new footprint rotated by the given rotation.
    /// For 90/270 degrees, width and depth are swapped.
    pub fn rotated(&self, rotation: Rotation) -> Self {
        match rotation {
            Rotation::None | Rotation::Cw180 => *self,
            Rotation::Cw90 | Rotation::Cw270 => Self {
                width: self.depth,
                depth: self.width,
            },
        }
    }

    /// This footprint grown by `margin` cells along +x and +y.
    ///
    /// The anchor does not move: padding only ever extends away from it.
    pub fn padded(&self, margin: u32) -> Self {
        Self {
            width: self.width.saturating_add(margin),
            depth: self.depth.saturating_add(margin),
        }
    }

    /// Iterate over all cells covered by this footprint anchored at `origin`,
    /// row by row (y outer, x inner).
    ///
    /// Yields nothing unless [`fits_at`](Self::fits_at) holds for a
    /// non-empty footprint.
    pub fn cells(&self, origin: Cell) -> impl Iterator<Item = Cell> {
        self.far_corner(origin).into_iter().flat_map(move |far| {
            (origin.y..=far.y).flat_map(move |y| (origin.x..=far.x).map(move |x| Cell::new(x, y)))
        })
    }

    /// The last cell (inclusive) covered when anchored at `origin`. `None`
    /// for an empty footprint, an extent above [`MAX_EXTENT`](Self::MAX_EXTENT),
    /// or when that cell's coordinates do not fit in `i32`.
    pub fn far_corner(&self, origin: Cell) -> Option<Cell> {
        if self.is_empty() || self.width > Self::MAX_EXTENT || self.depth > Self::MAX_EXTENT {
            return None;
        }
        origin.checked_offset(self.width as i32 - 1, self.depth as i32 - 1)
    }

    /// True if every covered cell anchored at `origin` has representable
    /// coordinates. Empty footprints trivially fit.
    pub fn fits_at(&self, origin: Cell) -> bool {
        self.is_empty() || self.far_corner(origin).is_some()
    }
}

// ---------------------------------------------------------------------------
// Rotation
// ---------------------------------------------------------------------------

/// Orientation of a placeable object, in 90 degree steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    /// No rotation.
    #[default]
    None,
    /// 90 degrees clockwise.
    Cw90,
    /// 180 degrees.
    Cw180,
    /// 270 degrees clockwise (90 degrees counter-clockwise).
    Cw270,
}

impl Rotation {
    /// All four rotation values.
    pub fn all() -> [Rotation; 4] {
        [
            Rotation::None,
            Rotation::Cw90,
            Rotation::Cw180,
            Rotation::Cw270,
        ]
    }

    /// Rotate 90 degrees clockwise.
    pub fn rotate_cw(self) -> Self {
        match self {
            Rotation::None => Rotation::Cw90,
            Rotation::Cw90 => Rotation::Cw180,
            Rotation::Cw180 => Rotation::Cw270,
            Rotation::Cw270 => Rotation::None,
        }
    }

    /// Rotate 90 degrees counter-clockwise.
    pub fn rotate_ccw(self) -> Self {
        match self {
            Rotation::None => Rotation::Cw270,
            Rotation::Cw90 => Rotation::None,
            Rotation::Cw180 => Rotation::Cw90,
            Rotation::Cw270 => Rotation::Cw180,
        }
    }

    /// Clockwise angle in degrees.
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::None => 0,
            Rotation::Cw90 => 90,
            Rotation::Cw180 => 180,
            Rotation::Cw270 => 270,
        }
    }
}

// ---------------------------------------------------------------------------
// GridBounds
// ---------------------------------------------------------------------------

/// The authored extent of a map: an inclusive rectangle of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridBounds {
    pub min: Cell,
    pub max: Cell,
}

impl GridBounds {
    /// Bounds spanning the two corners, in either order.
    pub fn new(a: Cell, b: Cell) -> Self {
        Self {
            min: Cell::new(a.x.min(b.x), a.y.min(b.y)),
            max: Cell::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Bounds covering `size` anchored at `origin`. Returns `None` for an
    /// empty size or one that runs past the `i32` range.
    pub fn from_footprint(origin: Cell, size: Footprint) -> Option<Self> {
        let max = size.far_corner(origin)?;
        Some(Self { min: origin, max })
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.min.x && cell.x <= self.max.x && cell.y >= self.min.y && cell.y <= self.max.y
    }

    /// True if every cell of `size` anchored at `origin` lies inside.
    /// An empty footprint is trivially contained.
    pub fn contains_area(&self, origin: Cell, size: Footprint) -> bool {
        match size.far_corner(origin) {
            Some(far) => self.contains(origin) && self.contains(far),
            None => size.is_empty(),
        }
    }

    /// Column count, saturating at `u32::MAX`.
    pub fn width(&self) -> u32 {
        self.max.x.abs_diff(self.min.x).saturating_add(1)
    }

    /// Row count, saturating at `u32::MAX`.
    pub fn depth(&self) -> u32 {
        self.max.y.abs_diff(self.min.y).saturating_add(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Cell tests
    // -----------------------------------------------------------------------

    #[test]
    fn cell_new_and_offset() {
        let c = Cell::new(3, -7);
        assert_eq!(c.x, 3);
        assert_eq!(c.y, -7);
        assert_eq!(c.checked_offset(1, 2), Some(Cell::new(4, -5)));
        assert_eq!(Cell::new(i32::MAX, 0).checked_offset(1, 0), None);
        assert_eq!(Cell::from((2, 9)), Cell::new(2, 9));
    }

    // -----------------------------------------------------------------------
    // Footprint tests
    // -----------------------------------------------------------------------

    #[test]
    fn footprint_single() {
        let fp = Footprint::single();
        let cells: Vec<_> = fp.cells(Cell::new(5, 10)).collect();
        assert_eq!(cells, vec![Cell::new(5, 10)]);
        assert_eq!(fp.area(), 1);
    }

    #[test]
    fn footprint_cells_row_major() {
        let fp = Footprint::new(2, 3);
        let cells: Vec<_> = fp.cells(Cell::new(10, 20)).collect();
        assert_eq!(
            cells,
            vec![
                Cell::new(10, 20),
                Cell::new(11, 20),
                Cell::new(10, 21),
                Cell::new(11, 21),
                Cell::new(10, 22),
                Cell::new(11, 22),
            ]
        );
    }

    #[test]
    fn footprint_empty_covers_nothing() {
        let fp = Footprint::new(0, 4);
        assert!(fp.is_empty());
        assert_eq!(fp.cells(Cell::ORIGIN).count(), 0);
        assert_eq!(fp.far_corner(Cell::ORIGIN), None);
    }

    #[test]
    fn footprint_past_i32_range_covers_nothing() {
        let edge = Cell::new(i32::MAX, 0);
        assert!(Footprint::single().fits_at(edge));
        assert_eq!(Footprint::single().cells(edge).collect::<Vec<_>>(), vec![edge]);

        let wide = Footprint::new(2, 1);
        assert!(!wide.fits_at(edge));
        assert_eq!(wide.far_corner(edge), None);
        assert_eq!(wide.cells(edge).count(), 0);

        let huge = Footprint::new(Footprint::MAX_EXTENT + 1, 1);
        assert!(!huge.fits_at(Cell::ORIGIN));
        assert_eq!(huge.cells(Cell::new(i32::MIN, 0)).count(), 0);
    }

    #[test]
    fn footprint_cells_reach_the_last_column() {
        let cells: Vec<_> = Footprint::new(2, 1).cells(Cell::new(i32::MAX - 1, 0)).collect();
        assert_eq!(cells, vec![Cell::new(i32::MAX - 1, 0), Cell::new(i32::MAX, 0)]);
    }

    #[test]
    fn footprint_padded_extends_positive_axes_only() {
        let fp = Footprint::new(2, 1).padded(1);
        assert_eq!(fp, Footprint::new(3, 2));
        let cells: Vec<_> = fp.cells(Cell::new(0, 0)).collect();
        assert!(cells.iter().all(|c| c.x >= 0 && c.y >= 0));
        assert_eq!(cells.len(), 6);
    }

    #[test]
    fn footprint_rotated_swaps_on_quarter_turns() {
        let fp = Footprint::new(3, 1);
        assert_eq!(fp.rotated(Rotation::None), fp);
        assert_eq!(fp.rotated(Rotation::Cw90), Footprint::new(1, 3));
        assert_eq!(fp.rotated(Rotation::Cw180), fp);
        assert_eq!(fp.rotated(Rotation::Cw270), Footprint::new(1, 3));
    }

    // -----------------------------------------------------------------------
    // Rotation tests
    // -----------------------------------------------------------------------

    #[test]
    fn rotation_cw_cycles() {
        let mut r = Rotation::None;
        for expected in [Rotation::Cw90, Rotation::Cw180, Rotation::Cw270, Rotation::None] {
            r = r.rotate_cw();
            assert_eq!(r, expected);
        }
    }

    #[test]
    fn rotation_ccw_inverts_cw() {
        for r in Rotation::all() {
            assert_eq!(r.rotate_cw().rotate_ccw(), r);
        }
    }

    #[test]
    fn rotation_degrees() {
        let degrees: Vec<_> = Rotation::all().iter().map(|r| r.degrees()).collect();
        assert_eq!(degrees, vec![0, 90, 180, 270]);
    }

    // -----------------------------------------------------------------------
    // GridBounds tests
    // -----------------------------------------------------------------------

    #[test]
    fn bounds_normalize_corners() {
        let b = GridBounds::new(Cell::new(5, -1), Cell::new(-2, 3));
        assert_eq!(b.min, Cell::new(-2, -1));
        assert_eq!(b.max, Cell::new(5, 3));
        assert_eq!(b.width(), 8);
        assert_eq!(b.depth(), 5);
    }

    #[test]
    fn bounds_contains_is_inclusive() {
        let b = GridBounds::new(Cell::new(0, 0), Cell::new(9, 9));
        assert!(b.contains(Cell::new(0, 0)));
        assert!(b.contains(Cell::new(9, 9)));
        assert!(!b.contains(Cell::new(10, 9)));
        assert!(!b.contains(Cell::new(-1, 0)));
    }

    #[test]
    fn bounds_contains_area() {
        let b = GridBounds::new(Cell::new(0, 0), Cell::new(9, 9));
        assert!(b.contains_area(Cell::new(8, 8), Footprint::new(2, 2)));
        assert!(!b.contains_area(Cell::new(9, 8), Footprint::new(2, 2)));
        assert!(b.contains_area(Cell::new(50, 50), Footprint::new(0, 0)));
        let everything = GridBounds::new(Cell::new(i32::MIN, i32::MIN), Cell::new(i32::MAX, i32::MAX));
        assert!(!everything.contains_area(Cell::new(i32::MAX, 0), Footprint::new(2, 1)));
        assert_eq!(everything.width(), u32::MAX);
    }

    #[test]
    fn bounds_from_footprint() {
        let b = GridBounds::from_footprint(Cell::new(1, 2), Footprint::new(3, 4)).unwrap();
        assert_eq!(b.max, Cell::new(3, 5));
        assert!(GridBounds::from_footprint(Cell::ORIGIN, Footprint::new(0, 1)).is_none());
        assert!(GridBounds::from_footprint(Cell::new(0, i32::MAX), Footprint::new(1, 2)).is_none());
    }
}
