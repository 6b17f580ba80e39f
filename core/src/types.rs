use ndarray::Array2;

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub const fn in_bounds(coords: Coord2, size: Coord2) -> bool {
    coords.0 < size.0 && coords.1 < size.1
}

pub const fn is_corner((x, y): Coord2, (size_x, size_y): Coord2) -> bool {
    (x == 0 || x + 1 == size_x) && (y == 0 || y + 1 == size_y)
}

pub const fn is_edge((x, y): Coord2, (size_x, size_y): Coord2) -> bool {
    x == 0 || x + 1 == size_x || y == 0 || y + 1 == size_y
}

/// Whether `a` and `b` are the same cell or touching, including diagonals.
pub const fn within_one(a: Coord2, b: Coord2) -> bool {
    a.0.abs_diff(b.0) <= 1 && a.1.abs_diff(b.1) <= 1
}

pub const fn manhattan(a: Coord2, b: Coord2) -> u16 {
    a.0.abs_diff(b.0) as u16 + a.1.abs_diff(b.1) as u16
}

pub fn size_of<T>(array: &Array2<T>) -> Coord2 {
    let (x, y) = array.dim();
    (
        x.try_into().unwrap_or(Coord::MAX),
        y.try_into().unwrap_or(Coord::MAX),
    )
}

/// Every coordinate of a board of `size`, `x` major.
pub fn iter_coords((size_x, size_y): Coord2) -> impl Iterator<Item = Coord2> {
    (0..size_x).flat_map(move |x| (0..size_y).map(move |y| (x, y)))
}

/// Up to 8 in-bounds cells at Chebyshev distance 1 from `center`.
pub fn neighbors(center: Coord2, size: Coord2) -> NeighborIter {
    NeighborIter::new(center, size)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        NeighborIter::new(index, size_of(self))
    }
}

pub(crate) const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
pub(crate) fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx.try_into().ok()?)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy.try_into().ok()?)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
