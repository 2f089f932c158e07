use glam::{DVec3, IVec3};

/// Edge length of the conventional cubic cell in lattice units.
pub const UNIT_CELL_PERIOD: i32 = 4;

/// An integer coordinate on the lattice grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LatticeSite {
    /// Grid x coordinate.
    pub x: i32,
    /// Grid y coordinate.
    pub y: i32,
    /// Grid z coordinate.
    pub z: i32,
}

impl LatticeSite {
    /// Site at the given coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Whether a carbon atom sits at this site.
    #[must_use]
    pub fn is_occupied(self) -> bool {
        let parity = self.x.rem_euclid(2);
        parity == self.y.rem_euclid(2)
            && parity == self.z.rem_euclid(2)
            && (self.x + self.y + self.z).rem_euclid(4) < 2
    }

    /// Site displaced by `delta`.
    #[must_use]
    pub fn offset(self, delta: IVec3) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.z + delta.z)
    }

    /// Coordinates as an integer vector.
    #[must_use]
    pub fn to_ivec3(self) -> IVec3 {
        IVec3::new(self.x, self.y, self.z)
    }

    /// Coordinates as a double-precision position.
    #[must_use]
    pub fn to_dvec3(self) -> DVec3 {
        self.to_ivec3().as_dvec3()
    }

    /// Whether every coordinate lies in `[0, UNIT_CELL_PERIOD)`.
    #[must_use]
    pub fn in_unit_cell(self) -> bool {
        let range = 0..UNIT_CELL_PERIOD;
        range.contains(&self.x)
            && range.contains(&self.y)
            && range.contains(&self.z)
    }
}

impl From<IVec3> for LatticeSite {
    fn from(v: IVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// Occupied sites of the conventional cell `[0, 4)³`, in lexicographic
/// order.
#[must_use]
pub fn unit_cell_sites() -> Vec<LatticeSite> {
    let range = 0..UNIT_CELL_PERIOD;
    range
        .clone()
        .flat_map(|x| range.clone().map(move |y| (x, y)))
        .flat_map(|(x, y)| range.clone().map(move |z| LatticeSite::new(x, y, z)))
        .filter(|site| site.is_occupied())
        .collect()
}
