use glam::IVec3;

use super::site::{LatticeSite, UNIT_CELL_PERIOD};

/// The eight diagonal neighbour offsets, in lexicographic order.
pub const NEIGHBOR_OFFSETS: [IVec3; 8] = [
    IVec3::new(-1, -1, -1),
    IVec3::new(-1, -1, 1),
    IVec3::new(-1, 1, -1),
    IVec3::new(-1, 1, 1),
    IVec3::new(1, -1, -1),
    IVec3::new(1, -1, 1),
    IVec3::new(1, 1, -1),
    IVec3::new(1, 1, 1),
];

/// A bond between an occupied site and one of its diagonal neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BondCandidate {
    /// The site the bond was discovered from.
    pub origin: LatticeSite,
    /// Offset from `origin` to the bonded site; one of
    /// [`NEIGHBOR_OFFSETS`].
    pub delta: IVec3,
}

impl BondCandidate {
    /// The bonded neighbour.
    #[must_use]
    pub fn target(&self) -> LatticeSite {
        self.origin.offset(self.delta)
    }

    /// Endpoints as an unordered pair (smaller site first).
    #[must_use]
    pub fn endpoints(&self) -> (LatticeSite, LatticeSite) {
        let (a, b) = (self.origin, self.target());
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

/// Bonds of the conventional cell, each emitted exactly once.
///
/// `sites` are the cell's occupied sites (see
/// [`unit_cell_sites`](super::unit_cell_sites)). Neighbours past the upper
/// faces of the cell are skipped: the adjacent instance owns those bonds.
/// Neighbours below the lower faces are kept since no instance visits them.
/// A pair with both ends inside the cell is emitted from the endpoint that
/// sorts last.
#[must_use]
pub fn unit_cell_bonds(sites: &[LatticeSite]) -> Vec<BondCandidate> {
    let mut bonds = Vec::new();
    for &origin in sites {
        for delta in NEIGHBOR_OFFSETS {
            let target = origin.offset(delta);
            if target.to_ivec3().max_element() >= UNIT_CELL_PERIOD {
                continue;
            }
            if !target.is_occupied() {
                continue;
            }
            if target.in_unit_cell() && target > origin {
                continue;
            }
            bonds.push(BondCandidate { origin, delta });
        }
    }
    bonds
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use super::*;
    use crate::lattice::unit_cell_sites;

    fn periodic_key(bond: &BondCandidate) -> (IVec3, IVec3) {
        // Anchor each bond at its even-parity endpoint, folded into the cell.
        let (a, b) = (bond.origin, bond.target());
        let (even, odd) = if a.x.rem_euclid(2) == 0 { (a, b) } else { (b, a) };
        let folded = even.to_ivec3().rem_euclid(IVec3::splat(UNIT_CELL_PERIOD));
        (folded, odd.to_ivec3() - even.to_ivec3())
    }

    #[test]
    fn conventional_cell_has_sixteen_bonds() {
        let bonds = unit_cell_bonds(&unit_cell_sites());
        assert_eq!(bonds.len(), 16);
    }

    #[test]
    fn no_pair_is_emitted_twice() {
        let bonds = unit_cell_bonds(&unit_cell_sites());
        let pairs: HashSet<_> = bonds.iter().map(BondCandidate::endpoints).collect();
        assert_eq!(pairs.len(), bonds.len());
    }

    #[test]
    fn tiling_covers_every_crystal_bond_once() {
        let bonds = unit_cell_bonds(&unit_cell_sites());
        let keys: HashSet<_> = bonds.iter().map(periodic_key).collect();
        assert_eq!(keys.len(), bonds.len());

        // Every even-parity atom owns four bonds once periodic images are
        // folded back into the cell.
        let mut degree: HashMap<IVec3, usize> = HashMap::new();
        for (anchor, _) in &keys {
            *degree.entry(*anchor).or_default() += 1;
        }
        assert_eq!(degree.len(), 4);
        assert!(degree.values().all(|&d| d == 4));
    }

    #[test]
    fn bonds_join_occupied_sites_diagonally() {
        for bond in unit_cell_bonds(&unit_cell_sites()) {
            assert!(bond.origin.is_occupied());
            assert!(bond.target().is_occupied());
            assert_eq!(bond.delta.abs(), IVec3::ONE);
            assert!(bond.target().to_ivec3().max_element() < UNIT_CELL_PERIOD);
        }
    }
}
