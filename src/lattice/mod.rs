//! Diamond lattice topology: which integer sites are occupied and which
//! occupied pairs are bonded.
//!
//! The diamond structure is described on the integer grid with period 4:
//! a site `(x, y, z)` holds a carbon atom iff all three coordinates share
//! parity and `(x + y + z) mod 4 < 2`. Bonded neighbours differ by
//! `(±1, ±1, ±1)`.

mod bond;
mod site;

pub use bond::{unit_cell_bonds, BondCandidate, NEIGHBOR_OFFSETS};
pub use site::{unit_cell_sites, LatticeSite, UNIT_CELL_PERIOD};
