//! Placement matrices that map unit primitives into the unit cell.

use std::fmt;

use glam::{DMat4, DQuat, DVec3};

/// Determinants below this magnitude are treated as singular.
const SINGULAR_DETERMINANT: f64 = 1e-12;

/// Malformed geometry input. These indicate a logic error in static
/// geometry setup, not a runtime condition.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A cylinder was requested between two coincident points.
    DegenerateAxis {
        /// Requested start point.
        from: [f64; 3],
        /// Requested end point.
        to: [f64; 3],
    },
    /// A placement matrix cannot be inverted.
    NonInvertible {
        /// The offending matrix determinant.
        determinant: f64,
    },
    /// Trimming would pull the ends of a segment past each other.
    OverTrimmed {
        /// Requested inset at each end.
        inset: f64,
        /// Untrimmed segment length.
        length: f64,
    },
    /// The bond radius must be positive and smaller than the atom radius,
    /// and the bond inset must leave part of every bond between its atoms.
    InvalidRadii {
        /// Atom sphere radius.
        atom: f64,
        /// Bond cylinder radius.
        bond: f64,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateAxis { from, to } => {
                write!(f, "degenerate cylinder axis from {from:?} to {to:?}")
            }
            Self::NonInvertible { determinant } => {
                write!(f, "placement matrix is singular (det = {determinant})")
            }
            Self::OverTrimmed { inset, length } => write!(
                f,
                "inset {inset} at both ends exceeds segment length {length}"
            ),
            Self::InvalidRadii { atom, bond } => write!(
                f,
                "atom radius {atom} and bond radius {bond} cannot form bonds"
            ),
        }
    }
}

impl std::error::Error for GeometryError {}

/// Map the unit cylinder (radius 1, z in `[-0.5, 0.5]`) onto the segment
/// from `start` to `end` with the given radius.
///
/// Local `z = -0.5` lands on `start` and `z = +0.5` on `end`.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateAxis`] if the points coincide.
pub fn cylinder_placement(
    start: DVec3,
    end: DVec3,
    radius: f64,
) -> Result<DMat4, GeometryError> {
    let axis = end - start;
    let length = axis.length();
    if !length.is_finite() || length <= f64::EPSILON {
        return Err(GeometryError::DegenerateAxis {
            from: start.to_array(),
            to: end.to_array(),
        });
    }

    let orientation = DQuat::from_rotation_arc(DVec3::Z, axis / length);
    Ok(DMat4::from_translation(start)
        * DMat4::from_quat(orientation)
        * DMat4::from_scale(DVec3::new(radius, radius, length))
        * DMat4::from_translation(DVec3::new(0.0, 0.0, 0.5)))
}

/// Inverse of a placement matrix.
///
/// # Errors
///
/// Returns [`GeometryError::NonInvertible`] for (near-)singular matrices.
pub fn invert_placement(placement: &DMat4) -> Result<DMat4, GeometryError> {
    let determinant = placement.determinant();
    if !determinant.is_finite() || determinant.abs() <= SINGULAR_DETERMINANT {
        return Err(GeometryError::NonInvertible { determinant });
    }
    Ok(placement.inverse())
}

/// Apply an affine transform to every point.
#[must_use]
pub fn transform_points(transform: &DMat4, points: &[DVec3]) -> Vec<DVec3> {
    points.iter().map(|p| transform.transform_point3(*p)).collect()
}

/// Pull the segment `c1 → c2` inward by `inset` at both ends.
///
/// Returns the trimmed `(start, end)`, still pointing from `c1` to `c2`.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateAxis`] if the points coincide and
/// [`GeometryError::OverTrimmed`] unless `2 * inset` is shorter than the
/// segment.
pub fn trim_segment(
    c1: DVec3,
    c2: DVec3,
    inset: f64,
) -> Result<(DVec3, DVec3), GeometryError> {
    let direction = (c2 - c1).try_normalize().ok_or_else(|| {
        GeometryError::DegenerateAxis {
            from: c1.to_array(),
            to: c2.to_array(),
        }
    })?;
    let length = c1.distance(c2);
    if !inset.is_finite() || 2.0 * inset >= length {
        return Err(GeometryError::OverTrimmed { inset, length });
    }
    Ok((c1 + direction * inset, c2 - direction * inset))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: DVec3, b: DVec3) -> bool {
        a.distance(b) < 1e-12
    }

    #[test]
    fn cylinder_maps_unit_ends_onto_segment() {
        let start = DVec3::new(1.0, -2.0, 0.5);
        let end = DVec3::new(-3.0, 4.0, 2.0);
        let m = cylinder_placement(start, end, 0.25).unwrap();

        assert!(close(m.transform_point3(DVec3::new(0.0, 0.0, -0.5)), start));
        assert!(close(m.transform_point3(DVec3::new(0.0, 0.0, 0.5)), end));

        // A rim point sits `radius` away from the axis.
        let rim = m.transform_point3(DVec3::new(1.0, 0.0, -0.5));
        assert!((rim.distance(start) - 0.25).abs() < 1e-12);
        assert!((rim - start).dot(end - start).abs() < 1e-12);
    }

    #[test]
    fn cylinder_handles_axis_aligned_segments() {
        for end in [DVec3::Z, DVec3::NEG_Z] {
            let m = cylinder_placement(DVec3::ZERO, end, 1.0).unwrap();
            assert!(close(m.transform_point3(DVec3::new(0.0, 0.0, 0.5)), end));
            assert!(m.determinant() > 0.0);
        }
    }

    #[test]
    fn coincident_points_are_rejected() {
        let p = DVec3::splat(2.0);
        assert_eq!(
            cylinder_placement(p, p, 0.1),
            Err(GeometryError::DegenerateAxis {
                from: p.to_array(),
                to: p.to_array()
            })
        );
        assert!(trim_segment(p, p, 0.1).is_err());
    }

    #[test]
    fn singular_placement_is_rejected() {
        let flat = DMat4::from_scale(DVec3::new(1.0, 0.0, 1.0));
        assert!(matches!(
            invert_placement(&flat),
            Err(GeometryError::NonInvertible { .. })
        ));
        let m = DMat4::from_translation(DVec3::X) * DMat4::from_scale(DVec3::splat(0.3));
        let inv = invert_placement(&m).unwrap();
        assert!((m * inv).abs_diff_eq(DMat4::IDENTITY, 1e-12));
    }

    #[test]
    fn trimming_past_the_midpoint_is_rejected() {
        let end = DVec3::new(3.0, 0.0, 4.0);
        for inset in [2.5, 3.0, f64::NAN] {
            assert!(matches!(
                trim_segment(DVec3::ZERO, end, inset),
                Err(GeometryError::OverTrimmed { .. })
            ));
        }
        assert!(trim_segment(DVec3::ZERO, end, 2.49).is_ok());
    }

    #[test]
    fn trimming_moves_both_ends_inward() {
        let (a, b) = trim_segment(DVec3::ZERO, DVec3::new(3.0, 0.0, 4.0), 1.0).unwrap();
        assert!(close(a, DVec3::new(0.6, 0.0, 0.8)));
        assert!(close(b, DVec3::new(2.4, 0.0, 3.2)));
    }
}
