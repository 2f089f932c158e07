//! Coarse unit primitives used as impostor hulls.
//!
//! Triangles are wound counter-clockwise when seen from outside so hulls
//! can be drawn with back-face culling.

use glam::DVec3;

/// A triangle as three positions.
pub type Triangle = [DVec3; 3];

/// Icosahedron faces (vertex indices) as listed by [`icosahedron_vertices`].
const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [1, 11, 7],
    [1, 7, 6],
    [1, 6, 10],
    [1, 10, 3],
    [1, 3, 11],
    [4, 8, 0],
    [5, 4, 0],
    [9, 5, 0],
    [2, 9, 0],
    [8, 2, 0],
    [11, 9, 7],
    [7, 2, 6],
    [6, 8, 10],
    [10, 4, 3],
    [3, 5, 11],
    [4, 10, 8],
    [5, 3, 4],
    [9, 11, 5],
    [2, 7, 9],
    [8, 6, 2],
];

/// The 12 vertices of a unit icosahedron with two vertices on the z axis.
fn icosahedron_vertices() -> [DVec3; 12] {
    let q = 5.0_f64.sqrt();
    let r = ((5.0 - q) / 10.0).sqrt();
    let s = ((5.0 + q) / 10.0).sqrt();
    let c = 1.0 / q;
    [
        DVec3::new(0.0, 0.0, -1.0),
        DVec3::new(0.0, 0.0, 1.0),
        DVec3::new(-2.0 * c, 0.0, -c),
        DVec3::new(2.0 * c, 0.0, c),
        DVec3::new((5.0 + q) / 10.0, -r, -c),
        DVec3::new((5.0 + q) / 10.0, r, -c),
        DVec3::new(-(5.0 + q) / 10.0, -r, c),
        DVec3::new(-(5.0 + q) / 10.0, r, c),
        DVec3::new((q - 5.0) / 10.0, -s, -c),
        DVec3::new((q - 5.0) / 10.0, s, -c),
        DVec3::new((5.0 - q) / 10.0, -s, c),
        DVec3::new((5.0 - q) / 10.0, s, c),
    ]
}

fn subdivide(triangle: Triangle, level: u32, out: &mut Vec<Triangle>) {
    if level == 0 {
        out.push(triangle);
        return;
    }
    let [v1, v2, v3] = triangle;
    let v12 = (v1 + v2).normalize();
    let v13 = (v1 + v3).normalize();
    let v23 = (v2 + v3).normalize();
    subdivide([v1, v12, v13], level - 1, out);
    subdivide([v12, v2, v23], level - 1, out);
    subdivide([v12, v23, v13], level - 1, out);
    subdivide([v13, v23, v3], level - 1, out);
}

/// Unit sphere approximation: an icosahedron refined `level` times by
/// midpoint subdivision (`20 * 4^level` triangles).
///
/// Every vertex lies on the unit sphere, so the hull is inscribed; scale it
/// by at least `1 / `[`inscribed_radius`] to enclose the sphere.
#[must_use]
pub fn unit_sphere_triangles(level: u32) -> Vec<Triangle> {
    let vertices = icosahedron_vertices();
    let mut triangles = Vec::with_capacity(20 * 4_usize.pow(level));
    for [a, b, c] in ICOSAHEDRON_FACES {
        subdivide([vertices[a], vertices[b], vertices[c]], level, &mut triangles);
    }
    triangles
}

/// Unit sphere approximation refined from a regular tetrahedron
/// (`4 * 4^level` triangles).
#[must_use]
pub fn unit_sphere_triangles_from_tetrahedron(level: u32) -> Vec<Triangle> {
    let v1 = DVec3::new(-1.0, -1.0, -1.0).normalize();
    let v2 = DVec3::new(1.0, 1.0, -1.0).normalize();
    let v3 = DVec3::new(1.0, -1.0, 1.0).normalize();
    let v4 = DVec3::new(-1.0, 1.0, 1.0).normalize();

    let mut triangles = Vec::with_capacity(4 * 4_usize.pow(level));
    for face in [[v1, v2, v3], [v1, v4, v2], [v1, v3, v4], [v2, v4, v3]] {
        subdivide(face, level, &mut triangles);
    }
    triangles
}

/// Unit cylinder approximation: radius 1 around the z axis, z in
/// `[-0.5, 0.5]`, with `segments` flat sides. Caps are optional.
#[must_use]
pub fn unit_cylinder_triangles(segments: u32, capped: bool) -> Vec<Triangle> {
    const Z_LO: f64 = -0.5;
    const Z_HI: f64 = 0.5;

    let rim = |i: u32| {
        let angle = f64::from(i) / f64::from(segments) * std::f64::consts::TAU;
        (angle.cos(), angle.sin())
    };

    let mut triangles = Vec::with_capacity(segments as usize * 4);
    for i in 0..segments {
        let (x0, y0) = rim(i);
        let (x1, y1) = rim(i + 1);
        triangles.push([
            DVec3::new(x0, y0, Z_LO),
            DVec3::new(x1, y1, Z_LO),
            DVec3::new(x0, y0, Z_HI),
        ]);
        triangles.push([
            DVec3::new(x1, y1, Z_LO),
            DVec3::new(x1, y1, Z_HI),
            DVec3::new(x0, y0, Z_HI),
        ]);
    }

    if capped {
        for i in 0..segments {
            let (x0, y0) = rim(i);
            let (x1, y1) = rim(i + 1);
            triangles.push([
                DVec3::new(0.0, 0.0, Z_HI),
                DVec3::new(x0, y0, Z_HI),
                DVec3::new(x1, y1, Z_HI),
            ]);
            triangles.push([
                DVec3::new(0.0, 0.0, Z_LO),
                DVec3::new(x1, y1, Z_LO),
                DVec3::new(x0, y0, Z_LO),
            ]);
        }
    }

    triangles
}

/// Smallest distance from the origin to any triangle's plane.
///
/// For a convex hull around the origin this is the radius of the largest
/// centred sphere the hull contains.
#[must_use]
pub fn inscribed_radius(triangles: &[Triangle]) -> f64 {
    triangles
        .iter()
        .map(|[a, b, c]| {
            let normal = (*b - *a).cross(*c - *a).normalize();
            normal.dot(*a).abs()
        })
        .fold(f64::INFINITY, f64::min)
}

/// Flatten triangles into a vertex list (stride 3).
#[must_use]
pub fn triangle_vertices(triangles: &[Triangle]) -> Vec<DVec3> {
    triangles.iter().flatten().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outward(triangle: &Triangle) -> bool {
        let [a, b, c] = *triangle;
        let normal = (b - a).cross(c - a);
        normal.dot((a + b + c) / 3.0) > 0.0
    }

    #[test]
    fn icosphere_counts_and_radius() {
        for level in 0..3 {
            let triangles = unit_sphere_triangles(level);
            assert_eq!(triangles.len(), 20 * 4_usize.pow(level));
            for v in triangle_vertices(&triangles) {
                assert!((v.length() - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn icosphere_faces_point_outward() {
        assert!(unit_sphere_triangles(0).iter().all(outward));
        assert!(unit_sphere_triangles(1).iter().all(outward));
    }

    #[test]
    fn icosahedron_face_distance_matches_closed_form() {
        let expected = ((5.0 + 2.0 * 5.0_f64.sqrt()) / 15.0).sqrt();
        let r = inscribed_radius(&unit_sphere_triangles(0));
        assert!((r - expected).abs() < 1e-12);
        // The default sphere hull oversize must enclose the unit sphere.
        assert!(r * 1.26 >= 1.0);
    }

    #[test]
    fn tetrasphere_counts() {
        assert_eq!(unit_sphere_triangles_from_tetrahedron(0).len(), 4);
        assert_eq!(unit_sphere_triangles_from_tetrahedron(2).len(), 64);
        assert!(unit_sphere_triangles_from_tetrahedron(1).iter().all(outward));
    }

    #[test]
    fn cylinder_shape() {
        let open = unit_cylinder_triangles(6, false);
        assert_eq!(open.len(), 12);
        for v in triangle_vertices(&open) {
            assert!((v.truncate().length() - 1.0).abs() < 1e-12);
            assert!((v.z.abs() - 0.5).abs() < 1e-12);
        }
        assert!(open.iter().all(outward));

        let capped = unit_cylinder_triangles(6, true);
        assert_eq!(capped.len(), 24);
    }

    #[test]
    fn hexagonal_cylinder_hull_encloses_the_cylinder() {
        let side_distance = (std::f64::consts::PI / 6.0).cos();
        assert!(side_distance * 1.2 >= 1.0);
    }
}
