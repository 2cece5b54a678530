//! Procedural test scenes.

use lumen_bvh::shapes::{AxisBox, Shape, Sphere};
use lumen_math::{Point3, Vec3};

/// `n`×`n`×`n` lattice alternating spheres and cubes, `spacing` apart.
///
/// Neighbouring objects never touch: spheres take 0.3 and cubes 0.6 of the
/// spacing.
pub fn lattice(n: usize, spacing: f64) -> Vec<Shape> {
    let mut shapes = Vec::with_capacity(n * n * n);
    for x in 0..n {
        for y in 0..n {
            for z in 0..n {
                let center = Point3::new(x as f64, y as f64, z as f64) * spacing;
                let shape = if (x + y + z) % 2 == 0 {
                    Sphere::new(center, 0.3 * spacing).into()
                } else {
                    AxisBox::cube(center, 0.6 * spacing).into()
                };
                shapes.push(shape);
            }
        }
    }
    shapes
}

/// Parse `x,y,z` into a vector.
pub fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected x,y,z but got '{s}'"));
    }

    let mut v = Vec3::zeros();
    for (i, part) in parts.iter().enumerate() {
        v[i] = part
            .parse::<f64>()
            .map_err(|e| format!("bad component '{part}': {e}"))?;
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_bvh::Primitive;

    #[test]
    fn test_lattice_size_and_mix() {
        let shapes = lattice(3, 2.0);
        assert_eq!(shapes.len(), 27);
        let spheres = shapes
            .iter()
            .filter(|s| matches!(s, Shape::Sphere(_)))
            .count();
        assert_eq!(spheres, 14);
        assert_eq!(shapes[26].centroid(), Point3::new(4.0, 4.0, 4.0));
    }

    #[test]
    fn test_parse_vec3() {
        assert_eq!(parse_vec3("1, -2.5,3").unwrap(), Vec3::new(1.0, -2.5, 3.0));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,x,3").is_err());
    }
}
