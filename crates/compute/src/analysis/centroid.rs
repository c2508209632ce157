use foundation::math::{GeoPoint, wrap_longitude};

use super::area::{ring_vertices, twice_signed_planar_area, vertices_are_degenerate};

/// Area-weighted centroid of a lon/lat ring.
///
/// Computed in the ring's unwrapped lon/lat plane, so a ring straddling the
/// antimeridian gets a centroid next to it rather than near 0°. Degenerate
/// rings fall back to the mean of their usable vertices. `None` when the ring
/// has no usable vertex at all.
pub fn ring_centroid(ring: &[GeoPoint]) -> Option<GeoPoint> {
    let vertices = ring_vertices(ring);
    let origin = *vertices.first()?;

    let (lon, lat) = if vertices_are_degenerate(&vertices) {
        vertex_mean(&vertices)
    } else {
        area_weighted(&vertices, origin)
    };

    Some(GeoPoint::new(wrap_longitude(lon), lat))
}

fn vertex_mean(vertices: &[GeoPoint]) -> (f64, f64) {
    let mut sx = 0.0;
    let mut sy = 0.0;
    for v in vertices {
        sx += v.lon_deg;
        sy += v.lat_deg;
    }
    let n = vertices.len() as f64;
    (sx / n, sy / n)
}

fn area_weighted(vertices: &[GeoPoint], origin: GeoPoint) -> (f64, f64) {
    let twice_area = twice_signed_planar_area(vertices);
    let n = vertices.len();
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let (ax, ay) = (a.lon_deg - origin.lon_deg, a.lat_deg - origin.lat_deg);
        let (bx, by) = (b.lon_deg - origin.lon_deg, b.lat_deg - origin.lat_deg);
        let cross = ax * by - bx * ay;
        cx += (ax + bx) * cross;
        cy += (ay + by) * cross;
    }
    let six_area = 3.0 * twice_area;
    (origin.lon_deg + cx / six_area, origin.lat_deg + cy / six_area)
}

#[cfg(test)]
mod tests {
    use super::ring_centroid;
    use foundation::math::GeoPoint;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn ring(coords: &[(f64, f64)]) -> Vec<GeoPoint> {
        coords.iter().map(|&(x, y)| GeoPoint::new(x, y)).collect()
    }

    #[test]
    fn square_centroid_is_its_center() {
        let square = ring(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0)]);
        let c = ring_centroid(&square).unwrap();
        assert_close(c.lon_deg, 1.0, 1e-12);
        assert_close(c.lat_deg, 1.0, 1e-12);
    }

    #[test]
    fn centroid_is_area_weighted_not_vertex_mean() {
        // L-shape: vertex mean and area centroid differ.
        let l_shape = ring(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 1.0),
            (1.0, 1.0),
            (1.0, 4.0),
            (0.0, 4.0),
        ]);
        let c = ring_centroid(&l_shape).unwrap();
        // Two 4x1 / 1x3 rectangles: (4*(2,0.5) + 3*(0.5,2.5)) / 7
        assert_close(c.lon_deg, 9.5 / 7.0, 1e-12);
        assert_close(c.lat_deg, 9.5 / 7.0, 1e-12);

        let mut reversed = l_shape.clone();
        reversed.reverse();
        let r = ring_centroid(&reversed).unwrap();
        assert_close(r.lon_deg, c.lon_deg, 1e-12);
        assert_close(r.lat_deg, c.lat_deg, 1e-12);
    }

    #[test]
    fn degenerate_ring_falls_back_to_vertex_mean() {
        let line = ring(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
        let c = ring_centroid(&line).unwrap();
        assert_close(c.lon_deg, 1.0, 1e-12);
        assert_close(c.lat_deg, 1.0, 1e-12);

        let single = ring(&[(3.0, 4.0)]);
        assert_eq!(ring_centroid(&single), Some(GeoPoint::new(3.0, 4.0)));
        assert_eq!(ring_centroid(&[]), None);
    }

    #[test]
    fn antimeridian_ring_centroid_stays_near_the_crossing() {
        let crossing = ring(&[(179.0, 0.0), (-179.0, 0.0), (-179.0, 2.0), (179.0, 2.0)]);
        let c = ring_centroid(&crossing).unwrap();
        assert_close(c.lon_deg.abs(), 180.0, 1e-9);
        assert_close(c.lat_deg, 1.0, 1e-9);
    }
}
