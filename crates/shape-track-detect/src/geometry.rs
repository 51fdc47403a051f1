//! Contour geometry: area, perimeter and image moments.

use nalgebra::Point2;

/// Unsigned polygon area of a closed contour (shoelace formula).
pub fn contour_area(contour: &[Point2<i32>]) -> f64 {
    moments(contour).m00.abs()
}

/// Length of the closed boundary.
pub fn perimeter(contour: &[Point2<i32>]) -> f64 {
    if contour.len() < 2 {
        return 0.0;
    }
    let mut sum = 0.0;
    for (i, p) in contour.iter().enumerate() {
        let q = contour[(i + 1) % contour.len()];
        let dx = (q.x - p.x) as f64;
        let dy = (q.y - p.y) as f64;
        sum += (dx * dx + dy * dy).sqrt();
    }
    sum
}

/// Spatial moments of the closed polygon, up to first order.
#[derive(Clone, Copy, Debug, Default)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

/// Compute polygon moments via Green's theorem.
///
/// Signs follow the traversal orientation; ratios such as the centroid are
/// orientation-independent.
pub fn moments(contour: &[Point2<i32>]) -> Moments {
    let n = contour.len();
    if n < 3 {
        return Moments::default();
    }

    let mut m00 = 0.0;
    let mut m10 = 0.0;
    let mut m01 = 0.0;
    for i in 0..n {
        let p = contour[i];
        let q = contour[(i + 1) % n];
        let (x0, y0) = (p.x as f64, p.y as f64);
        let (x1, y1) = (q.x as f64, q.y as f64);
        let cross = x0 * y1 - x1 * y0;
        m00 += cross;
        m10 += (x0 + x1) * cross;
        m01 += (y0 + y1) * cross;
    }

    Moments {
        m00: m00 / 2.0,
        m10: m10 / 6.0,
        m01: m01 / 6.0,
    }
}

/// Contour centroid from its moments.
///
/// Degenerate contours (zero total moment) map to the origin instead of
/// dividing by zero.
pub fn centroid(contour: &[Point2<i32>]) -> Point2<f64> {
    let m = moments(contour);
    if m.m00 == 0.0 {
        return Point2::new(0.0, 0.0);
    }
    Point2::new(m.m10 / m.m00, m.m01 / m.m00)
}
