//! Closed-contour polygon approximation (Ramer-Douglas-Peucker).

use nalgebra::Point2;

/// Approximate a closed contour with a polygon whose vertices stay within
/// `epsilon` of the original boundary.
///
/// The contour is split at the vertex farthest from its start point so both
/// simplified chains have well-separated endpoints, then the chains are
/// rejoined without the duplicated endpoints.
pub fn approx_polygon(contour: &[Point2<i32>], epsilon: f64) -> Vec<Point2<i32>> {
    if contour.len() < 3 || epsilon <= 0.0 {
        return contour.to_vec();
    }

    let start = contour[0];
    let mut split = 0;
    let mut best = 0.0;
    for (i, p) in contour.iter().enumerate().skip(1) {
        let d = distance_sq(start, *p);
        if d > best {
            best = d;
            split = i;
        }
    }
    if split == 0 {
        // Every vertex coincides with the start point.
        return vec![start];
    }

    let mut first = simplify_chain(&contour[..=split], epsilon);
    let mut closing: Vec<Point2<i32>> = contour[split..].to_vec();
    closing.push(start);
    let second = simplify_chain(&closing, epsilon);

    first.pop();
    first.extend_from_slice(&second[..second.len() - 1]);
    first
}

/// Simplify an open polyline, always keeping both endpoints.
fn simplify_chain(points: &[Point2<i32>], epsilon: f64) -> Vec<Point2<i32>> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let a = points[0];
    let b = points[points.len() - 1];
    let mut index = 0;
    let mut max_dist = 0.0;
    for (i, p) in points.iter().enumerate().take(points.len() - 1).skip(1) {
        let d = segment_distance(*p, a, b);
        if d > max_dist {
            max_dist = d;
            index = i;
        }
    }

    if max_dist > epsilon {
        let mut left = simplify_chain(&points[..=index], epsilon);
        let right = simplify_chain(&points[index..], epsilon);
        left.pop();
        left.extend_from_slice(&right);
        left
    } else {
        vec![a, b]
    }
}

fn distance_sq(a: Point2<i32>, b: Point2<i32>) -> f64 {
    let dx = (b.x - a.x) as f64;
    let dy = (b.y - a.y) as f64;
    dx * dx + dy * dy
}

/// Distance from `p` to the segment `a..b`.
fn segment_distance(p: Point2<i32>, a: Point2<i32>, b: Point2<i32>) -> f64 {
    let (px, py) = (p.x as f64, p.y as f64);
    let (ax, ay) = (a.x as f64, a.y as f64);
    let (bx, by) = (b.x as f64, b.y as f64);

    let seg_sq = (bx - ax) * (bx - ax) + (by - ay) * (by - ay);
    if seg_sq == 0.0 {
        return ((px - ax) * (px - ax) + (py - ay) * (py - ay)).sqrt();
    }

    let t = (((px - ax) * (bx - ax) + (py - ay) * (by - ay)) / seg_sq).clamp(0.0, 1.0);
    let cx = ax + t * (bx - ax);
    let cy = ay + t * (by - ay);
    ((px - cx) * (px - cx) + (py - cy) * (py - cy)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Dense boundary of an axis-aligned square with corner at the origin.
    fn square_boundary(side: i32) -> Vec<Point2<i32>> {
        let mut points = Vec::new();
        for x in 0..side {
            points.push(Point2::new(x, 0));
        }
        for y in 0..side {
            points.push(Point2::new(side, y));
        }
        for x in (1..=side).rev() {
            points.push(Point2::new(x, side));
        }
        for y in (1..=side).rev() {
            points.push(Point2::new(0, y));
        }
        points
    }

    #[test]
    fn square_boundary_reduces_to_four_vertices() {
        let boundary = square_boundary(20);
        let polygon = approx_polygon(&boundary, 1.6);
        assert_eq!(polygon.len(), 4);
        assert!(polygon.contains(&Point2::new(0, 0)));
        assert!(polygon.contains(&Point2::new(20, 0)));
        assert!(polygon.contains(&Point2::new(20, 20)));
        assert!(polygon.contains(&Point2::new(0, 20)));
    }

    #[test]
    fn tight_epsilon_keeps_jagged_vertices() {
        let jagged = vec![
            Point2::new(0, 0),
            Point2::new(5, 4),
            Point2::new(10, 0),
            Point2::new(5, 10),
        ];
        let polygon = approx_polygon(&jagged, 0.1);
        assert_eq!(polygon.len(), 4);
    }

    #[test]
    fn short_contours_pass_through() {
        let pair = vec![Point2::new(0, 0), Point2::new(3, 3)];
        assert_eq!(approx_polygon(&pair, 1.0), pair);
    }

    #[test]
    fn coincident_points_collapse_to_one() {
        let stacked = vec![Point2::new(2, 2); 5];
        assert_eq!(approx_polygon(&stacked, 1.0), vec![Point2::new(2, 2)]);
    }
}
