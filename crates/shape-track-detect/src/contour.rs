//! Contour extraction from a binary mask.

use nalgebra::Point2;
use shape_track_core::Mask;

/// Closed boundary of one connected region, in image coordinates
/// (y grows downward).
pub type Contour = Vec<Point2<i32>>;

// 8-neighborhood in clockwise order starting east.
const NEIGHBORS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Extract one closed outer boundary per 8-connected foreground component.
///
/// The result is a flat list; its order is whatever the raster scan yields
/// and is not stable across frames, so callers must not rely on index
/// continuity between calls.
pub fn extract_contours(mask: &Mask) -> Vec<Contour> {
    let mut visited = vec![false; mask.width * mask.height];
    let mut contours = Vec::new();

    for y in 0..mask.height {
        for x in 0..mask.width {
            if visited[y * mask.width + x] || !mask.get(x, y) {
                continue;
            }
            // Scan order guarantees this is the topmost-leftmost pixel of a
            // fresh component.
            contours.push(trace_boundary(mask, x as i32, y as i32));
            flood_mark(mask, x, y, &mut visited);
        }
    }
    contours
}

/// Moore neighbor tracing, clockwise, starting from a pixel whose west
/// neighbor is known to be background.
fn trace_boundary(mask: &Mask, sx: i32, sy: i32) -> Contour {
    let start = Point2::new(sx, sy);
    let mut contour = vec![start];

    let mut current = start;
    let mut backtrack = 4usize; // entered from the west
    let mut first_move: Option<(Point2<i32>, usize)> = None;
    let max_steps = 4 * mask.width * mask.height + 8;

    for _ in 0..max_steps {
        let mut next = None;
        for i in 1..=8 {
            let dir = (backtrack + i) % 8;
            let (dx, dy) = NEIGHBORS[dir];
            if mask.get_signed(current.x + dx, current.y + dy) {
                next = Some((Point2::new(current.x + dx, current.y + dy), dir));
                break;
            }
        }
        let Some((next_point, dir)) = next else {
            break; // isolated pixel
        };

        // Terminate when the trace leaves the start pixel the same way it
        // did the first time.
        if current == start {
            match first_move {
                None => first_move = Some((next_point, dir)),
                Some(first) => {
                    if first == (next_point, dir) {
                        break;
                    }
                }
            }
        }

        contour.push(next_point);
        current = next_point;
        backtrack = (dir + 4) % 8;
    }

    // The trace re-enters the start pixel before terminating; drop the
    // duplicate so the boundary is a simple closed sequence.
    if contour.len() > 1 && contour.last() == Some(&start) {
        contour.pop();
    }
    contour
}

/// Mark every pixel of the component containing `(x, y)` as visited.
fn flood_mark(mask: &Mask, x: usize, y: usize, visited: &mut [bool]) {
    let mut stack = vec![(x, y)];
    visited[y * mask.width + x] = true;

    while let Some((cx, cy)) = stack.pop() {
        for (dx, dy) in NEIGHBORS {
            let nx = cx as i32 + dx;
            let ny = cy as i32 + dy;
            if !mask.get_signed(nx, ny) {
                continue;
            }
            let idx = ny as usize * mask.width + nx as usize;
            if !visited[idx] {
                visited[idx] = true;
                stack.push((nx as usize, ny as usize));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_rect(mask: &mut Mask, x0: usize, y0: usize, x1: usize, y1: usize) {
        for y in y0..=y1 {
            for x in x0..=x1 {
                mask.set(x, y);
            }
        }
    }

    #[test]
    fn empty_mask_has_no_contours() {
        assert!(extract_contours(&Mask::new(10, 10)).is_empty());
    }

    #[test]
    fn single_pixel_yields_one_point_contour() {
        let mut mask = Mask::new(5, 5);
        mask.set(2, 3);
        let contours = extract_contours(&mask);
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0], vec![Point2::new(2, 3)]);
    }

    #[test]
    fn filled_square_yields_its_boundary() {
        let mut mask = Mask::new(10, 10);
        filled_rect(&mut mask, 2, 2, 5, 5);
        let contours = extract_contours(&mask);
        assert_eq!(contours.len(), 1);

        // A 4x4 block has 12 boundary pixels.
        let boundary = &contours[0];
        assert_eq!(boundary.len(), 12);
        assert!(boundary.contains(&Point2::new(2, 2)));
        assert!(boundary.contains(&Point2::new(5, 5)));
        assert!(!boundary.contains(&Point2::new(3, 3)));
    }

    #[test]
    fn separate_blobs_yield_separate_contours() {
        let mut mask = Mask::new(20, 10);
        filled_rect(&mut mask, 1, 1, 3, 3);
        filled_rect(&mut mask, 10, 4, 14, 7);
        assert_eq!(extract_contours(&mask).len(), 2);
    }

    #[test]
    fn diagonal_pixels_are_one_component() {
        let mut mask = Mask::new(6, 6);
        mask.set(1, 1);
        mask.set(2, 2);
        mask.set(3, 3);
        assert_eq!(extract_contours(&mask).len(), 1);
    }
}
