//! Color segmentation: HSV threshold followed by binary erosion.

use crate::hsv::{rgb_to_hsv, HsvRange};
use crate::image::{Mask, RgbFrame};

/// Threshold a frame against `range` and erode the result with a
/// `kernel = [rows, cols]` rectangular structuring element.
///
/// Pure function of its inputs. An inverted range yields an all-zero mask.
pub fn segment(frame: &RgbFrame, range: &HsvRange, kernel: [usize; 2]) -> Mask {
    erode(&threshold(frame, range), kernel)
}

/// Per-pixel inclusive in-range test in HSV space.
pub fn threshold(frame: &RgbFrame, range: &HsvRange) -> Mask {
    let mut mask = Mask::new(frame.width, frame.height);
    for y in 0..frame.height {
        for x in 0..frame.width {
            if range.contains(rgb_to_hsv(frame.pixel(x, y))) {
                mask.set(x, y);
            }
        }
    }
    mask
}

/// Binary erosion with a rectangular structuring element anchored at its
/// center. Pixels outside the image count as foreground, so the frame border
/// itself does not erode.
pub fn erode(mask: &Mask, kernel: [usize; 2]) -> Mask {
    let kh = kernel[0].max(1);
    let kw = kernel[1].max(1);
    if kh == 1 && kw == 1 {
        return mask.clone();
    }
    let ay = (kh / 2) as i32;
    let ax = (kw / 2) as i32;

    let mut out = Mask::new(mask.width, mask.height);
    for y in 0..mask.height {
        for x in 0..mask.width {
            if !mask.get(x, y) {
                continue;
            }
            let mut keep = true;
            'window: for dy in 0..kh as i32 {
                for dx in 0..kw as i32 {
                    let nx = x as i32 + dx - ax;
                    let ny = y as i32 + dy - ay;
                    let inside = nx >= 0
                        && ny >= 0
                        && (nx as usize) < mask.width
                        && (ny as usize) < mask.height;
                    if inside && !mask.get(nx as usize, ny as usize) {
                        keep = false;
                        break 'window;
                    }
                }
            }
            if keep {
                out.set(x, y);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(width: usize, height: usize, rgb: [u8; 3]) -> RgbFrame {
        let mut frame = RgbFrame::new(width, height);
        for y in 0..height {
            for x in 0..width {
                frame.set_pixel(x, y, rgb);
            }
        }
        frame
    }

    #[test]
    fn black_frame_yields_empty_mask() {
        let frame = RgbFrame::new(8, 6);
        let mask = segment(&frame, &HsvRange::new([0, 0, 1], [180, 255, 255]), [5, 5]);
        assert_eq!(mask.count_set(), 0);
    }

    #[test]
    fn inverted_range_yields_empty_mask() {
        let frame = solid_frame(8, 6, [0, 255, 0]);
        let inverted = HsvRange::new([170, 0, 0], [10, 255, 255]);
        let mask = segment(&frame, &inverted, [5, 5]);
        assert_eq!(mask.count_set(), 0);
    }

    #[test]
    fn matching_pixels_survive_thresholding() {
        // Green has HSV [60, 255, 255].
        let mut frame = RgbFrame::new(4, 4);
        frame.set_pixel(2, 2, [0, 255, 0]);
        let mask = threshold(&frame, &HsvRange::new([40, 40, 90], [110, 255, 255]));
        assert!(mask.get(2, 2));
        assert_eq!(mask.count_set(), 1);
    }

    #[test]
    fn erosion_removes_speckle_and_shrinks_blocks() {
        let mut mask = Mask::new(9, 9);
        mask.set(0, 0); // isolated speckle
        for y in 3..6 {
            for x in 3..6 {
                mask.set(x, y); // 3x3 block
            }
        }
        let eroded = erode(&mask, [3, 3]);
        assert!(!eroded.get(0, 0));
        assert!(eroded.get(4, 4));
        assert_eq!(eroded.count_set(), 1);
    }

    #[test]
    fn full_mask_border_does_not_erode() {
        let mask = Mask::from_raw(6, 5, vec![255; 30]).unwrap();
        let eroded = erode(&mask, [3, 3]);
        assert_eq!(eroded.count_set(), 30);
    }

    #[test]
    fn unit_kernel_is_identity() {
        let mut mask = Mask::new(3, 3);
        mask.set(1, 0);
        assert_eq!(erode(&mask, [1, 1]), mask);
    }
}
