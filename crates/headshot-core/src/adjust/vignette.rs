//! Radial vignette compositing.
//!
//! Darkens the frame toward its corners by compositing a radial black
//! gradient over the pixels: fully transparent out to 40% of the
//! center-to-corner distance, ramping linearly to its maximum opacity at
//! 120%, constant beyond. The maximum opacity is `amount / 100 * 0.7`, so
//! even at full strength the corners keep 30% of their value.

/// Composite the vignette gradient over `pixels` (RGBA8, row-major).
///
/// `amount` is the vignette strength in [0, 100]; zero or less is a no-op
/// (callers normally skip the stage entirely). Alpha is untouched - the
/// gradient darkens RGB via an "over" composite with black:
/// `v' = v * (1 - a)`.
pub fn apply_vignette(pixels: &mut [u8], width: u32, height: u32, amount: f32) {
    if amount <= 0.0 || width == 0 || height == 0 {
        return;
    }

    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let max_radius = (cx * cx + cy * cy).sqrt();
    let inner = 0.4 * max_radius;
    let outer = 1.2 * max_radius;
    let max_alpha = (amount / 100.0) * 0.7;

    let w = width as usize;
    for y in 0..height as usize {
        // Sample at pixel centers
        let dy = (y as f32 + 0.5) - cy;
        let dy_sq = dy * dy;
        for x in 0..w {
            let dx = (x as f32 + 0.5) - cx;
            let dist = (dx * dx + dy_sq).sqrt();

            let t = ((dist - inner) / (outer - inner)).clamp(0.0, 1.0);
            if t <= 0.0 {
                continue;
            }
            let keep = 1.0 - t * max_alpha;

            let idx = (y * w + x) * 4;
            for channel in &mut pixels[idx..idx + 3] {
                *channel = (*channel as f32 * keep).round() as u8;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_frame(width: u32, height: u32, value: u8) -> Vec<u8> {
        [value, value, value, 255]
            .iter()
            .copied()
            .cycle()
            .take((width * height * 4) as usize)
            .collect()
    }

    fn pixel_at(pixels: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * width + x) * 4) as usize;
        [
            pixels[idx],
            pixels[idx + 1],
            pixels[idx + 2],
            pixels[idx + 3],
        ]
    }

    #[test]
    fn test_zero_amount_is_noop() {
        let mut pixels = gray_frame(10, 10, 180);
        let before = pixels.clone();
        apply_vignette(&mut pixels, 10, 10, 0.0);
        assert_eq!(pixels, before);
    }

    #[test]
    fn test_center_unaffected() {
        // The frame center is always inside the 40% inner radius
        let mut pixels = gray_frame(21, 21, 200);
        apply_vignette(&mut pixels, 21, 21, 100.0);

        let center = pixel_at(&pixels, 21, 10, 10);
        assert_eq!(center, [200, 200, 200, 255]);
    }

    #[test]
    fn test_corners_darker_than_center() {
        let mut pixels = gray_frame(32, 24, 200);
        apply_vignette(&mut pixels, 32, 24, 100.0);

        let center = pixel_at(&pixels, 32, 16, 12);
        for (x, y) in [(0, 0), (31, 0), (0, 23), (31, 23)] {
            let corner = pixel_at(&pixels, 32, x, y);
            assert!(
                corner[0] < center[0],
                "Corner ({}, {}) should be darker: {} vs {}",
                x,
                y,
                corner[0],
                center[0]
            );
        }
    }

    #[test]
    fn test_max_strength_keeps_30_percent_floor() {
        // Even at amount 100, opacity caps at 0.7
        let mut pixels = gray_frame(40, 40, 200);
        apply_vignette(&mut pixels, 40, 40, 100.0);

        let corner = pixel_at(&pixels, 40, 0, 0);
        assert!(
            corner[0] >= (200.0 * 0.3) as u8,
            "Corner should keep at least 30%, got {}",
            corner[0]
        );
    }

    #[test]
    fn test_stronger_amount_darkens_more() {
        let mut weak = gray_frame(20, 20, 200);
        apply_vignette(&mut weak, 20, 20, 30.0);
        let mut strong = gray_frame(20, 20, 200);
        apply_vignette(&mut strong, 20, 20, 90.0);

        let weak_corner = pixel_at(&weak, 20, 0, 0);
        let strong_corner = pixel_at(&strong, 20, 0, 0);
        assert!(strong_corner[0] < weak_corner[0]);
    }

    #[test]
    fn test_falloff_is_monotonic_from_center() {
        let (w, h) = (41u32, 41u32);
        let mut pixels = gray_frame(w, h, 220);
        apply_vignette(&mut pixels, w, h, 100.0);

        // Walk from center to the right edge along the middle row
        let mut prev = pixel_at(&pixels, w, 20, 20)[0];
        for x in 21..w {
            let v = pixel_at(&pixels, w, x, 20)[0];
            assert!(v <= prev, "Darkening must not decrease outward");
            prev = v;
        }
    }

    #[test]
    fn test_alpha_untouched() {
        let mut pixels = gray_frame(16, 16, 128);
        apply_vignette(&mut pixels, 16, 16, 100.0);
        assert!(pixels.chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn test_radial_symmetry() {
        let (w, h) = (30u32, 30u32);
        let mut pixels = gray_frame(w, h, 180);
        apply_vignette(&mut pixels, w, h, 80.0);

        // The four corners are equidistant from the center
        let corners = [
            pixel_at(&pixels, w, 0, 0),
            pixel_at(&pixels, w, 29, 0),
            pixel_at(&pixels, w, 0, 29),
            pixel_at(&pixels, w, 29, 29),
        ];
        for corner in &corners[1..] {
            assert_eq!(corner[0], corners[0][0]);
        }
    }

    #[test]
    fn test_single_pixel_frame() {
        let mut pixels = vec![100, 100, 100, 255];
        apply_vignette(&mut pixels, 1, 1, 100.0);
        // The lone pixel is the center: inside the inner radius
        assert_eq!(pixels, vec![100, 100, 100, 255]);
    }

    #[test]
    fn test_black_frame_stays_black() {
        let mut pixels = gray_frame(12, 12, 0);
        apply_vignette(&mut pixels, 12, 12, 100.0);
        assert!(pixels.chunks_exact(4).all(|px| px[..3] == [0, 0, 0]));
    }
}
