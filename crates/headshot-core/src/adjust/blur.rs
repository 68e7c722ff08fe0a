//! Full-frame uniform blur.
//!
//! Blurs the whole frame uniformly; no subject segmentation is performed.
//!
//! The implementation is a separable Gaussian: a horizontal pass into the
//! scratch buffer followed by a vertical pass back into the frame, with
//! clamp-to-edge sampling. Sigma is radius / 2, so the kernel's ±2σ
//! support spans the requested pixel radius.

use super::RenderScratch;

/// Blur `pixels` (RGBA8, row-major) in place with the given radius.
///
/// A radius of zero or less is a no-op; callers normally skip the stage
/// entirely in that case. The scratch buffer is reused across calls when
/// the dimensions match.
pub fn uniform_blur(
    pixels: &mut [u8],
    width: u32,
    height: u32,
    radius: f32,
    scratch: &mut RenderScratch,
) {
    if radius <= 0.0 || width == 0 || height == 0 {
        return;
    }

    let kernel = gaussian_kernel(radius);
    let half = (kernel.len() / 2) as i64;
    let w = width as i64;
    let h = height as i64;

    let intermediate = scratch.intermediate_for(width, height);

    // Horizontal pass: pixels -> intermediate
    for y in 0..h {
        let row = y * w;
        for x in 0..w {
            let mut acc = [0.0f32; 4];
            for (k, weight) in kernel.iter().enumerate() {
                let sx = (x + k as i64 - half).clamp(0, w - 1);
                let idx = ((row + sx) * 4) as usize;
                for c in 0..4 {
                    acc[c] += *weight * pixels[idx + c] as f32;
                }
            }
            let out = ((row + x) * 4) as usize;
            intermediate[out..out + 4].copy_from_slice(&acc);
        }
    }

    // Vertical pass: intermediate -> pixels
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0.0f32; 4];
            for (k, weight) in kernel.iter().enumerate() {
                let sy = (y + k as i64 - half).clamp(0, h - 1);
                let idx = ((sy * w + x) * 4) as usize;
                for c in 0..4 {
                    acc[c] += *weight * intermediate[idx + c];
                }
            }
            let out = ((y * w + x) * 4) as usize;
            for c in 0..4 {
                pixels[out + c] = acc[c].round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}

/// Build a normalized 1D Gaussian kernel for the given pixel radius.
///
/// Kernel half-width is ceil(radius), sigma is radius / 2.
fn gaussian_kernel(radius: f32) -> Vec<f32> {
    let half = (radius.ceil() as i64).max(1);
    let sigma = (radius / 2.0).max(0.25) as f64;
    let denom = 2.0 * sigma * sigma;

    let mut weights = Vec::with_capacity((2 * half + 1) as usize);
    let mut sum = 0.0f64;
    for i in -half..=half {
        let x = i as f64;
        let w = (-x * x / denom).exp();
        weights.push(w);
        sum += w;
    }

    weights.into_iter().map(|w| (w / sum) as f32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_pixels(width: u32, height: u32, px: [u8; 4]) -> Vec<u8> {
        px.iter()
            .copied()
            .cycle()
            .take((width * height * 4) as usize)
            .collect()
    }

    #[test]
    fn test_kernel_is_normalized() {
        for radius in [0.5, 1.0, 2.0, 5.0, 12.5] {
            let kernel = gaussian_kernel(radius);
            let sum: f32 = kernel.iter().sum();
            assert!(
                (sum - 1.0).abs() < 1e-4,
                "Kernel for radius {} sums to {}",
                radius,
                sum
            );
        }
    }

    #[test]
    fn test_kernel_is_symmetric() {
        let kernel = gaussian_kernel(3.0);
        let n = kernel.len();
        for i in 0..n / 2 {
            assert!((kernel[i] - kernel[n - 1 - i]).abs() < 1e-7);
        }
    }

    #[test]
    fn test_kernel_peaks_at_center() {
        let kernel = gaussian_kernel(4.0);
        let center = kernel[kernel.len() / 2];
        assert!(kernel.iter().all(|&w| w <= center));
    }

    #[test]
    fn test_zero_radius_is_noop() {
        let mut pixels = uniform_pixels(4, 4, [10, 200, 30, 255]);
        let before = pixels.clone();
        let mut scratch = RenderScratch::new();

        uniform_blur(&mut pixels, 4, 4, 0.0, &mut scratch);
        assert_eq!(pixels, before);
    }

    #[test]
    fn test_uniform_field_is_fixed_point() {
        // Clamp-to-edge sampling means a constant image blurs to itself
        let mut pixels = uniform_pixels(8, 6, [77, 130, 201, 255]);
        let before = pixels.clone();
        let mut scratch = RenderScratch::new();

        uniform_blur(&mut pixels, 8, 6, 3.0, &mut scratch);
        assert_eq!(pixels, before);
    }

    #[test]
    fn test_blur_spreads_an_impulse() {
        // Single white pixel on black: blur must bleed into neighbors
        let mut pixels = uniform_pixels(5, 5, [0, 0, 0, 255]);
        let center = (2 * 5 + 2) * 4;
        pixels[center] = 255;
        pixels[center + 1] = 255;
        pixels[center + 2] = 255;

        let mut scratch = RenderScratch::new();
        uniform_blur(&mut pixels, 5, 5, 2.0, &mut scratch);

        assert!(pixels[center] < 255, "Peak must lose energy");
        let neighbor = (2 * 5 + 1) * 4;
        assert!(pixels[neighbor] > 0, "Neighbor must gain energy");
    }

    #[test]
    fn test_blur_softens_an_edge() {
        // Left half black, right half white
        let (w, h) = (10u32, 4u32);
        let mut pixels = Vec::new();
        for _y in 0..h {
            for x in 0..w {
                let v = if x < w / 2 { 0 } else { 255 };
                pixels.extend_from_slice(&[v, v, v, 255]);
            }
        }

        let mut scratch = RenderScratch::new();
        uniform_blur(&mut pixels, w, h, 2.0, &mut scratch);

        // The pixel just left of the edge picks up some white
        let idx = ((w / 2 - 1) * 4) as usize;
        assert!(pixels[idx] > 0 && pixels[idx] < 255);
    }

    #[test]
    fn test_larger_radius_blurs_more() {
        let make = || {
            let mut pixels = uniform_pixels(9, 9, [0, 0, 0, 255]);
            let center = (4 * 9 + 4) * 4;
            pixels[center] = 255;
            pixels
        };

        let mut scratch = RenderScratch::new();
        let mut small = make();
        uniform_blur(&mut small, 9, 9, 1.0, &mut scratch);
        let mut large = make();
        uniform_blur(&mut large, 9, 9, 4.0, &mut scratch);

        let center = (4 * 9 + 4) * 4;
        assert!(
            large[center] < small[center],
            "A larger radius must flatten the peak further"
        );
    }

    #[test]
    fn test_blur_single_pixel_frame() {
        let mut pixels = vec![42, 43, 44, 255];
        let mut scratch = RenderScratch::new();
        uniform_blur(&mut pixels, 1, 1, 5.0, &mut scratch);
        assert_eq!(pixels, vec![42, 43, 44, 255]);
    }

    #[test]
    fn test_blur_preserves_opaque_alpha() {
        let mut pixels = uniform_pixels(6, 6, [0, 0, 0, 255]);
        pixels[0] = 255;
        let mut scratch = RenderScratch::new();
        uniform_blur(&mut pixels, 6, 6, 2.5, &mut scratch);

        assert!(pixels.chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn test_fractional_radius() {
        let mut pixels = uniform_pixels(4, 4, [0, 0, 0, 255]);
        pixels[0] = 200;
        let mut scratch = RenderScratch::new();
        uniform_blur(&mut pixels, 4, 4, 0.5, &mut scratch);

        assert!(pixels[0] < 200);
    }
}
