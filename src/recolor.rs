use crate::color::Color;
use crate::regions::Region;
use image::RgbaImage;
use rand::Rng;

/// Copy `raster` and paint each region one random color.
pub fn recolor(raster: &RgbaImage, regions: &[Region]) -> RgbaImage {
    recolor_with_rng(raster, regions, &mut rand::rng())
}

/// Same as [`recolor`], with the color source supplied by the caller.
///
/// Colors are drawn in region order, one per region. Pixels keep their alpha.
/// Points outside the raster are skipped; if regions overlap, the later one wins.
pub fn recolor_with_rng<R: Rng + ?Sized>(
    raster: &RgbaImage,
    regions: &[Region],
    rng: &mut R,
) -> RgbaImage {
    let mut recolored = raster.clone();
    let (width, height) = recolored.dimensions();

    for region in regions {
        let color = Color::random(rng);
        for p in region.points() {
            if p.x >= width || p.y >= height {
                continue;
            }
            let pixel = recolored.get_pixel_mut(p.x, p.y);
            *pixel = color.to_pixel(pixel[3]);
        }
    }

    recolored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::{find_regions, Coordinate};
    use image::Rgba;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn checker_blocks() -> RgbaImage {
        // Two red 3x3 blocks separated by a gray column, alpha varies per row.
        RgbaImage::from_fn(7, 3, |x, y| {
            let alpha = 200 + y as u8;
            if x == 3 {
                Rgba([128, 128, 128, alpha])
            } else {
                Rgba([255, 0, 0, alpha])
            }
        })
    }

    #[test]
    fn recolor_keeps_dimensions_and_uncovered_pixels() {
        let img = checker_blocks();
        let regions = find_regions(&img, Color::new(255, 0, 0), 20, 0);
        assert_eq!(regions.len(), 2);

        let out = recolor_with_rng(&img, &regions, &mut StdRng::seed_from_u64(1));
        assert_eq!(out.dimensions(), img.dimensions());
        for y in 0..3 {
            assert_eq!(out.get_pixel(3, y), img.get_pixel(3, y));
        }
    }

    #[test]
    fn each_region_gets_a_single_color() {
        let img = checker_blocks();
        let regions = find_regions(&img, Color::new(255, 0, 0), 20, 0);
        let out = recolor_with_rng(&img, &regions, &mut StdRng::seed_from_u64(5));

        for region in &regions {
            let colors = region
                .points()
                .iter()
                .map(|p| Color::from_pixel(out.get_pixel(p.x, p.y)))
                .collect::<HashSet<_>>();
            assert_eq!(colors.len(), 1);
        }
    }

    #[test]
    fn alpha_is_preserved() {
        let img = checker_blocks();
        let regions = find_regions(&img, Color::new(255, 0, 0), 20, 0);
        let out = recolor(&img, &regions);
        for (a, b) in img.pixels().zip(out.pixels()) {
            assert_eq!(a[3], b[3]);
        }
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let img = RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]));
        let regions = find_regions(&img, Color::new(255, 0, 0), 20, 5);
        let a = recolor_with_rng(&img, &regions, &mut StdRng::seed_from_u64(9));
        let b = recolor_with_rng(&img, &regions, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);

        let first = Color::from_pixel(a.get_pixel(0, 0));
        assert!(a.pixels().all(|p| Color::from_pixel(p) == first));
    }

    #[test]
    fn no_regions_is_a_plain_copy() {
        let img = checker_blocks();
        assert_eq!(recolor(&img, &[]), img);
    }

    #[test]
    fn later_region_wins_on_overlap() {
        let img = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 255]));
        let shared = Coordinate::new(0, 0);
        let regions = vec![
            Region::new(0, shared, vec![shared, Coordinate::new(1, 0)]),
            Region::new(1, shared, vec![shared]),
        ];

        let mut rng = StdRng::seed_from_u64(3);
        let out = recolor_with_rng(&img, &regions, &mut rng);

        let mut replay = StdRng::seed_from_u64(3);
        let first = Color::random(&mut replay);
        let second = Color::random(&mut replay);
        assert_eq!(Color::from_pixel(out.get_pixel(1, 0)), first);
        assert_eq!(Color::from_pixel(out.get_pixel(0, 0)), second);
    }
}
