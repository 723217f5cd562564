use bayer_fb::dither::{quantize_channel, quantize_mono, MATRIX_RANGE};
use bayer_fb::prelude::*;
use bayer_fb::{threshold, BayerColor, BayerMono, BAYER_8X8};
use embedded_graphics::pixelcolor::BinaryColor;

fn rect(x: i32, y: i32, w: u32, h: u32) -> Rectangle {
    Rectangle::new(Point::new(x, y), Size::new(w, h))
}

/// Expected framebuffer after filling `area` on a fresh buffer, computed
/// pixel by pixel over the unclipped rectangle.
fn naive_fill<F: PixelFormat>(
    width: u32,
    height: u32,
    spans: &[RowSpan],
    area: Rectangle,
    rgb: [u8; 3],
) -> Vec<u8> {
    let mut fb = Framebuffer::<F>::with_row_spans(width, height, spans.to_vec()).unwrap();
    let x0 = area.top_left.x as i64;
    let y0 = area.top_left.y as i64;
    for y in y0..y0 + area.size.height as i64 {
        for x in x0..x0 + area.size.width as i64 {
            if y < 0 || y >= height as i64 {
                continue;
            }
            let span = spans[y as usize];
            if !span.contains(x as i32) {
                continue;
            }
            let c = <F::Dither as DitherStrategy>::map(x as i32, y as i32, rgb);
            fb.set_pixel(x as i32, y as i32, c);
        }
    }
    fb.into_data()
}

fn filled<F: PixelFormat>(
    width: u32,
    height: u32,
    spans: &[RowSpan],
    area: Rectangle,
    rgb: [u8; 3],
) -> Vec<u8> {
    let fb = Framebuffer::<F>::with_row_spans(width, height, spans.to_vec()).unwrap();
    let mut ctx = GraphicsContext::new(fb);
    fill_rect_dithered(&mut ctx, area, rgb[0], rgb[1], rgb[2]);
    assert!(!ctx.is_captured());
    ctx.into_framebuffer().into_data()
}

#[test]
fn matrix_is_a_permutation_of_the_full_range() {
    let mut all: Vec<u8> = BAYER_8X8.iter().flatten().copied().collect();
    all.sort_unstable();
    let expected: Vec<u8> = (0..MATRIX_RANGE as u8).collect();
    assert_eq!(all, expected);

    for x in -16..16 {
        for y in -16..16 {
            assert_eq!(threshold(x, y), threshold(x.rem_euclid(8), y.rem_euclid(8)));
            assert_eq!(threshold(x, y), threshold(x, y));
        }
    }
}

#[test]
fn matrix_positions_are_pinned() {
    assert_eq!(BAYER_8X8[0], [0, 32, 8, 40, 2, 34, 10, 42]);
    assert_eq!(BAYER_8X8[3], [60, 28, 52, 20, 62, 30, 54, 22]);
    assert_eq!(BAYER_8X8[7], [63, 31, 55, 23, 61, 29, 53, 21]);
    assert_eq!(threshold(4, 4), 1);
    assert_eq!(threshold(3, 4), 62);
}

#[test]
fn levels_are_monotonic_in_input() {
    for x in 0..8 {
        for y in 0..8 {
            let mut prev_mono = 0;
            let mut prev_color = 0;
            for v in 0..=255u8 {
                let m = BayerMono::intensity(x, y, v);
                let c = BayerColor::intensity(x, y, v);
                assert!(m >= prev_mono, "mono dropped at ({}, {}) v={}", x, y, v);
                assert!(c >= prev_color, "color dropped at ({}, {}) v={}", x, y, v);
                assert!(m <= 1 && c <= 3);
                prev_mono = m;
                prev_color = c;
            }
        }
    }
}

#[test]
fn mono_gray_recovers_intensity_at_macro_scale() {
    for v in [0u8, 1, 17, 64, 100, 128, 200, 251, 255] {
        let data = filled::<Monochrome>(64, 64, &[RowSpan::full(64); 64], rect(0, 0, 64, 64), [v, v, v]);
        let lit: u32 = data.iter().map(|b| b.count_ones()).sum();
        // One promotion per threshold below the scaled value, in each of 64 tiles
        let per_tile = (0..64u8).filter(|&d| quantize_mono(v, d) == 1).count() as u32;
        assert_eq!(lit, 64 * per_tile, "v={}", v);
        let fraction = lit as f64 / 4096.0;
        assert!((fraction - v as f64 / 255.0).abs() <= 1.0 / 64.0 + 1e-9, "v={} fraction={}", v, fraction);
    }
}

#[test]
fn color_channel_recovers_position_within_band() {
    for v in [0u8, 10, 42, 84, 85, 128, 169, 200, 254, 255] {
        let data = filled::<Color64>(64, 64, &[RowSpan::full(64); 64], rect(0, 0, 64, 64), [v, 0, 0]);
        let base = (v / 85) as usize;
        let promoted = data
            .iter()
            .filter(|&&b| Rgb222::from_storage(b).r() as usize > base)
            .count();
        let residual = v as f64 % 85.0 / 85.0;
        let fraction = promoted as f64 / 4096.0;
        assert!((fraction - residual).abs() <= 1.0 / 64.0 + 1e-9, "v={} fraction={}", v, fraction);
        let per_tile = (0..64u8).filter(|&d| quantize_channel(v, d) as usize > base).count();
        assert_eq!(promoted, 64 * per_tile);
    }
}

#[test]
fn mid_gray_tile_on_monochrome() {
    let data = filled::<Monochrome>(8, 8, &[RowSpan::full(8); 8], rect(0, 0, 8, 8), [128, 128, 128]);
    let lit: u32 = data.iter().map(|b| b.count_ones()).sum();
    assert_eq!(lit, 32);
    for y in 0..8 {
        for x in 0..8 {
            let on = data[y as usize] & (1 << x) != 0;
            assert_eq!(on, threshold(x, y) < 32, "({}, {})", x, y);
        }
    }
    // Threshold 0 and 1 corners of the two 4x4 sub-tiles are lit
    assert_eq!(data[0] & 1, 1);
    assert_eq!(data[4] & (1 << 4), 1 << 4);
}

#[test]
fn clipping_matches_naive_reference() {
    let (w, h) = (24u32, 20u32);
    let full = vec![RowSpan::full(w); h as usize];
    let cases = [
        rect(3, 2, 10, 9),       // inside
        rect(0, -15, 24, 10),    // entirely above
        rect(0, 25, 24, 10),     // entirely below
        rect(-5, -5, 12, 12),    // top-left overlap
        rect(18, 15, 20, 20),    // bottom-right overlap
        rect(30, 0, 5, 5),       // right of the buffer
        rect(-10, 0, 5, 5),      // left of the buffer
        rect(-50, -50, 200, 200), // covers everything
        rect(4, 4, 0, 10),       // zero width
        rect(4, 4, 10, 0),       // zero height
    ];
    for area in cases {
        for rgb in [[128, 128, 128], [250, 30, 90]] {
            assert_eq!(
                filled::<Monochrome>(w, h, &full, area, rgb),
                naive_fill::<Monochrome>(w, h, &full, area, rgb),
                "mono {:?}",
                area
            );
            assert_eq!(
                filled::<Color64>(w, h, &full, area, rgb),
                naive_fill::<Color64>(w, h, &full, area, rgb),
                "color {:?}",
                area
            );
        }
    }
}

#[test]
fn clipping_follows_row_spans() {
    let fb = Framebuffer::<Color64>::round(40);
    let spans: Vec<RowSpan> = (0..40).map(|y| fb.row_span(y).unwrap()).collect();
    for area in [rect(-10, -10, 60, 60), rect(0, 0, 10, 10), rect(15, 30, 30, 30)] {
        let got = filled::<Color64>(40, 40, &spans, area, [255, 255, 255]);
        assert_eq!(got, naive_fill::<Color64>(40, 40, &spans, area, [255, 255, 255]));
    }

    // Hidden corners are never written
    let got = filled::<Color64>(40, 40, &spans, rect(0, 0, 40, 40), [255, 255, 255]);
    assert_eq!(got[0], Rgb222::BLACK.into_storage());
    assert_eq!(got[39], Rgb222::BLACK.into_storage());
    assert_eq!(got[20 * 40 + 20], Rgb222::WHITE.into_storage());
}

#[test]
fn narrow_rows_bound_the_left_edge() {
    let spans = vec![RowSpan::new(4, 7), RowSpan::new(2, 5), RowSpan::new(6, 3)];
    let got = filled::<Color64>(8, 3, &spans, rect(-3, 0, 20, 3), [255, 0, 0]);
    let red = Rgb222::RED.into_storage();
    let black = Rgb222::BLACK.into_storage();
    assert_eq!(&got[0..8], &[black, black, black, black, red, red, red, red]);
    assert_eq!(&got[8..16], &[black, black, red, red, red, red, black, black]);
    assert!(got[16..24].iter().all(|&b| b == black));
}

#[test]
fn non_matching_filter_leaves_region_unchanged() {
    let mut ctx = GraphicsContext::new(Framebuffer::<Color64>::new(32, 32));
    fill_rect_dithered(&mut ctx, rect(0, 0, 32, 32), 0, 0, 255);
    // Full blue never dithers, so the region holds only one colour
    assert!(ctx.framebuffer().data().iter().all(|&b| b == Rgb222::BLUE.into_storage()));
    let before = ctx.framebuffer().data().to_vec();

    replace_color_in_rect_with_dithered(&mut ctx, rect(0, 0, 32, 32), Replace::Only(Rgb222::RED), 128, 200, 30);
    assert_eq!(ctx.framebuffer().data(), &before[..]);

    let mut ctx = GraphicsContext::new(Framebuffer::<Monochrome>::new(32, 32));
    let before = ctx.framebuffer().data().to_vec();
    replace_color_in_rect_with_dithered(
        &mut ctx,
        rect(0, 0, 32, 32),
        Replace::Only(BinaryColor::On),
        255,
        255,
        255,
    );
    assert_eq!(ctx.framebuffer().data(), &before[..]);
}

#[test]
fn wildcard_replace_equals_fill() {
    fn prepared<F: PixelFormat>() -> GraphicsContext<F> {
        let mut ctx = GraphicsContext::new(Framebuffer::<F>::new(40, 30));
        fill_rect_dithered(&mut ctx, rect(0, 0, 40, 30), 90, 180, 20);
        fill_rect_dithered(&mut ctx, rect(5, 5, 10, 10), 250, 250, 250);
        ctx
    }

    for area in [rect(-3, 2, 30, 40), rect(10, 10, 5, 5), rect(0, 0, 40, 30)] {
        let mut a = prepared::<Color64>();
        let mut b = prepared::<Color64>();
        fill_rect_dithered(&mut a, area, 33, 66, 99);
        replace_color_in_rect_with_dithered(&mut b, area, Replace::Any, 33, 66, 99);
        assert_eq!(a.framebuffer().data(), b.framebuffer().data());

        let mut a = prepared::<Monochrome>();
        let mut b = prepared::<Monochrome>();
        fill_rect_dithered(&mut a, area, 33, 66, 99);
        replace_color_in_rect_with_dithered(&mut b, area, Replace::Any, 33, 66, 99);
        assert_eq!(a.framebuffer().data(), b.framebuffer().data());
    }
}

#[test]
fn unavailable_framebuffer_is_a_silent_no_op() {
    let mut ctx = GraphicsContext::new(Framebuffer::<Color64>::new(16, 16));
    let before = ctx.framebuffer().data().to_vec();

    std::mem::forget(ctx.capture_framebuffer());
    fill_rect_dithered(&mut ctx, rect(0, 0, 16, 16), 255, 255, 255);
    replace_color_in_rect_with_dithered(&mut ctx, rect(0, 0, 16, 16), Replace::Any, 255, 255, 255);
    assert_eq!(ctx.framebuffer().data(), &before[..]);
}
