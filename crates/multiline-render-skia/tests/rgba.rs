// File: crates/multiline-render-skia/tests/rgba.rs
// Purpose: Validate RGBA buffer shape, background, and the hover marker's pixels.

use multiline_core::{Chart, ChartOptions, Dataset, Margin, PointerEvent, Surface};
use multiline_render_skia::SkiaRasterizer;

fn chart() -> Chart {
    let mut opts = ChartOptions::default();
    opts.draw_labels = false; // avoid font variance
    let mut chart = Chart::with_surface(opts, Surface::new(530.0, 250.0, Margin::default()));
    chart.set_dataset(Dataset::parse_tsv("name\t2000-01\t2000-02\t2000-03\nA\t10\t20\t30\n").unwrap());
    chart
}

fn pixel(px: &[u8], stride: usize, x: usize, y: usize) -> [u8; 4] {
    let i = y * stride + x * 4;
    [px[i], px[i + 1], px[i + 2], px[i + 3]]
}

#[test]
fn render_rgba8_buffer() {
    let (px, w, h, stride) = SkiaRasterizer::new().render_rgba8(chart().scene()).expect("rgba render");
    assert_eq!((w, h), (530, 250));
    assert_eq!(w as usize * h as usize * 4, px.len());
    assert_eq!(stride, (w as usize) * 4);

    // Opaque white background in the top-left corner.
    assert_eq!(pixel(&px, stride, 0, 0), [255, 255, 255, 255]);
}

#[test]
fn hover_marker_is_painted_on_top() {
    let mut chart = chart();
    chart.handle_pointer(PointerEvent::Move { x: 278.0, y: 90.0 });
    let (px, _, _, stride) = SkiaRasterizer::new().render_rgba8(chart.scene()).expect("rgba render");
    let [r, g, b, a] = pixel(&px, stride, 278, 86);
    assert_eq!(a, 255);
    assert!(r < 40 && g < 40 && b < 40, "marker pixel should be dark, got {r},{g},{b}");

    chart.handle_pointer(PointerEvent::Leave);
    let (px, _, _, stride) = SkiaRasterizer::new().render_rgba8(chart.scene()).expect("rgba render");
    let [r, g, b, _] = pixel(&px, stride, 278, 86);
    assert!(b > r && b > g, "resting line should be blue, got {r},{g},{b}");
}
