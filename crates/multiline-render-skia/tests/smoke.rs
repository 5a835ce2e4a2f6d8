// File: crates/multiline-render-skia/tests/smoke.rs
// Purpose: End-to-end render smoke test writing a PNG of a small chart.

use multiline_core::{Chart, ChartOptions, Dataset, Viewport};
use multiline_render_skia::SkiaRasterizer;

#[test]
fn render_smoke_png() {
    let mut chart = Chart::new(ChartOptions::default(), Viewport::new(640, 400));
    chart.set_dataset(
        Dataset::parse_tsv(
            "name\t2000-01\t2000-02\t2000-03\t2000-04\n\
             Alpha, AA Metro\t4.1\t4.4\t\t5.0\n\
             Beta, BB Metro\t2.0\t2.2\t2.5\t2.1\n",
        )
        .unwrap(),
    );

    let rasterizer = SkiaRasterizer::new();
    let out = std::path::PathBuf::from("target/test_out/smoke.png");
    rasterizer.render_to_png(chart.scene(), &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    let bytes = rasterizer.render_png_bytes(chart.scene()).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
}

#[test]
fn empty_scene_still_renders() {
    let chart = Chart::new(ChartOptions::default(), Viewport::new(100, 100));
    let (px, w, h, _) = SkiaRasterizer::new().render_rgba8(chart.scene()).expect("rgba render");
    assert_eq!((w, h), (1, 1));
    assert_eq!(px.len(), 4);
}
