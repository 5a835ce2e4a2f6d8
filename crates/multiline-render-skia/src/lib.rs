// File: crates/multiline-render-skia/src/lib.rs
// Summary: CPU raster backend: paints a multiline-core `Scene` with Skia and encodes PNG/RGBA.

mod text;

use anyhow::{anyhow, Result};
use skia_safe as skia;
use tracing::debug;

use multiline_core::geometry::Point;
use multiline_core::scene::{BlendMode, Element, LineCap, LineJoin, Scene, Stroke};
use multiline_core::theme::Color;

pub use text::TextShaper;

/// Paints scenes onto Skia raster surfaces.
pub struct SkiaRasterizer {
    shaper: TextShaper,
}

impl SkiaRasterizer {
    pub fn new() -> Self {
        Self { shaper: TextShaper::new() }
    }

    fn paint(&self, scene: &Scene) -> Result<skia::Surface> {
        let (w, h) = pixel_size(scene);
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| anyhow!("failed to create {w}x{h} raster surface"))?;
        let canvas = surface.canvas();
        canvas.clear(to_skia(scene.background()));

        for group in scene.groups().iter().filter(|g| g.visible) {
            canvas.save();
            canvas.translate((group.offset.x, group.offset.y));
            for element in group.elements() {
                self.draw_element(canvas, element);
            }
            canvas.restore();
        }
        debug!(width = w, height = h, elements = scene.element_count(), "rasterized scene");
        Ok(surface)
    }

    fn draw_element(&self, canvas: &skia::Canvas, element: &Element) {
        match element {
            Element::Line { from, to, stroke } => {
                canvas.draw_line((from.x, from.y), (to.x, to.y), &stroke_paint(stroke, BlendMode::Normal));
            }
            Element::Path { subpaths, stroke, blend } => {
                let mut path = skia::Path::new();
                for run in subpaths {
                    append_run(&mut path, run);
                }
                canvas.draw_path(&path, &stroke_paint(stroke, *blend));
            }
            Element::Text { at, text, style } => {
                self.shaper.draw(
                    canvas,
                    text,
                    (at.x, at.y),
                    style.size,
                    to_skia(style.color),
                    style.anchor,
                    style.baseline,
                    style.weight,
                );
            }
            Element::Circle { center, radius, fill } => {
                let mut paint = skia::Paint::default();
                paint.set_anti_alias(true);
                paint.set_style(skia::paint::Style::Fill);
                paint.set_color(to_skia(*fill));
                canvas.draw_circle((center.x, center.y), *radius, &paint);
            }
        }
    }

    /// Render to a tightly packed RGBA8 buffer: `(pixels, width, height, stride)`.
    pub fn render_rgba8(&self, scene: &Scene) -> Result<(Vec<u8>, u32, u32, usize)> {
        let mut surface = self.paint(scene)?;
        let (w, h) = (surface.width(), surface.height());
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let stride = w as usize * 4;
        let mut pixels = vec![0u8; stride * h as usize];
        if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            return Err(anyhow!("reading back {w}x{h} pixels failed"));
        }
        Ok((pixels, w as u32, h as u32, stride))
    }

    pub fn render_png_bytes(&self, scene: &Scene) -> Result<Vec<u8>> {
        let mut surface = self.paint(scene)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Write a PNG to `path`, creating parent directories.
    pub fn render_to_png(&self, scene: &Scene, path: impl AsRef<std::path::Path>) -> Result<()> {
        let bytes = self.render_png_bytes(scene)?;
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

impl Default for SkiaRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

// ---- helpers ----------------------------------------------------------------

fn pixel_size(scene: &Scene) -> (i32, i32) {
    let w = scene.width().ceil().max(1.0) as i32;
    let h = scene.height().ceil().max(1.0) as i32;
    (w, h)
}

fn to_skia(c: Color) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

fn stroke_paint(stroke: &Stroke, blend: BlendMode) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(stroke.width);
    paint.set_color(to_skia(stroke.color));
    paint.set_stroke_cap(match stroke.cap {
        LineCap::Butt => skia::paint::Cap::Butt,
        LineCap::Round => skia::paint::Cap::Round,
    });
    paint.set_stroke_join(match stroke.join {
        LineJoin::Miter => skia::paint::Join::Miter,
        LineJoin::Round => skia::paint::Join::Round,
    });
    paint.set_blend_mode(match blend {
        BlendMode::Normal => skia::BlendMode::SrcOver,
        BlendMode::Multiply => skia::BlendMode::Multiply,
        BlendMode::Screen => skia::BlendMode::Screen,
    });
    paint
}

// A lone point becomes a zero-length segment so round caps paint a dot.
fn append_run(path: &mut skia::Path, run: &[Point]) {
    let Some(first) = run.first() else { return };
    path.move_to((first.x, first.y));
    if run.len() == 1 {
        path.line_to((first.x, first.y));
        return;
    }
    for p in &run[1..] {
        path.line_to((p.x, p.y));
    }
}
