// File: crates/multiline-render-skia/src/text.rs
// Summary: Text shaping via Skia textlayout, positioned by anchor and baseline.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};

use multiline_core::scene::{FontWeight, TextAnchor, TextBaseline};

const SANS_FAMILIES: &[&str] = &["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"];

pub struct TextShaper {
    fonts: FontCollection,
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fonts = FontCollection::new();
        fonts.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts }
    }

    fn layout(&self, text: &str, size: f32, color: skia::Color, weight: FontWeight) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(TextAlign::Left);
        let mut style = TextStyle::new();
        style.set_font_size(size.max(1.0));
        style.set_color(color);
        style.set_font_families(SANS_FAMILIES);
        if weight == FontWeight::Bold {
            style.set_font_style(skia::FontStyle::bold());
        }
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&style);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    /// Paint `text` so that `(x, y)` is its anchor point.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &self,
        canvas: &skia::Canvas,
        text: &str,
        (x, y): (f32, f32),
        size: f32,
        color: skia::Color,
        anchor: TextAnchor,
        baseline: TextBaseline,
        weight: FontWeight,
    ) {
        let p = self.layout(text, size, color, weight);
        let width = p.longest_line();
        let left = match anchor {
            TextAnchor::Start => x,
            TextAnchor::Middle => x - width * 0.5,
            TextAnchor::End => x - width,
        };
        // Paragraphs paint from their top-left corner.
        let top = match baseline {
            TextBaseline::Alphabetic => y - p.alphabetic_baseline(),
            TextBaseline::Middle => y - p.height() * 0.5,
            TextBaseline::Hanging => y,
        };
        p.paint(canvas, (left, top));
    }
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}
