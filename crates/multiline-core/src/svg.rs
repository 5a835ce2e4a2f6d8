// File: crates/multiline-core/src/svg.rs
// Summary: Serialize a scene to a standalone SVG document.

use std::fmt::{self, Display, Formatter};
use std::path::Path;

use crate::error::Result;
use crate::geometry::Point;
use crate::scene::{BlendMode, Element, FontWeight, LineCap, LineJoin, Scene, Stroke, TextAnchor, TextBaseline};

const FONT_FAMILY: &str = "sans-serif";

/// Display adapter writing `scene` as SVG markup.
pub struct Svg<'a>(pub &'a Scene);

pub fn to_svg_string(scene: &Scene) -> String {
    Svg(scene).to_string()
}

/// Write the SVG document to `path`, creating parent directories.
pub fn write_svg(scene: &Scene, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, to_svg_string(scene))?;
    Ok(())
}

impl Display for Svg<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let scene = self.0;
        let (w, h) = (num(scene.width()), num(scene.height()));
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" overflow="visible">"#
        )?;
        let bg = scene.background();
        if bg.a > 0 {
            writeln!(f, r#"<rect width="{w}" height="{h}" fill="{}"/>"#, bg.to_hex())?;
        }
        for group in scene.groups() {
            write!(f, r#"<g class="{}""#, group.name)?;
            if group.offset != Point::default() {
                write!(f, r#" transform="translate({},{})""#, num(group.offset.x), num(group.offset.y))?;
            }
            if !group.visible {
                write!(f, r#" display="none""#)?;
            }
            writeln!(f, ">")?;
            for element in group.elements() {
                write_element(f, element)?;
            }
            writeln!(f, "</g>")?;
        }
        if let Some(r) = scene.hit_region() {
            writeln!(
                f,
                r#"<rect class="hit" x="{}" y="{}" width="{}" height="{}" fill="transparent"/>"#,
                num(r.left),
                num(r.top),
                num(r.width()),
                num(r.height())
            )?;
        }
        writeln!(f, "</svg>")
    }
}

fn write_element(f: &mut Formatter<'_>, element: &Element) -> fmt::Result {
    match element {
        Element::Line { from, to, stroke } => writeln!(
            f,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
            num(from.x),
            num(from.y),
            num(to.x),
            num(to.y),
            StrokeAttrs(stroke)
        ),
        Element::Path { subpaths, stroke, blend } => {
            write!(f, r#"<path fill="none" d=""#)?;
            for run in subpaths {
                for (i, p) in run.iter().enumerate() {
                    let cmd = if i == 0 { 'M' } else { 'L' };
                    write!(f, "{cmd}{},{}", num(p.x), num(p.y))?;
                }
                if run.len() == 1 {
                    write!(f, "Z")?;
                }
            }
            write!(f, r#"""#)?;
            write!(f, "{}", StrokeAttrs(stroke))?;
            match blend {
                BlendMode::Normal => {}
                BlendMode::Multiply => write!(f, r#" style="mix-blend-mode: multiply""#)?,
                BlendMode::Screen => write!(f, r#" style="mix-blend-mode: screen""#)?,
            }
            writeln!(f, "/>")
        }
        Element::Text { at, text, style } => {
            let anchor = match style.anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            write!(
                f,
                r#"<text x="{}" y="{}" fill="{}" font-family="{FONT_FAMILY}" font-size="{}" text-anchor="{anchor}""#,
                num(at.x),
                num(at.y),
                style.color.to_hex(),
                num(style.size)
            )?;
            match style.baseline {
                TextBaseline::Alphabetic => {}
                TextBaseline::Middle => write!(f, r#" dy="0.32em""#)?,
                TextBaseline::Hanging => write!(f, r#" dy="0.71em""#)?,
            }
            if style.weight == FontWeight::Bold {
                write!(f, r#" font-weight="bold""#)?;
            }
            writeln!(f, ">{}</text>", Escaped(text))
        }
        Element::Circle { center, radius, fill } => writeln!(
            f,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            num(center.x),
            num(center.y),
            num(*radius),
            fill.to_hex()
        ),
    }
}

struct StrokeAttrs<'a>(&'a Stroke);

impl Display for StrokeAttrs<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = self.0;
        write!(f, r#" stroke="{}" stroke-width="{}""#, s.color.to_hex(), num(s.width))?;
        if s.cap == LineCap::Round {
            write!(f, r#" stroke-linecap="round""#)?;
        }
        if s.join == LineJoin::Round {
            write!(f, r#" stroke-linejoin="round""#)?;
        }
        Ok(())
    }
}

struct Escaped<'a>(&'a str);

impl Display for Escaped<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                _ => write!(f, "{c}")?,
            }
        }
        Ok(())
    }
}

/// Pixel coordinate rounded to 3 decimals, without trailing zeros.
fn num(v: f32) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}
