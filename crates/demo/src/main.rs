// File: crates/demo/src/main.rs
// Summary: Loads a TSV (file or URL), renders the chart to PNG + SVG, and optionally a hovered frame.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use multiline_core::svg::write_svg;
use multiline_core::{load_dataset, theme, Chart, Config, PointerEvent, Source, Theme, Viewport, DEFAULT_LABEL};
use multiline_render_skia::SkiaRasterizer;

#[derive(Debug, Parser)]
#[command(name = "multiline-demo", version, about = "Render a multi-series unemployment chart")]
struct Args {
    /// TSV file path or http(s) URL.
    #[arg(short, long, default_value = "data/unemployment.tsv")]
    input: String,

    /// Output directory for PNG/SVG files.
    #[arg(short, long, default_value = "target/out")]
    out: PathBuf,

    /// Viewport width; the chart takes a fraction of it.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Viewport height.
    #[arg(long, default_value_t = 800)]
    height: u32,

    /// Value-axis unit label.
    #[arg(long, default_value = DEFAULT_LABEL)]
    label: String,

    /// Theme preset (light or dark).
    #[arg(long, value_parser = parse_theme)]
    theme: Option<Theme>,

    /// Pointer position `X,Y` in surface pixels for an extra hovered frame.
    #[arg(long, value_parser = parse_point)]
    hover: Option<(f32, f32)>,

    /// JSON config file with chart/loader overrides.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip text so raster output is identical across platforms.
    #[arg(long)]
    no_labels: bool,
}

fn main() -> Result<()> {
    let _ = multiline_core::telemetry::init_default_tracing();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            Config::from_json_file(path).with_context(|| format!("failed to read config '{}'", path.display()))?
        }
        None => Config::default(),
    };
    if let Some(theme) = &args.theme {
        config.chart.theme = theme.clone();
    }
    if args.no_labels {
        config.chart.draw_labels = false;
    }

    let mut chart = Chart::new(config.chart.clone(), Viewport::new(args.width, args.height));
    let rasterizer = SkiaRasterizer::new();
    let source = Source::parse(&args.input);
    println!("Using input: {source}");

    let dataset = match load_dataset(&source, &config.loader, &args.label) {
        Ok(ds) => ds,
        Err(err) => {
            chart.set_load_error(&err);
            let out = args.out.join("error.png");
            rasterizer.render_to_png(chart.scene(), &out)?;
            println!("Wrote {}", out.display());
            return Err(err).with_context(|| format!("could not load '{source}'"));
        }
    };
    println!("Loaded {} series over {} months", dataset.series().len(), dataset.len());
    chart.set_dataset(dataset);

    write_frame(&rasterizer, &chart, &args.out, "chart")?;

    if let Some((x, y)) = args.hover {
        chart.handle_pointer(PointerEvent::Enter);
        chart.handle_pointer(PointerEvent::Move { x, y });
        match (chart.highlight(), chart.dataset()) {
            (Some(hl), Some(ds)) => println!(
                "Hover at ({x}, {y}): {} on {} = {}",
                ds.series()[hl.series].name(),
                hl.date.format("%Y-%m"),
                hl.value
            ),
            _ => println!("Hover at ({x}, {y}): no series has a value there"),
        }
        write_frame(&rasterizer, &chart, &args.out, "chart_hover")?;
    }
    Ok(())
}

fn write_frame(rasterizer: &SkiaRasterizer, chart: &Chart, dir: &Path, stem: &str) -> Result<()> {
    let png = dir.join(format!("{stem}.png"));
    rasterizer.render_to_png(chart.scene(), &png)?;
    let svg = png.with_extension("svg");
    write_svg(chart.scene(), &svg).with_context(|| format!("failed to write '{}'", svg.display()))?;
    info!(png = %png.display(), svg = %svg.display(), "frame written");
    println!("Wrote {}", png.display());
    Ok(())
}

fn parse_point(raw: &str) -> std::result::Result<(f32, f32), String> {
    let (x, y) = raw.split_once(',').ok_or_else(|| format!("expected X,Y but got `{raw}`"))?;
    let x = x.trim().parse::<f32>().map_err(|e| format!("bad X: {e}"))?;
    let y = y.trim().parse::<f32>().map_err(|e| format!("bad Y: {e}"))?;
    Ok((x, y))
}

fn parse_theme(raw: &str) -> std::result::Result<Theme, String> {
    theme::find(raw).ok_or_else(|| {
        let names: Vec<String> = theme::presets().into_iter().map(|t| t.name).collect();
        format!("unknown theme `{raw}` (expected one of: {})", names.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_flag_accepts_presets() {
        let args = Args::try_parse_from(["multiline-demo", "--theme", "Dark"]).unwrap();
        assert_eq!(args.theme.map(|t| t.name), Some("dark".to_string()));
    }

    #[test]
    fn theme_flag_rejects_unknown_names() {
        let err = Args::try_parse_from(["multiline-demo", "--theme", "drak"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(err.to_string().contains("light, dark"), "{err}");
    }

    #[test]
    fn hover_point_parses() {
        assert_eq!(parse_point(" 150, 90.5"), Ok((150.0, 90.5)));
        assert!(parse_point("150").is_err());
    }
}
