// File: crates/window-demo/src/main.rs
// Summary: Windowed host: centers the chart surface, forwards pointer events, blits RGBA frames via softbuffer.

use std::num::NonZeroU32;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::{debug, error};
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use multiline_core::{load_dataset, Chart, Config, PointerEvent, Source, Viewport, DEFAULT_LABEL};
use multiline_render_skia::SkiaRasterizer;

#[derive(Debug, Parser)]
#[command(name = "multiline-window", about = "Hover a multi-series unemployment chart")]
struct Args {
    /// TSV file path or http(s) URL.
    #[arg(default_value = "data/unemployment.tsv")]
    input: String,

    /// JSON config file with chart/loader overrides.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let _ = multiline_core::telemetry::init_default_tracing();
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::from_json_file(path).with_context(|| format!("failed to read config '{}'", path.display()))?,
        None => Config::default(),
    };

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("Unemployment by metro area")
        .with_inner_size(winit::dpi::LogicalSize::new(1024.0, 640.0))
        .build(&event_loop)
        .context("build window")?;

    let mut size = window.inner_size();
    let mut chart = Chart::new(config.chart.clone(), viewport_of(size));
    match load_dataset(&Source::parse(&args.input), &config.loader, DEFAULT_LABEL) {
        Ok(ds) => chart.set_dataset(ds),
        Err(err) => {
            error!(error = %err, "could not load data");
            chart.set_load_error(&err);
        }
    }

    let context = unsafe { softbuffer::Context::new(&window) }.map_err(|e| anyhow!("softbuffer context: {e:?}"))?;
    let mut surface =
        unsafe { softbuffer::Surface::new(&context, &window) }.map_err(|e| anyhow!("softbuffer surface: {e:?}"))?;
    let rasterizer = SkiaRasterizer::new();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
                WindowEvent::Resized(new_size) => {
                    size = new_size;
                    chart.resize(viewport_of(size));
                    window.request_redraw();
                }
                WindowEvent::CursorMoved { position, .. } => {
                    let (ox, oy) = surface_origin(size, &chart);
                    let (x, y) = (position.x as f32 - ox, position.y as f32 - oy);
                    if chart.handle_pointer(PointerEvent::Move { x, y }) {
                        window.request_redraw();
                    }
                }
                WindowEvent::CursorLeft { .. } => {
                    if chart.handle_pointer(PointerEvent::Leave) {
                        window.request_redraw();
                    }
                }
                _ => {}
            },
            Event::RedrawRequested(_) => {
                if let Err(e) = present(&mut surface, &rasterizer, &chart, size) {
                    error!(error = %e, "present failed");
                }
            }
            _ => {}
        }
    });
}

fn viewport_of(size: PhysicalSize<u32>) -> Viewport {
    Viewport::new(size.width, size.height)
}

/// Top-left of the chart surface, centered in the window.
fn surface_origin(size: PhysicalSize<u32>, chart: &Chart) -> (f32, f32) {
    let s = chart.surface();
    (((size.width as f32 - s.width) * 0.5).floor(), ((size.height as f32 - s.height) * 0.5).floor())
}

fn present(
    surface: &mut softbuffer::Surface,
    rasterizer: &SkiaRasterizer,
    chart: &Chart,
    size: PhysicalSize<u32>,
) -> Result<()> {
    let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else { return Ok(()) };
    surface.resize(w, h).map_err(|e| anyhow!("resize: {e:?}"))?;

    let (rgba, cw, ch, stride) = rasterizer.render_rgba8(chart.scene())?;
    let bg = chart.scene().background();
    let fill = ((bg.r as u32) << 16) | ((bg.g as u32) << 8) | bg.b as u32;
    let (ox, oy) = surface_origin(size, chart);
    let (ox, oy) = (ox.max(0.0) as usize, oy.max(0.0) as usize);
    let (ww, wh) = (size.width as usize, size.height as usize);

    let mut frame = surface.buffer_mut().map_err(|e| anyhow!("buffer: {e:?}"))?;
    frame.fill(fill);
    for row in 0..(ch as usize).min(wh.saturating_sub(oy)) {
        let src = &rgba[row * stride..row * stride + cw as usize * 4];
        let dst_start = (oy + row) * ww + ox;
        let cols = (cw as usize).min(ww.saturating_sub(ox));
        for (col, px) in src.chunks_exact(4).take(cols).enumerate() {
            // softbuffer pixels are 0RGB
            frame[dst_start + col] = ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32;
        }
    }
    frame.present().map_err(|e| anyhow!("present: {e:?}"))?;
    debug!(width = ww, height = wh, "presented frame");
    Ok(())
}
