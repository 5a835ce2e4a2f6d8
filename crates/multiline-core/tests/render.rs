// File: crates/multiline-core/tests/render.rs
// Purpose: End-to-end chart scenes: path geometry, axes, hover restyling, and the error view.

use approx::assert_relative_eq;
use multiline_core::scene::{BlendMode, Element, FontWeight};
use multiline_core::{
    Chart, ChartOptions, Dataset, Error, LoadStatus, Margin, PointerEvent, PointerPhase, Surface, Theme, Viewport,
};

const THREE_MONTHS: &str = "name\t2000-01\t2000-02\t2000-03\nA\t10\t20\t30\n";

fn chart_for(text: &str) -> Chart {
    let mut chart = Chart::with_surface(ChartOptions::default(), Surface::new(530.0, 250.0, Margin::default()));
    chart.set_dataset(Dataset::parse_tsv(text).unwrap());
    chart
}

fn path(chart: &Chart, index: usize) -> &Element {
    let id = chart.renderer().path_id(index).expect("path exists");
    chart.scene().element(id).expect("path element")
}

fn subpaths(el: &Element) -> &Vec<Vec<multiline_core::geometry::Point>> {
    match el {
        Element::Path { subpaths, .. } => subpaths,
        other => panic!("not a path: {other:?}"),
    }
}

#[test]
fn path_points_follow_scales() {
    let chart = chart_for(THREE_MONTHS);
    let runs = subpaths(path(&chart, 0));
    assert_eq!(runs.len(), 1);
    let pts = &runs[0];
    assert_eq!(pts.len(), 3);
    assert_relative_eq!(pts[0].x, 30.0);
    assert_relative_eq!(pts[1].x, 278.0, epsilon = 1e-3);
    assert_relative_eq!(pts[2].x, 510.0);
    assert_relative_eq!(pts[0].y, 153.333, epsilon = 1e-2);
    assert_relative_eq!(pts[1].y, 86.667, epsilon = 1e-2);
    assert_relative_eq!(pts[2].y, 20.0);
}

#[test]
fn missing_values_split_the_path() {
    let chart = chart_for("name\t2000-01\t2000-02\t2000-03\t2000-04\nA\t1\t\t3\t4\n");
    let runs = subpaths(path(&chart, 0));
    assert_eq!(runs.iter().map(Vec::len).collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn resting_paths_use_theme_style() {
    let chart = chart_for(THREE_MONTHS);
    let theme = Theme::light();
    match path(&chart, 0) {
        Element::Path { stroke, blend, .. } => {
            assert_eq!(stroke.color, theme.line_stroke);
            assert_eq!(stroke.width, 1.5);
            assert_eq!(*blend, BlendMode::Multiply);
        }
        _ => unreachable!(),
    }
    let marker = chart.scene().find_group("marker").unwrap();
    assert!(!marker.visible);
}

#[test]
fn value_axis_has_bold_title_and_no_domain_line() {
    let chart = chart_for(THREE_MONTHS);
    let y_axis = chart.scene().find_group("y-axis").unwrap();
    assert_eq!(y_axis.offset.x, 30.0);
    assert!(y_axis.elements().all(|e| !matches!(e, Element::Line { from, to, .. } if from.x == to.x)));
    let title = y_axis
        .elements()
        .find_map(|e| match e {
            Element::Text { at, text, style } if style.weight == FontWeight::Bold => Some((at, text)),
            _ => None,
        })
        .expect("title present");
    assert_eq!(title.1, "% Unemployment");
    assert_eq!(title.0.x, 3.0);
    assert_relative_eq!(title.0.y, 20.0);

    let x_axis = chart.scene().find_group("x-axis").unwrap();
    assert_eq!(x_axis.offset.y, 220.0);
    let labels: Vec<_> = x_axis
        .elements()
        .filter_map(|e| match e {
            Element::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(labels.first(), Some(&"Jan 02"));
}

#[test]
fn redraw_is_idempotent() {
    let mut chart = chart_for(THREE_MONTHS);
    let before = chart.scene().clone();
    chart.redraw();
    assert_eq!(chart.scene(), &before);

    chart.handle_pointer(PointerEvent::Move { x: 278.0, y: 90.0 });
    chart.redraw();
    assert_eq!(chart.scene(), &before);
    assert_eq!(chart.phase(), PointerPhase::Idle);
}

#[test]
fn hover_highlights_and_raises_nearest_series() {
    let mut chart = chart_for("name\t2000-01\t2000-02\t2000-03\nA\t10\t20\t30\nB\t1\t2\t3\n");
    let theme = Theme::light();

    assert!(chart.handle_pointer(PointerEvent::Enter));
    assert_eq!(chart.phase(), PointerPhase::Entered);
    for i in 0..2 {
        assert!(matches!(path(&chart, i), Element::Path { stroke, blend: BlendMode::Normal, .. } if stroke.color == theme.line_dimmed));
    }

    assert!(chart.handle_pointer(PointerEvent::Move { x: 278.0, y: 90.0 }));
    let hl = *chart.highlight().expect("highlight");
    assert_eq!((hl.series, hl.index, hl.value), (0, 1, 20.0));
    assert!(matches!(path(&chart, 0), Element::Path { stroke, .. } if stroke.color == theme.line_stroke));
    assert!(matches!(path(&chart, 1), Element::Path { stroke, .. } if stroke.color == theme.line_dimmed));

    let marker = chart.scene().find_group("marker").unwrap();
    assert!(marker.visible);
    assert_relative_eq!(marker.offset.x, 278.0, epsilon = 1e-3);
    assert_relative_eq!(marker.offset.y, 86.667, epsilon = 1e-2);
    assert!(marker.elements().any(|e| matches!(e, Element::Text { text, .. } if text == "A")));

    // Move to the lower series: it is raised above the other.
    assert!(chart.handle_pointer(PointerEvent::Move { x: 278.0, y: 210.0 }));
    let a = chart.renderer().path_id(0).unwrap();
    let b = chart.renderer().path_id(1).unwrap();
    assert_eq!(chart.scene().paint_order(b.group()), vec![a, b]);
    assert!(chart.handle_pointer(PointerEvent::Move { x: 278.0, y: 90.0 }));
    assert_eq!(chart.scene().paint_order(a.group()), vec![b, a]);

    assert!(chart.handle_pointer(PointerEvent::Leave));
    assert_eq!(chart.phase(), PointerPhase::Idle);
    assert!(chart.highlight().is_none());
    assert!(!chart.scene().find_group("marker").unwrap().visible);
    for i in 0..2 {
        assert!(matches!(path(&chart, i), Element::Path { stroke, blend: BlendMode::Multiply, .. } if stroke.color == theme.line_stroke));
    }
    assert!(!chart.handle_pointer(PointerEvent::Leave));
}

#[test]
fn move_outside_hit_region_counts_as_leave() {
    let mut chart = chart_for(THREE_MONTHS);
    chart.handle_pointer(PointerEvent::Move { x: 100.0, y: 100.0 });
    assert_eq!(chart.phase(), PointerPhase::Entered);
    assert!(chart.handle_pointer(PointerEvent::Move { x: -1.0, y: 100.0 }));
    assert_eq!(chart.phase(), PointerPhase::Idle);
}

#[test]
fn missing_column_keeps_marker_hidden() {
    let mut chart = chart_for("name\t2000-01\t2000-02\nA\t1\t\nB\t2\t\n");
    chart.handle_pointer(PointerEvent::Move { x: 505.0, y: 100.0 });
    assert_eq!(chart.phase(), PointerPhase::Entered);
    assert!(chart.highlight().is_none());
    assert!(!chart.scene().find_group("marker").unwrap().visible);
}

#[test]
fn load_error_shows_message() {
    let mut chart = Chart::new(ChartOptions::default(), Viewport::new(1000, 500));
    assert_eq!(chart.status(), &LoadStatus::Pending);
    chart.set_load_error(&Error::NoSeries);
    assert!(matches!(chart.status(), LoadStatus::Failed(m) if m.starts_with("Could not load data")));
    let group = chart.scene().find_group("error").expect("error view");
    assert!(group.elements().any(|e| matches!(e, Element::Text { text, .. } if text.contains("no series"))));
    assert!(!chart.handle_pointer(PointerEvent::Move { x: 10.0, y: 10.0 }));
    assert!(chart.dataset().is_none());
}

#[test]
fn resize_redraws_only_on_change() {
    let mut chart = Chart::new(ChartOptions::default(), Viewport::new(1000, 500));
    chart.set_dataset(Dataset::parse_tsv(THREE_MONTHS).unwrap());
    assert_eq!(chart.scene().width(), 800.0);
    assert!(!chart.resize(Viewport::new(1000, 500)));
    assert!(chart.resize(Viewport::new(500, 500)));
    assert_eq!(chart.scene().width(), 400.0);
    let runs = subpaths(path(&chart, 0));
    assert_relative_eq!(runs[0][2].x, 380.0);
}
