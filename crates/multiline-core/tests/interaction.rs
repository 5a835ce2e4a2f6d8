// File: crates/multiline-core/tests/interaction.rs
// Purpose: Pointer-to-series selection: center bisection, nearest series, and the hover state machine.

use multiline_core::interaction::{pick, InteractionState, Transition};
use proptest::prelude::*;
use multiline_core::{
    bisect_center, nearest_series, ChartOptions, Dataset, Margin, PointerPhase, Scale, Scales, Series, Surface,
};

fn setup(text: &str) -> (Dataset, Scales) {
    let ds = Dataset::parse_tsv(text).unwrap();
    let scales = Scales::build(&ds, &Surface::new(530.0, 250.0, Margin::default()), &ChartOptions::default());
    (ds, scales)
}

#[test]
fn midpoint_between_dates_resolves_to_earlier() {
    let (ds, _) = setup("name\t2000-01\t2000-02\t2000-03\nA\t1\t2\t3\n");
    let t = ds.times();
    let mid = (t[0] + t[1]) / 2.0;
    assert_eq!(bisect_center(t, mid), Some(0));
    assert_eq!(bisect_center(t, mid + 1.0), Some(1));
    assert_eq!(bisect_center(t, (t[1] + t[2]) / 2.0), Some(1));
}

#[test]
fn bisection_clamps_outside_the_date_range() {
    let (ds, _) = setup("name\t2000-01\t2000-02\t2000-03\nA\t1\t2\t3\n");
    assert_eq!(bisect_center(ds.times(), -1e15), Some(0));
    assert_eq!(bisect_center(ds.times(), 1e15), Some(2));
    assert_eq!(bisect_center(&ds.times()[..1], 1e15), Some(0));
}

#[test]
fn nearest_series_by_value() {
    let series = vec![Series::new("low", vec![2.0]), Series::new("high", vec![8.0])];
    assert_eq!(nearest_series(&series, 0, 2.1), Some(0));
    assert_eq!(nearest_series(&series, 0, 7.0), Some(1));
    assert_eq!(nearest_series(&series, 0, 5.0), Some(0), "ties go to the first series");
}

#[test]
fn missing_values_never_win() {
    let series = vec![Series::new("gap", vec![f64::NAN]), Series::new("far", vec![100.0])];
    assert_eq!(nearest_series(&series, 0, 0.0), Some(1));

    let all_missing = vec![Series::new("a", vec![f64::NAN]), Series::new("b", vec![f64::NAN])];
    assert_eq!(nearest_series(&all_missing, 0, 0.0), None);
}

#[test]
fn pick_inverts_pointer_through_scales() {
    let (ds, scales) = setup("name\t2000-01\t2000-02\t2000-03\nA\t10\t20\t30\nB\t2\t4\t6\n");
    let x = scales.time.to_px(ds.times()[1]);
    let y = scales.value.to_px(19.0);
    let hl = pick(&ds, &scales, x, y).expect("a series is selected");
    assert_eq!((hl.series, hl.index, hl.value), (0, 1, 20.0));
    assert!((hl.pointer_value - 19.0).abs() < 1e-3);

    let y = scales.value.to_px(3.0);
    let hl = pick(&ds, &scales, x, y).unwrap();
    assert_eq!((hl.series, hl.value), (1, 4.0));
}

#[test]
fn all_missing_column_selects_nothing() {
    let (ds, scales) = setup("name\t2000-01\t2000-02\nA\t1\t\nB\t2\t\n");
    let x = scales.time.to_px(ds.times()[1]);
    assert!(pick(&ds, &scales, x, 100.0).is_none());
}

#[test]
fn state_machine_transitions() {
    let (ds, scales) = setup("name\t2000-01\t2000-02\nA\t1\t2\nB\t5\t6\n");
    let mut state = InteractionState::default();
    assert_eq!(state.phase(), PointerPhase::Idle);

    assert_eq!(state.enter(), Transition::Entered);
    let x = scales.time.to_px(ds.times()[0]);
    let y = scales.value.to_px(1.0);
    let first = state.move_to(&ds, &scales, x, y);
    assert!(matches!(first, Transition::Moved(Some(h)) if h.series == 0));
    assert_eq!(state.move_to(&ds, &scales, x + 0.5, y), Transition::None, "same selection is not re-applied");

    let y = scales.value.to_px(5.0);
    assert!(matches!(state.move_to(&ds, &scales, x, y), Transition::Moved(Some(h)) if h.series == 1));

    assert_eq!(state.leave(), Transition::Left);
    assert_eq!(state.phase(), PointerPhase::Idle);
    assert!(state.highlight().is_none());
}

#[test]
fn first_move_after_enter_applies_even_without_selection() {
    let (ds, scales) = setup("name\t2000-01\nA\t\n");
    let mut state = InteractionState::default();
    state.enter();
    assert_eq!(state.move_to(&ds, &scales, 100.0, 100.0), Transition::Moved(None));
    assert_eq!(state.move_to(&ds, &scales, 120.0, 100.0), Transition::None);
}

proptest! {
    #[test]
    fn bisect_center_minimizes_distance(
        mut ints in prop::collection::vec(-1_000_000i32..1_000_000, 1..40),
        half_q in -4_000_000i32..4_000_000,
    ) {
        ints.sort_unstable();
        ints.dedup();
        // Whole-number positions and half-step queries keep every distance exact.
        let xs: Vec<f64> = ints.iter().map(|&v| v as f64).collect();
        let q = half_q as f64 / 2.0;
        let i = bisect_center(&xs, q).expect("non-empty");
        let best = xs.iter().map(|x| (x - q).abs()).fold(f64::INFINITY, f64::min);
        prop_assert_eq!((xs[i] - q).abs(), best);
        // On ties the lower index wins.
        prop_assert!(xs[..i].iter().all(|x| (x - q).abs() > best));
    }
}
