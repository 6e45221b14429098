//! End-to-end scenarios through the public widget API.
//!
//! Every scenario uses a 500×800 viewport, a 30-unit gutter, five columns
//! and Monday 2024-01-15 as the anchor unless stated otherwise.

use calgrid::geometry::Geometry;
use calgrid::gesture::{GestureMachine, GestureState, OffsetUpdate, ScrollBounds};
use calgrid::model::{DayIndex, LayoutConstants, Point, ScrollOffsets, ViewportState};
use calgrid::render::RecordingSurface;
use calgrid::CalendarGrid;
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn geometry(horizontal: f32) -> Geometry {
    Geometry::new(
        ViewportState::new(500.0, 800.0),
        ScrollOffsets::new(horizontal, 0.0),
        LayoutConstants::default(),
    )
}

fn grid() -> CalendarGrid {
    let mut grid = CalendarGrid::new(date(2024, 1, 15), LayoutConstants::default());
    grid.on_resize(500.0, 800.0);
    grid
}

#[test]
fn scenario_a_initial_visible_range() {
    let geometry = geometry(0.0);
    assert_eq!(geometry.column_width(), Some(94.0));

    let range = geometry.visible_day_range().unwrap();
    assert_eq!(range.first, DayIndex::new(0));
    assert_eq!(range.last, DayIndex::new(6));
    assert_eq!(geometry.end_date(date(2024, 1, 15)), date(2024, 1, 21));

    let mut grid = grid();
    let summary = grid.on_repaint_requested(&mut RecordingSurface::new());
    assert_eq!(summary.current_date, date(2024, 1, 21));
    assert_eq!(grid.current_date(), date(2024, 1, 21));
}

#[test]
fn scenario_b_one_column_scrolled() {
    let range = geometry(94.0).visible_day_range().unwrap();
    assert_eq!(range.first, DayIndex::new(1));
    assert_eq!(range.last, DayIndex::new(7));

    let mut grid = grid();
    grid.set_horizontal_offset(94.0);
    assert_eq!(grid.current_date(), date(2024, 1, 22));
}

#[test]
fn scenario_c_horizontal_lock_ignores_vertical_motion() {
    let bounds = ScrollBounds {
        pixel_density: 1.0,
        max_vertical_offset: 1200.0,
    };
    let mut machine = GestureMachine::new();

    assert!(machine.pointer_down(Point::new(100.0, 100.0), ScrollOffsets::default()));
    assert_eq!(machine.pointer_move(Point::new(140.0, 100.0), bounds), None);
    assert_eq!(machine.state(), GestureState::PanningHorizontal);

    let update = machine.pointer_move(Point::new(140.0, 200.0), bounds);
    assert_eq!(update, Some(OffsetUpdate::Horizontal(-40.0)));

    let mut grid = grid();
    grid.on_pointer_down(100.0, 100.0);
    grid.on_pointer_move(140.0, 100.0);
    grid.on_pointer_move(140.0, 200.0);
    assert_eq!(grid.vertical_offset(), 0.0);
}

#[test]
fn scenario_d_vertical_drag_clamps() {
    for density in [1.0_f32, 2.0, 3.0] {
        let mut grid = grid();
        grid.set_pixel_density(density);

        let drag = 3000.0 * density;
        grid.on_pointer_down(100.0, 100.0 + drag);
        grid.on_pointer_move(100.0, 100.0);
        assert_eq!(grid.gesture_state(), GestureState::PanningVertical);
        grid.on_pointer_move(100.0, 100.0);
        grid.on_pointer_up(100.0, 100.0);

        assert_eq!(grid.vertical_offset(), 1200.0, "density {density}");
    }
}

#[test]
fn scenario_e_away_from_anchor() {
    let mut grid = grid();

    grid.set_horizontal_offset(0.4 * 500.0);
    assert!(!grid.is_away_from_anchor());

    grid.set_horizontal_offset(0.6 * 500.0);
    assert!(grid.is_away_from_anchor());

    grid.set_horizontal_offset(-0.6 * 500.0);
    assert!(grid.is_away_from_anchor());
}

#[test]
fn returning_to_anchor_restores_first_frame() {
    let mut grid = grid();
    let mut before = RecordingSurface::new();
    grid.on_repaint_requested(&mut before);

    grid.scroll_by_days(9);
    grid.scroll_by_hours(4);
    grid.scroll_to_anchor();
    grid.set_vertical_offset(0.0);

    let mut after = RecordingSurface::new();
    grid.on_repaint_requested(&mut after);
    assert_eq!(before.commands(), after.commands());
}
