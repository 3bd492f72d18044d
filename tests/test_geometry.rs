use fight_kokaton::geometry::*;

use proptest::prelude::*;

fn field() -> Rect {
    Rect::field(1600, 900)
}

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn rect_from_center_edges() {
    let r = Rect::from_center(900, 400, 100, 100);
    assert_eq!(r.left(), 850);
    assert_eq!(r.right(), 950);
    assert_eq!(r.top(), 350);
    assert_eq!(r.bottom(), 450);
    assert_eq!(r.center(), (900, 400));
}

#[test]
fn rect_odd_size_center_round_trips() {
    let r = Rect::from_center(10, 10, 7, 5);
    assert_eq!(r.center(), (10, 10));
    assert_eq!(r.topleft(), (7, 8));
}

#[test]
fn rect_translated_keeps_size() {
    let r = Rect::new(10, 20, 30, 40).translated(-1, 1);
    assert_eq!(r, Rect::new(9, 21, 30, 40));
}

#[test]
fn intersects_overlapping_boxes() {
    let a = Rect::new(0, 0, 10, 10);
    let b = Rect::new(9, 9, 10, 10);
    assert!(a.intersects(&b));
    assert!(b.intersects(&a));
}

#[test]
fn touching_edges_do_not_intersect() {
    let a = Rect::new(0, 0, 10, 10);
    assert!(!a.intersects(&Rect::new(10, 0, 10, 10)));
    assert!(!a.intersects(&Rect::new(0, 10, 10, 10)));
}

#[test]
fn empty_box_intersects_nothing() {
    let a = Rect::new(0, 0, 10, 10);
    assert!(!a.intersects(&Rect::new(5, 5, 0, 3)));
}

#[test]
fn contained_box_intersects() {
    let outer = Rect::new(0, 0, 100, 100);
    let inner = Rect::new(40, 40, 5, 5);
    assert!(outer.intersects(&inner));
    assert!(inner.intersects(&outer));
}

// ── check_bound ───────────────────────────────────────────────────────────────

#[test]
fn box_flush_with_edges_is_inside() {
    assert_eq!(check_bound(&field(), &Rect::new(0, 0, 1600, 900)), (true, true));
    assert_eq!(check_bound(&field(), &Rect::new(1500, 800, 100, 100)), (true, true));
}

#[test]
fn box_past_left_edge_fails_horizontal_only() {
    assert_eq!(check_bound(&field(), &Rect::new(-1, 100, 50, 50)), (false, true));
}

#[test]
fn box_past_right_edge_fails_horizontal_only() {
    assert_eq!(check_bound(&field(), &Rect::new(1551, 100, 50, 50)), (false, true));
}

#[test]
fn box_past_top_edge_fails_vertical_only() {
    assert_eq!(check_bound(&field(), &Rect::new(100, -1, 50, 50)), (true, false));
}

#[test]
fn box_past_corner_fails_both() {
    assert_eq!(check_bound(&field(), &Rect::new(1590, 890, 20, 20)), (false, false));
    assert!(!fully_inside(&field(), &Rect::new(1590, 890, 20, 20)));
}

proptest! {
    #[test]
    fn boxes_inside_field_pass_both_axes(
        x in 0..1500i32, y in 0..800i32, w in 1..100i32, h in 1..100i32
    ) {
        prop_assert_eq!(check_bound(&field(), &Rect::new(x, y, w, h)), (true, true));
    }

    #[test]
    fn boxes_straddling_left_edge_fail_horizontal(
        x in -99..0i32, y in 0..800i32, w in 100..200i32, h in 1..100i32
    ) {
        prop_assert_eq!(check_bound(&field(), &Rect::new(x, y, w, h)), (false, true));
    }

    #[test]
    fn boxes_straddling_bottom_edge_fail_vertical(
        x in 0..1500i32, y in 801..900i32, w in 1..100i32, h in 100..200i32
    ) {
        prop_assert_eq!(check_bound(&field(), &Rect::new(x, y, w, h)), (true, false));
    }
}

// ── Heading ───────────────────────────────────────────────────────────────────

#[test]
fn heading_vector_round_trips() {
    for heading in Heading::ALL {
        let (dx, dy) = heading.vector();
        assert_eq!(Heading::from_vector(dx, dy), Some(heading));
    }
}

#[test]
fn heading_index_matches_table_order() {
    for (i, heading) in Heading::ALL.into_iter().enumerate() {
        assert_eq!(heading.index(), i);
    }
}

#[test]
fn zero_and_oversized_vectors_have_no_heading() {
    assert_eq!(Heading::from_vector(0, 0), None);
    assert_eq!(Heading::from_vector(2, 0), None);
}

#[test]
fn heading_angles_use_screen_up() {
    assert_eq!(Heading::Right.angle_degrees(), 0.0);
    assert_eq!(Heading::Up.angle_degrees(), 90.0);
    assert_eq!(Heading::Left.angle_degrees(), 180.0);
    assert_eq!(Heading::Down.angle_degrees(), -90.0);
}

#[test]
fn heading_angles_agree_with_atan2() {
    for heading in Heading::ALL {
        let (dx, dy) = heading.vector();
        // negate as an integer: -0.0 would send Left to -180°
        let expected = ((-dy) as f32).atan2(dx as f32).to_degrees();
        assert!((heading.angle_degrees() - expected).abs() < 1e-3, "{:?}", heading);
    }
}

#[test]
fn left_is_positive_half_turn() {
    assert_eq!(Heading::Left.angle_degrees(), 180.0);
    let from_vector = ((-0i32) as f32).atan2(-1.0).to_degrees();
    assert!((from_vector - 180.0).abs() < 1e-3, "{}", from_vector);
}

#[test]
fn heading_anchor_picks_edges_and_corners() {
    let r = Rect::new(100, 200, 40, 20);
    assert_eq!(Heading::Right.anchor(&r), (140, 210));
    assert_eq!(Heading::UpRight.anchor(&r), (140, 200));
    assert_eq!(Heading::Up.anchor(&r), (120, 200));
    assert_eq!(Heading::UpLeft.anchor(&r), (100, 200));
    assert_eq!(Heading::Left.anchor(&r), (100, 210));
    assert_eq!(Heading::DownLeft.anchor(&r), (100, 220));
    assert_eq!(Heading::Down.anchor(&r), (120, 220));
    assert_eq!(Heading::DownRight.anchor(&r), (140, 220));
}
