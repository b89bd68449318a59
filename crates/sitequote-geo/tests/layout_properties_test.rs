//! Property tests for stall tick and striping layout geometry

use proptest::prelude::*;
use sitequote_geo::viewport::EARTH_CIRCUMFERENCE_M;
use sitequote_geo::{
    build_stall_tick_features, striping_layout, LngLat, MapProjector, StallTickRequest,
    WebMercatorViewport,
};

fn east_west_row(lat: f64, feet: f64) -> (LngLat, LngLat) {
    let delta_lng = feet * 0.3048 * 360.0 / (EARTH_CIRCUMFERENCE_M * lat.to_radians().cos());
    (LngLat::new(-80.0, lat), LngLat::new(-80.0 + delta_lng, lat))
}

proptest! {
    #[test]
    fn prop_interior_tick_count_matches_striping(
        lat in -60.0f64..60.0,
        row_ft in 40.0f64..400.0,
        stall_ft in 7.5f64..12.0,
    ) {
        let (start, end) = east_west_row(lat, row_ft);
        let view = WebMercatorViewport::new(start, 20.0, 1920.0, 1080.0);
        let ticks = build_stall_tick_features(&view, &StallTickRequest::new(start, end, stall_ft));
        let layout = striping_layout(row_ft, stall_ft, 18.0, false);

        // Exact multiples can land on either side of the floor after projection
        let ratio = row_ft / stall_ft;
        prop_assume!((ratio - ratio.round()).abs() > 1e-6);

        prop_assert_eq!(ticks.len(), layout.line_count);
    }

    #[test]
    fn prop_include_ends_adds_two_ticks(
        lat in -60.0f64..60.0,
        row_ft in 40.0f64..400.0,
        stall_ft in 7.5f64..12.0,
    ) {
        let (start, end) = east_west_row(lat, row_ft);
        let view = WebMercatorViewport::new(start, 20.0, 1920.0, 1080.0);
        let interior = build_stall_tick_features(&view, &StallTickRequest::new(start, end, stall_ft));
        let with_ends = build_stall_tick_features(
            &view,
            &StallTickRequest::new(start, end, stall_ft).with_ends(true),
        );

        prop_assert_eq!(with_ends.len(), interior.len() + 2);
    }

    #[test]
    fn prop_ticks_stay_on_the_row(
        lat in -60.0f64..60.0,
        row_ft in 40.0f64..400.0,
    ) {
        let (start, end) = east_west_row(lat, row_ft);
        let view = WebMercatorViewport::new(start, 20.0, 1920.0, 1080.0);
        let ticks = build_stall_tick_features(&view, &StallTickRequest::new(start, end, 9.0).with_ends(true));

        let a = view.project(start);
        let b = view.project(end);
        for tick in ticks {
            let [from, to] = tick.coordinates;
            let from = view.project(from);
            let to = view.project(to);
            let mid_x = (from.x + to.x) / 2.0;
            let mid_y = (from.y + to.y) / 2.0;
            prop_assert!(mid_x >= a.x - 1e-6 && mid_x <= b.x + 1e-6);
            prop_assert!((mid_y - a.y).abs() < 1e-6);
        }
    }
}

#[test]
fn test_zero_stall_width_never_ticks() {
    let (start, end) = east_west_row(30.0, 100.0);
    let view = WebMercatorViewport::new(start, 20.0, 1920.0, 1080.0);
    assert!(build_stall_tick_features(&view, &StallTickRequest::new(start, end, 0.0)).is_empty());
}
