//! Ticks command implementation

use crate::cli::TicksArgs;
use crate::output::OutputWriter;
use crate::output_types::TickRow;
use anyhow::Result;
use geojson::{Feature, FeatureCollection};
use sitequote_geo::{build_stall_tick_features, LngLat, StallTickRequest, WebMercatorViewport};

/// Viewport size the ticks are laid out in
const VIEWPORT_WIDTH: f64 = 1024.0;
const VIEWPORT_HEIGHT: f64 = 768.0;

pub fn execute(args: TicksArgs, output: &OutputWriter) -> Result<()> {
    let center = LngLat::new(
        (args.start.lng + args.end.lng) / 2.0,
        (args.start.lat + args.end.lat) / 2.0,
    );
    let viewport = WebMercatorViewport::new(center, args.zoom, VIEWPORT_WIDTH, VIEWPORT_HEIGHT);

    let mut request =
        StallTickRequest::new(args.start, args.end, args.stall_width).with_ends(args.include_ends);
    if let Some(tick_length) = args.tick_length {
        request = request.with_tick_length(tick_length);
    }

    let ticks = build_stall_tick_features(&viewport, &request);
    if ticks.is_empty() {
        output.warning("No ticks: the row is too short on screen or the stall width is invalid");
    }

    if output.is_json() {
        let features: Vec<Feature> = ticks.into_iter().map(Feature::from).collect();
        output.result(FeatureCollection { bbox: None, features, foreign_members: None })?;
        return Ok(());
    }

    let rows = ticks
        .iter()
        .map(|tick| {
            let [from, to] = tick.coordinates;
            TickRow {
                index: tick.index,
                from: format!("{:.7}, {:.7}", from.lng, from.lat),
                to: format!("{:.7}, {:.7}", to.lng, to.lat),
            }
        })
        .collect();

    output.section(format!("Stall ticks at zoom {}", args.zoom));
    output.table(rows);
    output.kv("Ticks", ticks.len());

    Ok(())
}
