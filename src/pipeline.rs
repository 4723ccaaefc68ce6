//! End-to-end map rendering: lanes, tracing, emission.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::MapConfig;
use crate::drawing::{svg, Drawing, DrawingEmitter, StyleTable};
use crate::error::{LanemapError, Result};
use crate::operations::{CornerComputer, CornerPoint, LaneAssigner, RouteTracer};
use crate::route::RouteSet;
use crate::transform::{CoordinateTransform, GeoPlane};

/// Drawings produced by a [`RenderMap`] run.
#[derive(Debug, Clone)]
pub struct MapOutput {
    /// All styled routes on one canvas.
    pub combined: Drawing,
    /// One drawing per styled route, in route order.
    pub per_route: Vec<(String, Drawing)>,
    /// Routes that could not be traced.
    pub skipped: Vec<String>,
}

impl MapOutput {
    /// Writes `map.svg` and one `<route>.svg` per route into `dir`.
    ///
    /// # Errors
    ///
    /// Returns `LanemapError::Io` if a file cannot be written.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        svg::write(dir.join("map.svg"), &self.combined)?;
        for (name, drawing) in &self.per_route {
            svg::write(dir.join(format!("{name}.svg")), drawing)?;
        }
        Ok(())
    }
}

/// Renders a route set into lane-offset drawings.
///
/// Lanes are assigned over every route of the set, styled or not, in set
/// order. Corners are computed in the geographic plane (routes keep right)
/// and then moved onto the canvas. Only routes with a colour in the style
/// table are drawn.
#[derive(Debug)]
pub struct RenderMap {
    config: MapConfig,
}

impl RenderMap {
    /// Creates a new render operation.
    #[must_use]
    pub fn new(config: MapConfig) -> Self {
        Self { config }
    }

    /// Executes the rendering.
    ///
    /// Routes with fewer than 3 points are skipped with a warning and listed
    /// in [`MapOutput::skipped`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` for an invalid transform or corner
    /// configuration, or when a corner cannot be resolved.
    pub fn execute(&self, routes: &RouteSet, styles: &StyleTable) -> Result<MapOutput> {
        let transform = CoordinateTransform::new(&self.config.transform)?;
        let computer = CornerComputer::new(self.config.corners)?;
        let emitter = DrawingEmitter::new(self.config.emitter);
        let tracer = RouteTracer::new(&computer, &GeoPlane)
            .with_end_points(self.config.end_points.clone())
            .with_debug_lines(self.config.debug_overlay);

        let mut assigner = LaneAssigner::new(self.config.lane_base);
        let lane_routes = assigner.assign_all(routes);

        let (width, height) = transform.canvas_size();
        let frame = self
            .config
            .transform
            .bounding_box
            .corners()
            .map(|corner| transform.transform(corner));
        let mut output = MapOutput {
            combined: Drawing::new(width, height),
            per_route: Vec::new(),
            skipped: Vec::new(),
        };
        emitter.emit_frame(&mut output.combined, frame);

        for (_, route) in &lane_routes {
            let Some(color) = styles.color(&route.name) else {
                debug!(route = %route.name, "no style, not drawn");
                continue;
            };

            let corners = match tracer.trace(route) {
                Ok(corners) => corners,
                Err(LanemapError::Trace(err)) => {
                    warn!(route = %route.name, %err, "skipping route");
                    output.skipped.push(route.name.clone());
                    continue;
                }
                Err(err) => return Err(err),
            };
            let on_canvas: Vec<CornerPoint> = corners
                .iter()
                .map(|c| c.map_coords(|p| transform.transform(GeoPlane.unproject(p))))
                .collect();

            let plain: Vec<CornerPoint> = on_canvas
                .iter()
                .map(|c| CornerPoint {
                    debug_line: None,
                    ..c.clone()
                })
                .collect();
            emitter.emit_route(&mut output.combined, &route.name, color, &plain, &transform);

            let mut single = Drawing::new(width, height);
            emitter.emit_frame(&mut single, frame);
            emitter.emit_route(&mut single, &route.name, color, &on_canvas, &transform);
            output.per_route.push((route.name.clone(), single));
        }

        info!(
            routes = routes.len(),
            drawn = output.per_route.len(),
            skipped = output.skipped.len(),
            segments = assigner.segment_count(),
            "rendered map"
        );
        Ok(output)
    }
}
