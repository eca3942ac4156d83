//! Charging bolt polygon: normalized points, frame-keyed caching, and a
//! scanline fill.
//!
//! The bolt shape ships as a fixed list of integer points in an arbitrary
//! coordinate space. They are normalized to 0..1 once at construction (divide
//! by the max coordinate on each axis) and scaled into the current bolt frame
//! when it changes. Scaling is cached on frame equality: during charging the
//! meter redraws every frame but the frame rectangle almost never moves, so
//! the polygon is rebuilt only on resize or style change.
//!
//! `embedded-graphics` has no concave-polygon primitive, so the fill is a
//! small even-odd scanline rasterizer emitting one horizontal line per
//! crossing pair.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};

/// Bolt outline in its source coordinate space (closed implicitly back to the
/// first point).
const BOLT_POINTS: [(i32, i32); 6] = [(73, 0), (0, 78), (44, 78), (10, 136), (127, 55), (56, 55)];

const BOLT_POINT_COUNT: usize = BOLT_POINTS.len();

/// Normalize the source points to 0..1 on both axes.
fn normalized_points() -> [(f32, f32); BOLT_POINT_COUNT] {
    let mut max_x = 0;
    let mut max_y = 0;
    for &(x, y) in &BOLT_POINTS {
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    let mut norm = [(0.0, 0.0); BOLT_POINT_COUNT];
    for (i, &(x, y)) in BOLT_POINTS.iter().enumerate() {
        norm[i] = (x as f32 / max_x as f32, y as f32 / max_y as f32);
    }
    norm
}

/// Cached, frame-scaled bolt polygon.
#[derive(Debug)]
pub struct BoltPath {
    norm: [(f32, f32); BOLT_POINT_COUNT],
    frame: Rectangle,
    scaled: [(f32, f32); BOLT_POINT_COUNT],
}

impl BoltPath {
    pub fn new() -> Self {
        Self {
            norm: normalized_points(),
            frame: Rectangle::zero(),
            scaled: [(0.0, 0.0); BOLT_POINT_COUNT],
        }
    }

    /// Rescale the polygon if `frame` differs from the cached one. Returns
    /// whether a rebuild happened (the cache's observable behavior, which the
    /// tests pin down).
    pub fn update(&mut self, frame: Rectangle) -> bool {
        if frame == self.frame {
            return false;
        }
        self.frame = frame;
        let left = frame.top_left.x as f32;
        let top = frame.top_left.y as f32;
        let w = frame.size.width as f32;
        let h = frame.size.height as f32;
        for (i, &(nx, ny)) in self.norm.iter().enumerate() {
            self.scaled[i] = (left + nx * w, top + ny * h);
        }
        true
    }

    /// Fill the cached polygon. Call [`BoltPath::update`] first.
    pub fn draw<D>(&self, target: &mut D, color: Rgb565) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        fill_polygon(&self.scaled, target, color)
    }
}

impl Default for BoltPath {
    fn default() -> Self {
        Self::new()
    }
}

/// Even-odd scanline fill of a closed polygon. Each scanline is sampled at
/// its vertical center; crossings are paired left-to-right into spans.
fn fill_polygon<D>(points: &[(f32, f32)], target: &mut D, color: Rgb565) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let style = PrimitiveStyle::with_stroke(color, 1);
    let min_y = points.iter().fold(f32::INFINITY, |m, p| m.min(p.1));
    let max_y = points.iter().fold(f32::NEG_INFINITY, |m, p| m.max(p.1));
    if !min_y.is_finite() || !max_y.is_finite() {
        return Ok(());
    }

    for y in (min_y.floor() as i32)..(max_y.ceil() as i32) {
        let yc = y as f32 + 0.5;
        // One crossing per edge at most; 6 edges.
        let mut crossings: heapless::Vec<f32, BOLT_POINT_COUNT> = heapless::Vec::new();
        for i in 0..points.len() {
            let (x0, y0) = points[i];
            let (x1, y1) = points[(i + 1) % points.len()];
            // Half-open test so a vertex shared by two edges counts once.
            if (y0 <= yc && y1 > yc) || (y1 <= yc && y0 > yc) {
                let t = (yc - y0) / (y1 - y0);
                let _ = crossings.push(x0 + t * (x1 - x0));
            }
        }
        crossings.sort_unstable_by(f32::total_cmp);

        for pair in crossings.chunks_exact(2) {
            let xa = pair[0].round() as i32;
            let xb = (pair[1].round() as i32 - 1).max(xa);
            Line::new(Point::new(xa, y), Point::new(xb, y))
                .into_styled(style)
                .draw(target)?;
        }
    }
    Ok(())
}
