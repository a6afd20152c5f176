//! Drifting particle backdrop.
//!
//! Positions live in virtual pixels so the density matches what a browser
//! canvas would show: one particle per `area_per_particle` square pixels.
//! Terminal cells are converted with the configured cell size and drawn as
//! braille dots.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Painter, Shape},
        Widget,
    },
};
use tracing::debug;

use crate::config::ParticleConfig;

/// Upper bound on the set size, whatever the viewport and density say.
const MAX_PARTICLES: usize = 20_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub opacity: f64,
}

pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    area_per_particle: f64,
    max_speed: f64,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(config: &ParticleConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_rng(config: &ParticleConfig, rng: StdRng) -> Self {
        Self {
            particles: Vec::new(),
            width: 0.0,
            height: 0.0,
            area_per_particle: config.area_per_particle.max(1.0),
            max_speed: non_negative(config.max_speed),
            rng,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Throw away the current set and scatter a fresh one over `width x height`.
    pub fn initialize(&mut self, width: f64, height: f64) {
        self.width = non_negative(width);
        self.height = non_negative(height);

        let count = (self.width * self.height / self.area_per_particle)
            .floor()
            .min(MAX_PARTICLES as f64) as usize;
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            let particle = Particle {
                x: wrap(self.rng.gen::<f64>() * self.width, self.width),
                y: wrap(self.rng.gen::<f64>() * self.height, self.height),
                vx: (self.rng.gen::<f64>() - 0.5) * self.max_speed,
                vy: (self.rng.gen::<f64>() - 0.5) * self.max_speed,
                radius: self.rng.gen::<f64>() * 2.0 + 1.0,
                opacity: self.rng.gen::<f64>() * 0.5 + 0.2,
            };
            self.particles.push(particle);
        }
        debug!(count, width, height, "particle field initialized");
    }

    /// Viewport changed. The set is regenerated, not rescaled.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.initialize(width, height);
    }

    /// Move every particle by its velocity, teleporting across edges.
    pub fn advance(&mut self) {
        let (width, height) = (self.width, self.height);
        for p in &mut self.particles {
            p.x = wrap(p.x + p.vx, width);
            p.y = wrap(p.y + p.vy, height);
        }
    }
}

/// Bring `value` back into `[0, bound)`.
fn wrap(value: f64, bound: f64) -> f64 {
    if !value.is_finite() || bound.is_nan() || bound <= 0.0 {
        return 0.0;
    }
    let wrapped = value.rem_euclid(bound);
    // rem_euclid can round up to `bound` for tiny negative inputs
    if wrapped >= bound {
        0.0
    } else {
        wrapped
    }
}

/// Finite and at least zero, or zero. Config values reach here unchecked.
fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

// ============================================================================
// RENDERING
// ============================================================================

/// Mix `fg` over `bg` at `alpha`. Only RGB colors can be blended; anything
/// else is returned unchanged.
pub fn blend(fg: Color, bg: Color, alpha: f64) -> Color {
    match (fg, bg) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let alpha = alpha.clamp(0.0, 1.0);
            let mix =
                |f: u8, b: u8| (f64::from(f) * alpha + f64::from(b) * (1.0 - alpha)).round() as u8;
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ => fg,
    }
}

struct Disc {
    x: f64,
    y: f64,
    radius_dots: (f64, f64),
    resolution: (usize, usize),
    color: Color,
}

impl Shape for Disc {
    fn draw(&self, painter: &mut Painter) {
        let Some((cx, cy)) = painter.get_point(self.x, self.y) else {
            return;
        };
        let (rx, ry) = self.radius_dots;
        let reach_x = rx.floor() as isize;
        let reach_y = ry.floor() as isize;
        for dy in -reach_y..=reach_y {
            for dx in -reach_x..=reach_x {
                let nx = if rx > 0.0 { dx as f64 / rx } else { 0.0 };
                let ny = if ry > 0.0 { dy as f64 / ry } else { 0.0 };
                if nx * nx + ny * ny > 1.0 {
                    continue;
                }
                let px = cx as isize + dx;
                let py = cy as isize + dy;
                if px < 0 || py < 0 {
                    continue;
                }
                let (px, py) = (px as usize, py as usize);
                if px < self.resolution.0 && py < self.resolution.1 {
                    painter.paint(px, py, self.color);
                }
            }
        }
    }
}

/// Draws a [`ParticleField`] stretched over a terminal area.
pub struct ParticleLayer<'a> {
    pub field: &'a ParticleField,
    pub color: Color,
    pub background: Color,
}

impl ParticleLayer<'_> {
    /// Draw onto `buf` only where the cell is still empty, so page text
    /// always stays on top of the backdrop.
    pub fn render_behind(&self, area: Rect, buf: &mut Buffer) {
        let mut surface = Buffer::empty(area);
        self.render_surface(area, &mut surface);

        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let Some(dot) = surface.cell((x, y)) else {
                    continue;
                };
                if is_blank(dot.symbol()) {
                    continue;
                }
                let (symbol, fg) = (dot.symbol().to_string(), dot.fg);
                if let Some(cell) = buf.cell_mut((x, y)) {
                    if cell.symbol() == " " {
                        cell.set_symbol(&symbol);
                        cell.set_fg(fg);
                    }
                }
            }
        }
    }

    fn render_surface(&self, area: Rect, buf: &mut Buffer) {
        let (width, height) = self.field.size();
        let resolution = (usize::from(area.width) * 2, usize::from(area.height) * 4);
        let dot_w = if resolution.0 > 0 { width / resolution.0 as f64 } else { 0.0 };
        let dot_h = if resolution.1 > 0 { height / resolution.1 as f64 } else { 0.0 };

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                for p in self.field.particles() {
                    ctx.draw(&Disc {
                        x: p.x,
                        // canvas y grows upwards
                        y: height - p.y,
                        radius_dots: (
                            if dot_w > 0.0 { p.radius / dot_w } else { 0.0 },
                            if dot_h > 0.0 { p.radius / dot_h } else { 0.0 },
                        ),
                        resolution,
                        color: blend(self.color, self.background, p.opacity),
                    });
                }
            })
            .render(area, buf);
    }
}

impl Widget for &ParticleLayer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.reset();
                }
            }
        }
        self.render_surface(area, buf);
    }
}

fn is_blank(symbol: &str) -> bool {
    symbol == " " || symbol == "\u{2800}"
}
