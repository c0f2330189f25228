//! Influence sources and their motion models.
//!
//! Each source kind has its own path through the XZ plane. Motion is a
//! function of elapsed time only (the quantized kind also eases from its
//! previous position), so the same time sequence always yields the same
//! trajectory. Motion never reads or writes the grid.

use crate::clock::frame_factor;
use glam::{Vec2, Vec3};
use std::fmt;
use std::str::FromStr;

/// Area of work a source stands for. The page's focus selector hides the
/// sources of every other discipline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Discipline {
    Engineering,
    Research,
    Product,
}

impl Discipline {
    pub const ALL: [Discipline; 3] = [
        Discipline::Engineering,
        Discipline::Research,
        Discipline::Product,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Discipline::Engineering => "engineering",
            Discipline::Research => "research",
            Discipline::Product => "product",
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown discipline '{0}'")]
pub struct UnknownDiscipline(pub String);

impl FromStr for Discipline {
    type Err = UnknownDiscipline;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "engineering" | "eng" => Ok(Discipline::Engineering),
            "research" | "ai" | "ml" => Ok(Discipline::Research),
            "product" | "design" => Ok(Discipline::Product),
            other => Err(UnknownDiscipline(other.to_string())),
        }
    }
}

/// Grid-snapping source: jumps between lattice intersections with eased
/// motion and projects a plus-shaped field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuantizedShape {
    /// Whole lattice steps between neighbouring snap points.
    pub stride: u32,
    pub omega: [f32; 2],
    /// Amplitude in lattice steps.
    pub amplitude: [f32; 2],
    /// Fraction of the remaining distance covered per 60 Hz frame.
    pub ease: f32,
    pub cross_width: f32,
    pub cross_length: f32,
}

/// Wandering Lissajous source with a travelling ripple.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrganicShape {
    pub center: Vec2,
    pub omega: [f32; 4],
    pub amplitude: [f32; 4],
    pub radius: f32,
    /// Spatial frequency of the ripple rings.
    pub wave_number: f32,
}

/// Scanning band that sweeps along X.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepShape {
    pub center: Vec2,
    pub omega: f32,
    pub range: f32,
    pub drift_omega: f32,
    pub drift_amplitude: f32,
    pub band_width: f32,
    pub exponent: f32,
    /// Spatial frequency of the along-band texture (0 disables it).
    pub texture_frequency: f32,
    /// Depth of the texture modulation in `[0, 1]`.
    pub texture_amount: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SourceKind {
    Quantized(QuantizedShape),
    Organic(OrganicShape),
    Sweep(SweepShape),
}

impl SourceKind {
    pub fn name(&self) -> &'static str {
        match self {
            SourceKind::Quantized(_) => "quantized",
            SourceKind::Organic(_) => "organic",
            SourceKind::Sweep(_) => "sweep",
        }
    }

    fn params(&self) -> Vec<f32> {
        match self {
            SourceKind::Quantized(q) => vec![
                q.stride as f32,
                q.omega[0],
                q.omega[1],
                q.amplitude[0],
                q.amplitude[1],
                q.ease,
                q.cross_width,
                q.cross_length,
            ],
            SourceKind::Organic(o) => {
                let mut v = vec![o.center.x, o.center.y, o.radius, o.wave_number];
                v.extend_from_slice(&o.omega);
                v.extend_from_slice(&o.amplitude);
                v
            }
            SourceKind::Sweep(s) => vec![
                s.center.x,
                s.center.y,
                s.omega,
                s.range,
                s.drift_omega,
                s.drift_amplitude,
                s.band_width,
                s.exponent,
                s.texture_frequency,
                s.texture_amount,
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InfluenceSource {
    pub discipline: Discipline,
    pub kind: SourceKind,
    pub color: Vec3,
    /// Height added at full intensity.
    pub height_gain: f32,
    /// `phase = elapsed * phase_rate`; drives the ripple and band texture.
    pub phase_rate: f32,

    pub position: Vec2,
    pub phase: f32,
    /// Set once per frame from the focus selector.
    pub enabled: bool,
}

impl InfluenceSource {
    pub fn new(discipline: Discipline, kind: SourceKind, color: Vec3) -> Self {
        let position = match &kind {
            // Placed on the lattice by the first `settle` or `step`
            SourceKind::Quantized(_) => Vec2::ZERO,
            SourceKind::Organic(o) => organic_position(o, 0.0),
            SourceKind::Sweep(s) => sweep_position(s, 0.0),
        };
        Self {
            discipline,
            kind,
            color,
            height_gain: 1.0,
            phase_rate: 1.0,
            position,
            phase: 0.0,
            enabled: true,
        }
    }

    pub fn with_height_gain(mut self, gain: f32) -> Self {
        self.height_gain = gain;
        self
    }

    pub fn with_phase_rate(mut self, rate: f32) -> Self {
        self.phase_rate = rate;
        self
    }

    /// Move the source to its position at `elapsed` and refresh its phase.
    /// `spacing` is the distance between cell centres of the active lattice.
    pub fn step(&mut self, elapsed: f32, dt: f32, spacing: f32) {
        self.position = advance(self, elapsed, dt, spacing);
        self.phase = elapsed * self.phase_rate;
    }

    /// Jump to the position at `elapsed` without easing.
    pub fn settle(&mut self, elapsed: f32, spacing: f32) {
        self.position = match &self.kind {
            SourceKind::Quantized(q) => quantized_target(q, elapsed, spacing),
            SourceKind::Organic(o) => organic_position(o, elapsed),
            SourceKind::Sweep(s) => sweep_position(s, elapsed),
        };
        self.phase = elapsed * self.phase_rate;
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.color.is_finite()
            && self.height_gain.is_finite()
            && self.phase_rate.is_finite()
            && self.position.is_finite()
            && self.kind.params().iter().all(|p| p.is_finite())
    }
}

/// Position of `source` at `elapsed`, given the previous frame's position.
pub fn advance(source: &InfluenceSource, elapsed: f32, dt: f32, spacing: f32) -> Vec2 {
    match &source.kind {
        SourceKind::Quantized(q) => advance_quantized(q, source.position, elapsed, dt, spacing),
        SourceKind::Organic(o) => organic_position(o, elapsed),
        SourceKind::Sweep(s) => sweep_position(s, elapsed),
    }
}

/// Lattice-aligned point the quantized source is heading for. Both
/// coordinates are whole multiples of `spacing`.
pub fn quantized_target(shape: &QuantizedShape, t: f32, spacing: f32) -> Vec2 {
    let step = shape.stride.max(1) as f32 * spacing;
    Vec2::new(
        ((t * shape.omega[0]).sin() * shape.amplitude[0]).round() * step,
        ((t * shape.omega[1]).cos() * shape.amplitude[1]).round() * step,
    )
}

pub fn advance_quantized(
    shape: &QuantizedShape,
    position: Vec2,
    t: f32,
    dt: f32,
    spacing: f32,
) -> Vec2 {
    let target = quantized_target(shape, t, spacing);
    position + (target - position) * frame_factor(shape.ease, dt)
}

pub fn organic_position(shape: &OrganicShape, t: f32) -> Vec2 {
    let [w1, w2, w3, w4] = shape.omega;
    let [a1, a2, a3, a4] = shape.amplitude;
    shape.center
        + Vec2::new(
            (t * w1).sin() * a1 + (t * w2).cos() * a2,
            (t * w3).cos() * a3 + (t * w4).sin() * a4,
        )
}

pub fn sweep_position(shape: &SweepShape, t: f32) -> Vec2 {
    shape.center
        + Vec2::new(
            (t * shape.omega).sin() * shape.range,
            (t * shape.drift_omega).sin() * shape.drift_amplitude,
        )
}
