//! Per-cell influence field.
//!
//! Every enabled source adds a kind-specific falloff to the cell's height and
//! color; the pointer and the idle breathing term are added on top.
//! Contributions are summed, never max/min composited. Every falloff returns
//! exactly zero on and beyond its boundary and for non-positive sizes.

use crate::lattice::GridCell;
use crate::pointer::PointerState;
use crate::source::{InfluenceSource, SourceKind};
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerField {
    pub radius: f32,
    pub color: Vec3,
    pub height_gain: f32,
}

/// Height-only breathing so the grid is never perfectly still.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IdleField {
    pub amplitude: f32,
    pub speed: f32,
    pub index_spread: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldParams {
    /// Floor color of an untouched cell.
    pub base_color: Vec3,
    pub base_height: f32,
    pub pointer: PointerField,
    pub idle: IdleField,
}

/// Unclamped result of the field pass for one cell.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CellSample {
    pub height: f32,
    pub color: Vec3,
}

/// Plus-shaped falloff around a quantized source.
pub fn cross_falloff(dx: f32, dz: f32, width: f32, length: f32) -> f32 {
    if !(width > 0.0 && length > 0.0) {
        return 0.0;
    }
    let (ax, az) = (dx.abs(), dz.abs());
    let inside = (ax < width && az < length) || (az < width && ax < length);
    if !inside {
        return 0.0;
    }
    let intensity = (1.0 - ax.min(az) / width).max(0.0);
    let tip = (1.0 - ax.max(az) / length).max(0.0);
    intensity * tip
}

/// Linear radial falloff, `1 - d / radius` inside the radius.
pub fn radial_falloff(distance: f32, radius: f32) -> f32 {
    if !(radius > 0.0) || !(distance < radius) {
        return 0.0;
    }
    1.0 - distance / radius
}

/// Travelling ring pattern in `[0, 1]`.
#[inline]
pub fn ripple_wave(distance: f32, wave_number: f32, phase: f32) -> f32 {
    (distance * wave_number - phase).sin() * 0.5 + 0.5
}

/// Sharp-edged scan band, `(1 - dx / width)^exponent`.
pub fn band_falloff(dx: f32, width: f32, exponent: f32) -> f32 {
    let dx = dx.abs();
    if !(width > 0.0) || !(dx < width) {
        return 0.0;
    }
    let exponent = if exponent > 0.0 { exponent } else { 1.0 };
    (1.0 - dx / width).powf(exponent)
}

/// Slow sine gradient along the band; 1.0 when `amount` is zero.
#[inline]
pub fn band_texture(z: f32, frequency: f32, amount: f32, phase: f32) -> f32 {
    let amount = amount.clamp(0.0, 1.0);
    1.0 - amount + amount * ((z * frequency + phase).sin() * 0.5 + 0.5)
}

#[inline]
pub fn idle_offset(idle: &IdleField, elapsed: f32, index: u32) -> f32 {
    (elapsed * idle.speed + index as f32 * idle.index_spread).sin() * idle.amplitude
}

/// Strength of one source at `(x, z)`, before color and height gain.
pub fn source_intensity(source: &InfluenceSource, x: f32, z: f32) -> f32 {
    let dx = x - source.position.x;
    let dz = z - source.position.y;
    match &source.kind {
        SourceKind::Quantized(q) => cross_falloff(dx, dz, q.cross_width, q.cross_length),
        SourceKind::Organic(o) => {
            let d = (dx * dx + dz * dz).sqrt();
            let intensity = radial_falloff(d, o.radius);
            if intensity == 0.0 {
                return 0.0;
            }
            intensity * ripple_wave(d, o.wave_number, source.phase)
        }
        SourceKind::Sweep(s) => {
            let intensity = band_falloff(dx, s.band_width, s.exponent);
            if intensity == 0.0 || s.texture_frequency == 0.0 {
                return intensity;
            }
            intensity * band_texture(z, s.texture_frequency, s.texture_amount, source.phase)
        }
    }
}

/// Sum every enabled source, the pointer and the idle term for one cell.
pub fn accumulate(
    cell: &GridCell,
    sources: &[InfluenceSource],
    pointer: Option<&PointerState>,
    elapsed: f32,
    params: &FieldParams,
) -> CellSample {
    let mut height = params.base_height + idle_offset(&params.idle, elapsed, cell.index);
    let mut color = params.base_color;

    for source in sources.iter().filter(|s| s.enabled) {
        let intensity = source_intensity(source, cell.x, cell.z);
        if intensity > 0.0 {
            height += intensity * source.height_gain;
            color += source.color * intensity;
        }
    }

    if let Some(pointer) = pointer {
        let pdx = cell.x - pointer.world_x;
        let pdz = cell.z - pointer.world_z;
        let intensity = radial_falloff((pdx * pdx + pdz * pdz).sqrt(), params.pointer.radius);
        if intensity > 0.0 {
            height += intensity * params.pointer.height_gain;
            color += params.pointer.color * intensity;
        }
    }

    CellSample { height, color }
}
