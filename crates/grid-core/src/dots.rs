//! Static dot field drawn behind the grid.
//!
//! Seeded once when the engine is built; nothing here runs per frame.

use crate::writer::{InstanceColor, InstanceTransform};
use glam::{Mat4, Quat, Vec3};
use rand::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotFieldParams {
    pub count: usize,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub size: [f32; 2],
    pub color: Vec3,
    /// Dots below this height are dropped so they stay behind the grid.
    pub min_y: f32,
}

impl Default for DotFieldParams {
    fn default() -> Self {
        Self {
            count: 600,
            inner_radius: 30.0,
            outer_radius: 70.0,
            size: [0.04, 0.12],
            color: Vec3::new(0.55, 0.6, 0.7),
            min_y: -5.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    pub position: Vec3,
    pub size: f32,
    pub brightness: f32,
}

#[derive(Clone, Debug, Default)]
pub struct DotField {
    dots: Vec<Dot>,
    color: Vec3,
}

impl DotField {
    pub fn generate(params: &DotFieldParams, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let (r0, r1) = (
            params.inner_radius.min(params.outer_radius),
            params.inner_radius.max(params.outer_radius),
        );
        let (s0, s1) = (
            params.size[0].min(params.size[1]),
            params.size[0].max(params.size[1]),
        );
        let mut dots = Vec::with_capacity(params.count);
        // Rejection keeps the count exact; give up after a bounded number of tries.
        let mut attempts = params.count * 8;
        while dots.len() < params.count && attempts > 0 {
            attempts -= 1;
            let dir = Vec3::new(
                rng.gen_range(-1.0..=1.0),
                rng.gen_range(-1.0..=1.0),
                rng.gen_range(-1.0..=1.0),
            );
            let len = dir.length();
            if !(len > 1e-3 && len <= 1.0) {
                continue;
            }
            let radius = r0 + (r1 - r0) * rng.gen::<f32>();
            let position = dir / len * radius;
            if position.y < params.min_y {
                continue;
            }
            dots.push(Dot {
                position,
                size: s0 + (s1 - s0) * rng.gen::<f32>(),
                brightness: 0.35 + 0.65 * rng.gen::<f32>(),
            });
        }
        Self {
            dots,
            color: params.color,
        }
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn len(&self) -> usize {
        self.dots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
    }

    /// Instance data for a one-off upload alongside the grid buffers.
    pub fn instances(&self) -> (Vec<InstanceTransform>, Vec<InstanceColor>) {
        self.dots
            .iter()
            .map(|d| {
                let model = Mat4::from_scale_rotation_translation(
                    Vec3::splat(d.size),
                    Quat::IDENTITY,
                    d.position,
                );
                (
                    InstanceTransform {
                        model: model.to_cols_array_2d(),
                    },
                    InstanceColor {
                        rgb: (self.color * d.brightness)
                            .clamp(Vec3::ZERO, Vec3::ONE)
                            .to_array(),
                    },
                )
            })
            .unzip()
    }
}
