//! Scene profiles: everything that differs between the home, orbit and
//! console backgrounds. One engine, three sets of constants.

use crate::camera::CameraParams;
use crate::constants::*;
use crate::dots::DotFieldParams;
use crate::error::ProfileError;
use crate::field::{FieldParams, IdleField, PointerField};
use crate::source::{
    Discipline, InfluenceSource, OrganicShape, QuantizedShape, SourceKind, SweepShape,
};
use crate::tier::TierTable;
use glam::{Vec2, Vec3};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

pub type SourceList = SmallVec<[InfluenceSource; 4]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SceneKind {
    #[default]
    Home,
    Orbit,
    Console,
}

impl SceneKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SceneKind::Home => "home",
            SceneKind::Orbit => "orbit",
            SceneKind::Console => "console",
        }
    }

    pub fn profile(self) -> SceneProfile {
        match self {
            SceneKind::Home => SceneProfile::home(),
            SceneKind::Orbit => SceneProfile::orbit(),
            SceneKind::Console => SceneProfile::console(),
        }
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown scene '{0}'")]
pub struct UnknownScene(pub String);

impl FromStr for SceneKind {
    type Err = UnknownScene;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" | "" => Ok(SceneKind::Home),
            "orbit" => Ok(SceneKind::Orbit),
            "console" | "terminal" => Ok(SceneKind::Console),
            other => Err(UnknownScene(other.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SceneProfile {
    pub name: String,
    pub tiers: TierTable,
    pub sources: SourceList,
    pub field: FieldParams,
    pub camera: CameraParams,
    pub dots: Option<DotFieldParams>,
    pub dot_seed: u64,
}

impl SceneProfile {
    pub fn builder(name: impl Into<String>) -> SceneProfileBuilder {
        SceneProfileBuilder {
            profile: SceneProfile {
                name: name.into(),
                tiers: TierTable::standard(),
                sources: SourceList::new(),
                field: default_field(Vec3::new(0.02, 0.025, 0.04), Vec3::splat(0.55)),
                camera: CameraParams::default(),
                dots: None,
                dot_seed: DOT_SEED,
            },
        }
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        let tiers = &self.tiers.tiers;
        if tiers.is_empty() {
            return Err(ProfileError::EmptyTierTable);
        }
        let mut prev: Option<f32> = None;
        let mut prev_size = 0;
        for (index, tier) in tiers.iter().enumerate() {
            if !tier.config.is_valid() {
                return Err(ProfileError::DegenerateTier { index });
            }
            if !(tier.config.gap >= 0.0 && tier.config.gap.is_finite()) {
                return Err(ProfileError::InvalidGap { index });
            }
            if tier.config.grid_size < prev_size {
                return Err(ProfileError::ShrinkingGrid {
                    index,
                    grid_size: tier.config.grid_size,
                    previous: prev_size,
                });
            }
            prev_size = tier.config.grid_size;
            let is_last = index + 1 == tiers.len();
            match tier.max_width {
                None if !is_last => return Err(ProfileError::UnorderedThresholds { index }),
                None => {}
                Some(max) => {
                    if !max.is_finite() || prev.is_some_and(|p| max <= p) {
                        return Err(ProfileError::UnorderedThresholds { index });
                    }
                    prev = Some(max);
                }
            }
        }
        if self.tiers.default_index >= tiers.len() {
            return Err(ProfileError::DefaultTierOutOfRange {
                index: self.tiers.default_index,
                len: tiers.len(),
            });
        }
        if let Some(index) = self.sources.iter().position(|s| !s.is_finite()) {
            return Err(ProfileError::NonFiniteSource { index });
        }
        let lerp = self.camera.lerp;
        if !(lerp > 0.0 && lerp <= 1.0) {
            return Err(ProfileError::CameraLerp(lerp));
        }
        Ok(())
    }

    /// Landing page: cool palette, quick quantized jumps.
    pub fn home() -> Self {
        SceneProfile {
            name: "home".into(),
            tiers: TierTable::standard(),
            sources: SourceList::from_iter([
                InfluenceSource::new(
                    Discipline::Engineering,
                    SourceKind::Quantized(QuantizedShape {
                        stride: 3,
                        omega: [0.35, 0.27],
                        amplitude: [4.0, 3.0],
                        ease: 0.1,
                        cross_width: 0.3,
                        cross_length: 3.5,
                    }),
                    Vec3::new(0.2, 0.75, 1.0),
                )
                .with_height_gain(1.6),
                InfluenceSource::new(
                    Discipline::Research,
                    SourceKind::Organic(OrganicShape {
                        center: Vec2::ZERO,
                        omega: [0.21, 0.37, 0.173, 0.291],
                        amplitude: [5.0, 2.5, 4.0, 2.0],
                        radius: 5.0,
                        wave_number: 2.2,
                    }),
                    Vec3::new(0.65, 0.35, 1.0),
                )
                .with_height_gain(1.2)
                .with_phase_rate(3.0),
                InfluenceSource::new(
                    Discipline::Product,
                    SourceKind::Sweep(SweepShape {
                        center: Vec2::ZERO,
                        omega: 0.18,
                        range: 9.0,
                        drift_omega: 0.07,
                        drift_amplitude: 2.0,
                        band_width: 1.4,
                        exponent: 1.8,
                        texture_frequency: 0.6,
                        texture_amount: 0.35,
                    }),
                    Vec3::new(1.0, 0.65, 0.2),
                )
                .with_phase_rate(0.5),
            ]),
            field: default_field(Vec3::new(0.02, 0.025, 0.04), Vec3::new(0.5, 0.55, 0.6)),
            camera: CameraParams::default(),
            dots: Some(DotFieldParams::default()),
            dot_seed: DOT_SEED,
        }
    }

    /// Orbit page: wider camera, slower drift, sharper scan band.
    pub fn orbit() -> Self {
        SceneProfile {
            name: "orbit".into(),
            tiers: TierTable::standard(),
            sources: SourceList::from_iter([
                InfluenceSource::new(
                    Discipline::Engineering,
                    SourceKind::Quantized(QuantizedShape {
                        stride: 2,
                        omega: [0.22, 0.19],
                        amplitude: [5.0, 4.0],
                        ease: 0.08,
                        cross_width: 0.35,
                        cross_length: 4.0,
                    }),
                    Vec3::new(0.3, 0.9, 0.8),
                )
                .with_height_gain(1.4),
                InfluenceSource::new(
                    Discipline::Research,
                    SourceKind::Organic(OrganicShape {
                        center: Vec2::new(1.0, -1.0),
                        omega: [0.15, 0.29, 0.131, 0.237],
                        amplitude: [6.0, 2.0, 5.0, 1.5],
                        radius: 6.0,
                        wave_number: 1.8,
                    }),
                    Vec3::new(0.5, 0.4, 1.0),
                )
                .with_height_gain(1.0)
                .with_phase_rate(2.4),
                InfluenceSource::new(
                    Discipline::Product,
                    SourceKind::Sweep(SweepShape {
                        center: Vec2::new(0.0, 1.5),
                        omega: 0.12,
                        range: 11.0,
                        drift_omega: 0.05,
                        drift_amplitude: 3.0,
                        band_width: 1.1,
                        exponent: 2.0,
                        texture_frequency: 0.45,
                        texture_amount: 0.25,
                    }),
                    Vec3::new(1.0, 0.5, 0.35),
                )
                .with_phase_rate(0.4),
            ]),
            field: default_field(Vec3::new(0.015, 0.02, 0.035), Vec3::new(0.45, 0.6, 0.7)),
            camera: CameraParams {
                base_position: Vec3::new(0.0, 18.0, 20.0),
                parallax: Vec3::new(3.0, 1.5, 1.5),
                lerp: 0.02,
                ..CameraParams::default()
            },
            dots: Some(DotFieldParams {
                count: 900,
                outer_radius: 90.0,
                ..DotFieldParams::default()
            }),
            dot_seed: DOT_SEED ^ 0x0_4B17,
        }
    }

    /// Terminal page: phosphor palette, no dots, tighter camera.
    pub fn console() -> Self {
        SceneProfile {
            name: "console".into(),
            tiers: TierTable::standard(),
            sources: SourceList::from_iter([
                InfluenceSource::new(
                    Discipline::Engineering,
                    SourceKind::Quantized(QuantizedShape {
                        stride: 2,
                        omega: [0.45, 0.33],
                        amplitude: [5.0, 4.0],
                        ease: 0.15,
                        cross_width: 0.25,
                        cross_length: 3.0,
                    }),
                    Vec3::new(0.2, 1.0, 0.45),
                )
                .with_height_gain(1.3),
                InfluenceSource::new(
                    Discipline::Research,
                    SourceKind::Organic(OrganicShape {
                        center: Vec2::ZERO,
                        omega: [0.27, 0.41, 0.19, 0.33],
                        amplitude: [4.0, 2.0, 3.5, 1.5],
                        radius: 4.0,
                        wave_number: 2.8,
                    }),
                    Vec3::new(0.1, 0.8, 0.6),
                )
                .with_height_gain(1.0)
                .with_phase_rate(3.5),
                InfluenceSource::new(
                    Discipline::Product,
                    SourceKind::Sweep(SweepShape {
                        center: Vec2::ZERO,
                        omega: 0.25,
                        range: 8.0,
                        drift_omega: 0.0,
                        drift_amplitude: 0.0,
                        band_width: 1.0,
                        exponent: 1.5,
                        texture_frequency: 0.0,
                        texture_amount: 0.0,
                    }),
                    Vec3::new(0.75, 1.0, 0.3),
                )
                .with_height_gain(0.8),
            ]),
            field: default_field(Vec3::new(0.01, 0.03, 0.015), Vec3::new(0.4, 0.9, 0.5)),
            camera: CameraParams {
                base_position: Vec3::new(0.0, 11.0, 13.0),
                parallax: Vec3::new(1.5, 0.8, 0.8),
                lerp: 0.03,
                ..CameraParams::default()
            },
            dots: None,
            dot_seed: DOT_SEED,
        }
    }
}

fn default_field(base_color: Vec3, pointer_color: Vec3) -> FieldParams {
    FieldParams {
        base_color,
        base_height: BASE_CELL_HEIGHT,
        pointer: PointerField {
            radius: POINTER_RADIUS,
            color: pointer_color,
            height_gain: POINTER_HEIGHT_GAIN,
        },
        idle: IdleField {
            amplitude: IDLE_AMPLITUDE,
            speed: IDLE_SPEED,
            index_spread: IDLE_INDEX_SPREAD,
        },
    }
}

pub struct SceneProfileBuilder {
    profile: SceneProfile,
}

impl SceneProfileBuilder {
    pub fn tiers(mut self, tiers: TierTable) -> Self {
        self.profile.tiers = tiers;
        self
    }

    pub fn source(mut self, source: InfluenceSource) -> Self {
        self.profile.sources.push(source);
        self
    }

    pub fn base_color(mut self, color: Vec3) -> Self {
        self.profile.field.base_color = color;
        self
    }

    pub fn base_height(mut self, height: f32) -> Self {
        self.profile.field.base_height = height;
        self
    }

    pub fn pointer(mut self, pointer: PointerField) -> Self {
        self.profile.field.pointer = pointer;
        self
    }

    pub fn idle(mut self, idle: IdleField) -> Self {
        self.profile.field.idle = idle;
        self
    }

    pub fn camera(mut self, camera: CameraParams) -> Self {
        self.profile.camera = camera;
        self
    }

    pub fn dots(mut self, dots: Option<DotFieldParams>, seed: u64) -> Self {
        self.profile.dots = dots;
        self.profile.dot_seed = seed;
        self
    }

    pub fn build(self) -> Result<SceneProfile, ProfileError> {
        self.profile.validate()?;
        log::debug!(
            "[profile] '{}' with {} sources, {} tiers",
            self.profile.name,
            self.profile.sources.len(),
            self.profile.tiers.tiers.len()
        );
        Ok(self.profile)
    }
}
