use thiserror::Error;

/// Rejected scene configuration. Raised by [`crate::SceneProfileBuilder::build`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("tier table is empty")]
    EmptyTierTable,
    #[error("tier {index} has a non-positive grid size or cell size")]
    DegenerateTier { index: usize },
    #[error("tier {index} has a negative or non-finite gap")]
    InvalidGap { index: usize },
    #[error("tier {index} grid size {grid_size} is smaller than the previous tier's {previous}")]
    ShrinkingGrid {
        index: usize,
        grid_size: u32,
        previous: u32,
    },
    #[error("tier thresholds must be strictly ascending (tier {index})")]
    UnorderedThresholds { index: usize },
    #[error("default tier {index} is out of range for {len} tiers")]
    DefaultTierOutOfRange { index: usize, len: usize },
    #[error("source {index} has a non-finite parameter")]
    NonFiniteSource { index: usize },
    #[error("camera smoothing factor {0} must be in (0, 1]")]
    CameraLerp(f32),
}

/// Failure inside a single frame. The frame is dropped and the host should
/// report the error rather than present partial output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("non-finite frame time (elapsed={elapsed}, dt={dt})")]
    NonFiniteTime { elapsed: f32, dt: f32 },
}
