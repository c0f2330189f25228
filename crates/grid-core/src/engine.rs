//! The grid engine: owns every piece of per-scene mutable state and runs
//! one frame per [`GridEngine::advance`] call.
//!
//! Frame order is fixed: pending resize → focus filter → source motion →
//! camera → pointer → field pass over every cell → commit. The lattice can
//! only change at the start of a frame, so a frame never mixes two lattices,
//! and the dirty flags are raised only after the last cell is written.

use crate::camera::{Camera, CameraRig};
use crate::dots::DotField;
use crate::error::{EngineError, ProfileError};
use crate::field::{accumulate, CellSample};
use crate::lattice::Lattice;
use crate::pointer::{PointerState, PointerTracker};
use crate::profile::{SceneProfile, SourceList};
use crate::source::{Discipline, InfluenceSource};
use crate::tier::{DeviceClass, GridConfig, ResizeDebouncer, Tier};
use crate::writer::{DirtyFlags, InstanceColor, InstanceTransform, InstanceWriter};
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width_px: f32,
    pub height_px: f32,
}

impl Viewport {
    pub fn new(width_px: f32, height_px: f32) -> Self {
        Self {
            width_px,
            height_px,
        }
    }

    pub fn aspect(&self) -> f32 {
        if self.height_px > 0.0 {
            self.width_px / self.height_px
        } else {
            1.0
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    pub elapsed: f32,
    pub dt: f32,
    /// Normalized pointer position, `None` while the pointer is off the page.
    pub pointer_ndc: Option<Vec2>,
    pub viewport: Viewport,
    pub focus: Option<Discipline>,
}

/// Borrowed view of one frame's results.
#[derive(Clone, Copy, Debug)]
pub struct FrameOutput<'a> {
    pub transforms: &'a [InstanceTransform],
    pub colors: &'a [InstanceColor],
    pub dirty: DirtyFlags,
    pub version: u64,
    pub lattice_generation: u64,
    pub camera: &'a Camera,
}

pub struct GridEngine {
    profile: SceneProfile,
    sources: SourceList,
    device: DeviceClass,
    tier_index: usize,
    tier: Tier,
    lattice: Lattice,
    lattice_generation: u64,
    resize: ResizeDebouncer,
    pointer: PointerTracker,
    camera: CameraRig,
    writer: InstanceWriter,
    dots: DotField,
    elapsed: f32,
}

impl GridEngine {
    pub fn new(
        profile: SceneProfile,
        viewport_width: f32,
        device: DeviceClass,
    ) -> Result<Self, ProfileError> {
        profile.validate()?;
        let tier_index = profile.tiers.select_index(viewport_width, device);
        let tier = profile
            .tiers
            .tier(tier_index)
            .cloned()
            .ok_or(ProfileError::EmptyTierTable)?;
        let lattice = Lattice::new(tier.config);
        let writer = InstanceWriter::with_len(lattice.len());
        let mut sources = profile.sources.clone();
        for source in sources.iter_mut() {
            source.settle(0.0, tier.config.spacing());
        }
        let dots = profile
            .dots
            .as_ref()
            .map(|p| DotField::generate(p, profile.dot_seed))
            .unwrap_or_default();
        log::info!(
            "[grid] scene '{}' tier {} ({} cells, {} dots)",
            profile.name,
            tier.name,
            lattice.len(),
            dots.len()
        );
        Ok(Self {
            sources,
            camera: CameraRig::new(profile.camera, 1.0),
            profile,
            device,
            tier_index,
            tier,
            lattice,
            lattice_generation: 0,
            resize: ResizeDebouncer::default(),
            pointer: PointerTracker::default(),
            writer,
            dots,
            elapsed: 0.0,
        })
    }

    /// Record a resize event. Applied at the start of a later frame once the
    /// width has settled.
    pub fn queue_resize(&mut self, width: f32, device: DeviceClass, now: f32) {
        self.resize.push(width, device, now);
    }

    /// Resolve `width` and rebuild the lattice if the tier changed.
    /// Returns whether a rebuild happened. Must not be called mid-frame.
    pub fn resize_now(&mut self, width: f32, device: DeviceClass) -> bool {
        self.device = device;
        let index = self.profile.tiers.select_index(width, device);
        if index == self.tier_index {
            return false;
        }
        let Some(next) = self.profile.tiers.tier(index).cloned() else {
            return false;
        };
        let from = std::mem::replace(&mut self.tier, next);
        self.tier_index = index;
        self.lattice = Lattice::new(self.tier.config);
        self.writer.resize(self.lattice.len());
        self.lattice_generation += 1;
        log::info!(
            "[grid] tier {} -> {} at width {:.0} ({} cells)",
            from.name,
            self.tier.name,
            width,
            self.lattice.len()
        );
        true
    }

    pub fn advance(&mut self, input: &FrameInput) -> Result<FrameOutput<'_>, EngineError> {
        if !input.elapsed.is_finite() || !input.dt.is_finite() {
            return Err(EngineError::NonFiniteTime {
                elapsed: input.elapsed,
                dt: input.dt,
            });
        }
        let dt = input.dt.max(0.0);

        if let Some((width, device)) = self.resize.poll(input.elapsed) {
            self.resize_now(width, device);
        }

        let spacing = self.lattice.config().spacing();
        for source in self.sources.iter_mut() {
            source.enabled = input.focus.map_or(true, |d| source.discipline == d);
            source.step(input.elapsed, dt, spacing);
        }

        // The rig eases toward the newest pointer, then the pointer is cast
        // through the camera as it stands this frame.
        self.camera.set_aspect(input.viewport.aspect());
        self.pointer.observe(input.pointer_ndc);
        self.camera.update(self.pointer.ndc(), dt);
        self.pointer.project(self.camera.camera());

        self.compose(input.elapsed);
        Ok(self.output())
    }

    /// Field pass over every cell at the current source positions, then
    /// commit. Running it twice without moving anything yields identical
    /// buffers.
    pub fn compose(&mut self, elapsed: f32) {
        self.elapsed = elapsed;
        let cell_size = self.lattice.config().cell_size;
        let pointer = self.pointer.state();
        for cell in self.lattice.cells() {
            let sample = accumulate(
                cell,
                &self.sources,
                pointer.as_ref(),
                elapsed,
                &self.profile.field,
            );
            self.writer.write(cell, &sample, cell_size);
        }
        self.writer.commit();
    }

    pub fn output(&self) -> FrameOutput<'_> {
        FrameOutput {
            transforms: self.writer.transforms(),
            colors: self.writer.colors(),
            dirty: self.writer.dirty(),
            version: self.writer.version(),
            lattice_generation: self.lattice_generation,
            camera: self.camera.camera(),
        }
    }

    /// The host uploaded the current buffers; clear the dirty pair.
    pub fn acknowledge_upload(&mut self) {
        self.writer.acknowledge();
    }

    /// Unclamped field value of one cell for the last composed frame.
    pub fn sample_cell(&self, index: usize) -> Option<CellSample> {
        let cell = self.lattice.cells().get(index)?;
        Some(accumulate(
            cell,
            &self.sources,
            self.pointer.state().as_ref(),
            self.elapsed,
            &self.profile.field,
        ))
    }

    pub fn profile(&self) -> &SceneProfile {
        &self.profile
    }

    pub fn sources(&self) -> &[InfluenceSource] {
        &self.sources
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn config(&self) -> GridConfig {
        self.lattice.config()
    }

    pub fn tier(&self) -> &Tier {
        &self.tier
    }

    pub fn device(&self) -> DeviceClass {
        self.device
    }

    /// Incremented every time the lattice is rebuilt.
    pub fn lattice_generation(&self) -> u64 {
        self.lattice_generation
    }

    pub fn resize_pending(&self) -> bool {
        self.resize.is_pending()
    }

    pub fn pointer(&self) -> Option<PointerState> {
        self.pointer.state()
    }

    pub fn camera(&self) -> &Camera {
        self.camera.camera()
    }

    pub fn dots(&self) -> &DotField {
        &self.dots
    }
}
