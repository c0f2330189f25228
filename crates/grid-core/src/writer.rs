//! Instance buffer writer.
//!
//! Holds the CPU copies of the per-instance transform and color buffers the
//! renderer draws from. Buffers are sized when the lattice changes and then
//! overwritten in place every frame. The dirty pair is raised once per frame
//! by [`InstanceWriter::commit`], after every cell has been written.

use crate::constants::MIN_CELL_SCALE_Y;
use crate::field::CellSample;
use crate::lattice::GridCell;
use glam::{Mat4, Quat, Vec3};

/// Column-major model matrix, laid out for a `mat4x4<f32>` vertex attribute.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceTransform {
    pub model: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceColor {
    pub rgb: [f32; 3],
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirtyFlags {
    pub transforms: bool,
    pub colors: bool,
}

impl DirtyFlags {
    pub fn any(&self) -> bool {
        self.transforms || self.colors
    }
}

// One transform and one color, reused for every cell. Never handed out.
#[derive(Default)]
struct Scratch {
    transform: Mat4,
    color: Vec3,
}

#[derive(Default)]
pub struct InstanceWriter {
    transforms: Vec<InstanceTransform>,
    colors: Vec<InstanceColor>,
    scratch: Scratch,
    dirty: DirtyFlags,
    version: u64,
}

impl InstanceWriter {
    pub fn with_len(len: usize) -> Self {
        let mut w = Self::default();
        w.resize(len);
        w
    }

    /// Resize both buffers for a new lattice. Only called between frames.
    pub fn resize(&mut self, len: usize) {
        self.transforms.clear();
        self.transforms.resize(len, InstanceTransform::default());
        self.colors.clear();
        self.colors.resize(len, InstanceColor::default());
        self.dirty = DirtyFlags::default();
    }

    /// Write one cell. Color is clamped to `[0, 1]` here, at the last step.
    #[inline]
    pub fn write(&mut self, cell: &GridCell, sample: &CellSample, cell_size: f32) {
        let i = cell.index as usize;
        let scale_y = sample.height.max(MIN_CELL_SCALE_Y);
        self.scratch.transform = Mat4::from_scale_rotation_translation(
            Vec3::new(cell_size, scale_y, cell_size),
            Quat::IDENTITY,
            Vec3::new(cell.x, scale_y * 0.5, cell.z),
        );
        self.transforms[i].model = self.scratch.transform.to_cols_array_2d();

        self.scratch.color = sample.color.clamp(Vec3::ZERO, Vec3::ONE);
        self.colors[i].rgb = self.scratch.color.to_array();
    }

    /// Flag both buffers for upload. Call once, after the full cell loop.
    pub fn commit(&mut self) {
        self.dirty = DirtyFlags {
            transforms: true,
            colors: true,
        };
        self.version += 1;
    }

    /// The host has uploaded the current contents.
    pub fn acknowledge(&mut self) {
        self.dirty = DirtyFlags::default();
    }

    #[inline]
    pub fn transforms(&self) -> &[InstanceTransform] {
        &self.transforms
    }

    #[inline]
    pub fn colors(&self) -> &[InstanceColor] {
        &self.colors
    }

    #[inline]
    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }

    /// Number of commits so far.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}
