use crate::camera::Camera;
use glam::Vec2;

/// Pointer projected onto the grid plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub world_x: f32,
    pub world_z: f32,
}

impl PointerState {
    /// Cast normalized device coordinates (`[-1, 1]`, +Y up) through
    /// `camera` onto the grid plane.
    pub fn from_ndc(ndc: Vec2, camera: &Camera) -> Option<Self> {
        camera.ground_point(ndc).map(|hit| Self {
            world_x: hit.x,
            world_z: hit.z,
        })
    }
}

/// Keeps the last valid pointer position between frames.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    ndc: Option<Vec2>,
    state: Option<PointerState>,
}

impl PointerTracker {
    /// Record this frame's sample. `None` means the pointer has left the
    /// surface; a non-finite sample is ignored.
    pub fn observe(&mut self, ndc: Option<Vec2>) {
        match ndc {
            None => self.ndc = None,
            Some(p) if p.is_finite() => self.ndc = Some(p),
            Some(_) => {}
        }
    }

    /// Re-project the last valid sample through `camera`. A ray that misses
    /// the grid plane keeps the previous state.
    pub fn project(&mut self, camera: &Camera) -> Option<PointerState> {
        match self.ndc {
            None => self.state = None,
            Some(p) => {
                if let Some(state) = PointerState::from_ndc(p, camera) {
                    self.state = Some(state);
                }
            }
        }
        self.state
    }

    #[inline]
    pub fn state(&self) -> Option<PointerState> {
        self.state
    }

    /// Last valid normalized position; zero when the pointer is absent.
    #[inline]
    pub fn ndc(&self) -> Vec2 {
        self.ndc.unwrap_or(Vec2::ZERO)
    }
}
