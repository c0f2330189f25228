//! Camera description and the pointer-parallax rig.
//!
//! The rig is a converging filter with no terminal state: every frame the eye
//! moves a fixed fraction of the way toward a target derived from the
//! pointer, then re-aims at the fixed look-at point.

use crate::clock::frame_factor;
use crate::constants::*;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray through `ndc`, from the near plane outward.
    pub fn screen_ray(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inv = self.view_projection().inverse();
        let p_near = inv * Vec4::new(ndc.x, ndc.y, 0.0, 1.0);
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p0: Vec3 = p_near.truncate() / p_near.w;
        let p1: Vec3 = p_far.truncate() / p_far.w;
        (p0, (p1 - p0).normalize())
    }

    /// Where the ray through `ndc` meets the `y = 0` grid plane. `None` when
    /// the ray runs parallel to the plane or points away from it.
    pub fn ground_point(&self, ndc: Vec2) -> Option<Vec3> {
        let (origin, dir) = self.screen_ray(ndc);
        if !dir.is_finite() || dir.y.abs() < 1e-6 {
            return None;
        }
        let t = -origin.y / dir.y;
        (t >= 0.0 && t.is_finite()).then(|| origin + dir * t)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraParams {
    pub base_position: Vec3,
    pub look_at: Vec3,
    /// Maximum offset per axis at the edge of the screen.
    pub parallax: Vec3,
    /// Fraction of the remaining distance covered per 60 Hz frame.
    pub lerp: f32,
    pub fovy_degrees: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            base_position: Vec3::new(0.0, 14.0, 16.0),
            look_at: Vec3::ZERO,
            parallax: Vec3::new(2.0, 1.0, 1.0),
            lerp: CAMERA_LERP,
            fovy_degrees: CAMERA_FOVY_DEG,
        }
    }
}

pub struct CameraRig {
    params: CameraParams,
    camera: Camera,
}

impl CameraRig {
    pub fn new(params: CameraParams, aspect: f32) -> Self {
        let camera = Camera {
            eye: params.base_position,
            target: params.look_at,
            up: Vec3::Y,
            aspect: sanitize_aspect(aspect),
            fovy_radians: params.fovy_degrees.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        };
        Self { params, camera }
    }

    /// Where the eye is heading for a pointer at `ndc`.
    pub fn target_for(&self, ndc: Vec2) -> Vec3 {
        let p = self.params.parallax;
        self.params.base_position + Vec3::new(ndc.x * p.x, ndc.y * p.y, -ndc.y * p.z)
    }

    pub fn update(&mut self, ndc: Vec2, dt: f32) {
        let target = self.target_for(ndc);
        let k = frame_factor(self.params.lerp, dt);
        self.camera.eye += (target - self.camera.eye) * k;
        self.camera.target = self.params.look_at;
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.camera.aspect = sanitize_aspect(aspect);
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    pub fn params(&self) -> &CameraParams {
        &self.params
    }
}

fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}
