//! GPU-facing vertex and uniform layouts shared by both frontends.

use crate::camera::Camera;
use glam::Vec3;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub light: [f32; 4],
    pub eye_fog: [f32; 4],
}

impl SceneUniforms {
    pub fn from_camera(camera: &Camera, light_dir: Vec3, ambient: f32, fog_density: f32) -> Self {
        let d = light_dir.normalize_or_zero();
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            light: [d.x, d.y, d.z, ambient.clamp(0.0, 1.0)],
            eye_fog: [camera.eye.x, camera.eye.y, camera.eye.z, fog_density.max(0.0)],
        }
    }
}

/// Unit cube centred on the origin, 36 vertices with flat normals.
pub fn unit_cube() -> [MeshVertex; 36] {
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        // (normal, u axis, v axis)
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];
    const CORNERS: [(f32, f32); 6] = [
        (-1.0, -1.0),
        (1.0, -1.0),
        (1.0, 1.0),
        (-1.0, -1.0),
        (1.0, 1.0),
        (-1.0, 1.0),
    ];
    let mut out = [MeshVertex {
        position: [0.0; 3],
        normal: [0.0; 3],
    }; 36];
    for (f, (n, u, v)) in FACES.iter().enumerate() {
        let (n, u, v) = (Vec3::from(*n), Vec3::from(*u), Vec3::from(*v));
        for (c, (cu, cv)) in CORNERS.iter().enumerate() {
            let p = (n + u * *cu + v * *cv) * 0.5;
            out[f * 6 + c] = MeshVertex {
                position: p.to_array(),
                normal: n.to_array(),
            };
        }
    }
    out
}
