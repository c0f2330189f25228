// Host-side tests for the lattice, the instance buffer writer and GPU layouts.

use glam::{Vec3, Vec4};
use grid_core::*;

#[test]
fn lattice_is_centred_row_major() {
    let config = GridConfig::new(5, 0.5, 0.1);
    let lattice = Lattice::new(config);
    assert_eq!(lattice.len(), 25);
    assert!(!lattice.is_empty());

    let cells = lattice.cells();
    for (i, c) in cells.iter().enumerate() {
        assert_eq!(c.index as usize, i);
    }
    // Row-major: x varies fastest
    assert!((cells[1].x - cells[0].x - config.spacing()).abs() < 1e-6);
    assert_eq!(cells[1].z, cells[0].z);
    assert!((cells[5].z - cells[0].z - config.spacing()).abs() < 1e-6);

    let (sx, sz) = cells.iter().fold((0.0, 0.0), |(x, z), c| (x + c.x, z + c.z));
    assert!(sx.abs() < 1e-4 && sz.abs() < 1e-4, "not centred: {} {}", sx, sz);
    assert!((cells[0].x + config.half_extent()).abs() < 1e-6);
}

#[test]
fn nearest_clamps_to_the_lattice() {
    let lattice = Lattice::new(GridConfig::new(5, 0.5, 0.1));
    assert_eq!(lattice.nearest(0.0, 0.0).map(|c| c.index), Some(12));
    assert_eq!(lattice.nearest(-100.0, -100.0).map(|c| c.index), Some(0));
    assert_eq!(lattice.nearest(100.0, 100.0).map(|c| c.index), Some(24));
    assert_eq!(lattice.nearest(0.62, 0.0).map(|c| c.index), Some(13));

    let empty = Lattice::new(GridConfig::new(0, 0.5, 0.1));
    assert!(empty.is_empty());
    assert!(empty.nearest(0.0, 0.0).is_none());
}

#[test]
fn writer_places_cell_on_the_floor() {
    let mut writer = InstanceWriter::with_len(4);
    let cell = GridCell {
        index: 2,
        x: 1.5,
        z: -0.5,
    };
    let sample = CellSample {
        height: 0.8,
        color: Vec3::new(0.2, 0.4, 0.6),
    };
    writer.write(&cell, &sample, 0.5);

    let m = writer.transforms()[2].model;
    assert_eq!(m[0][0], 0.5);
    assert_eq!(m[1][1], 0.8);
    assert_eq!(m[2][2], 0.5);
    // Translation column: base of the cube rests on y = 0
    assert_eq!([m[3][0], m[3][1], m[3][2]], [1.5, 0.4, -0.5]);
    assert_eq!(writer.colors()[2].rgb, [0.2, 0.4, 0.6]);

    // Untouched slots stay zeroed
    assert_eq!(writer.transforms()[0], InstanceTransform::default());
}

#[test]
fn writer_clamps_height_and_color() {
    let mut writer = InstanceWriter::with_len(1);
    let cell = GridCell {
        index: 0,
        x: 0.0,
        z: 0.0,
    };
    let sample = CellSample {
        height: -3.0,
        color: Vec3::new(-0.5, 0.5, 7.0),
    };
    writer.write(&cell, &sample, 0.5);
    assert_eq!(writer.transforms()[0].model[1][1], MIN_CELL_SCALE_Y);
    assert_eq!(writer.colors()[0].rgb, [0.0, 0.5, 1.0]);
}

#[test]
fn commit_raises_both_flags_once() {
    let mut writer = InstanceWriter::with_len(3);
    assert!(!writer.dirty().any());
    assert_eq!(writer.version(), 0);

    writer.commit();
    assert_eq!(
        writer.dirty(),
        DirtyFlags {
            transforms: true,
            colors: true
        }
    );
    assert_eq!(writer.version(), 1);

    writer.acknowledge();
    assert!(!writer.dirty().any());
    assert_eq!(writer.version(), 1);
}

#[test]
fn resize_reallocates_and_clears_flags() {
    let mut writer = InstanceWriter::with_len(3);
    writer.commit();
    writer.resize(10);
    assert_eq!(writer.len(), 10);
    assert_eq!(writer.colors().len(), 10);
    assert!(!writer.dirty().any());
    assert!(writer.transforms().iter().all(|t| *t == InstanceTransform::default()));

    writer.resize(0);
    assert!(writer.is_empty());
}

#[test]
fn instance_layouts_match_shader_attributes() {
    // mat4x4<f32> over four vec4 attributes, then a vec3 color
    assert_eq!(std::mem::size_of::<InstanceTransform>(), 64);
    assert_eq!(std::mem::size_of::<InstanceColor>(), 12);
    assert_eq!(std::mem::size_of::<MeshVertex>(), 24);
    assert_eq!(std::mem::size_of::<SceneUniforms>(), 96);
    assert!(GRID_WGSL.contains("fn vs_main"));
    assert!(GRID_WGSL.contains("fn fs_main"));
}

#[test]
fn unit_cube_is_closed_and_wound_outward() {
    let cube = unit_cube();
    assert_eq!(cube.len(), 36);
    for tri in cube.chunks(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|v| Vec3::from(v.position));
        let n = Vec3::from(tri[0].normal);
        assert!((n.length() - 1.0).abs() < 1e-6);
        assert!((b - a).cross(c - a).dot(n) > 0.0, "triangle wound inward");
        for p in [a, b, c] {
            assert!(p.abs().max_element() <= 0.5 + 1e-6);
            // Every vertex lies on the face its normal points to
            assert!((p.dot(n) - 0.5).abs() < 1e-6);
        }
    }
}

#[test]
fn scene_uniforms_pack_camera_and_lighting() {
    let rig = CameraRig::new(CameraParams::default(), 1.0);
    let u = SceneUniforms::from_camera(rig.camera(), Vec3::new(0.0, 2.0, 0.0), 1.5, -1.0);
    assert_eq!(u.light, [0.0, 1.0, 0.0, 1.0]);
    let eye = rig.camera().eye;
    assert_eq!(u.eye_fog, Vec4::new(eye.x, eye.y, eye.z, 0.0).to_array());
    assert_eq!(u.view_proj, rig.camera().view_projection().to_cols_array_2d());
}
