// Host-side tests for the camera rig and pointer projection.

use glam::{Vec2, Vec3};
use grid_core::*;

#[test]
fn rig_starts_at_base_position() {
    let params = CameraParams::default();
    let rig = CameraRig::new(params, 1.5);
    let cam = rig.camera();
    assert_eq!(cam.eye, params.base_position);
    assert_eq!(cam.target, params.look_at);
    assert_eq!(cam.aspect, 1.5);
    assert!((cam.fovy_radians - CAMERA_FOVY_DEG.to_radians()).abs() < 1e-6);
}

#[test]
fn target_applies_parallax_per_axis() {
    let params = CameraParams::default();
    let rig = CameraRig::new(params, 1.0);
    let p = params.parallax;
    let b = params.base_position;
    assert_eq!(rig.target_for(Vec2::ZERO), b);
    assert_eq!(rig.target_for(Vec2::new(1.0, 0.0)), b + Vec3::new(p.x, 0.0, 0.0));
    // Pointer up lifts the eye and pulls it forward
    assert_eq!(rig.target_for(Vec2::new(0.0, 1.0)), b + Vec3::new(0.0, p.y, -p.z));
}

#[test]
fn rig_converges_without_overshoot() {
    let mut rig = CameraRig::new(CameraParams::default(), 1.0);
    let ndc = Vec2::new(-0.8, 0.6);
    let target = rig.target_for(ndc);
    let mut prev = rig.camera().eye.distance(target);
    for frame in 0..900 {
        rig.update(ndc, 1.0 / 60.0);
        let d = rig.camera().eye.distance(target);
        assert!(d <= prev + 1e-6, "frame {} moved away: {} > {}", frame, d, prev);
        prev = d;
    }
    assert!(prev < 1e-3, "still {} away", prev);
    assert_eq!(rig.camera().target, rig.params().look_at);
}

#[test]
fn rig_is_frame_rate_independent() {
    let ndc = Vec2::new(1.0, -1.0);
    let mut slow = CameraRig::new(CameraParams::default(), 1.0);
    let mut fast = CameraRig::new(CameraParams::default(), 1.0);
    for _ in 0..30 {
        slow.update(ndc, 1.0 / 30.0);
    }
    for _ in 0..120 {
        fast.update(ndc, 1.0 / 120.0);
    }
    let gap = slow.camera().eye.distance(fast.camera().eye);
    assert!(gap < 1e-3, "30 Hz and 120 Hz differ by {}", gap);
}

#[test]
fn zero_dt_holds_the_eye() {
    let mut rig = CameraRig::new(CameraParams::default(), 1.0);
    let before = rig.camera().eye;
    rig.update(Vec2::new(1.0, 1.0), 0.0);
    assert_eq!(rig.camera().eye, before);
}

#[test]
fn bad_aspect_falls_back_to_square() {
    let mut rig = CameraRig::new(CameraParams::default(), f32::NAN);
    assert_eq!(rig.camera().aspect, 1.0);
    rig.set_aspect(0.0);
    assert_eq!(rig.camera().aspect, 1.0);
    rig.set_aspect(2.0);
    assert_eq!(rig.camera().aspect, 2.0);
}

#[test]
fn screen_ray_starts_near_the_eye() {
    let rig = CameraRig::new(CameraParams::default(), 1.5);
    let cam = rig.camera();
    let (origin, dir) = cam.screen_ray(Vec2::ZERO);
    assert!(origin.distance(cam.eye) < cam.znear * 2.0);
    let forward = (cam.target - cam.eye).normalize();
    assert!(dir.dot(forward) > 0.9999, "dir {:?}", dir);
}

#[test]
fn view_projection_maps_look_at_to_screen_centre() {
    let rig = CameraRig::new(CameraParams::default(), 16.0 / 9.0);
    let clip = rig.camera().view_projection() * Vec3::ZERO.extend(1.0);
    let ndc = clip.truncate() / clip.w;
    assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5, "ndc {:?}", ndc);
    assert!(ndc.z > 0.0 && ndc.z < 1.0);
}

#[test]
fn ground_point_projects_back_to_the_same_pixel() {
    let rig = CameraRig::new(CameraParams::default(), 16.0 / 9.0);
    let cam = rig.camera();
    for ndc in [
        Vec2::ZERO,
        Vec2::new(1.0, 1.0),
        Vec2::new(-0.7, 0.3),
        Vec2::new(0.25, -1.0),
    ] {
        let hit = cam.ground_point(ndc).expect("ray meets the grid");
        assert!(hit.y.abs() < 1e-4);
        let clip = cam.view_projection() * hit.extend(1.0);
        let back = clip.truncate() / clip.w;
        assert!(
            (back.x - ndc.x).abs() < 1e-3 && (back.y - ndc.y).abs() < 1e-3,
            "{:?} came back as {:?}",
            ndc,
            back
        );
    }
}

#[test]
fn pointer_from_ndc_follows_perspective() {
    let rig = CameraRig::new(CameraParams::default(), 1.0);
    let cam = rig.camera();
    let mid = PointerState::from_ndc(Vec2::ZERO, cam).expect("hit");
    assert!(mid.world_x.abs() < 1e-3 && mid.world_z.abs() < 1e-3, "{:?}", mid);

    // Top of the screen is farther away (-Z) and spans more world than the bottom
    let top = PointerState::from_ndc(Vec2::new(0.0, 0.9), cam).expect("hit");
    let bottom = PointerState::from_ndc(Vec2::new(0.0, -0.9), cam).expect("hit");
    assert!(top.world_z < 0.0 && bottom.world_z > 0.0);
    assert!(top.world_z.abs() > bottom.world_z.abs());
    let top_right = PointerState::from_ndc(Vec2::new(0.5, 0.9), cam).expect("hit");
    let bottom_right = PointerState::from_ndc(Vec2::new(0.5, -0.9), cam).expect("hit");
    assert!(top_right.world_x > bottom_right.world_x && bottom_right.world_x > 0.0);
}

#[test]
fn ray_above_the_horizon_misses_the_grid() {
    let params = CameraParams {
        base_position: Vec3::new(0.0, 1.0, 20.0),
        ..CameraParams::default()
    };
    let rig = CameraRig::new(params, 1.0);
    assert!(rig.camera().ground_point(Vec2::new(0.0, 1.0)).is_none());
    assert!(rig.camera().ground_point(Vec2::ZERO).is_some());
}

#[test]
fn tracker_keeps_last_valid_sample() {
    let rig = CameraRig::new(CameraParams::default(), 1.0);
    let cam = rig.camera();
    let mut tracker = PointerTracker::default();
    assert_eq!(tracker.state(), None);
    assert_eq!(tracker.ndc(), Vec2::ZERO);

    tracker.observe(Some(Vec2::new(0.5, 0.0)));
    let valid = tracker.project(cam);
    assert!(valid.is_some_and(|p| p.world_x > 0.0));

    tracker.observe(Some(Vec2::new(f32::INFINITY, 0.0)));
    assert_eq!(tracker.project(cam), valid);
    assert_eq!(tracker.ndc(), Vec2::new(0.5, 0.0));

    tracker.observe(None);
    assert_eq!(tracker.project(cam), None);
    assert_eq!(tracker.ndc(), Vec2::ZERO);
}

#[test]
fn tracker_holds_state_when_the_ray_misses() {
    let low = CameraRig::new(
        CameraParams {
            base_position: Vec3::new(0.0, 1.0, 20.0),
            ..CameraParams::default()
        },
        1.0,
    );
    let mut tracker = PointerTracker::default();
    tracker.observe(Some(Vec2::ZERO));
    let on_grid = tracker.project(low.camera());
    assert!(on_grid.is_some());

    tracker.observe(Some(Vec2::new(0.0, 1.0)));
    assert_eq!(tracker.project(low.camera()), on_grid);
}
