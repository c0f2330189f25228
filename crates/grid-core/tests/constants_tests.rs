// Host-side tests for tuning constants and their relationships.

use grid_core::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn breakpoints_ascend() {
    assert!(MOBILE_MAX_WIDTH > 0.0);
    assert!(MOBILE_MAX_WIDTH < DESKTOP_MAX_WIDTH);
    assert!(DESKTOP_MAX_WIDTH < LARGE_MAX_WIDTH);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn grid_density_grows_with_tier() {
    let grids = [MOBILE_GRID, DESKTOP_GRID, LARGE_GRID, ULTRAWIDE_GRID];
    for pair in grids.windows(2) {
        assert!(pair[0].0 < pair[1].0, "grid size must grow: {:?}", pair);
    }
    for (size, cell, gap) in grids {
        assert!(size > 0);
        assert!(cell > 0.0 && gap >= 0.0);
        assert!(gap < cell, "gap should stay smaller than the cell");
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn heights_never_collapse() {
    // Idle breathing alone can't push a resting cell below the floor scale
    assert!(MIN_CELL_SCALE_Y > 0.0);
    assert!(BASE_CELL_HEIGHT - IDLE_AMPLITUDE >= MIN_CELL_SCALE_Y);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn timing_constants_are_sane() {
    assert!(RESIZE_SETTLE_SEC > 0.0 && RESIZE_SETTLE_SEC < 1.0);
    assert!(REFERENCE_FPS > 0.0);
    assert!(MAX_FRAME_DT > 1.0 / REFERENCE_FPS);
    assert!(CAMERA_LERP > 0.0 && CAMERA_LERP <= 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_planes_are_ordered() {
    assert!(CAMERA_ZNEAR > 0.0 && CAMERA_ZNEAR < CAMERA_ZFAR);
    assert!(CAMERA_FOVY_DEG > 0.0 && CAMERA_FOVY_DEG < 180.0);
    // The far plane must clear the dot shell
    assert!(CAMERA_ZFAR > DotFieldParams::default().outer_radius * 2.0);
}
