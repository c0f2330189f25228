// Shared tuning constants for the grid engine and its frontends.

// Responsive tier breakpoints (CSS pixels, exclusive upper bounds)
pub const MOBILE_MAX_WIDTH: f32 = 768.0;
pub const DESKTOP_MAX_WIDTH: f32 = 1920.0;
pub const LARGE_MAX_WIDTH: f32 = 2400.0;

// Grid resolution per tier: (grid_size, cell_size, gap)
pub const MOBILE_GRID: (u32, f32, f32) = (28, 0.55, 0.10);
pub const DESKTOP_GRID: (u32, f32, f32) = (40, 0.50, 0.08);
pub const LARGE_GRID: (u32, f32, f32) = (48, 0.45, 0.07);
pub const ULTRAWIDE_GRID: (u32, f32, f32) = (56, 0.42, 0.06);

// Resize handling
pub const RESIZE_SETTLE_SEC: f32 = 0.15; // width must be stable this long before the lattice is rebuilt

// Frame timing
pub const REFERENCE_FPS: f32 = 60.0; // per-frame easing factors are tuned at this rate
pub const MAX_FRAME_DT: f32 = 0.1; // clamp after a stalled/background tab

// Cell geometry
pub const BASE_CELL_HEIGHT: f32 = 0.08; // resting height of a cell with no influence
pub const MIN_CELL_SCALE_Y: f32 = 0.01; // never hand the GPU a flat (singular) transform

// Idle breathing term (height only)
pub const IDLE_AMPLITUDE: f32 = 0.04;
pub const IDLE_SPEED: f32 = 0.8;
pub const IDLE_INDEX_SPREAD: f32 = 0.37; // phase offset per cell index

// Pointer proximity term
pub const POINTER_RADIUS: f32 = 2.2;
pub const POINTER_HEIGHT_GAIN: f32 = 0.6;

// Camera rig
pub const CAMERA_FOVY_DEG: f32 = 45.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 200.0;
pub const CAMERA_LERP: f32 = 0.025; // fraction of remaining distance per reference frame

// Background dots
pub const DOT_SEED: u64 = 0x5EED_D075;
