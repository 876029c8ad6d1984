use glam::Vec3;

// Shared tuning constants used by the core state machine and the web frontend.

// Transition
pub const TRANSITION_FACTOR: f32 = 0.05; // fraction of the remaining gap closed per reference frame
pub const REFERENCE_FPS: f32 = 60.0; // frame rate the factor above was tuned at
pub const ARRIVAL_EPSILON: f32 = 1.0e-3; // world units; closer than this snaps to target
pub const ARRIVAL_ANGLE_EPSILON: f32 = 1.0e-3; // radians

// Camera
pub const CAMERA_FOVY_DEG: f32 = 50.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 200.0;

// Hotspots
pub const HOTSPOT_PICK_RADIUS: f32 = 0.6; // ray-sphere radius for picking
pub const HOTSPOT_MARKER_SIZE: f32 = 0.35; // rendered disc radius

// Scene layout
pub const ROOM_CENTER: Vec3 = Vec3::new(0.0, 1.6, 0.0); // eye height in the middle of the hall

// Catalog paging
pub const DEFAULT_PAGE_SIZE: usize = 12;
pub const SCROLL_PAGE_THRESHOLD: f64 = 240.0; // accumulated wheel delta (px) per page turn

// Forum persistence
pub const FORUM_STORAGE_KEY: &str = "exhibit.forum.v1";
