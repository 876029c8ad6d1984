// DOM contract and visual tuning for the web frontend.

// Page roots
pub const MUSEUM_CANVAS_ID: &str = "museum-canvas";
pub const CATALOG_ROOT_ID: &str = "catalog-root";
pub const FORUM_ROOT_ID: &str = "forum-root";

// Museum chrome
pub const HELP_OVERLAY_ID: &str = "help-overlay";
pub const VIEW_TITLE_ID: &str = "view-title";
pub const BACK_BUTTON_ID: &str = "back-button";
pub const TOUR_NEXT_ID: &str = "tour-next";
pub const TOUR_PREV_ID: &str = "tour-prev";

// Marker colors (linear RGB)
pub const MARKER_COLOR: [f32; 3] = [0.95, 0.78, 0.35]; // warm brass
pub const HOVER_BRIGHTEN: f32 = 1.4;
pub const MARKER_PULSE_HZ: f32 = 0.8; // idle breathing of markers
pub const MAX_MARKERS: usize = 16;

// Backdrop
pub const CLEAR_COLOR: [f64; 3] = [0.035, 0.04, 0.055];

// Catalog browser
pub const NOT_FOUND_TEXT: &str = "Not found";
