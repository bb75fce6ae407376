//! Shared numeric constants for the board.

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest root-layer scale the wheel can reach.
pub const MIN_ZOOM: f64 = 0.2;

/// Largest root-layer scale the wheel can reach.
pub const MAX_ZOOM: f64 = 5.0;

/// Per-pixel wheel factor: `new_zoom = old_zoom * WHEEL_ZOOM_BASE.powf(dy)`.
pub const WHEEL_ZOOM_BASE: f64 = 0.999;

// ── Gestures ────────────────────────────────────────────────────

/// Two pointer-ups on the same target closer than this count as a double click.
pub const DOUBLE_CLICK_MS: u64 = 200;

// ── Selection visuals (screen pixels, divided by zoom at draw time) ──

/// Stroke width of the active-object border.
pub const BORDER_WIDTH_PX: f64 = 3.0;

/// Radius of the rotation control point.
pub const CONTROL_POINT_RADIUS_PX: f64 = 5.0;

/// Stroke width of the rotation control point outline.
pub const CONTROL_POINT_STROKE_PX: f64 = 2.0;

// ── Colors (0xRRGGBB) ───────────────────────────────────────────

pub const BORDER_COLOR: u32 = 0x005b_97fc;
pub const CONTROL_POINT_STROKE: u32 = 0x00c6_6965;
pub const CONTROL_POINT_FILL: u32 = 0x00ff_ffff;
pub const MARQUEE_FILL: u32 = 0x0088_88ff;
pub const MARQUEE_ALPHA: f64 = 0.5;

// ── Text ────────────────────────────────────────────────────────

pub const DEFAULT_FONT_SIZE: f64 = 14.0;

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f64 = 1.2;

pub const DEFAULT_TEXT_FILL: u32 = 0x004c_a486;

/// Average glyph advance as a fraction of the font size, used by the
/// approximate text measurer.
pub const APPROX_CHAR_WIDTH: f64 = 0.6;
