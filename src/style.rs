//! Display colors shared by the scene and highlight state. RGB, 0xRRGGBB.

pub const TABLE_FRAME: u32 = 0x9CAEB0;
pub const HEADER_BACKGROUND: u32 = 0x2980B9;
pub const HEADER_TEXT: u32 = 0xFFFFFF;
pub const ROW_EVEN: u32 = 0xECF0F1;
pub const ROW_ODD: u32 = 0xBDC3C7;
pub const ROW_NAME_TEXT: u32 = 0x24394E;
pub const ROW_TYPE_TEXT: u32 = 0x5F6C6D;
pub const ROW_HIGHLIGHT: u32 = 0xFFFF00;

pub const LINK: u32 = 0x3498DB;
pub const LINK_HIGHLIGHT: u32 = 0xFF0000;
pub const LINK_OPACITY: f32 = 1.0;
pub const LINK_MARKER: u32 = 0xE74C3C;

/// Base background of the row at local position `index`.
pub fn row_background(index: usize) -> u32 {
    if index % 2 == 0 { ROW_EVEN } else { ROW_ODD }
}

/// `#rrggbb` form for JSON and web consumers.
pub fn hex(color: u32) -> String {
    format!("#{:06x}", color & 0xFF_FFFF)
}
