//! Demo table
//!
//! The rotation walks this table in order and wraps back to the start.

/// Identifier of a single demo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DemoId {
    /// Three labels in two font sizes
    Text,
    /// Triangle outline plus both screen diagonals
    Lines,
    /// Two arc gauges
    Arc,
    /// 1-bit smiley bitmap
    Image,
    /// Direct pixel drawing on a grayscale canvas
    Canvas,
}

impl DemoId {
    /// Name shown in log output
    pub const fn name(self) -> &'static str {
        match self {
            DemoId::Text => "Text",
            DemoId::Lines => "Lines",
            DemoId::Arc => "Arc",
            DemoId::Image => "Image",
            DemoId::Canvas => "Canvas",
        }
    }
}

/// Display order
pub const DEMOS: [DemoId; 5] = [
    DemoId::Text,
    DemoId::Lines,
    DemoId::Arc,
    DemoId::Image,
    DemoId::Canvas,
];

/// Number of demos in the rotation
pub const DEMO_COUNT: usize = DEMOS.len();
