use plotters::style::RGBColor;
use serde::{Serialize, Serializer};

/// Ordered list of colors, low values first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette(pub &'static [RGBColor]);

/// Six color "Spectral" diverging palette, blue through red.
pub const SPECTRAL6: Palette = Palette(&[
    RGBColor(0x32, 0x88, 0xbd),
    RGBColor(0x99, 0xd5, 0x94),
    RGBColor(0xe6, 0xf5, 0x98),
    RGBColor(0xfe, 0xe0, 0x8b),
    RGBColor(0xfc, 0x8d, 0x59),
    RGBColor(0xd5, 0x3e, 0x4f),
]);

pub fn to_hex(color: &RGBColor) -> String {
    format!("#{:02x}{:02x}{:02x}", color.0, color.1, color.2)
}

impl Palette {
    pub fn colors(&self) -> &'static [RGBColor] {
        self.0
    }

    pub fn first(&self) -> RGBColor {
        self.0.first().copied().unwrap_or(RGBColor(0, 0, 0))
    }
}

impl Serialize for Palette {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(to_hex))
    }
}

/// Maps `[low, high]` linearly onto the palette's colors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearColorMapper {
    pub palette: Palette,
    pub low: f64,
    pub high: f64,
}

impl LinearColorMapper {
    pub fn new(palette: Palette, low: f64, high: f64) -> Self {
        Self { palette, low, high }
    }

    /// True when every value maps onto the same color.
    pub fn is_degenerate(&self) -> bool {
        !(self.high > self.low) || self.palette.0.len() < 2
    }

    /// Index of the palette bin `value` falls into.
    pub fn bin_for(&self, value: f64) -> usize {
        if self.is_degenerate() || value.is_nan() {
            return 0;
        }
        let bins = self.palette.0.len();
        let fraction = (value - self.low) / (self.high - self.low);
        ((fraction * bins as f64).floor().max(0.0) as usize).min(bins - 1)
    }

    pub fn color_for(&self, value: f64) -> RGBColor {
        self.palette
            .0
            .get(self.bin_for(value))
            .copied()
            .unwrap_or_else(|| self.palette.first())
    }
}
