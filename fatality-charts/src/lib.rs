//! Road fatality statistics grouped by year, state or month, and the charts drawn from them.

pub mod aggregate;
pub mod chart;
pub mod color;
pub mod dataset;
pub mod dimension;
pub mod render;

pub use aggregate::{Group, GroupedAggregate};
pub use chart::{build_chart, Chart, Glyph};
pub use dataset::{Dataset, DatasetError, FatalityRecord};
pub use dimension::{Dimension, UnknownDimension};
pub use render::{render_svg, HoverPoint, RenderedChart};
