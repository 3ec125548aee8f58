use log::debug;
use serde::Serialize;

use crate::{
    aggregate::GroupedAggregate,
    color::{LinearColorMapper, SPECTRAL6},
    dataset::Dataset,
    dimension::Dimension,
};

pub const CHART_WIDTH: u32 = 900;
pub const CHART_HEIGHT: u32 = 600;
pub const Y_AXIS_LABEL: &str = "Road Fatality count";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Center,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleStyle {
    pub font_size: &'static str,
    pub align: Align,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Right,
}

/// Legend strip explaining a [`LinearColorMapper`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorBar {
    pub width: u32,
    pub location: (i32, i32),
    pub side: Side,
}

/// The visual primitive drawn once per group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Glyph {
    /// Connected line through every group.
    Line { line_width: u32 },
    /// One vertical bar per group, `width` is a fraction of the category slot.
    VBar { width: f64 },
    /// One point per group, filled and outlined from the color mapper.
    Circle {
        size: u32,
        fill_alpha: f64,
        color_mapper: LinearColorMapper,
        color_bar: ColorBar,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub label: &'static str,
    /// `$y` shows the hovered y value.
    pub field: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverMode {
    /// Hover follows the pointer's x position and snaps to the nearest point.
    VLine,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toolbar {
    pub logo: Option<String>,
    pub autohide: bool,
}

/// A fully configured chart for one dimension. Built per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub dimension: Dimension,
    pub title: String,
    pub title_style: TitleStyle,
    pub width: u32,
    pub height: u32,
    pub x_axis_label: String,
    pub y_axis_label: &'static str,
    /// Categorical x factors, in group order.
    pub x_range: Vec<String>,
    pub source: GroupedAggregate,
    pub glyph: Glyph,
    pub tooltips: Option<Vec<Tooltip>>,
    pub hover: HoverMode,
    pub toolbar: Toolbar,
}

pub fn chart_title(dimension: Dimension) -> String {
    format!("Fatalities according to {dimension}")
}

fn glyph_for(dimension: Dimension, source: &GroupedAggregate) -> Glyph {
    match dimension {
        Dimension::Year => Glyph::Line { line_width: 2 },
        Dimension::State => Glyph::VBar { width: 0.8 },
        Dimension::Month => {
            let (low, high) = source.count_range().unwrap_or_default();
            Glyph::Circle {
                size: 12,
                fill_alpha: 1.0,
                color_mapper: LinearColorMapper::new(SPECTRAL6, low as f64, high as f64),
                color_bar: ColorBar {
                    width: 8,
                    location: (0, 0),
                    side: Side::Right,
                },
            }
        }
    }
}

fn tooltips_for(dimension: Dimension) -> Option<Vec<Tooltip>> {
    match dimension {
        Dimension::Year => Some(vec![Tooltip {
            label: "Fatalities",
            field: "$y",
        }]),
        Dimension::State | Dimension::Month => None,
    }
}

impl Chart {
    pub fn build(dataset: &Dataset, dimension: Dimension) -> Self {
        let source = GroupedAggregate::group_by(dataset, dimension);
        debug!("grouped {} rows by {dimension} into {} groups", dataset.len(), source.len());
        Self {
            dimension,
            title: chart_title(dimension),
            title_style: TitleStyle {
                font_size: "13pt",
                align: Align::Center,
            },
            width: CHART_WIDTH,
            height: CHART_HEIGHT,
            x_axis_label: dimension.to_string(),
            y_axis_label: Y_AXIS_LABEL,
            x_range: source.keys().map(str::to_string).collect(),
            glyph: glyph_for(dimension, &source),
            source,
            tooltips: tooltips_for(dimension),
            hover: HoverMode::VLine,
            toolbar: Toolbar {
                logo: None,
                autohide: true,
            },
        }
    }

    pub fn color_mapper(&self) -> Option<&LinearColorMapper> {
        match &self.glyph {
            Glyph::Circle { color_mapper, .. } => Some(color_mapper),
            Glyph::Line { .. } | Glyph::VBar { .. } => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Groups `dataset` by `dimension` and configures the chart for it.
pub fn build_chart(dataset: &Dataset, dimension: Dimension) -> Chart {
    Chart::build(dataset, dimension)
}
