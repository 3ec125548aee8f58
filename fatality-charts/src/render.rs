use anyhow::{anyhow, Result};
use plotters::{coord::Shift, prelude::*, style::RGBColor};
use serde::Serialize;

use crate::{
    chart::{Chart, Glyph},
    color::LinearColorMapper,
};

const BACKGROUND: RGBColor = RGBColor(255, 255, 255);
const MARK_COLOR: RGBColor = RGBColor(0x1f, 0x77, 0xb4);
const GRID_COLOR: RGBColor = RGBColor(0xe5, 0xe5, 0xe5);
const TEXT_COLOR: RGBColor = RGBColor(0x44, 0x44, 0x44);
/// Pixels reserved right of the plot for the color bar and its labels.
const COLOR_BAR_STRIP: i32 = 70;

/// Pixel position of one group's mark, used by the page for hover.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverPoint {
    pub x: i32,
    pub y: i32,
    pub label: String,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedChart {
    pub svg: String,
    /// Empty unless the chart has tooltips.
    pub hover_points: Vec<HoverPoint>,
}

fn title_font_px(font_size: &str) -> f64 {
    font_size
        .strip_suffix("pt")
        .and_then(|pt| pt.parse::<f64>().ok())
        .map(|pt| pt * 4.0 / 3.0)
        .unwrap_or(17.0)
}

/// Draws `chart` onto `backend`, returning the hover positions of its marks.
pub fn draw_chart<'a, T>(
    backend: T,
    chart: &Chart,
) -> Result<Vec<HoverPoint>, Box<dyn std::error::Error + Send + Sync + 'a>>
where
    T: 'a + DrawingBackend,
{
    let root = backend.into_drawing_area();
    root.fill(&BACKGROUND)?;

    let (plot_area, color_bar_area) = match &chart.glyph {
        Glyph::Circle { .. } => {
            let (width, _) = root.dim_in_pixel();
            let (plot, bar) = root.split_horizontally(width as i32 - COLOR_BAR_STRIP);
            (plot, Some(bar))
        }
        Glyph::Line { .. } | Glyph::VBar { .. } => (root.clone(), None),
    };

    let groups = &chart.source.groups;
    let factors = chart.x_range.len().max(1);
    let max_count = chart.source.count_range().map(|(_, max)| max).unwrap_or(0);
    let y_max = (max_count as f64 * 1.1).max(1.0);

    let mut ctx = ChartBuilder::on(&plot_area)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .margin(15)
        .caption(
            &chart.title,
            ("sans-serif", title_font_px(chart.title_style.font_size))
                .into_font()
                .color(&TEXT_COLOR),
        )
        .build_cartesian_2d(-0.5..(factors as f64 - 0.5), 0.0..y_max)?;

    let x_range = &chart.x_range;
    ctx.configure_mesh()
        .disable_x_mesh()
        .bold_line_style(GRID_COLOR)
        .light_line_style(GRID_COLOR.mix(0.3))
        .label_style(("sans-serif", 12).into_font().color(&TEXT_COLOR))
        .x_desc(chart.x_axis_label.as_str())
        .y_desc(chart.y_axis_label)
        .x_labels(factors + 1)
        .x_label_formatter(&|x| {
            let index = x.round();
            if (x - index).abs() > 1e-6 || index < 0.0 {
                return String::new();
            }
            x_range.get(index as usize).cloned().unwrap_or_default()
        })
        .y_label_formatter(&|y| format!("{y:.0}"))
        .draw()?;

    let points: Vec<(f64, f64)> = groups
        .iter()
        .enumerate()
        .map(|(i, group)| (i as f64, group.fatalities as f64))
        .collect();

    match &chart.glyph {
        Glyph::Line { line_width } => {
            ctx.draw_series(LineSeries::new(
                points.iter().copied(),
                MARK_COLOR.stroke_width(*line_width),
            ))?;
        }
        Glyph::VBar { width } => {
            let half = width / 2.0;
            ctx.draw_series(points.iter().map(|&(x, y)| {
                Rectangle::new([(x - half, 0.0), (x + half, y)], MARK_COLOR.filled())
            }))?;
        }
        Glyph::Circle {
            size,
            fill_alpha,
            color_mapper,
            ..
        } => {
            let radius = *size / 2;
            ctx.draw_series(points.iter().map(|&(x, y)| {
                let color = color_mapper.color_for(y);
                Circle::new((x, y), radius, color.mix(*fill_alpha).filled())
            }))?;
            ctx.draw_series(points.iter().map(|&(x, y)| {
                let color = color_mapper.color_for(y);
                Circle::new((x, y), radius, color.stroke_width(1))
            }))?;
        }
    }

    if let (Some(area), Some(mapper)) = (color_bar_area, chart.color_mapper()) {
        draw_color_bar(&area, mapper)?;
    }

    let hover_points = match chart.tooltips {
        Some(_) => groups
            .iter()
            .zip(points.iter())
            .map(|(group, point)| {
                let (x, y) = ctx.backend_coord(point);
                HoverPoint {
                    x,
                    y,
                    label: group.key.clone(),
                    value: group.fatalities,
                }
            })
            .collect(),
        None => Vec::new(),
    };

    // To avoid the IO failure being ignored silently, we manually call the present function
    root.present()?;

    Ok(hover_points)
}

/// Vertical strip of palette colors, low at the bottom, with the bounds labelled.
fn draw_color_bar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    mapper: &LinearColorMapper,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let (_, height) = area.dim_in_pixel();
    let colors = mapper.palette.colors();
    if colors.is_empty() {
        return Ok(());
    }
    let top = 60;
    let bottom = height as i32 - 65;
    let left = 10;
    let right = left + 8;
    let step = (bottom - top) as f64 / colors.len() as f64;
    for (i, color) in colors.iter().enumerate() {
        let lower = bottom - (step * i as f64).round() as i32;
        let upper = bottom - (step * (i + 1) as f64).round() as i32;
        area.draw(&Rectangle::new([(left, upper), (right, lower)], color.filled()))?;
    }
    let font = ("sans-serif", 11).into_font().color(&TEXT_COLOR);
    area.draw(&Text::new(format!("{:.0}", mapper.high), (right + 4, top - 6), font.clone()))?;
    area.draw(&Text::new(format!("{:.0}", mapper.low), (right + 4, bottom - 6), font))?;
    Ok(())
}

/// Renders `chart` into an SVG document at its configured size.
pub fn render_svg(chart: &Chart) -> Result<RenderedChart> {
    let mut svg = String::new();
    let hover_points = {
        let backend = SVGBackend::with_string(&mut svg, (chart.width, chart.height));
        draw_chart(backend, chart).map_err(|e| anyhow!("Failed to draw chart: {}", e))?
    };
    Ok(RenderedChart { svg, hover_points })
}
