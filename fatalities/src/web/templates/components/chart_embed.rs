use fatality_charts::{Chart, HoverPoint, RenderedChart};
use maud::{html, PreEscaped, Render};
use serde::Serialize;

/// Data handed to `hover.js` next to the drawn chart.
#[derive(Serialize)]
pub(crate) struct EmbeddedChart<'a> {
    pub(crate) chart: &'a Chart,
    pub(crate) hover_points: &'a [HoverPoint],
}

impl EmbeddedChart<'_> {
    /// JSON that is safe to place inside a `<script>` element.
    pub(crate) fn to_script_json(&self) -> serde_json::Result<String> {
        Ok(serde_json::to_string(self)?.replace("</", "<\\/"))
    }
}

pub(crate) struct ChartEmbed<'a> {
    pub(crate) chart: &'a Chart,
    pub(crate) rendered: &'a RenderedChart,
    pub(crate) script_json: &'a str,
}

impl Render for ChartEmbed<'_> {
    fn render(&self) -> maud::Markup {
        let toolbar = &self.chart.toolbar;
        let dimension = self.chart.dimension.column_name();
        html! {
            div class="chart" id="chart" style={"width: " (self.chart.width) "px"} {
                div.chart-toolbar.autohide[toolbar.autohide] {
                    @if let Some(logo) = &toolbar.logo {
                        img class="chart-logo" src=(logo) alt="";
                    }
                    a href={"/chart.svg?item_for_compare=" (dimension)} download={(dimension) ".svg"} { "SVG" }
                    a href={"/api/chart?item_for_compare=" (dimension)} { "JSON" }
                }
                (PreEscaped(&self.rendered.svg))
                div class="chart-tooltip" hidden {}
            }
            script type="application/json" id="chart-data" {
                (PreEscaped(self.script_json))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fatality_charts::{build_chart, render_svg, Dataset, Dimension};

    #[test]
    fn script_json_cannot_close_the_script() {
        let csv = "State,Month,Year\n</script><b>,1,2020\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        let chart = build_chart(&dataset, Dimension::State);
        let embedded = EmbeddedChart {
            chart: &chart,
            hover_points: &[],
        };
        let json = embedded.to_script_json().unwrap();
        assert!(!json.contains("</script>"));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["chart"]["x_range"][0], "</script><b>");
    }

    #[test]
    fn toolbar_autohides() {
        let csv = "State,Month,Year\nSA,1,2020\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        let chart = build_chart(&dataset, Dimension::Year);
        let rendered = render_svg(&chart).unwrap();
        let markup = ChartEmbed {
            chart: &chart,
            rendered: &rendered,
            script_json: "{}",
        }
        .render()
        .into_string();
        assert!(markup.contains("chart-toolbar autohide"));
        assert!(!markup.contains("chart-logo"));
        assert!(markup.contains("/chart.svg?item_for_compare=Year"));
    }
}
