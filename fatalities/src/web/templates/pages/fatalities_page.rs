use fatality_charts::{Chart, RenderedChart};
use maud::{html, Markup};

use crate::web::templates::{
    components::{
        chart_embed::ChartEmbed, dimension_picker::DimensionPicker, group_table::GroupTable,
    },
    page::Page,
};

pub(crate) struct FatalitiesPage {
    pub(crate) chart: Chart,
    pub(crate) rendered: RenderedChart,
    /// Serialized chart and hover points for the page script.
    pub(crate) script_json: String,
}

impl Page for FatalitiesPage {
    fn get_name(&self) -> String {
        self.chart.title.clone()
    }

    fn get_description(&self) -> Option<String> {
        Some(format!(
            "{} road fatalities grouped by {}",
            self.chart.source.total(),
            self.chart.dimension
        ))
    }

    fn get_scripts(&self) -> &[&'static str] {
        &["/static/hover.js"]
    }

    fn draw_body(&self) -> Markup {
        html! {
          div class="container" {
            div class="main-content" {
              h1 class="hero-title" { "Road fatalities" }
              (DimensionPicker {
                current: self.chart.dimension,
              })
              (ChartEmbed {
                chart: &self.chart,
                rendered: &self.rendered,
                script_json: &self.script_json,
              })
              (GroupTable {
                source: &self.chart.source,
              })
            }
          }
        }
    }
}
