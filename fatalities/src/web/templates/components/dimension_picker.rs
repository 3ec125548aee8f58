use fatality_charts::Dimension;
use maud::{html, Render};

/// Form that reloads the page grouped by the picked dimension.
pub(crate) struct DimensionPicker {
    pub(crate) current: Dimension,
}

impl Render for DimensionPicker {
    fn render(&self) -> maud::Markup {
        html! {
            form class="dimension-picker" method="get" action="/" {
                label for="item_for_compare" { "Compare fatalities by " }
                select name="item_for_compare" id="item_for_compare" onchange="this.form.submit()" {
                    @for dimension in Dimension::ALL {
                        option value=(dimension.column_name()) selected[dimension == self.current] {
                            (dimension.column_name())
                        }
                    }
                }
                noscript {
                    button type="submit" { "Show" }
                }
            }
        }
    }
}
