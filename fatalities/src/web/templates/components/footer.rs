use maud::{html, Render};

pub(crate) struct Footer;

impl Render for Footer {
    fn render(&self) -> maud::Markup {
        html! {
            footer {
                span { "Counts are rows of the road fatality dataset; one row per person killed." }
            }
        }
    }
}
