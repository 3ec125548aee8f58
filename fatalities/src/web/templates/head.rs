use maud::{html, Render, DOCTYPE};

pub(crate) struct HtmlHead<'a> {
    pub(crate) title: &'a str,
    pub(crate) description: Option<&'a str>,
    pub(crate) scripts: &'a [&'static str],
}

impl Render for HtmlHead<'_> {
    fn render(&self) -> maud::Markup {
        html! {
          (DOCTYPE)
          head {
            title { (self.title) }
            link rel="stylesheet" href="/static/main.css";
            @for script in self.scripts {
                script src=(script) defer {}
            }
            @if let Some(description) = self.description {
                meta name="description" content=(description);
            }
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1.0";
          }
        }
    }
}
