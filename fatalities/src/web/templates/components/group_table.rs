use fatality_charts::GroupedAggregate;
use maud::{html, Render};

pub(crate) struct GroupTable<'a> {
    pub(crate) source: &'a GroupedAggregate,
}

impl Render for GroupTable<'_> {
    fn render(&self) -> maud::Markup {
        html! {
            table class="group-table" {
                tr {
                    th { (self.source.dimension.column_name()) }
                    th { "Fatalities" }
                    th { "Mean age" }
                    th { "Most common road user" }
                    th { "Most common speed zone" }
                }
                @for group in &self.source.groups {
                    tr {
                        td { (group.key) }
                        td { (group.fatalities) }
                        td {
                            @match group.age.mean {
                                Some(mean) => { (format!("{mean:.1}")) }
                                None => { "-" }
                            }
                        }
                        td {
                            @match group.road_users.first() {
                                Some((role, count)) => { (role) " (" (count) ")" }
                                None => { "-" }
                            }
                        }
                        td {
                            @match group.speed_limits.first() {
                                Some((limit, count)) => { (limit) " km/h (" (count) ")" }
                                None => { "-" }
                            }
                        }
                    }
                }
                tr class="total" {
                    td { "Total" }
                    td { (self.source.total()) }
                    td {}
                    td {}
                    td {}
                }
            }
        }
    }
}
