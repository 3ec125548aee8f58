pub(crate) mod chart_embed;
pub(crate) mod dimension_picker;
pub(crate) mod footer;
pub(crate) mod group_table;
