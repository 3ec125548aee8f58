pub(crate) mod fatalities_page;
