pub(crate) mod components;
pub(crate) mod head;
pub(crate) mod page;
pub(crate) mod pages;
