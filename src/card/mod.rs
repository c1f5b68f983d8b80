pub(crate) mod preview;
pub(crate) mod render;
pub(crate) mod spec;
