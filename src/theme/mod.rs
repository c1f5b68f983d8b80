pub(crate) mod palette;
pub(crate) mod registry;
