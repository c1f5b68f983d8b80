pub(crate) mod bitmap;
pub(crate) mod fonts;
pub(crate) mod layout;
