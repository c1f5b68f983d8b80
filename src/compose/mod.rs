pub(crate) mod logo;
pub(crate) mod panel;
pub(crate) mod qr;
