pub(crate) mod convert;
pub(crate) mod image;
pub(crate) mod plane;
