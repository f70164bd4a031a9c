pub(crate) mod dispatch;
pub(crate) mod driver;
mod emit;
pub(crate) mod ids;
pub(crate) mod project;
pub(crate) mod visibility;
