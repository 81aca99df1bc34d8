use super::*;

pub(crate) mod confirm;
pub(crate) mod digits;
pub(crate) mod url;
pub(crate) mod visibility;
pub(crate) mod widgets;
