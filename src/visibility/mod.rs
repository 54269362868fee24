pub(crate) mod gate;
pub(crate) mod viewport;
