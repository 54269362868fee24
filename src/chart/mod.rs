pub(crate) mod backend;
pub(crate) mod format;
pub(crate) mod label;
pub(crate) mod recording;
pub(crate) mod sync;
