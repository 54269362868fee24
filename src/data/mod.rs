pub(crate) mod index;
pub(crate) mod source;
pub(crate) mod table;
