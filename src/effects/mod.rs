pub(crate) mod chars;
pub(crate) mod driver;
pub(crate) mod scramble;
