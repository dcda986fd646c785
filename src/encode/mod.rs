pub(crate) mod image_file;
pub(crate) mod sink;
