pub(crate) mod file;

pub(crate) use file::save_preview;
