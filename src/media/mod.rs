pub(crate) mod ffmpeg;
pub(crate) mod source;
pub(crate) mod synthetic;
