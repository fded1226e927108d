mod any_buffer;

pub(crate) use any_buffer::*;
