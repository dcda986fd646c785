pub(crate) mod frame;
pub(crate) mod pipeline;
pub(crate) mod sequence;
pub(crate) mod stack;
