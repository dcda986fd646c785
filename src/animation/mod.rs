pub(crate) mod knobs;
pub(crate) mod metadata;
