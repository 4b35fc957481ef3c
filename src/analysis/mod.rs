pub(crate) mod assets;
pub(crate) mod expectations;
pub(crate) mod loop_check;
pub(crate) mod structure;
pub(crate) mod timing;
