mod queue;
pub(crate) mod utils;
