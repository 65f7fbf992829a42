pub(crate) mod stats;
pub(crate) mod utils;

pub mod batch;
pub mod sentiment;
