pub mod fixtures;
pub mod remap_helpers;
