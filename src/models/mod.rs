// ============ Model implementations ============

pub(crate) mod bert;

// Public model structs and checkpoint enums (for type annotations)
pub use bert::{BertStarRatingModel, StarModel};
