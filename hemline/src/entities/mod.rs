mod part;

#[doc(inline)]
pub use part::{Part, PointId, PointTable};
