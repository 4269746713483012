pub mod packer;
pub mod sheet;

#[doc(inline)]
pub use packer::{GrowingPacker, LayoutBlock, Placement};
#[doc(inline)]
pub use sheet::{pack_parts, PartPlacement, Sheet};
