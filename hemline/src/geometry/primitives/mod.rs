mod point;
mod vector;

#[doc(inline)]
pub use point::Point;
#[doc(inline)]
pub use vector::Vector;
