pub mod bezier;
pub mod boundary;
pub mod intersect;
pub mod polynomial;
pub mod primitives;

#[doc(inline)]
pub use boundary::Boundary;
#[doc(inline)]
pub use polynomial::Polynomial;
