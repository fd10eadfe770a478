mod quadrature;

pub use quadrature::*;
