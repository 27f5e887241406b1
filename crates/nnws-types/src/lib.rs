pub mod point;
pub mod roles;
pub mod sketch;
pub mod topo;
pub mod units;
pub mod vector;

pub use point::*;
pub use roles::*;
pub use sketch::*;
pub use topo::*;
pub use units::*;
pub use vector::*;
