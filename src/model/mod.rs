//! Domain data types managed by the resource actors.

pub mod account;
pub mod catalog;
pub mod ids;
pub mod order;
pub mod product;

pub use account::*;
pub use catalog::*;
pub use ids::*;
pub use order::*;
pub use product::*;
