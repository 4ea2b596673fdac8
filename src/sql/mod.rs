//! Safe SQL builder: identifiers from the allow-list only, values as parameters.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
