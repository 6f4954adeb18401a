mod colour;
pub use colour::*;

mod components;
pub use components::*;

mod config;
pub use config::*;

mod document;
pub use document::*;

mod font;
pub use font::*;

mod image;

mod info;
pub use info::*;

/// Fitting and curving text onto token faces
pub mod layout;

mod naming;
pub use naming::*;

mod packing;
pub use packing::*;

mod raster;
pub use raster::*;

pub(crate) mod refs;

mod role;
pub use role::*;

mod token;
pub use token::*;

mod units;
pub use units::*;

mod error;
pub use error::*;
