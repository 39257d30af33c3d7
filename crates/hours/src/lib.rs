mod client;
mod edits;
mod error;
mod model;
mod row;
mod update;

pub use client::*;
pub use edits::*;
pub use error::*;
pub use model::*;
pub use row::*;
pub use update::*;
