pub(crate) mod process;

pub mod domain;
pub use domain::*;

pub mod sender;
pub use sender::*;
