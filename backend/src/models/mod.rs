pub mod flight;
pub mod time;

pub use flight::*;
pub use time::*;
