// HTTP routes
pub mod health;
pub mod me;

pub use health::*;
pub use me::*;
