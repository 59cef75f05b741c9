pub mod error;
pub mod format;
pub mod maneuver;
pub mod route;
pub mod session;

pub use error::*;
pub use format::*;
pub use maneuver::*;
pub use route::*;
pub use session::*;
