pub mod controller;
pub mod fit;
pub mod view;

pub use controller::*;
pub use fit::*;
pub use view::*;
