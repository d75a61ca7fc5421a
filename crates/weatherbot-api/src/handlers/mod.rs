//! API request handlers.

pub mod health;
pub mod notify;
pub mod settings;
pub mod users;

pub use health::*;
pub use notify::*;
pub use settings::*;
pub use users::*;
