mod user;
mod session;

pub use user::*;
pub use session::*;
