pub mod error;
pub mod types;
pub mod urls;
pub mod viewer;

pub use error::WebError;
pub use types::{format_timestamp, new_id, now_rfc3339};
pub use urls::{encode_next, login_redirect_target, percent_decode, safe_next};
pub use viewer::Viewer;
