pub mod analyse;
pub mod compare;
pub mod log;
pub mod pages;
pub mod rows;
pub mod sync;

pub use analyse::analyse;
pub use compare::compare;
pub use log::{log_get, log_post, logtest};
pub use pages::{delete, edit, update};
pub use rows::rows;
pub use sync::sync;
