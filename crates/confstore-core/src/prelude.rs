pub use crate::app::App;
pub use confstore_types::prelude::*;

// vim: ts=4
