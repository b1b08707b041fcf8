//! Reusable building blocks shared by items and structures.
//!
//! - [`ItemText`] - label, description and value texts keyed by index path
//! - [`btn_add`], [`btn_remove`] - editing affordances
//! - [`title`] - the title block wired into structures declaring the title slot

mod buttons;
mod labels;
mod title;

pub use buttons::{BUTTON_SIZE, btn_add, btn_remove, btns_group, button_size, items_group};
pub use labels::{ItemText, TextRole, format_value};
pub use title::{TitleFn, TitleProps, title};
