//! Screens. List, detail and form are [`Component`](crate::component::Component)s;
//! the delete confirmation is a popup drawn over whichever is in front.

pub mod confirm;
pub mod detail;
pub mod form;
pub mod list;

pub use detail::DetailScreen;
pub use form::FormScreen;
pub use list::ListScreen;
