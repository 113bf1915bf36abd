//! Todos domain module.
//!
//! Storage of todo items behind a single [`TodoStore`] that picks MongoDB or
//! an in-memory list once, then keeps the same contract for both.

pub mod backend;
mod error;
pub mod events;
pub mod model;
mod store;

pub use backend::BackendKind;
pub use error::{TodoError, TodoResult};
pub use events::{BackendSelection, SelectionReason, StoreObserver};
pub use model::{NewTodo, TodoItem, TodoPatch};
pub use store::TodoStore;
