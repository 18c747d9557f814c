//! Core of the to-do list manager: task persistence, the repository over it,
//! rendering to row descriptors and the coordinator that ties user actions to
//! a redraw.
pub mod clock;
pub mod coordinator;
pub mod render;
pub mod repository;
pub mod store;
pub mod task;

pub use clock::{Clock, FixedClock, SystemClock};
pub use coordinator::{Coordinator, Page};
pub use render::{Action, CounterTarget, ListTarget, ListView, TaskRow};
pub use repository::{TaskError, TaskRepository};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError, TaskStorage};
pub use task::{Task, TaskId, TaskPatch};

#[cfg(target_arch = "wasm32")]
pub use store::LocalStorageStore;
