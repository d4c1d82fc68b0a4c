pub mod driver;
pub mod event;
pub mod observer;
pub mod state;

pub use driver::SchedCore;
pub use event::SchedCoreEvent;
pub use state::{ReadyQueue, SchedCtx, Task, TaskId, TaskState, Ticks};
