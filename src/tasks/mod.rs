pub mod command_registry;
pub mod manager;
pub mod queue;
pub mod task;

pub use command_registry::{ClusterHandle, CommandHandler, CommandRegistry};
pub use manager::TaskManager;
pub use task::{CommandParam, Task, TaskPriority};
