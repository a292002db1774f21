use std::collections::HashMap;
use std::sync::Arc;

use crate::data::service::DataService;
use crate::tasks::command_registry::{ClusterHandle, CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TaskPriority {
    Low,
    Standard,
    High,
}

/// A value a slash command's parameters can carry, mirroring the prototype's
/// `std::variant<std::string, int64_t, double>`.
#[derive(Debug, Clone)]
pub enum CommandParam {
    Text(String),
    Integer(i64),
    Number(f64),
}

/// A unit of work submitted to the `TaskManager`. Every context a variant
/// needs to run (the cluster handle, the command registry, the data service)
/// travels with the task itself; nothing is reached through global state.
pub enum Task {
    Message(String),
    DiscordCommand {
        command_name: String,
        params: HashMap<String, CommandParam>,
        user_id: i64,
        interaction_token: String,
        cluster: Arc<dyn ClusterHandle>,
        registry: Arc<CommandRegistry>,
        data: DataService,
    },
    /// Reserved extension point; no handler is registered against it yet.
    WebRequest,
}

impl Task {
    pub fn priority(&self) -> TaskPriority {
        match self {
            Task::Message(_) => TaskPriority::Low,
            Task::DiscordCommand { .. } => TaskPriority::High,
            Task::WebRequest => TaskPriority::Standard,
        }
    }

    /// Runs the task to completion on whichever worker popped it. Side
    /// effects go through the context the task carries; this never returns a
    /// value to the caller.
    pub async fn process(self, worker_id: usize) {
        match self {
            Task::Message(text) => {
                log::info!("worker {worker_id} message: {text}");
            }
            Task::DiscordCommand { command_name, params, user_id, interaction_token, cluster, registry, data } => {
                match registry.get_handler(&command_name) {
                    Some(handler) => {
                        handler.handle(&data, user_id, &params, interaction_token.as_str(), cluster.as_ref()).await;
                    }
                    None => {
                        cluster.send_response(&interaction_token, "This command is not yet implemented!").await;
                    }
                }
            }
            Task::WebRequest => {}
        }
    }
}
