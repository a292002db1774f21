pub mod commands;

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::data::service::DataService;
use crate::tasks::{ClusterHandle, CommandParam, CommandRegistry, Task, TaskManager};

/// A placeholder `ClusterHandle` that only logs. The real gateway connection
/// is a named external interface this crate does not implement; this stub
/// lets `main` stand up a `CommandSurface` before a concrete client exists.
pub struct LoggingClusterHandle;

impl ClusterHandle for LoggingClusterHandle {
    fn send_response<'a>(&'a self, interaction_token: &'a str, text: &'a str) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            log::info!("interaction {interaction_token}: {text}");
        })
    }

    fn send_deferred<'a>(&'a self, interaction_token: &'a str) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            log::info!("interaction {interaction_token}: thinking...");
        })
    }
}

/// Registers the commands this crate ships a handler for. The gateway's own
/// slash-command *registration* with the chat platform is a separate,
/// out-of-scope concern — this only wires names to local handlers.
pub fn register_default_commands(registry: &CommandRegistry) {
    registry.register_command("drop", Arc::new(commands::DropCommand));
    registry.register_command("ping", Arc::new(commands::PingCommand));
}

/// An inbound slash-command invocation, as handed to the core by the
/// out-of-scope gateway client.
pub struct SlashCommandEvent {
    pub command_name: String,
    pub params: HashMap<String, CommandParam>,
    pub user_id: i64,
    pub interaction_token: String,
}

/// CommandSurface: turns a gateway slash-command event into a `High`-priority
/// `DiscordCommandTask`, after sending an immediate "thinking" acknowledgement
/// so the chat client does not time the interaction out while the task waits
/// in queue.
pub struct CommandSurface {
    tasks: TaskManager,
    registry: Arc<CommandRegistry>,
    data: DataService,
    cluster: Arc<dyn ClusterHandle>,
}

impl CommandSurface {
    pub fn new(tasks: TaskManager, registry: Arc<CommandRegistry>, data: DataService, cluster: Arc<dyn ClusterHandle>) -> Self {
        Self { tasks, registry, data, cluster }
    }

    pub async fn dispatch(&self, event: SlashCommandEvent) {
        self.cluster.send_deferred(&event.interaction_token).await;

        self.tasks.submit(Task::DiscordCommand {
            command_name: event.command_name,
            params: event.params,
            user_id: event.user_id,
            interaction_token: event.interaction_token,
            cluster: self.cluster.clone(),
            registry: self.registry.clone(),
            data: self.data.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registrations_cover_drop_and_ping() {
        let registry = CommandRegistry::new();
        register_default_commands(&registry);
        assert!(registry.get_handler("drop").is_some());
        assert!(registry.get_handler("ping").is_some());
        assert!(registry.get_handler("unknown").is_none());
    }
}
