use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use futures::future::BoxFuture;

use crate::data::service::DataService;
use crate::tasks::task::CommandParam;

/// The out-of-band gateway client a `DiscordCommandTask` talks back through.
/// The gateway's own connection, registration, and acknowledgement mechanics
/// are explicitly out of scope for this crate; only this narrow interface is
/// named so handlers have something to call.
pub trait ClusterHandle: Send + Sync {
    fn send_response<'a>(&'a self, interaction_token: &'a str, text: &'a str) -> BoxFuture<'a, ()>;

    /// Acknowledges a slash-command interaction with a "thinking" placeholder
    /// before the task that will eventually produce the real response has
    /// even been picked up by a worker.
    fn send_deferred<'a>(&'a self, interaction_token: &'a str) -> BoxFuture<'a, ()>;
}

/// A single slash command's implementation. Boxed futures stand in for
/// `async fn` in a trait, which this crate's dependency set predates.
pub trait CommandHandler: Send + Sync {
    fn handle<'a>(
        &'a self,
        data: &'a DataService,
        user_id: i64,
        params: &'a HashMap<String, CommandParam>,
        interaction_token: &'a str,
        cluster: &'a dyn ClusterHandle,
    ) -> BoxFuture<'a, ()>;
}

/// Maps slash-command names to their handler, mirroring the prototype's
/// `CommandHandler::register_command` / `get_handler`. Handlers are kept
/// behind `Arc` rather than `Box` so a lookup can clone the reference out and
/// release the registry lock before the handler's future is awaited.
#[derive(Default)]
pub struct CommandRegistry {
    handlers: RwLock<HashMap<String, Arc<dyn CommandHandler>>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_command(&self, name: &str, handler: Arc<dyn CommandHandler>) {
        self.handlers.write().expect("CommandRegistry lock poisoned").insert(name.to_string(), handler);
    }

    pub fn get_handler(&self, name: &str) -> Option<Arc<dyn CommandHandler>> {
        self.handlers.read().expect("CommandRegistry lock poisoned").get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl CommandHandler for Echo {
        fn handle<'a>(
            &'a self,
            _data: &'a DataService,
            _user_id: i64,
            _params: &'a HashMap<String, CommandParam>,
            _interaction_token: &'a str,
            _cluster: &'a dyn ClusterHandle,
        ) -> BoxFuture<'a, ()> {
            Box::pin(async {})
        }
    }

    #[test]
    fn registers_and_resolves_by_name() {
        let registry = CommandRegistry::new();
        assert!(registry.get_handler("ping").is_none());
        registry.register_command("ping", Arc::new(Echo));
        assert!(registry.get_handler("ping").is_some());
        assert!(registry.get_handler("drop").is_none());
    }
}
