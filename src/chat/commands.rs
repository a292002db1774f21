use std::collections::HashMap;

use futures::future::BoxFuture;

use crate::data::service::DataService;
use crate::game::open_pack_for_player;
use crate::tasks::command_registry::{ClusterHandle, CommandHandler};
use crate::tasks::task::CommandParam;

/// `/drop` — opens a pack for the invoking Discord user, auto-provisioning
/// their player record on first use, and reports the drawn card back through
/// the cluster handle.
pub struct DropCommand;

impl CommandHandler for DropCommand {
    fn handle<'a>(
        &'a self,
        data: &'a DataService,
        user_id: i64,
        _params: &'a HashMap<String, CommandParam>,
        interaction_token: &'a str,
        cluster: &'a dyn ClusterHandle,
    ) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            let response = match data.find_or_create_player_by_discord_id(user_id).await {
                Ok(player) => match open_pack_for_player(data, &player).await {
                    Ok(result) if result.success => result
                        .opened_references
                        .first()
                        .map(|card| format!("You pulled **{}**! (#{})", card.name, result.opened_objects[0].number))
                        .unwrap_or_else(|| result.message),
                    Ok(result) => result.message,
                    Err(_) => "An internal error has occurred. Please try again later.".to_string(),
                },
                Err(_) => "An internal error has occurred. Please try again later.".to_string(),
            };
            cluster.send_response(interaction_token, &response).await;
        })
    }
}

/// `/ping` — a constant liveness response, independent of the data service.
pub struct PingCommand;

impl CommandHandler for PingCommand {
    fn handle<'a>(
        &'a self,
        _data: &'a DataService,
        _user_id: i64,
        _params: &'a HashMap<String, CommandParam>,
        interaction_token: &'a str,
        cluster: &'a dyn ClusterHandle,
    ) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            cluster.send_response(interaction_token, "Pong!").await;
        })
    }
}
