use actix_web::{delete, get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::data::{models::Player, query::Query, service::DataService, update::Update};
use crate::http::AppState;
use crate::lib::{auth::Claims, error::InternalError, id::Id, Result};

/// The four-state friend-graph relation between a caller and another player,
/// read directly off the caller's own three list fields — never both sides
/// at once, since the lists are kept consistent by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FriendStatus {
    None,
    Friends,
    RequestSent,
    RequestReceived,
}

impl FriendStatus {
    fn of(player: &Player, other: Id<Player>) -> Self {
        if player.friends.contains(&other) {
            Self::Friends
        } else if player.friend_requests_sent.contains(&other) {
            Self::RequestSent
        } else if player.friend_requests_received.contains(&other) {
            Self::RequestReceived
        } else {
            Self::None
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Friends => "friends",
            Self::RequestSent => "requestSent",
            Self::RequestReceived => "requestReceived",
        }
    }
}

#[derive(Serialize)]
struct SimpleResponse {
    success: bool,
    message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FriendSummary {
    #[serde(rename = "_id")]
    id: Id<Player>,
    display_name: String,
}

async fn summarize(data: &DataService, ids: &[Id<Player>]) -> Result<Vec<FriendSummary>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let players = data.players.find(Query::new().in_("_id", ids.to_vec())).await?;
    Ok(players.into_iter().map(|p| FriendSummary { id: p.id, display_name: p.display_name }).collect())
}

/// Pulls both request-list fields on both participants, in both directions.
/// This deliberately over-deletes: it is the only way to make accept,
/// decline, and cancel robust against a stale cross-state residue left by an
/// earlier partial write (e.g. an accept that only landed on one side).
async fn clear_pending_requests(data: &DataService, a: Id<Player>, b: Id<Player>) -> Result<()> {
    for (actor, other) in [(a, b), (b, a)] {
        data.players
            .update_one(Query::by_id(actor), Update::new().pull("friendRequestsSent", other).pull("friendRequestsReceived", other))
            .await?;
    }
    Ok(())
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchResultUser {
    #[serde(rename = "_id")]
    id: Id<Player>,
    display_name: String,
    status: &'static str,
}

#[get("/users/search")]
pub async fn search_users(state: web::Data<AppState>, claims: Claims, query: web::Query<SearchQuery>) -> Result<HttpResponse> {
    let caller = state.data.find_player_by_id(claims.user_id).await?.ok_or(InternalError::NotFound("Player"))?;

    let pattern = regex::escape(&query.name);
    let matches =
        state.data.players.find(Query::new().regex("displayName", &pattern, "i").ne("_id", claims.user_id)).await?;

    let users = matches
        .into_iter()
        .map(|player| {
            let status = FriendStatus::of(&caller, player.id).as_str();
            SearchResultUser { id: player.id, display_name: player.display_name, status }
        })
        .collect::<Vec<_>>();

    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true, "users": users })))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FriendsResponse {
    success: bool,
    friends: Vec<FriendSummary>,
    incoming_requests: Vec<FriendSummary>,
    outgoing_requests: Vec<FriendSummary>,
}

#[get("/friends")]
pub async fn get_friends(state: web::Data<AppState>, claims: Claims) -> Result<HttpResponse> {
    let player = state.data.find_player_by_id(claims.user_id).await?.ok_or(InternalError::NotFound("Player"))?;

    let friends = summarize(&state.data, &player.friends).await?;
    let incoming_requests = summarize(&state.data, &player.friend_requests_received).await?;
    let outgoing_requests = summarize(&state.data, &player.friend_requests_sent).await?;

    Ok(HttpResponse::Ok().json(FriendsResponse { success: true, friends, incoming_requests, outgoing_requests }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestBody {
    pub recipient_id: Id<Player>,
}

#[post("/friends/request")]
pub async fn send_friend_request(
    state: web::Data<AppState>,
    claims: Claims,
    body: web::Json<FriendRequestBody>,
) -> Result<HttpResponse> {
    let other_id = body.recipient_id;
    if other_id == claims.user_id {
        return Err(InternalError::ValidationFailed { field: "recipientId", reason: "cannot friend yourself" }.into());
    }

    let caller = state.data.find_player_by_id(claims.user_id).await?.ok_or(InternalError::NotFound("Player"))?;
    if FriendStatus::of(&caller, other_id) != FriendStatus::None {
        return Err(InternalError::Conflict { reason: "A friend request already exists between these players." }.into());
    }

    state.data.players.update_one(Query::by_id(claims.user_id), Update::new().add_to_set("friendRequestsSent", other_id)).await?;
    state.data.players.update_one(Query::by_id(other_id), Update::new().add_to_set("friendRequestsReceived", claims.user_id)).await?;

    Ok(HttpResponse::Ok().json(SimpleResponse { success: true, message: "Friend request sent.".to_string() }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendResponseBody {
    pub other_user_id: Id<Player>,
    pub action: String,
}

#[post("/friends/response")]
pub async fn respond_to_friend_request(
    state: web::Data<AppState>,
    claims: Claims,
    body: web::Json<FriendResponseBody>,
) -> Result<HttpResponse> {
    let caller = state.data.find_player_by_id(claims.user_id).await?.ok_or(InternalError::NotFound("Player"))?;
    let other_id = body.other_user_id;
    let status = FriendStatus::of(&caller, other_id);

    let message = match body.action.as_str() {
        "accept" => {
            if status != FriendStatus::RequestReceived {
                return Err(InternalError::Conflict { reason: "No pending request from this player." }.into());
            }
            state.data.players.update_one(Query::by_id(claims.user_id), Update::new().add_to_set("friends", other_id)).await?;
            state.data.players.update_one(Query::by_id(other_id), Update::new().add_to_set("friends", claims.user_id)).await?;
            clear_pending_requests(&state.data, claims.user_id, other_id).await?;
            "Friend request accepted."
        }
        "decline" => {
            if status != FriendStatus::RequestReceived {
                return Err(InternalError::Conflict { reason: "No pending request from this player." }.into());
            }
            clear_pending_requests(&state.data, claims.user_id, other_id).await?;
            "Friend request declined."
        }
        "cancel" => {
            if status != FriendStatus::RequestSent {
                return Err(InternalError::Conflict { reason: "No pending request to this player." }.into());
            }
            clear_pending_requests(&state.data, claims.user_id, other_id).await?;
            "Friend request cancelled."
        }
        _ => return Err(InternalError::ValidationFailed { field: "action", reason: "must be accept, decline, or cancel" }.into()),
    };

    Ok(HttpResponse::Ok().json(SimpleResponse { success: true, message: message.to_string() }))
}

#[delete("/friends/{friend_id}")]
pub async fn remove_friend(state: web::Data<AppState>, claims: Claims, path: web::Path<String>) -> Result<HttpResponse> {
    let other_id: Id<Player> =
        path.parse().map_err(|_| InternalError::ValidationFailed { field: "friendId", reason: "not a valid id" })?;

    for (actor, other) in [(claims.user_id, other_id), (other_id, claims.user_id)] {
        state.data.players.update_one(Query::by_id(actor), Update::new().pull("friends", other)).await?;
    }

    Ok(HttpResponse::Ok().json(SimpleResponse { success: true, message: "Friend removed.".to_string() }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_with(friends: Vec<Id<Player>>, sent: Vec<Id<Player>>, received: Vec<Id<Player>>) -> Player {
        let mut player = Player::new("a@b.c", "Alice", "hash");
        player.friends = friends;
        player.friend_requests_sent = sent;
        player.friend_requests_received = received;
        player
    }

    #[test]
    fn status_reads_off_the_caller_lists_in_priority_order() {
        let other: Id<Player> = Id::new();
        assert_eq!(FriendStatus::of(&player_with(vec![], vec![], vec![]), other), FriendStatus::None);
        assert_eq!(FriendStatus::of(&player_with(vec![other], vec![], vec![]), other), FriendStatus::Friends);
        assert_eq!(FriendStatus::of(&player_with(vec![], vec![other], vec![]), other), FriendStatus::RequestSent);
        assert_eq!(FriendStatus::of(&player_with(vec![], vec![], vec![other]), other), FriendStatus::RequestReceived);
    }
}
