use std::collections::HashSet;

use actix_web::{get, put, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::data::{
    models::{CardObject, Player, DECK_COUNT},
    query::Query,
    update::Update,
};
use crate::http::AppState;
use crate::lib::{auth::Claims, error::InternalError, id::Id, Result};

#[derive(Serialize)]
struct CollectionResponse {
    success: bool,
    inventory: Vec<CardObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    decks: Option<Vec<Vec<Id<CardObject>>>>,
}

#[derive(Serialize)]
struct SimpleResponse {
    success: bool,
    message: String,
}

/// Pads `player.decks` up to `DECK_COUNT` empty decks, both in the in-memory
/// value and via a `push` per missing deck so a concurrent reader observes
/// the same repair. Calling this when the invariant already holds is a
/// no-op: the loop condition is false and nothing is written.
async fn ensure_three_decks(data: &crate::data::DataService, player: &mut Player) -> Result<()> {
    while player.decks.len() < DECK_COUNT {
        data.players.update_one(Query::by_id(player.id), Update::new().push("decks", Vec::<Id<CardObject>>::new())).await?;
        player.decks.push(Vec::new());
    }
    Ok(())
}

fn resolve_user_id(raw: &str, caller: Id<Player>) -> Result<Id<Player>> {
    if raw == "@me" {
        return Ok(caller);
    }
    raw.parse()
        .map_err(|_| InternalError::ValidationFailed { field: "userId", reason: "not a valid id" }.into())
}

#[get("/collection/{user_id}")]
pub async fn get_collection(state: web::Data<AppState>, claims: Claims, path: web::Path<String>) -> Result<HttpResponse> {
    let resolved_id = resolve_user_id(&path, claims.user_id)?;
    let is_owner = resolved_id == claims.user_id;

    let mut player = state.data.find_player_by_id(resolved_id).await?.ok_or(InternalError::NotFound("Player"))?;

    let inventory = state.data.card_objects.find(Query::new().in_("_id", player.cards.clone())).await?;

    let decks = if is_owner {
        ensure_three_decks(&state.data, &mut player).await?;
        Some(player.decks.clone())
    } else {
        None
    };

    Ok(HttpResponse::Ok().json(CollectionResponse { success: true, inventory, decks }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDeckRequest {
    pub deck_index: i32,
    pub cards: Vec<Id<CardObject>>,
}

/// Compares the requested deck against the stored one as a *set* (order
/// doesn't matter) before writing, so re-saving the same deck in a different
/// order is a detectable no-op rather than a spurious write.
#[put("/decks")]
pub async fn save_deck(state: web::Data<AppState>, claims: Claims, body: web::Json<SaveDeckRequest>) -> Result<HttpResponse> {
    let mut player = state.data.find_player_by_id(claims.user_id).await?.ok_or(InternalError::NotFound("Player"))?;
    ensure_three_decks(&state.data, &mut player).await?;

    if body.deck_index < 0 || body.deck_index as usize >= player.decks.len() {
        return Err(InternalError::ValidationFailed { field: "deckIndex", reason: "out of range" }.into());
    }
    let index = body.deck_index as usize;

    let current: HashSet<Id<CardObject>> = player.decks[index].iter().copied().collect();
    let requested: HashSet<Id<CardObject>> = body.cards.iter().copied().collect();

    if current == requested {
        return Ok(HttpResponse::Ok().json(SimpleResponse { success: true, message: "No changes detected.".to_string() }));
    }

    state.data.players.update_one(Query::by_id(player.id), Update::new().set(&format!("decks.{index}"), body.cards.clone())).await?;

    Ok(HttpResponse::Ok().json(SimpleResponse { success: true, message: "Deck saved.".to_string() }))
}
