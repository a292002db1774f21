use actix_web::{post, web, HttpResponse};
use serde::Serialize;

use crate::game::open_pack_for_player;
use crate::http::AppState;
use crate::lib::{auth::Claims, error::InternalError, Result};

#[derive(Serialize)]
struct OpenedCard {
    name: String,
    number: i32,
    image: String,
}

#[derive(Serialize)]
struct OpenPackResponse {
    success: bool,
    message: String,
    cards: Vec<OpenedCard>,
}

#[post("/open_pack")]
pub async fn open_pack(state: web::Data<AppState>, claims: Claims) -> Result<HttpResponse> {
    let player = state
        .data
        .find_player_by_id(claims.user_id)
        .await?
        .ok_or(InternalError::NotFound("Player"))?;

    let result = open_pack_for_player(&state.data, &player).await?;

    let cards = result
        .opened_references
        .iter()
        .zip(result.opened_objects.iter())
        .map(|(reference, object)| OpenedCard {
            name: reference.name.clone(),
            number: object.number,
            image: reference.image_url(&state.card_image_base_url),
        })
        .collect();

    Ok(HttpResponse::Ok().json(OpenPackResponse { success: result.success, message: result.message, cards }))
}
