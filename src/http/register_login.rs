use actix_web::{http::StatusCode, post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::http::AppState;
use crate::lib::{auth::Authenticator, Result};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
struct AuthResponseBody {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    auth: web::Data<Authenticator>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    let result = auth.register(&state.data, &body.email, &body.password, &body.display_name).await?;
    Ok(HttpResponse::build(StatusCode::CREATED)
        .json(AuthResponseBody { success: result.success, message: result.message.to_string(), token: None }))
}

#[post("/login")]
pub async fn login(state: web::Data<AppState>, auth: web::Data<Authenticator>, body: web::Json<LoginRequest>) -> Result<HttpResponse> {
    let result = auth.login(&state.data, &body.email, &body.password).await?;
    Ok(HttpResponse::Ok().json(AuthResponseBody { success: result.success, message: result.message.to_string(), token: result.token }))
}
