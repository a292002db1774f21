pub mod collection;
pub mod friends;
pub mod packs;
pub mod register_login;

use actix_web::web;

use crate::data::service::DataService;

/// Shared state every handler reaches through `web::Data<AppState>`. The
/// bearer-token `Authenticator` is registered separately (its own
/// `web::Data<Authenticator>`) since `Claims::from_request` looks it up by
/// type, matching the teacher's `AppState`/`Claims` split.
pub struct AppState {
    pub data: DataService,
    pub card_image_base_url: String,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(register_login::register)
            .service(register_login::login)
            .service(packs::open_pack)
            .service(collection::get_collection)
            .service(collection::save_deck)
            .service(friends::search_users)
            .service(friends::get_friends)
            .service(friends::send_friend_request)
            .service(friends::respond_to_friend_request)
            .service(friends::remove_friend),
    );
}
