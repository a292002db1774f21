use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpRequest};
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};

use crate::{
    data::{models::Player, service::DataService},
    lib::{error::InternalError, id::Id, time::Time, Result},
};

const TOKEN_ISSUER: &str = "cardforge";
const TOKEN_LIFETIME_HOURS: i64 = 24;

/// The decoded contents of a verified bearer token, carried into a handler by
/// the `FromRequest` impl below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: Id<Player>,
    pub email: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

impl FromRequest for Claims {
    type Error = actix_web::Error;
    type Future = Ready<std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let auth = req
            .app_data::<actix_web::web::Data<Authenticator>>()
            .expect("Authenticator missing from app_data");
        let outcome = extract_bearer(req)
            .ok_or(InternalError::Unauthorized)
            .and_then(|token| auth.verify(token).map_err(|_| InternalError::ExpiredOrMalformedToken))
            .map_err(|e| actix_web::Error::from(crate::lib::error::ServerError::from(e)));
        ready(outcome)
    }
}

fn extract_bearer(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

pub struct RegistrationResult {
    pub success: bool,
    pub message: &'static str,
}

pub struct LoginResult {
    pub success: bool,
    pub message: &'static str,
    pub token: Option<String>,
}

/// Password hashing and bearer-token issuance/verification. Holds only the
/// out-of-band signing secret; every database lookup is routed through the
/// `DataService` passed into each call, never through global state.
pub struct Authenticator {
    jwt_secret: Vec<u8>,
}

impl Authenticator {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self { jwt_secret: jwt_secret.into() }
    }

    pub async fn register(
        &self,
        data: &DataService,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<RegistrationResult> {
        if !(3..=16).contains(&display_name.chars().count()) {
            return Err(InternalError::ValidationFailed {
                field: "displayName",
                reason: "Display name must be between 3 and 16 characters",
            }
            .into());
        }

        if data.find_player_by_email(email).await?.is_some() {
            return Err(InternalError::Conflict { reason: "A user with this email already exists." }.into());
        }
        if data.find_player_by_display_name(display_name).await?.is_some() {
            return Err(InternalError::Conflict { reason: "A user with this display name already exists." }.into());
        }

        let password_hash = self.hash_password(password)?;
        let player = Player::new(email, display_name, &password_hash);
        data.players.insert_one(&player).await?;

        Ok(RegistrationResult { success: true, message: "Account created successfully." })
    }

    pub async fn login(&self, data: &DataService, email: &str, password: &str) -> Result<LoginResult> {
        let player = match data.find_player_by_email(email).await? {
            Some(p) => p,
            // Deliberately identical to a password mismatch: no user-existence oracle.
            None => return Err(InternalError::InvalidCredentials.into()),
        };

        if !self.verify_password(password, &player.password_hash) {
            return Err(InternalError::InvalidCredentials.into());
        }

        let token = self.create_token(player.id, &player.email)?;
        Ok(LoginResult { success: true, message: "Login successful.", token: Some(token) })
    }

    pub fn create_token(&self, user_id: Id<Player>, email: &str) -> Result<String> {
        let now = Time::now();
        let claims = Claims {
            user_id,
            email: email.to_string(),
            iss: TOKEN_ISSUER.to_string(),
            iat: now.0.timestamp(),
            exp: now.plus_hours(TOKEN_LIFETIME_HOURS).0.timestamp(),
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(&self.jwt_secret)).map_err(Into::into)
    }

    pub fn verify(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[TOKEN_ISSUER]);
        let data = decode::<Claims>(token, &DecodingKey::from_secret(&self.jwt_secret), &validation)?;
        Ok(data.claims)
    }

    fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored_hash) else { return false };
        Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_do_not_round_trip_to_plaintext() {
        let auth = Authenticator::new("test-secret");
        let hash = auth.hash_password("pass1234").unwrap();
        assert_ne!(hash, "pass1234");
        assert!(auth.verify_password("pass1234", &hash));
        assert!(!auth.verify_password("wrong", &hash));
    }

    #[test]
    fn tokens_round_trip_and_expire_in_24h() {
        let auth = Authenticator::new("test-secret");
        let id: Id<Player> = Id::new();
        let token = auth.create_token(id, "a@b.c").unwrap();
        let claims = auth.verify(&token).unwrap();
        assert_eq!(claims.user_id, id);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn tampered_token_fails_verification() {
        let auth = Authenticator::new("test-secret");
        let other = Authenticator::new("other-secret");
        let id: Id<Player> = Id::new();
        let token = auth.create_token(id, "a@b.c").unwrap();
        assert!(other.verify(&token).is_err());
    }
}
