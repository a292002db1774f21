use std::env;

/// Startup configuration, read once in `main` and passed down by value.
/// `mongo_uri` and `jwt_secret` have no sane default: their absence is a
/// fatal misconfiguration and `from_env` panics rather than booting into a
/// broken state, matching the teacher's `create_pool` posture.
pub struct Config {
    pub listening_url: String,
    pub mongo_uri: String,
    pub mongo_db: String,
    pub jwt_secret: String,
    pub discord_token: Option<String>,
    pub transport_port: u16,
    pub card_image_base_url: String,
    pub worker_threads: usize,
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn require_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} must be set"))
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            listening_url: get_env("LISTENING_URL", "127.0.0.1:8080"),
            mongo_uri: require_env("MONGO_URI"),
            mongo_db: get_env("MONGO_DB", "cardforge"),
            jwt_secret: require_env("JWT_SECRET"),
            discord_token: env::var("DISCORD_TOKEN").ok(),
            transport_port: get_env("TRANSPORT_PORT", "9000").parse().expect("TRANSPORT_PORT must be a valid port number"),
            card_image_base_url: get_env("CARD_IMAGE_BASE_URL", "https://cdn.cardforge.example/cards/"),
            worker_threads: get_env("WORKER_THREADS", "4").parse().expect("WORKER_THREADS must be a positive integer"),
        }
    }
}
