use serde::{Deserialize, Serialize};

use crate::lib::{id::Id, time::Time};

/// A catalog tier, from most to least common. Stored as its lowercase name so
/// that the document store's contents stay human-readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardTier {
    Champion,
    Exalted,
    Celestial,
    Divine,
    Ascendant,
    Genesis,
    Voidborn,
    Omega,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemType {
    Default,
    Border,
    NameTag,
    HpUpgrade,
    ApUpgrade,
    InsuranceCard,
}

/// Marker used only so `Id<Set>` has a distinct type from other reference
/// ids; no `sets` collection is exposed by `DataService`.
pub struct Set;

/// The account and game-state root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(rename = "_id")]
    pub id: Id<Player>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord_id: Option<i64>,
    pub display_name: String,
    pub email: String,
    pub password_hash: String,

    pub cards: Vec<Id<super::models::CardObject>>,
    pub decks: Vec<Vec<Id<super::models::CardObject>>>,
    pub items: Vec<Id<ItemReference>>,

    pub pity_score: i32,
    pub essence: i64,
    pub daily_battle_timer: Time,
    pub daily_free_pack_timer: Time,

    pub friends: Vec<Id<Player>>,
    pub friend_requests_sent: Vec<Id<Player>>,
    pub friend_requests_received: Vec<Id<Player>>,
}

/// The number of decks every player is expected to have; §3 calls for
/// exactly three, created empty on first read if missing.
pub const DECK_COUNT: usize = 3;

impl Player {
    pub fn new(email: &str, display_name: &str, password_hash: &str) -> Self {
        let epoch = Time::epoch();
        Self {
            id: Id::new(),
            discord_id: None,
            display_name: display_name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            cards: Vec::new(),
            decks: vec![Vec::new(); DECK_COUNT],
            items: Vec::new(),
            pity_score: 0,
            essence: 0,
            daily_battle_timer: epoch,
            daily_free_pack_timer: epoch,
            friends: Vec::new(),
            friend_requests_sent: Vec::new(),
            friend_requests_received: Vec::new(),
        }
    }

    pub fn with_discord_id(discord_id: i64) -> Self {
        let mut player = Self::new("", "", "");
        player.discord_id = Some(discord_id);
        player
    }
}

/// A catalog entry shared across all players: one per card design.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardReference {
    #[serde(rename = "_id")]
    pub id: Id<CardReference>,
    pub name: String,
    pub character_id: Id<CharacterReference>,
    pub set_id: Id<Set>,
    pub tier: CardTier,
    pub image: String,
    pub ability_id: Id<AbilityReference>,
    pub num_acquired: i32,
    pub last_sale_price: i32,
}

impl CardReference {
    /// Card images are a fixed base URL concatenated with the owning
    /// character's id; clients treat the result as opaque.
    pub fn image_url(&self, base_url: &str) -> String {
        format!("{}{}", base_url, self.character_id)
    }
}

/// A single owned instance of a `CardReference`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardObject {
    #[serde(rename = "_id")]
    pub id: Id<CardObject>,
    pub card_reference_id: Id<CardReference>,
    pub owner_id: Id<Player>,
    pub number: i32,
    pub attack_points: i32,
    pub health_points: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_border: Option<Id<ItemReference>>,
    pub owner_history: Vec<Id<Player>>,
    pub last_acquisition_date: Time,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityReference {
    #[serde(rename = "_id")]
    pub id: Id<AbilityReference>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemReference {
    #[serde(rename = "_id")]
    pub id: Id<ItemReference>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ItemType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterReference {
    #[serde(rename = "_id")]
    pub id: Id<CharacterReference>,
    pub uuid: String,
    pub mal_id: i32,
    pub name: String,
    pub name_kanji: String,
    pub favorites: i32,
    pub about: String,
    pub image: String,
    pub nicknames: Vec<String>,
    pub anime_refs: Vec<Id<AnimeReference>>,
    pub manga_refs: Vec<Id<MangaReference>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeReference {
    #[serde(rename = "_id")]
    pub id: Id<AnimeReference>,
    pub uuid: String,
    pub mal_id: i32,
    pub url: String,
    pub title: String,
    pub episodes: i32,
    pub status: String,
    pub score: f64,
    pub synopsis: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaReference {
    #[serde(rename = "_id")]
    pub id: Id<MangaReference>,
    pub uuid: String,
    pub mal_id: i32,
    pub url: String,
    pub title: String,
    pub chapters: i32,
    pub volumes: i32,
    pub status: String,
    pub score: f64,
    pub synopsis: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_has_three_empty_decks() {
        let player = Player::new("a@b.c", "Alice", "hash");
        assert_eq!(player.decks.len(), DECK_COUNT);
        assert!(player.decks.iter().all(Vec::is_empty));
    }
}
