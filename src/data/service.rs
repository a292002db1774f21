use mongodb::{Client, Database};

use super::collection::TypedCollection;
use super::models::{
    AbilityReference, AnimeReference, CardObject, CardReference, CharacterReference, ItemReference, MangaReference,
    Player,
};
use super::query::Query;
use crate::lib::id::Id;
use crate::lib::Result;

/// The names the entities are persisted under.
mod collection_names {
    pub const PLAYERS: &str = "players";
    pub const CARD_REFERENCES: &str = "card_references";
    pub const CARD_OBJECTS: &str = "card_objects";
    pub const ABILITY_REFERENCES: &str = "card-abilities";
    pub const ITEM_REFERENCES: &str = "item_references";
    pub const CHARACTER_REFERENCES: &str = "character_references";
    pub const ANIME_REFERENCES: &str = "anime_references";
    pub const MANGA_REFERENCES: &str = "manga_references";
}

/// Centralizes every document-store collection the core touches and the
/// canned queries handlers reuse across the HTTP and chat surfaces. This is
/// the crate's only point of contact with the driver: no other module
/// imports `mongodb` directly.
#[derive(Clone)]
pub struct DataService {
    pub players: TypedCollection<Player>,
    pub card_references: TypedCollection<CardReference>,
    pub card_objects: TypedCollection<CardObject>,
    pub ability_references: TypedCollection<AbilityReference>,
    pub item_references: TypedCollection<ItemReference>,
    pub character_references: TypedCollection<CharacterReference>,
    pub anime_references: TypedCollection<AnimeReference>,
    pub manga_references: TypedCollection<MangaReference>,
}

impl DataService {
    pub async fn connect(uri: &str, db_name: &str) -> mongodb::error::Result<Self> {
        let client = Client::with_uri_str(uri).await?;
        Ok(Self::from_database(client.database(db_name)))
    }

    pub fn from_database(db: Database) -> Self {
        use collection_names::*;
        Self {
            players: TypedCollection::new(db.collection(PLAYERS)),
            card_references: TypedCollection::new(db.collection(CARD_REFERENCES)),
            card_objects: TypedCollection::new(db.collection(CARD_OBJECTS)),
            ability_references: TypedCollection::new(db.collection(ABILITY_REFERENCES)),
            item_references: TypedCollection::new(db.collection(ITEM_REFERENCES)),
            character_references: TypedCollection::new(db.collection(CHARACTER_REFERENCES)),
            anime_references: TypedCollection::new(db.collection(ANIME_REFERENCES)),
            manga_references: TypedCollection::new(db.collection(MANGA_REFERENCES)),
        }
    }

    /// Finds the player owning `discord_id`, auto-provisioning a fresh
    /// account on first contact — the chat surface never sees a "no such
    /// player" error for an otherwise-valid Discord user.
    pub async fn find_or_create_player_by_discord_id(&self, discord_id: i64) -> Result<Player> {
        let query = Query::new().eq("discordId", discord_id);
        if let Some(player) = self.players.find_one(query).await? {
            return Ok(player);
        }
        let player = Player::with_discord_id(discord_id);
        self.players.insert_one(&player).await?;
        Ok(player)
    }

    pub async fn find_player_by_email(&self, email: &str) -> Result<Option<Player>> {
        self.players.find_one(Query::new().eq("email", email)).await
    }

    pub async fn find_player_by_display_name(&self, display_name: &str) -> Result<Option<Player>> {
        self.players.find_one(Query::new().eq("displayName", display_name)).await
    }

    pub async fn find_player_by_id(&self, id: Id<Player>) -> Result<Option<Player>> {
        self.players.find_one(Query::by_id(id)).await
    }
}
