use serde::Serialize;

use crate::data::{
    models::{CardObject, CardReference, Player},
    query::Query,
    service::DataService,
    update::Update,
};
use crate::lib::{id::Id, time::Time, Result};

const PACK_SIZE: u32 = 1;
const NOT_ENOUGH_CARDS_MESSAGE: &str = "Not enough unique cards";

#[derive(Debug, Serialize)]
pub struct PackOpeningResult {
    pub success: bool,
    pub message: String,
    pub opened_references: Vec<CardReference>,
    pub opened_objects: Vec<CardObject>,
}

impl PackOpeningResult {
    fn failure(message: &str) -> Self {
        Self { success: false, message: message.to_string(), opened_references: Vec::new(), opened_objects: Vec::new() }
    }
}

fn not_enough_cards(drawn: usize, requested: u32) -> bool {
    drawn < requested as usize
}

/// The game's one mutating transaction of consequence: draws `PACK_SIZE`
/// random card references and mints an owned `CardObject` for each.
///
/// Unlike the prototype this is modeled on, the reference's counter is
/// incremented *first*, atomically, via `find_one_and_update`; the returned
/// post-image supplies the new object's issue `number`. This makes the
/// hazard "a ghost increment with no matching object" (benign) rather than
/// "two objects minted with the same issue number" (a broken invariant) if
/// the worker is interrupted between steps.
pub async fn open_pack_for_player(data: &DataService, player: &Player) -> Result<PackOpeningResult> {
    let drawn = data.card_references.find_random(Query::new(), PACK_SIZE, false).await?;
    if not_enough_cards(drawn.len(), PACK_SIZE) {
        return Ok(PackOpeningResult::failure(NOT_ENOUGH_CARDS_MESSAGE));
    }

    let mut opened_references = Vec::with_capacity(drawn.len());
    let mut opened_objects = Vec::with_capacity(drawn.len());

    for reference in drawn {
        let updated_reference = data
            .card_references
            .find_one_and_update(Query::by_id(reference.id), Update::new().inc("numAcquired", 1))
            .await?
            .unwrap_or(reference);

        let card_object = CardObject {
            id: Id::new(),
            card_reference_id: updated_reference.id,
            owner_id: player.id,
            number: updated_reference.num_acquired,
            attack_points: 0,
            health_points: 0,
            custom_border: None,
            owner_history: vec![player.id],
            last_acquisition_date: Time::now(),
        };

        data.card_objects.insert_one(&card_object).await?;
        data.players.update_one(Query::by_id(player.id), Update::new().push("cards", card_object.id)).await?;

        opened_references.push(updated_reference);
        opened_objects.push(card_object);
    }

    Ok(PackOpeningResult {
        success: true,
        message: "Pack opened successfully!".to_string(),
        opened_references,
        opened_objects,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_an_undersupplied_draw() {
        assert!(not_enough_cards(0, PACK_SIZE));
        assert!(!not_enough_cards(1, PACK_SIZE));
    }

    #[test]
    fn failure_result_carries_no_opened_cards() {
        let result = PackOpeningResult::failure(NOT_ENOUGH_CARDS_MESSAGE);
        assert!(!result.success);
        assert_eq!(result.message, NOT_ENOUGH_CARDS_MESSAGE);
        assert!(result.opened_objects.is_empty());
        assert!(result.opened_references.is_empty());
    }

    /// Needs `MONGO_URI` pointed at a scratch database. Seeds one
    /// `CardReference` with `numAcquired = 0`, opens a pack for a fresh
    /// player, and checks the scenario this module is grounded on: the
    /// reference's counter advances to 1, exactly one `CardObject` is
    /// minted with `number = 1` and `ownerId` equal to the player, and the
    /// player's `cards` list grows by one.
    #[tokio::test]
    #[ignore]
    async fn opening_a_pack_mints_one_card_and_advances_the_counter() {
        let data = DataService::connect(&std::env::var("MONGO_URI").unwrap(), "cardforge_test").await.unwrap();

        let reference = CardReference {
            id: Id::new(),
            name: "Luffy".to_string(),
            character_id: Id::new(),
            set_id: Id::new(),
            tier: crate::data::models::CardTier::Champion,
            image: "luffy.png".to_string(),
            ability_id: Id::new(),
            num_acquired: 0,
            last_sale_price: 0,
        };
        data.card_references.insert_one(&reference).await.unwrap();

        let player = Player::new("pack-open@example.com", "PackOpener", "hash");
        data.players.insert_one(&player).await.unwrap();

        let result = open_pack_for_player(&data, &player).await.unwrap();

        assert!(result.success);
        assert_eq!(result.opened_objects.len(), 1);
        assert_eq!(result.opened_objects[0].number, 1);
        assert_eq!(result.opened_objects[0].owner_id, player.id);

        let updated_reference = data.card_references.find_one(Query::by_id(reference.id)).await.unwrap().unwrap();
        assert_eq!(updated_reference.num_acquired, 1);

        let updated_player = data.find_player_by_id(player.id).await.unwrap().unwrap();
        assert_eq!(updated_player.cards.len(), 1);
    }
}
