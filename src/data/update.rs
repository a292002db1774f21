use bson::{doc, Bson, Document};
use serde::Serialize;

/// A composable update document, mirroring the `set`/`inc`/`push`/`pull`/
/// `addToSet` vocabulary named by the data-service design. Every method
/// returns `self`, so a caller can combine operators (e.g. `push` a new card
/// while `inc`-rementing a counter) into one round trip.
#[derive(Debug, Default, Clone)]
pub struct Update {
    set: Document,
    inc: Document,
    push: Document,
    pull: Document,
    add_to_set: Document,
}

fn to_bson<T: Serialize>(value: T) -> Bson {
    bson::to_bson(&value).expect("value is representable as BSON")
}

impl Update {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<T: Serialize>(mut self, field: &str, value: T) -> Self {
        self.set.insert(field, to_bson(value));
        self
    }

    pub fn inc(mut self, field: &str, delta: i64) -> Self {
        self.inc.insert(field, delta);
        self
    }

    pub fn push<T: Serialize>(mut self, field: &str, value: T) -> Self {
        self.push.insert(field, to_bson(value));
        self
    }

    pub fn pull<T: Serialize>(mut self, field: &str, value: T) -> Self {
        self.pull.insert(field, to_bson(value));
        self
    }

    pub fn add_to_set<T: Serialize>(mut self, field: &str, value: T) -> Self {
        self.add_to_set.insert(field, to_bson(value));
        self
    }

    pub fn into_document(self) -> Document {
        let mut doc = Document::new();
        if !self.set.is_empty() {
            doc.insert("$set", self.set);
        }
        if !self.inc.is_empty() {
            doc.insert("$inc", self.inc);
        }
        if !self.push.is_empty() {
            doc.insert("$push", self.push);
        }
        if !self.pull.is_empty() {
            doc.insert("$pull", self.pull);
        }
        if !self.add_to_set.is_empty() {
            doc.insert("$addToSet", self.add_to_set);
        }
        doc
    }
}

impl From<Update> for Document {
    fn from(update: Update) -> Self {
        update.into_document()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combines_multiple_operators_into_one_document() {
        let update = Update::new().inc("numAcquired", 1).set("lastSalePrice", 10);
        let doc = Document::from(update);
        assert_eq!(doc.get_document("$inc").unwrap().get_i64("numAcquired").unwrap(), 1);
        assert_eq!(doc.get_document("$set").unwrap().get_i32("lastSalePrice").unwrap(), 10);
    }

    #[test]
    fn empty_update_has_no_operator_keys() {
        let doc = Document::from(Update::new());
        assert!(doc.is_empty());
    }
}
