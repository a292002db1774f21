use bson::{doc, Bson, Document};
use serde::Serialize;

use crate::lib::id::Id;

/// A composable query filter, mirroring the `eq`/`ne`/`in`/`regex`/`or`
/// vocabulary named by the data-service design. Each method returns `self`
/// so calls chain; `into_document` (or the `From<Query> for Document` impl)
/// produces the filter actually sent to the driver.
#[derive(Debug, Default, Clone)]
pub struct Query(Document);

fn to_bson<T: Serialize>(value: T) -> Bson {
    bson::to_bson(&value).expect("value is representable as BSON")
}

impl Query {
    pub fn new() -> Self {
        Self(Document::new())
    }

    pub fn eq<T: Serialize>(mut self, field: &str, value: T) -> Self {
        self.0.insert(field, to_bson(value));
        self
    }

    pub fn ne<T: Serialize>(mut self, field: &str, value: T) -> Self {
        self.0.insert(field, doc! { "$ne": to_bson(value) });
        self
    }

    pub fn in_<T: Serialize>(mut self, field: &str, values: Vec<T>) -> Self {
        let values: Vec<Bson> = values.into_iter().map(to_bson).collect();
        self.0.insert(field, doc! { "$in": values });
        self
    }

    pub fn nin<T: Serialize>(mut self, field: &str, values: Vec<T>) -> Self {
        let values: Vec<Bson> = values.into_iter().map(to_bson).collect();
        self.0.insert(field, doc! { "$nin": values });
        self
    }

    pub fn gt<T: Serialize>(mut self, field: &str, value: T) -> Self {
        self.0.insert(field, doc! { "$gt": to_bson(value) });
        self
    }

    pub fn gte<T: Serialize>(mut self, field: &str, value: T) -> Self {
        self.0.insert(field, doc! { "$gte": to_bson(value) });
        self
    }

    pub fn lt<T: Serialize>(mut self, field: &str, value: T) -> Self {
        self.0.insert(field, doc! { "$lt": to_bson(value) });
        self
    }

    pub fn lte<T: Serialize>(mut self, field: &str, value: T) -> Self {
        self.0.insert(field, doc! { "$lte": to_bson(value) });
        self
    }

    pub fn exists(mut self, field: &str, exists: bool) -> Self {
        self.0.insert(field, doc! { "$exists": exists });
        self
    }

    /// Case-insensitive by default; pass flags verbatim (e.g. `""` for a
    /// case-sensitive match) as Mongo's `$regex`/`$options` expect them.
    pub fn regex(mut self, field: &str, pattern: &str, flags: &str) -> Self {
        self.0.insert(field, doc! { "$regex": pattern, "$options": flags });
        self
    }

    pub fn or(subqueries: Vec<Query>) -> Self {
        let clauses: Vec<Document> = subqueries.into_iter().map(Document::from).collect();
        Self(doc! { "$or": clauses })
    }

    pub fn by_id<T>(id: Id<T>) -> Self {
        Self(doc! { "_id": id.inner() })
    }

    pub fn into_document(self) -> Document {
        self.0
    }
}

impl From<Query> for Document {
    fn from(query: Query) -> Self {
        query.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eq_and_by_id_shapes() {
        let q = Query::new().eq("email", "a@b.c");
        assert_eq!(Document::from(q), doc! { "email": "a@b.c" });
    }

    #[test]
    fn or_wraps_subqueries() {
        let q = Query::or(vec![Query::new().eq("a", 1), Query::new().eq("b", 2)]);
        let doc = Document::from(q);
        assert!(doc.contains_key("$or"));
    }

    #[test]
    fn regex_includes_options() {
        let q = Query::new().regex("displayName", "^ali", "i");
        let doc = Document::from(q);
        let inner = doc.get_document("displayName").unwrap();
        assert_eq!(inner.get_str("$regex").unwrap(), "^ali");
        assert_eq!(inner.get_str("$options").unwrap(), "i");
    }
}
