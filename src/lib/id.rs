use std::{
    fmt::{self, Debug, Display, Formatter},
    hash::{Hash, Hasher},
    marker::PhantomData,
    str::FromStr,
};

use bson::oid::{self, ObjectId};
use serde::{Deserialize, Serialize};

/// A type-tagged wrapper around the document store's opaque object id.
///
/// `T` is only ever used as a marker, so an `Id<Player>` can never be mixed up
/// with an `Id<CardObject>` at compile time even though both are 12-byte
/// object ids underneath. Serializes as the canonical 24-hex-digit string over
/// JSON and as a native object id over BSON.
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T> {
    inner: ObjectId,
    #[serde(skip)]
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new() -> Self {
        Self { inner: ObjectId::new(), _marker: PhantomData }
    }

    pub const fn from_object_id(inner: ObjectId) -> Self {
        Self { inner, _marker: PhantomData }
    }

    pub const fn inner(&self) -> ObjectId {
        self.inner
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Id<T>> for ObjectId {
    fn from(id: Id<T>) -> Self {
        id.inner
    }
}

impl<T> From<ObjectId> for Id<T> {
    fn from(inner: ObjectId) -> Self {
        Self::from_object_id(inner)
    }
}

impl<T> FromStr for Id<T> {
    type Err = oid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s).map(Self::from_object_id)
    }
}

impl<T> Display for Id<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

impl<T> Debug for Id<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.inner, f)
    }
}

// Clone/Copy/PartialEq/Eq/Hash are implemented by hand because `T` is only a
// marker and must not be required to implement them itself (see the same
// rationale on the teacher's `Uuid<T>`).

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker;

    #[test]
    fn round_trips_through_string() {
        let id: Id<Marker> = Id::new();
        let parsed: Id<Marker> = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn distinct_ids_are_not_equal() {
        let a: Id<Marker> = Id::new();
        let b: Id<Marker> = Id::new();
        assert_ne!(a, b);
    }
}
