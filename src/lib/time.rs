use bson::DateTime as BsonDateTime;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A point in time, serialized as a BSON native `date`/`timestamp` type over
/// the document store and as an RFC3339 string over JSON.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Time(pub DateTime<Utc>);

impl Time {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// A timer that has already elapsed, used as the zero-value for the
    /// daily battle/pack timers on a freshly created player.
    pub fn epoch() -> Self {
        Self(DateTime::<Utc>::UNIX_EPOCH)
    }

    pub fn plus_hours(self, hours: i64) -> Self {
        Self(self.0 + Duration::hours(hours))
    }

    pub fn has_elapsed(self) -> bool {
        Utc::now() >= self.0
    }
}

impl From<DateTime<Utc>> for Time {
    fn from(time: DateTime<Utc>) -> Self {
        Self(time)
    }
}

impl From<Time> for DateTime<Utc> {
    fn from(time: Time) -> Self {
        time.0
    }
}

impl From<Time> for BsonDateTime {
    fn from(time: Time) -> Self {
        BsonDateTime::from_chrono(time.0)
    }
}

impl From<BsonDateTime> for Time {
    fn from(time: BsonDateTime) -> Self {
        Self(time.to_chrono())
    }
}

impl From<Time> for bson::Bson {
    fn from(time: Time) -> Self {
        bson::Bson::DateTime(time.into())
    }
}
