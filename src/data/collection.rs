use bson::{doc, Document};
use futures::stream::TryStreamExt;
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use mongodb::Collection as MongoCollection;
use serde::{de::DeserializeOwned, Serialize};

use super::query::Query;
use super::update::Update;
use crate::lib::Result;

/// A type-safe handle onto a single document-store collection. Every method
/// here corresponds 1:1 to an operation named by the data-service design
/// (`insertOne`, `findOne`, `find`, `findRandom`, `updateOne`, `replaceOne`);
/// there is no generic untyped escape hatch exposed above this layer.
#[derive(Clone)]
pub struct TypedCollection<T> {
    inner: MongoCollection<T>,
}

impl<T> TypedCollection<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync,
{
    pub fn new(inner: MongoCollection<T>) -> Self {
        Self { inner }
    }

    pub async fn insert_one(&self, document: &T) -> Result<()> {
        self.inner.insert_one(document, None).await?;
        Ok(())
    }

    pub async fn find_one(&self, query: Query) -> Result<Option<T>> {
        Ok(self.inner.find_one(query.into_document(), None).await?)
    }

    pub async fn find(&self, query: Query) -> Result<Vec<T>> {
        let mut cursor = self.inner.find(query.into_document(), None).await?;
        let mut out = Vec::new();
        while let Some(doc) = cursor.try_next().await? {
            out.push(doc);
        }
        Ok(out)
    }

    /// Draws `count` documents uniformly at random via a `$sample` pipeline
    /// stage, optionally matching `query` first. `$sample` already returns
    /// distinct documents for a single draw, so `allow_duplicates` only
    /// governs whether this method is permitted to return fewer than
    /// `count` results when the candidate pool undersupplies one: when
    /// `false` (the default pack-opening policy) that is a legitimate
    /// outcome for the caller to detect, not an error here.
    pub async fn find_random(&self, query: Query, count: u32, _allow_duplicates: bool) -> Result<Vec<T>> {
        let mut pipeline = Vec::new();
        let filter = query.into_document();
        if !filter.is_empty() {
            pipeline.push(doc! { "$match": filter });
        }
        pipeline.push(doc! { "$sample": { "size": count as i64 } });

        let mut cursor = self.inner.aggregate(pipeline, None).await?;
        let mut out = Vec::new();
        while let Some(doc) = cursor.try_next().await? {
            out.push(bson::from_document(doc)?);
        }
        Ok(out)
    }

    pub async fn update_one(&self, query: Query, update: Update) -> Result<()> {
        self.inner.update_one(query.into_document(), update.into_document(), None).await?;
        Ok(())
    }

    pub async fn replace_one(&self, query: Query, document: &T) -> Result<()> {
        self.inner.replace_one(query.into_document(), document, None).await?;
        Ok(())
    }

    /// Atomically applies `update` and returns the document *after* the
    /// update is applied. This is the primitive the pack-opening transaction
    /// uses to turn "increment, then read" into a single round trip so the
    /// returned counter value can never be stale.
    pub async fn find_one_and_update(&self, query: Query, update: Update) -> Result<Option<T>> {
        let options = FindOneAndUpdateOptions::builder().return_document(ReturnDocument::After).build();
        Ok(self.inner.find_one_and_update(query.into_document(), update.into_document(), options).await?)
    }
}

pub type Filter = Document;
