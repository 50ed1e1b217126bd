//! In-memory `DogRepo` implementations for handler tests.
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::repos::dog_repo::{DogChanges, DogPatch, DogRepo, DogRow, NewDog};
use crate::repos::error::RepoError;

#[derive(Debug, Default)]
pub struct MemoryDogRepo {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    rows: Vec<DogRow>,
}

#[async_trait]
impl DogRepo for MemoryDogRepo {
    async fn list(&self) -> Result<Vec<DogRow>, RepoError> {
        Ok(self.inner.lock().await.rows.clone())
    }

    async fn get(&self, id: i64) -> Result<Option<DogRow>, RepoError> {
        let inner = self.inner.lock().await;
        Ok(inner.rows.iter().find(|r| r.id == id).cloned())
    }

    async fn create(&self, dog: &NewDog) -> Result<DogRow, RepoError> {
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        let row = DogRow {
            id: inner.next_id,
            name: dog.name.clone(),
            description: dog.description.clone(),
            age: dog.age,
            breed: dog.breed.clone(),
        };
        inner.rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, changes: &DogChanges) -> Result<DogRow, RepoError> {
        let patch = DogPatch::from_changes(changes)?;
        let mut inner = self.inner.lock().await;
        let row = inner
            .rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(RepoError::NotFound)?;
        apply(patch, row);
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> Result<DogRow, RepoError> {
        let mut inner = self.inner.lock().await;
        let pos = inner
            .rows
            .iter()
            .position(|r| r.id == id)
            .ok_or(RepoError::NotFound)?;
        Ok(inner.rows.remove(pos))
    }
}

fn apply(patch: DogPatch, row: &mut DogRow) {
    if let Some(name) = patch.name {
        row.name = name;
    }
    if let Some(description) = patch.description {
        row.description = description;
    }
    if let Some(age) = patch.age {
        row.age = age;
    }
    if let Some(breed) = patch.breed {
        row.breed = breed;
    }
}

/// Every call fails the way an unreachable database would.
#[derive(Debug, Default)]
pub struct FailingDogRepo;

#[async_trait]
impl DogRepo for FailingDogRepo {
    async fn list(&self) -> Result<Vec<DogRow>, RepoError> {
        Err(RepoError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn get(&self, _id: i64) -> Result<Option<DogRow>, RepoError> {
        Err(RepoError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn create(&self, _dog: &NewDog) -> Result<DogRow, RepoError> {
        Err(RepoError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn update(&self, _id: i64, _changes: &DogChanges) -> Result<DogRow, RepoError> {
        Err(RepoError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn delete(&self, _id: i64) -> Result<DogRow, RepoError> {
        Err(RepoError::Db(sqlx::Error::PoolTimedOut))
    }
}
