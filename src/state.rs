/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 * - store client は起動時に一度だけ作り、全 handler で共有する
 * - Clone 前提で持つ (内部は Arc)
 */
use std::sync::Arc;

use crate::repos::dog_repo::DogRepo;

#[derive(Clone)]
pub struct AppState {
    pub dogs: Arc<dyn DogRepo>,
}

impl AppState {
    pub fn new(dogs: Arc<dyn DogRepo>) -> Self {
        Self { dogs }
    }
}
