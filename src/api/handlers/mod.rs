pub mod dogs;
pub mod root;
