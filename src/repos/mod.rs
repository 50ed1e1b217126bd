pub mod dog_repo;
pub mod error;

#[cfg(test)]
pub mod memory;
