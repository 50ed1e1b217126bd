/**
 * Responsibility
 *  - handler が受け取る入力型 (path id / JSON object body) を束ねる
 */
mod dog_id;
mod json_object;

pub use dog_id::DogId;
pub use json_object::JsonObject;
