//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod access_log_repo;
pub mod door_repo;
pub mod face_embedding_repo;
pub mod user_repo;

pub use access_log_repo::AccessLogRepo;
pub use door_repo::DoorRepo;
pub use face_embedding_repo::FaceEmbeddingRepo;
pub use user_repo::UserRepo;
