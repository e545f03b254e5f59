mod auth;
mod cache;

pub use auth::CredentialsManager;
pub use auth::is_expired;
pub use cache::CacheCategory;
pub use cache::CacheError;
pub use cache::CacheManager;
