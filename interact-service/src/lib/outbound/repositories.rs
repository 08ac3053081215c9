pub mod conversation;
pub mod revoked_token;
pub mod user;

pub use conversation::PostgresConversationRepository;
pub use revoked_token::PostgresRevocationStore;
pub use user::PostgresUserRepository;
