pub mod credential;
pub mod credential_cache;
pub mod roster_cache;
