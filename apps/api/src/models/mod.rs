pub mod chat;
pub mod scenario;
