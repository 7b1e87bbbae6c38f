// Bookmark Hub services
// Services provide settings storage, admin authentication and the crypto it relies on.

pub mod auth_gate;
pub mod crypto_service;
pub mod settings_engine;
