pub mod access;
pub mod health;
pub mod platform;
pub mod security;
pub mod subscriptions;
