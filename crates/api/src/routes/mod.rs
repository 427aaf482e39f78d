pub mod health;
pub mod record;
