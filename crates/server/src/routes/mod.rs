pub mod analyze;
pub mod detect;
pub mod health;
