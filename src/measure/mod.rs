pub mod breathing;
pub mod health;
pub mod history;
pub mod simulator;
