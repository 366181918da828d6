pub mod messages;
pub mod state;
