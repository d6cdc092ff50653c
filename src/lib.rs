pub mod perfectaire;
pub mod smartir;
