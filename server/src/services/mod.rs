pub mod account;
pub mod credential;
