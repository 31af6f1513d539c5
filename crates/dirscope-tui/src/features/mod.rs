pub mod details;
pub mod listing;
