pub mod listing;
pub mod search;
pub mod status_bar;
