pub mod analytics;
pub mod providers;
pub mod search_controller;
