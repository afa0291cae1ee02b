pub mod api_connection;
pub mod assistant;
pub mod cli;
pub mod config;
pub mod recipe_search;
pub mod store;
pub mod translator;
