pub mod config;
pub mod form;
pub mod verdict;
