pub mod app;
pub mod config;
pub mod provider;
pub mod search;
pub mod storage;
pub mod swapi;
pub mod ui;
