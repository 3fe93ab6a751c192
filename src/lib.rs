pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
pub mod planner;
pub mod preferences;
pub mod render;
pub mod request;
pub mod state;
pub mod timetable;
pub mod utils;
