pub mod cli;
pub mod context;
pub mod controller;
pub mod events;
pub mod logging;
pub mod profile;
pub mod script;
pub mod state;
pub mod ui;
