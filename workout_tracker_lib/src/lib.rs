pub mod config;
pub mod controller;
pub mod coords;
pub mod display;
pub mod error;
pub mod form;
pub mod map_view;
pub mod store;
pub mod workout;
