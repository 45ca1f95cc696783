pub mod action;
pub mod controller;
pub mod keys;
pub mod render;
