pub mod codec;
pub mod handlers;
pub mod models;
pub mod service;
pub mod transfer;
