#![recursion_limit = "512"]

#[macro_use]
extern crate diesel;
#[macro_use]
extern crate diesel_migrations;

pub mod api;
pub mod db;
pub mod qr;
pub mod session;
pub mod verify;

embed_migrations!();
