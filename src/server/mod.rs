pub mod extract;
pub mod health;
pub mod pages;
pub mod routes;
pub mod server;
