mod admin;
mod auth;
mod books;
mod client;
mod loans;
mod types;

pub use client::{Access, ApiClient};
pub use types::*;
