//! Client configuration, stored as JSON under `~/holochat/`.

mod schema;

pub use schema::Config;
