pub mod aggregate;
pub mod collect;
pub mod models;
pub mod repair;
pub mod sanitize;
pub mod sources;
