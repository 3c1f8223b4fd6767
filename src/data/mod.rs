//! Database repository layer.
//!
//! Repositories wrap SeaORM queries for each stored document and convert entity
//! models into domain models at the boundary. The store contract is deliberately
//! small: look a record up by key, upsert it, or save a modified copy back.

pub mod command_stats;
pub mod gate_config;

#[cfg(test)]
mod test;
