//! Kanban board aggregate.
//!
//! A board owns its columns, cards, checklist tasks, comments, and member
//! list. Every change loads the whole board, applies one mutation, and writes
//! it back under an optimistic version check. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
