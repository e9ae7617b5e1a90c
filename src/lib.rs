//! Taskboard: a Kanban board backend.
//!
//! Boards are aggregates holding ordered columns of cards, each card with
//! checklist tasks and comments, plus a member list. The crate exposes the
//! aggregate, its services, and an HTTP adapter.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage and user lookups
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//!
//! # Modules
//!
//! - [`board`]: Board aggregate, ports, adapters, and services
//! - [`api`]: axum router and error mapping
//! - [`config`]: Environment-driven configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod api;
pub mod board;
pub mod config;
pub mod telemetry;
