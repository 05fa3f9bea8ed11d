//! Core type system and domain definitions
//!
//! This module provides the central type definitions for the board data
//! layer. Heterogeneous GitHub payloads (REST issues and pulls, GraphQL
//! discussions) are normalized into the single [`BoardItem`] shape here;
//! everything downstream of the fetch layer consumes only these types.

pub mod item;
pub mod repository;

pub use item::*;
pub use repository::*;
