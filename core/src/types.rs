//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.

use serde::{Deserialize, Serialize};

/// Identifier assigned by the service. The client never invents one.
pub type TodoId = u64;

/// A single todo item as returned by the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
}

/// Request payload for creating a new todo. `id` and `completed` are left
/// to the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTodo {
    pub title: String,
}

/// Request payload for updating a todo. The client only ever changes the
/// completion flag; titles are immutable after creation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTodo {
    pub completed: bool,
}
