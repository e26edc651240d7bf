//! Synchronous client core for a REST todo service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). `TodoListController` keeps
//! a displayed list in step with the server by following every mutation
//! with a full reload, executing requests through a host-supplied
//! `Transport`.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`.
//! - Each remote operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod controller;
pub mod error;
pub mod http;
pub mod types;

pub use client::TodoClient;
pub use controller::{TodoListController, TodoListState};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use types::{CreateTodo, TodoId, TodoItem, UpdateTodo};
