//! Terminal render surface for the todo sync loop.
//!
//! Wires a `TodoListController` to a ureq transport and draws its state as
//! plain text, either for a single command or an interactive session.

pub mod render;
pub mod shell;
pub mod transport;

pub use render::render;
pub use transport::UreqTransport;
