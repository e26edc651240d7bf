//! Client-side synchronization loop between displayed state and the
//! remote todo collection.
//!
//! # Design
//! Every mutating intent is a "fire the mutation, then reload" pair. The
//! controller never patches an item locally: `items` is only ever replaced
//! wholesale by the result of a successful `load()`, so the display can
//! trail the server by at most one round trip and can never disagree with
//! what the server actually stored.
//!
//! All operations take `&mut self`, which serializes them per controller.
//! A reload therefore cannot be overtaken by an older one.

use tracing::{debug, warn};

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::{CreateTodo, TodoId, TodoItem, UpdateTodo};

/// Everything a render surface needs to draw the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoListState {
    /// Last list the server returned, in server order.
    pub items: Vec<TodoItem>,
    /// Text typed for the next item, not yet submitted.
    pub draft_title: String,
    /// Most recent failure. Cleared by the next successful reload.
    pub error: Option<ApiError>,
}

/// Owns the list state and turns user intents into remote calls.
#[derive(Debug)]
pub struct TodoListController<T> {
    client: TodoClient,
    transport: T,
    state: TodoListState,
}

impl<T: Transport> TodoListController<T> {
    /// Create a controller with empty state. Nothing is fetched until
    /// `load()` is called.
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self {
            client,
            transport,
            state: TodoListState::default(),
        }
    }

    pub fn state(&self) -> &TodoListState {
        &self.state
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.state.items
    }

    pub fn draft_title(&self) -> &str {
        &self.state.draft_title
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.state.error.as_ref()
    }

    /// Look up a displayed item by id.
    pub fn find(&self, id: TodoId) -> Option<&TodoItem> {
        self.state.items.iter().find(|item| item.id == id)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Fetch the whole collection and replace `items` with it.
    ///
    /// On failure the previous items stay on display and the error is kept
    /// in the state as well as returned.
    pub fn load(&mut self) -> Result<(), ApiError> {
        let request = self.client.build_list_todos();
        debug!(url = %request.path, "reloading todo list");
        let response = self.transport.execute(request);
        let parsed = response.and_then(|r| self.client.parse_list_todos(r));
        let items = self.record(parsed)?;
        debug!(count = items.len(), "todo list replaced");
        self.state.items = items;
        self.state.error = None;
        Ok(())
    }

    /// Keystroke update of the pending title.
    pub fn set_draft_title(&mut self, text: impl Into<String>) {
        self.state.draft_title = text.into();
    }

    /// Submit whatever is currently in the draft.
    pub fn submit_draft(&mut self) -> Result<bool, ApiError> {
        let draft = self.state.draft_title.clone();
        self.submit_new_item(&draft)
    }

    /// Create an item with the trimmed `title`, clear the draft, then reload.
    ///
    /// Returns `Ok(false)` without contacting the server when the trimmed
    /// title is empty. The draft is cleared as soon as the server has
    /// answered, whatever the status.
    pub fn submit_new_item(&mut self, title: &str) -> Result<bool, ApiError> {
        let title = title.trim();
        if title.is_empty() {
            debug!("ignoring blank title");
            return Ok(false);
        }
        let input = CreateTodo {
            title: title.to_string(),
        };
        let request = self.client.build_create_todo(&input);
        let request = self.record(request)?;
        let response = self.send(request)?;
        self.state.draft_title.clear();
        let created = self.client.parse_create_todo(response);
        self.finish_mutation(created)?;
        Ok(true)
    }

    /// Ask the server to flip `item.completed`, then reload. The displayed
    /// flag changes only once the reload lands.
    pub fn toggle_completion(&mut self, item: &TodoItem) -> Result<(), ApiError> {
        let update = UpdateTodo {
            completed: !item.completed,
        };
        let request = self.client.build_update_todo(item.id, &update);
        let request = self.record(request)?;
        let response = self.send(request)?;
        let updated = self.client.parse_update_todo(response);
        self.finish_mutation(updated)
    }

    /// Delete the item with `id`, then reload.
    pub fn delete_item(&mut self, id: TodoId) -> Result<(), ApiError> {
        let request = self.client.build_delete_todo(id);
        let response = self.send(request)?;
        let deleted = self.client.parse_delete_todo(response);
        self.finish_mutation(deleted)
    }

    fn send(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, url = %request.path, "sending mutation");
        let response = self.transport.execute(request);
        self.record(response)
    }

    /// Reload after a mutation the server answered. The reload runs even
    /// when the server rejected the mutation; the rejection wins as the
    /// reported error.
    fn finish_mutation(&mut self, outcome: Result<(), ApiError>) -> Result<(), ApiError> {
        let reloaded = self.load();
        match outcome {
            Ok(()) => reloaded,
            Err(err) => self.record(Err(err)),
        }
    }

    fn record<V>(&mut self, result: Result<V, ApiError>) -> Result<V, ApiError> {
        if let Err(err) = &result {
            warn!(error = %err, "todo service call failed");
            self.state.error = Some(err.clone());
        }
        result
    }
}
