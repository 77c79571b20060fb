//! PlanZen Client
//!
//! HTTP client and client-side state for the PlanZen API.
//!
//! # Features
//!
//! - **Authentication**: register, login (session cookie), logout, password recovery
//! - **Forms**: `LoginForm` and `RegisterForm` checked before anything is sent
//! - **Collections**: CRUD for todos, routines, appointments and events
//! - **Slices**: per-collection cache driven by a pure reducer
//!
//! # Example
//!
//! ```ignore
//! use planzen_client::{AppStore, ClientConfig, PlanZenClient};
//!
//! let client = PlanZenClient::new(ClientConfig::new("http://localhost:3000"))?;
//! let store = AppStore::new();
//!
//! store.todos.fetch(&client).await?;
//! println!("{} todos", store.todos.snapshot().await.items.len());
//! ```

mod auth;
mod client;
mod collection;
mod error;
mod forms;
mod slice;
mod store;
mod types;

pub use auth::AuthClient;
pub use client::PlanZenClient;
pub use collection::CollectionClient;
pub use error::{ClientError, Result};
pub use forms::{LoginForm, LoginFormInput, RegisterForm, RegisterFormInput, LOGIN_FORM_PASSWORD_MIN};
pub use slice::{AppStore, Slice};
pub use store::{reduce, SliceAction, SliceState, SliceStatus};
pub use types::{ApiMessage, ClientConfig, DeleteResponse, HealthResponse};
