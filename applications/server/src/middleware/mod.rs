/// Request middleware
pub mod auth;
pub mod session_gate;

pub use auth::{auth_middleware, AuthenticatedUser};
pub use session_gate::{gate, session_gate, GateDecision};
