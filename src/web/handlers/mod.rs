//! JSON API handlers, one module per resource.

pub mod chat;
pub mod events;
pub mod health;
pub mod mentors;
pub mod notes;
pub mod tasks;
