//! HTTP API for the team-recruitment board.
//!
//! Exposes the member/session lifecycle (register, login, logout, verified
//! access, credential updates, account deletion) and the board entities
//! (articles, comments, stack and position tags) under `/api/v1`.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod state;
