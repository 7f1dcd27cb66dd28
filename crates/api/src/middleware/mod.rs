pub mod auth;

pub use auth::AuthMember;
