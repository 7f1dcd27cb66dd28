//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod article_repo;
pub mod comment_repo;
pub mod member_repo;
pub mod position_repo;
pub mod stack_repo;

pub use article_repo::ArticleRepo;
pub use comment_repo::CommentRepo;
pub use member_repo::MemberRepo;
pub use position_repo::PositionRepo;
pub use stack_repo::StackRepo;
