pub mod article;
pub mod comment;
pub mod member;
pub mod position;
pub mod stack;
