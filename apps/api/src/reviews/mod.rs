// Design reviews on projects: open, comment, complete with a score, delete.

pub mod handlers;
pub mod service;
