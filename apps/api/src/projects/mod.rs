// Project management: CRUD, filtered listing, duplication, settings and
// AI-generated suggestions.

pub mod handlers;
pub mod service;
