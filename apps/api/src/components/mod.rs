// Component management: CRUD, duplication, variants, export/import, cleanup,
// plus the per-component AI actions exposed over HTTP.

pub mod export;
pub mod handlers;
pub mod minify;
pub mod service;
pub mod variants;
