//! Browser-facing transport: the local HTTP server, its router, and the
//! per-page endpoints. The browser renders; everything it renders comes
//! from these endpoints as JSON snapshots of the page controllers.

pub mod error;
pub mod pages;
pub mod router;
pub mod server;
