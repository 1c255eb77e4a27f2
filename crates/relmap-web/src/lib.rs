//! # relmap Web
//!
//! HTTP and WebSocket access to a researcher relevance map.
//!
//! ## Quick Start
//!
//! ```bash
//! # Serve a researcher file
//! cargo run -p relmap-web -- --data researchers.csv --port 3000
//!
//! # Without --data the built-in sample researchers are served
//! ```
//!
//! ## API Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/api/stats` | Dataset and graph statistics |
//! | GET | `/api/researchers` | Researchers matching query-string criteria |
//! | GET | `/api/researchers/:id/connections` | Ranked connections of one researcher |
//! | GET | `/api/facets` | Filter values per attribute |
//! | POST | `/api/view` | Visible researchers and edges for a criteria body |
//! | POST | `/api/reload` | Reload the data source and rebuild the index |
//! | WS | `/ws/view` | Live view: send criteria, receive views and reload notices |

pub mod routes;
pub mod state;

pub use state::{AppState, DatasetEvent, ReloadError};
