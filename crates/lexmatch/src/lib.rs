//! lexmatch shared library
//!
//! Everything around the matching engine that touches the outside world:
//! loading reference data, configuration, logging and batch sessions. The
//! engine itself lives in `lexmatch-core` and is re-exported here.
//!
//! # Example
//!
//! ```rust
//! use lexmatch::{Config, Session};
//! use lexmatch::engine::Stopwords;
//!
//! let candidates = [("mm", "Middlemarch"), ("wh", "Wuthering Heights")]
//!     .into_iter()
//!     .map(|(k, v)| (k.to_string(), v.to_string()))
//!     .collect();
//!
//! let session = Session::new(candidates, None, Stopwords::new(), Config::default());
//! let result = session.run_query("middlemarch").unwrap();
//! assert_eq!(result.best_match.as_deref(), Some("mm"));
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod session;
pub mod tracing;

pub use lexmatch_core as engine;

pub use config::Config;
pub use error::{Error, Result};
pub use session::Session;
