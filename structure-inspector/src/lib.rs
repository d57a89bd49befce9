//! Inspect the shape of a Directus collection by fetching its first record.
//!
//! ```rust,no_run
//! use structure_inspector::{ColorHelper, InspectorConfig, run};
//!
//! # async fn example() -> std::io::Result<()> {
//! let config = InspectorConfig::from_env().with_collection("articles");
//! let mut stdout = std::io::stdout();
//! run(&config, &mut stdout, &ColorHelper::plain()).await?;
//! # Ok(())
//! # }
//! ```

pub use directus_client as directus;

pub mod colors;
pub mod config;
pub mod error;
pub mod inspector;

pub use colors::{ColorHelper, ColorMode};
pub use config::{Credential, InspectorConfig};
pub use error::{InspectorError, Result};
pub use inspector::{Inspection, StructureInspector, run};
