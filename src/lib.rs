// Library exports for cdx-list

pub mod config;
pub mod error;
pub mod host;
pub mod html;
pub mod policy;
pub mod record;
pub mod settings;
pub mod tool;
pub mod view;

pub use error::{ListError, Result};
pub use host::{BlockHost, StyleTokens};
pub use record::{ListData, ListRecord, ListStyle};
pub use tool::{Key, KeyOutcome, ListTool};
pub use view::{CaretContext, ListView, MemoryView};
