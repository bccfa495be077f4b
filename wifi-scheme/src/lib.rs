/*!
 * Wireless scheme state tracking
 * Persists the selected interface/scheme and reconciles it against live interface status
 */

pub mod config;
pub mod error;
pub mod fuzzy;
pub mod probe;
pub mod properties;
pub mod reconcile;
pub mod scheme;
pub mod signal;
pub mod table;

pub use config::SchemeConfig;
pub use error::{Result, SchemeError};
pub use probe::{ActivationProbe, CommandStatusTool, StatusOutput, StatusTool};
pub use properties::{PropertyRecord, PropertyStore};
pub use reconcile::{PartialUpdatePolicy, StateReconciler, UpdateRequest};
pub use scheme::{Scheme, SchemeCatalog};
