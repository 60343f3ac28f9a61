//! Storage error translation
//!
//! Turns integrity-constraint violations reported by the database into
//! domain errors. Constraints are identified by the names the schema gives
//! them, either spelled out or derived from a column with the naming
//! convention in [`naming`].
//!
//! - [`ErrorMapping`] is built once at start-up and only read afterwards.
//! - [`ErrorTranslator`] wraps a single storage operation and is the only
//!   place that changes an error's type; everything else passes through.
//!
//! ```
//! use storage::{Column, ConstraintKind, ErrorMapping, ErrorTranslator};
//!
//! #[derive(Debug, PartialEq)]
//! enum TeamError {
//!     TeamNotFound(Option<String>),
//! }
//!
//! let translator = ErrorTranslator::new(
//!     ErrorMapping::builder()
//!         .register(
//!             (Column::new("team_players", "team_id"), ConstraintKind::Fk),
//!             TeamError::TeamNotFound,
//!         )
//!         .build(),
//! );
//!
//! assert!(translator.mapping().contains("team_players_team_id_fk"));
//! assert_eq!(translator.translate(Ok::<_, sqlx::Error>(1)).unwrap(), 1);
//! ```

pub mod driver;
pub mod naming;
pub mod registry;
pub mod translator;

pub use driver::DriverError;
pub use driver::IntegrityViolation;
pub use naming::Column;
pub use naming::ConstraintKey;
pub use naming::ConstraintKind;
pub use naming::Table;
pub use registry::ErrorConstructor;
pub use registry::ErrorMapping;
pub use registry::ErrorMappingBuilder;
pub use translator::ErrorTranslator;
pub use translator::TranslatedError;
