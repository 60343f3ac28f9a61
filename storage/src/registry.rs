use std::collections::HashMap;
use std::fmt;

use crate::naming::ConstraintKey;

/// Builds a domain error from the database's detail message.
pub type ErrorConstructor<E> = fn(Option<String>) -> E;

/// Immutable mapping from canonical constraint names to domain errors.
///
/// There is no way to change a mapping once built, so a single instance can
/// be read from any number of tasks without synchronization.
pub struct ErrorMapping<E> {
    constructors: HashMap<String, ErrorConstructor<E>>,
}

impl<E> ErrorMapping<E> {
    /// Build a mapping from `(key, constructor)` pairs.
    ///
    /// Column keys are canonicalized with the schema naming convention. When
    /// two keys resolve to the same name the later one wins.
    pub fn build<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, ErrorConstructor<E>)>,
        K: Into<ConstraintKey>,
    {
        let mut constructors = HashMap::new();

        for (key, constructor) in entries {
            let name = key.into().canonical_name();
            if constructors.insert(name.clone(), constructor).is_some() {
                tracing::warn!(
                    constraint = %name,
                    "Constraint registered twice, keeping the last mapping"
                );
            }
        }

        Self { constructors }
    }

    /// Start a mapping one entry at a time.
    pub fn builder() -> ErrorMappingBuilder<E> {
        ErrorMappingBuilder {
            entries: Vec::new(),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<ErrorConstructor<E>> {
        self.constructors.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl<E> fmt::Debug for ErrorMapping<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("ErrorMapping")
            .field("constraints", &names)
            .finish()
    }
}

/// Collects entries for an `ErrorMapping`.
///
/// ```
/// use storage::{ConstraintKind, Column, ErrorMapping};
///
/// #[derive(Debug)]
/// enum TeamError {
///     TeamNotFound(Option<String>),
///     PlayerNotFound(Option<String>),
/// }
///
/// let mapping = ErrorMapping::builder()
///     .register("team_players_team_id_fk", TeamError::TeamNotFound)
///     .register(
///         (Column::new("team_players", "player_id"), ConstraintKind::Fk),
///         TeamError::PlayerNotFound,
///     )
///     .build();
///
/// assert!(mapping.contains("team_players_player_id_fk"));
/// ```
pub struct ErrorMappingBuilder<E> {
    entries: Vec<(ConstraintKey, ErrorConstructor<E>)>,
}

impl<E> ErrorMappingBuilder<E> {
    pub fn register(
        mut self,
        key: impl Into<ConstraintKey>,
        constructor: ErrorConstructor<E>,
    ) -> Self {
        self.entries.push((key.into(), constructor));
        self
    }

    pub fn build(self) -> ErrorMapping<E> {
        ErrorMapping::build(self.entries)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::naming::Column;
    use crate::naming::ConstraintKind;

    #[derive(Debug, PartialEq)]
    enum RosterError {
        TeamNotFound(Option<String>),
        PlayerNotFound(Option<String>),
        TeamNameTaken(Option<String>),
    }

    fn mapping() -> ErrorMapping<RosterError> {
        ErrorMapping::builder()
            .register(
                (Column::new("team_players", "team_id"), ConstraintKind::Fk),
                RosterError::TeamNotFound,
            )
            .register(
                (Column::new("team_players", "player_id"), ConstraintKind::Fk),
                RosterError::PlayerNotFound,
            )
            .register("teams_name_uq", RosterError::TeamNameTaken)
            .build()
    }

    #[test]
    fn test_lookup_registered_names() {
        let mapping = mapping();
        assert_eq!(mapping.len(), 3);

        let constructor = mapping
            .lookup("team_players_team_id_fk")
            .expect("registered");
        assert_eq!(
            constructor(Some("Key (team_id) is not present".to_string())),
            RosterError::TeamNotFound(Some("Key (team_id) is not present".to_string()))
        );

        let constructor = mapping.lookup("teams_name_uq").expect("registered");
        assert_eq!(constructor(None), RosterError::TeamNameTaken(None));
    }

    #[test]
    fn test_lookup_unknown_name() {
        let mapping = mapping();
        assert!(mapping.lookup("team_players_pk").is_none());
        assert!(!mapping.contains("team_id_fk"));
    }

    #[test]
    fn test_build_from_entries() {
        let mapping = ErrorMapping::build([
            (
                ConstraintKey::from("a_uq"),
                RosterError::TeamNameTaken as ErrorConstructor<RosterError>,
            ),
            (
                ConstraintKey::from((Column::new("t", "c"), ConstraintKind::Pk)),
                RosterError::TeamNotFound as ErrorConstructor<RosterError>,
            ),
        ]);

        let mut names: Vec<&str> = mapping.names().collect();
        names.sort_unstable();
        assert_eq!(names, ["a_uq", "t_pk"]);
    }

    #[test]
    fn test_build_from_unconverted_keys() {
        let literals = ErrorMapping::build([
            ("teams_name_uq", RosterError::TeamNameTaken as ErrorConstructor<_>),
            ("team_players_pk", RosterError::TeamNotFound as ErrorConstructor<_>),
        ]);
        assert!(literals.contains("teams_name_uq"));
        assert!(literals.contains("team_players_pk"));

        let columns = ErrorMapping::build(vec![
            (
                (Column::new("team_players", "team_id"), ConstraintKind::Fk),
                RosterError::TeamNotFound as ErrorConstructor<_>,
            ),
            (
                (Column::new("team_players", "player_id"), ConstraintKind::Ix),
                RosterError::PlayerNotFound as ErrorConstructor<_>,
            ),
        ]);
        let constructor = columns.lookup("team_players_team_id_fk").unwrap();
        assert_eq!(constructor(None), RosterError::TeamNotFound(None));
        assert!(columns.contains("player_id_ix"));
    }

    #[test]
    fn test_duplicate_names_keep_last() {
        let mapping = ErrorMapping::builder()
            .register("teams_name_uq", RosterError::TeamNotFound)
            .register(
                (Column::new("teams", "name"), ConstraintKind::Uq),
                RosterError::TeamNameTaken,
            )
            .build();

        assert_eq!(mapping.len(), 1);
        let constructor = mapping.lookup("teams_name_uq").unwrap();
        assert_eq!(constructor(None), RosterError::TeamNameTaken(None));
    }

    #[test]
    fn test_empty_mapping() {
        let entries: Vec<(ConstraintKey, ErrorConstructor<RosterError>)> = Vec::new();
        let mapping = ErrorMapping::build(entries);
        assert!(mapping.is_empty());
        assert!(mapping.lookup("anything").is_none());
    }

    #[test]
    fn test_debug_lists_sorted_names() {
        assert_eq!(
            format!("{:?}", mapping()),
            r#"ErrorMapping { constraints: ["team_players_player_id_fk", "team_players_team_id_fk", "teams_name_uq"] }"#
        );
    }

    #[test]
    fn test_shared_reads_across_threads() {
        let mapping = Arc::new(mapping());

        std::thread::scope(|scope| {
            for _ in 0..16 {
                let mapping = Arc::clone(&mapping);
                scope.spawn(move || {
                    for _ in 0..100 {
                        assert!(mapping.contains("team_players_team_id_fk"));
                        assert!(mapping.lookup("missing").is_none());
                    }
                });
            }
        });
    }
}
