//! The cloneable-state capability required of wizard domain state.

use std::{any::Any, fmt::Debug, sync::Arc};

/// Capability contract for any domain state archived on the page stack.
///
/// Implemented automatically for every `Clone + Send + Sync + Debug`
/// type, so wizard state structs only need `#[derive(Clone, Debug)]`.
/// The clone returned by [`CloneableState::clone_state`] is a fully
/// independent value: mutating it later never affects the original.
pub trait CloneableState: Any + Send + Sync + Debug {
    /// Produce an independent deep copy of this state.
    fn clone_state(&self) -> Arc<dyn CloneableState>;

    /// Downcasting support for the typed context accessors.
    fn as_any(&self) -> &dyn Any;
}

impl<T> CloneableState for T
where
    T: Any + Clone + Send + Sync + Debug,
{
    fn clone_state(&self) -> Arc<dyn CloneableState> {
        Arc::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Sample {
        name: String,
        picks: Vec<String>,
    }

    #[test]
    fn cloned_state_is_independent() {
        let original = Sample {
            name: "node".to_string(),
            picks: vec!["relayer".to_string()],
        };
        let snapshot = original.clone_state();

        let mut mutated = snapshot
            .as_any()
            .downcast_ref::<Sample>()
            .expect("snapshot holds a Sample")
            .clone();
        mutated.name.push_str("-edited");
        mutated.picks.push("oracle".to_string());

        assert_eq!(original.name, "node");
        assert_eq!(original.picks, vec!["relayer".to_string()]);
    }

    #[test]
    fn downcast_to_wrong_type_fails() {
        let state = Sample {
            name: "x".to_string(),
            picks: Vec::new(),
        };
        let snapshot = state.clone_state();
        assert!(snapshot.as_any().downcast_ref::<String>().is_none());
    }
}
