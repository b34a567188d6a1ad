//! State / intent / reducer primitives for the upload state machine.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ listeners
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```
//!
//! Reducers are the only place where transitions are decided. The session
//! owns the current state and feeds it intents through [`Reducer::apply`].

/// A state machine's state. The default is the resting state.
pub trait MachineState: Clone + PartialEq + Default + Send + 'static {}

/// Something that happened to a machine: files arriving, a send trigger,
/// a transport result.
pub trait Intent: Send + 'static {}

/// Pure `(State, Intent) -> State` transitions.
pub trait Reducer {
    type State: MachineState;
    type Intent: Intent;

    /// Intents that do not apply to the current state leave it unchanged.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;

    /// Reduce `state` in place. Returns the previous state when it changed.
    fn apply(state: &mut Self::State, intent: Self::Intent) -> Option<Self::State> {
        let next = Self::reduce(state.clone(), intent);
        if next == *state {
            None
        } else {
            Some(std::mem::replace(state, next))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    enum Door {
        #[default]
        Closed,
        Open,
    }

    impl MachineState for Door {}

    struct Push;

    impl Intent for Push {}

    struct DoorReducer;

    impl Reducer for DoorReducer {
        type State = Door;
        type Intent = Push;

        fn reduce(state: Door, _intent: Push) -> Door {
            match state {
                Door::Closed => Door::Open,
                Door::Open => Door::Open,
            }
        }
    }

    #[test]
    fn apply_reports_previous_state_on_change() {
        let mut door = Door::default();
        assert_eq!(DoorReducer::apply(&mut door, Push), Some(Door::Closed));
        assert_eq!(door, Door::Open);
    }

    #[test]
    fn apply_is_none_without_change() {
        let mut door = Door::Open;
        assert_eq!(DoorReducer::apply(&mut door, Push), None);
        assert_eq!(door, Door::Open);
    }
}
