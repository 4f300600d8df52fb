//! Reducer trait - the core abstraction for business logic.
//!
//! Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
//! They contain all business logic and are deterministic and testable.

use crate::effect::Effect;
use smallvec::SmallVec;

/// The number of effects a reducer can return without heap allocation.
///
/// Most actions produce zero or one effect; the largest fan-out in the
/// booking workflow is a parallel catalog load plus an availability reload.
pub const INLINE_EFFECTS: usize = 4;

/// Effects returned from a single reduce step.
pub type Effects<A> = SmallVec<[Effect<A>; INLINE_EFFECTS]>;

/// The Reducer trait - core abstraction for business logic
///
/// # Type Parameters
///
/// - `State`: The domain state this reducer operates on
/// - `Action`: The action type this reducer processes
/// - `Environment`: The injected dependencies this reducer needs
///
/// # Example
///
/// ```ignore
/// impl Reducer for BookingReducer {
///     type State = BookingState;
///     type Action = BookingAction;
///     type Environment = BookingEnvironment;
///
///     fn reduce(
///         &self,
///         state: &mut BookingState,
///         action: BookingAction,
///         env: &BookingEnvironment,
///     ) -> Effects<BookingAction> {
///         match action {
///             BookingAction::DateChanged(date) => {
///                 // Business logic here
///                 SmallVec::new()
///             }
///             _ => SmallVec::new(),
///         }
///     }
/// }
/// ```
pub trait Reducer {
    /// The state type this reducer operates on
    type State;

    /// The action type this reducer processes
    type Action;

    /// The environment type with injected dependencies
    type Environment;

    /// Reduce an action into state changes and effects
    ///
    /// This is a pure function that:
    /// 1. Validates the action
    /// 2. Updates state in place
    /// 3. Returns effect descriptions to be executed
    ///
    /// # Arguments
    ///
    /// - `state`: Mutable reference to current state
    /// - `action`: The action to process
    /// - `env`: Reference to injected dependencies
    ///
    /// # Returns
    ///
    /// The effects to be executed by the runtime
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action>;
}
