//! Effect type - side effect descriptions.
//!
//! Effects are NOT executed immediately. They are descriptions of what should
//! happen, returned from reducers and executed by the Store runtime. They are
//! values, and they are composable and cancellable.

use std::borrow::Cow;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// A boxed future that may produce a feedback action.
pub type EffectFuture<Action> = Pin<Box<dyn Future<Output = Option<Action>> + Send>>;

/// Identifier for a cancellable effect channel.
///
/// Scheduling a new [`Effect::Cancellable`] under an id that already has a
/// running effect aborts the older one first; [`Effect::Cancel`] aborts
/// without replacing. The booking workflow uses one id per court for the
/// debounced price-quote channel.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EffectId(Cow<'static, str>);

impl EffectId {
    /// Create an effect id from a static or owned string.
    pub fn new(id: impl Into<Cow<'static, str>>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EffectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Effect type - describes a side effect to be executed
///
/// # Type Parameters
///
/// - `Action`: The action type that effects can produce (feedback loop)
pub enum Effect<Action> {
    /// No-op effect
    None,

    /// Run effects in parallel
    Parallel(Vec<Effect<Action>>),

    /// Run effects sequentially
    Sequential(Vec<Effect<Action>>),

    /// Delayed action (for timeouts)
    Delay {
        /// How long to wait
        duration: Duration,
        /// Action to dispatch after delay
        action: Box<Action>,
    },

    /// Arbitrary async computation
    ///
    /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
    Future(EffectFuture<Action>),

    /// An async computation that can be superseded or cancelled by id.
    ///
    /// Running a new `Cancellable` under the same id aborts the previous one
    /// (last call wins). This is the debounce primitive: the future sleeps
    /// for the debounce interval before doing its work, and a re-schedule
    /// within the window aborts the sleeping task.
    Cancellable {
        /// Channel identifier
        id: EffectId,
        /// The computation to run
        future: EffectFuture<Action>,
    },

    /// Abort the in-flight cancellable effect with the given id, if any.
    Cancel {
        /// Channel identifier
        id: EffectId,
    },
}

// Manual Debug implementation since Future doesn't implement Debug
impl<Action> std::fmt::Debug for Effect<Action>
where
    Action: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::None => write!(f, "Effect::None"),
            Effect::Parallel(effects) => {
                f.debug_tuple("Effect::Parallel").field(effects).finish()
            },
            Effect::Sequential(effects) => {
                f.debug_tuple("Effect::Sequential").field(effects).finish()
            },
            Effect::Delay { duration, action } => f
                .debug_struct("Effect::Delay")
                .field("duration", duration)
                .field("action", action)
                .finish(),
            Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            Effect::Cancellable { id, .. } => f
                .debug_struct("Effect::Cancellable")
                .field("id", id)
                .finish_non_exhaustive(),
            Effect::Cancel { id } => {
                f.debug_struct("Effect::Cancel").field("id", id).finish()
            },
        }
    }
}

impl<Action> Effect<Action> {
    /// Combine effects to run in parallel
    #[must_use]
    pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
        Effect::Parallel(effects)
    }

    /// Chain effects to run sequentially
    #[must_use]
    pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
        Effect::Sequential(effects)
    }

    /// Wrap an async computation as an [`Effect::Future`].
    pub fn future<F>(fut: F) -> Effect<Action>
    where
        F: Future<Output = Option<Action>> + Send + 'static,
    {
        Effect::Future(Box::pin(fut))
    }

    /// Wrap an async computation as an [`Effect::Cancellable`].
    pub fn cancellable<F>(id: EffectId, fut: F) -> Effect<Action>
    where
        F: Future<Output = Option<Action>> + Send + 'static,
    {
        Effect::Cancellable {
            id,
            future: Box::pin(fut),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Ping,
    }

    #[test]
    fn effect_id_display() {
        let id = EffectId::new("quote-3");
        assert_eq!(id.to_string(), "quote-3");
        assert_eq!(id.as_str(), "quote-3");
    }

    #[test]
    fn effect_debug_hides_futures() {
        let effect: Effect<TestAction> = Effect::future(async { Some(TestAction::Ping) });
        assert_eq!(format!("{effect:?}"), "Effect::Future(<future>)");

        let effect: Effect<TestAction> =
            Effect::cancellable(EffectId::new("quote-1"), async { None });
        let debug = format!("{effect:?}");
        assert!(debug.contains("Effect::Cancellable"));
        assert!(debug.contains("quote-1"));
    }

    #[test]
    fn merge_builds_parallel() {
        let effect: Effect<TestAction> = Effect::merge(vec![Effect::None, Effect::None]);
        assert!(matches!(effect, Effect::Parallel(ref inner) if inner.len() == 2));
    }
}
