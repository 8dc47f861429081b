//! Effect-aware state container
//!
//! Reducers here do two things: mutate state and describe the side effects
//! that should follow. Effects are plain data (an HTTP request to issue, a
//! delayed hide to schedule); the runtime decides how to run them.
//!
//! ```ignore
//! fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
//!     match action {
//!         Action::ResponsesFetch => {
//!             state.loading = true;
//!             DispatchResult::changed_with(Effect::FetchResponses { generation: 1 })
//!         }
//!         Action::MessageClear => {
//!             state.message = Message::default();
//!             DispatchResult::changed()
//!         }
//!         _ => DispatchResult::unchanged(),
//!     }
//! }
//!
//! let mut store = EffectStore::new(AppState::default(), reducer);
//! let result = store.dispatch(Action::ResponsesFetch);
//! for effect in result.effects {
//!     // hand off to the effect handler
//! }
//! ```
//!
//! Each store instance owns its own state, so several stores can coexist in
//! one process (tests rely on this).

use std::marker::PhantomData;

use crate::action::Action;
use crate::middleware::Middleware;

/// Outcome of a single dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult<E> {
    /// Whether the reducer modified state
    pub changed: bool,
    /// Effects to run after the dispatch
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    /// No state change, no effects.
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: Vec::new(),
        }
    }

    /// State changed, no effects.
    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: Vec::new(),
        }
    }

    /// A single effect without a state change.
    #[inline]
    pub fn effect(effect: E) -> Self {
        Self {
            changed: false,
            effects: vec![effect],
        }
    }

    /// State changed and one effect should follow.
    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    /// Append an effect.
    #[inline]
    pub fn with(mut self, effect: E) -> Self {
        self.effects.push(effect);
        self
    }

    /// Flag the state as changed.
    #[inline]
    pub fn mark_changed(mut self) -> Self {
        self.changed = true;
        self
    }

    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

/// Reducer signature for [`EffectStore`]
pub type EffectReducer<S, A, E> = fn(&mut S, A) -> DispatchResult<E>;

/// State plus the reducer that evolves it
pub struct EffectStore<S, A, E> {
    state: S,
    reducer: EffectReducer<S, A, E>,
    _marker: PhantomData<(A, E)>,
}

impl<S, A, E> EffectStore<S, A, E>
where
    A: Action,
{
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self {
            state,
            reducer,
            _marker: PhantomData,
        }
    }

    /// Current state snapshot
    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Direct state access, for initialization only
    #[inline]
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Run the reducer for one action
    #[inline]
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        (self.reducer)(&mut self.state, action)
    }
}

/// An [`EffectStore`] wrapped in a [`Middleware`]
///
/// The middleware sees every action before the reducer runs and the change
/// flag afterwards. Effects are not visible to it.
pub struct EffectStoreWithMiddleware<S, A, E, M>
where
    A: Action,
    M: Middleware<A>,
{
    store: EffectStore<S, A, E>,
    middleware: M,
}

impl<S, A, E, M> EffectStoreWithMiddleware<S, A, E, M>
where
    A: Action,
    M: Middleware<A>,
{
    pub fn new(state: S, reducer: EffectReducer<S, A, E>, middleware: M) -> Self {
        Self {
            store: EffectStore::new(state, reducer),
            middleware,
        }
    }

    #[inline]
    pub fn state(&self) -> &S {
        self.store.state()
    }

    #[inline]
    pub fn state_mut(&mut self) -> &mut S {
        self.store.state_mut()
    }

    #[inline]
    pub fn middleware(&self) -> &M {
        &self.middleware
    }

    /// Dispatch through `before`, the reducer, then `after`
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        self.middleware.before(&action);
        let result = self.store.dispatch(action.clone());
        self.middleware.after(&action, result.changed);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    enum TestAction {
        Fetch,
        DidLoad(Vec<&'static str>),
        Clear,
        Noop,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Fetch => "Fetch",
                TestAction::DidLoad(_) => "DidLoad",
                TestAction::Clear => "Clear",
                TestAction::Noop => "Noop",
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum TestEffect {
        Request(u64),
        Log(String),
    }

    #[derive(Default)]
    struct TestState {
        generation: u64,
        items: Vec<&'static str>,
    }

    fn reducer(state: &mut TestState, action: TestAction) -> DispatchResult<TestEffect> {
        match action {
            TestAction::Fetch => {
                state.generation += 1;
                DispatchResult::changed_with(TestEffect::Request(state.generation))
            }
            TestAction::DidLoad(items) => {
                state.items = items;
                DispatchResult::changed().with(TestEffect::Log("loaded".into()))
            }
            TestAction::Clear if state.items.is_empty() => DispatchResult::unchanged(),
            TestAction::Clear => {
                state.items.clear();
                DispatchResult::changed()
            }
            TestAction::Noop => DispatchResult::unchanged(),
        }
    }

    #[test]
    fn test_dispatch_result_builders() {
        let r: DispatchResult<TestEffect> = DispatchResult::unchanged();
        assert!(!r.changed);
        assert!(!r.has_effects());

        let r = DispatchResult::effect(TestEffect::Request(1));
        assert!(!r.changed);
        assert_eq!(r.effects, vec![TestEffect::Request(1)]);

        let r = DispatchResult::changed_with(TestEffect::Request(2)).with(TestEffect::Log("x".into()));
        assert!(r.changed);
        assert_eq!(r.effects.len(), 2);

        let r: DispatchResult<TestEffect> = DispatchResult::unchanged().mark_changed();
        assert!(r.changed);
    }

    #[test]
    fn test_store_emits_effects() {
        let mut store = EffectStore::new(TestState::default(), reducer);

        let result = store.dispatch(TestAction::Fetch);
        assert!(result.changed);
        assert_eq!(result.effects, vec![TestEffect::Request(1)]);

        let result = store.dispatch(TestAction::Fetch);
        assert_eq!(result.effects, vec![TestEffect::Request(2)]);
        assert_eq!(store.state().generation, 2);
    }

    #[test]
    fn test_store_unchanged() {
        let mut store = EffectStore::new(TestState::default(), reducer);
        let result = store.dispatch(TestAction::Clear);
        assert!(!result.changed);
        assert!(result.effects.is_empty());
    }

    #[test]
    fn test_independent_stores() {
        let mut a = EffectStore::new(TestState::default(), reducer);
        let b = EffectStore::new(TestState::default(), reducer);

        a.dispatch(TestAction::DidLoad(vec!["one"]));

        assert_eq!(a.state().items, vec!["one"]);
        assert!(b.state().items.is_empty());
    }

    #[derive(Default)]
    struct Recorder {
        seen: Vec<(&'static str, Option<bool>)>,
    }

    impl Middleware<TestAction> for Recorder {
        fn before(&mut self, action: &TestAction) {
            self.seen.push((action.name(), None));
        }

        fn after(&mut self, action: &TestAction, state_changed: bool) {
            self.seen.push((action.name(), Some(state_changed)));
        }
    }

    #[test]
    fn test_middleware_sees_before_and_after() {
        let mut store =
            EffectStoreWithMiddleware::new(TestState::default(), reducer, Recorder::default());

        store.dispatch(TestAction::Fetch);
        store.dispatch(TestAction::Noop);

        assert_eq!(
            store.middleware().seen,
            vec![
                ("Fetch", None),
                ("Fetch", Some(true)),
                ("Noop", None),
                ("Noop", Some(false)),
            ]
        );
        assert_eq!(store.state().generation, 1);
    }
}
