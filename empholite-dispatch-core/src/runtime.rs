//! The event/action/render loop
//!
//! [`EffectRuntime`] owns a store, an [`ActionBus`] and a [`TaskManager`].
//! The store listens on the bus through its own subscription; terminal
//! events are mapped to actions and published on the same bus, as are the
//! results of async tasks. Every dispatch may yield effects, which are
//! handed to the application's effect handler together with an
//! [`EffectContext`].

use std::io;
use std::marker::PhantomData;

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::bus::{ActionBus, Subscription};
use crate::effect::{DispatchResult, EffectReducer, EffectStore, EffectStoreWithMiddleware};
use crate::event::{process_raw_event, spawn_event_poller, EventKind, PollerConfig, RawEvent};
use crate::middleware::Middleware;
use crate::tasks::TaskManager;
use crate::Action;

/// Actions produced by an event, plus an optional render hint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome<A> {
    pub actions: Vec<A>,
    /// Redraw even if no action changes state
    pub needs_render: bool,
}

impl<A> EventOutcome<A> {
    /// No actions and no render.
    pub fn ignored() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: false,
        }
    }

    /// No actions, but redraw.
    pub fn needs_render() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: true,
        }
    }

    /// Collect the result of `Component::handle_event`.
    pub fn from_actions(iter: impl IntoIterator<Item = A>) -> Self {
        Self {
            actions: iter.into_iter().collect(),
            needs_render: false,
        }
    }

    pub fn with_render(mut self) -> Self {
        self.needs_render = true;
        self
    }
}

impl<A> Default for EventOutcome<A> {
    fn default() -> Self {
        Self::ignored()
    }
}

impl<A> From<Vec<A>> for EventOutcome<A> {
    fn from(actions: Vec<A>) -> Self {
        Self::from_actions(actions)
    }
}

impl<A> From<Option<A>> for EventOutcome<A> {
    fn from(action: Option<A>) -> Self {
        Self::from_actions(action)
    }
}

/// Store interface used by [`EffectRuntime`]
pub trait EffectStoreLike<S, A: Action, E> {
    fn dispatch(&mut self, action: A) -> DispatchResult<E>;
    fn state(&self) -> &S;
}

impl<S, A: Action, E> EffectStoreLike<S, A, E> for EffectStore<S, A, E> {
    fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        EffectStore::dispatch(self, action)
    }

    fn state(&self) -> &S {
        EffectStore::state(self)
    }
}

impl<S, A: Action, E, M: Middleware<A>> EffectStoreLike<S, A, E>
    for EffectStoreWithMiddleware<S, A, E, M>
{
    fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        EffectStoreWithMiddleware::dispatch(self, action)
    }

    fn state(&self) -> &S {
        EffectStoreWithMiddleware::state(self)
    }
}

/// Context passed to effect handlers
pub struct EffectContext<'a, A: Action> {
    bus: &'a ActionBus<A>,
    tasks: &'a mut TaskManager<A>,
}

impl<'a, A: Action> EffectContext<'a, A> {
    /// Publish an action immediately
    pub fn emit(&self, action: A) {
        self.bus.publish(action);
    }

    pub fn bus(&self) -> &ActionBus<A> {
        self.bus
    }

    /// Task manager for async work
    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        self.tasks
    }
}

/// Runtime for effect-based stores
pub struct EffectRuntime<S, A: Action, E, St: EffectStoreLike<S, A, E> = EffectStore<S, A, E>> {
    store: St,
    bus: ActionBus<A>,
    inbox: Subscription<A>,
    tasks: TaskManager<A>,
    should_render: bool,
    _marker: PhantomData<(S, E)>,
}

impl<S: 'static, A: Action, E> EffectRuntime<S, A, E, EffectStore<S, A, E>> {
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self::from_store(EffectStore::new(state, reducer))
    }
}

impl<S: 'static, A: Action, E, St: EffectStoreLike<S, A, E>> EffectRuntime<S, A, E, St> {
    /// Wrap an existing store, with a fresh bus
    pub fn from_store(store: St) -> Self {
        Self::with_bus(store, ActionBus::new())
    }

    /// Wrap an existing store and listen on `bus`
    pub fn with_bus(store: St, bus: ActionBus<A>) -> Self {
        let inbox = bus.subscribe();
        let tasks = TaskManager::new(bus.clone());
        Self {
            store,
            bus,
            inbox,
            tasks,
            should_render: true,
            _marker: PhantomData,
        }
    }

    /// The bus the store listens on
    pub fn bus(&self) -> &ActionBus<A> {
        &self.bus
    }

    /// Publish an action on the bus
    pub fn enqueue(&self, action: A) {
        self.bus.publish(action);
    }

    pub fn state(&self) -> &S {
        self.store.state()
    }

    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        &mut self.tasks
    }

    /// Dispatch one action and run its effects
    ///
    /// Returns whether state changed.
    pub fn dispatch<F>(&mut self, action: A, handle_effect: &mut F) -> bool
    where
        F: FnMut(E, &mut EffectContext<A>),
    {
        let result = self.store.dispatch(action);
        if result.has_effects() {
            let mut ctx = EffectContext {
                bus: &self.bus,
                tasks: &mut self.tasks,
            };
            for effect in result.effects {
                handle_effect(effect, &mut ctx);
            }
        }
        result.changed
    }

    /// Dispatch every action already queued on the bus
    ///
    /// Actions published by effects while draining are processed too.
    /// Returns the number of actions dispatched.
    pub fn drain<F>(&mut self, mut handle_effect: F) -> usize
    where
        F: FnMut(E, &mut EffectContext<A>),
    {
        let mut count = 0;
        while let Some(action) = self.inbox.try_recv() {
            self.should_render |= self.dispatch(action, &mut handle_effect);
            count += 1;
        }
        count
    }

    /// Wait for the next action on the bus and dispatch it
    ///
    /// Returns the dispatched action, or `None` if the bus is gone.
    pub async fn next<F>(&mut self, mut handle_effect: F) -> Option<A>
    where
        F: FnMut(E, &mut EffectContext<A>),
    {
        let action = self.inbox.recv().await?;
        self.should_render |= self.dispatch(action.clone(), &mut handle_effect);
        Some(action)
    }

    /// Run the event/action loop until `should_quit` accepts an action
    pub async fn run<B, FRender, FEvent, FQuit, FEffect, R>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut render: FRender,
        mut map_event: FEvent,
        mut should_quit: FQuit,
        mut handle_effect: FEffect,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &S),
        FEvent: FnMut(&EventKind, &S) -> R,
        R: Into<EventOutcome<A>>,
        FQuit: FnMut(&A) -> bool,
        FEffect: FnMut(E, &mut EffectContext<A>),
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
        let cancel_token = CancellationToken::new();
        let _poller = spawn_event_poller(event_tx, PollerConfig::default(), cancel_token.clone());
        info!("Runtime started");

        loop {
            if self.should_render {
                let state = self.store.state();
                terminal.draw(|frame| render(frame, frame.area(), state))?;
                self.should_render = false;
            }

            tokio::select! {
                Some(raw_event) = event_rx.recv() => {
                    let Some(event) = process_raw_event(raw_event) else {
                        continue;
                    };
                    if matches!(event, EventKind::Resize(..)) {
                        self.should_render = true;
                    }

                    let outcome: EventOutcome<A> = map_event(&event, self.store.state()).into();
                    self.should_render |= outcome.needs_render;
                    for action in outcome.actions {
                        self.bus.publish(action);
                    }
                }

                Some(action) = self.inbox.recv() => {
                    if should_quit(&action) {
                        debug!(action = %action.name(), "Quit requested");
                        break;
                    }
                    self.should_render |= self.dispatch(action, &mut handle_effect);
                }

                else => break,
            }
        }

        cancel_token.cancel();
        self.tasks.cancel_all();
        info!("Runtime stopped");
        Ok(())
    }
}
