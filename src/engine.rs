use crate::classifier::{FrameAnalysis, FrameClassifier, GestureCandidate, GestureLabel};
use crate::config::{EngineConfig, EngineOptions};
use crate::confirm::{
    ConfirmationCounters, ConfirmationStateMachine, GestureEvent, MachineState, Timestamp,
};
use crate::error::GfResult;
use crate::landmarks::LandmarkFrame;
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};
use tracing::{debug, warn};

pub type EventHandler = Arc<dyn Fn(&GestureEvent) + Send + Sync>;

/// Receives every detection the tracker produces: `None` when no hand is visible.
pub type FrameSink = Box<dyn FnMut(Option<LandmarkFrame>, Timestamp) + Send>;

/// The external hand-tracking collaborator. The engine never constructs one;
/// the host injects it and wires it up with [`connect`].
pub trait HandTracker {
    fn on_frame(&mut self, sink: FrameSink);
}

struct Listener {
    id: u64,
    handler: EventHandler,
}

type ListenerList = RwLock<Vec<Listener>>;

fn read_listeners(list: &ListenerList) -> RwLockReadGuard<'_, Vec<Listener>> {
    list.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write_listeners(list: &ListenerList) -> RwLockWriteGuard<'_, Vec<Listener>> {
    list.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Handle returned by [`GestureEngine::subscribe`].
///
/// Dropping it keeps the listener registered; call
/// [`Subscription::unsubscribe`] to remove it.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    listeners: Weak<ListenerList>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns `false` if the engine is gone or the listener was already removed.
    pub fn unsubscribe(self) -> bool {
        let Some(listeners) = self.listeners.upgrade() else {
            return false;
        };
        let mut list = write_listeners(&listeners);
        let before = list.len();
        list.retain(|l| l.id != self.id);
        before != list.len()
    }
}

pub struct GestureEngine {
    config: EngineConfig,
    classifier: FrameClassifier,
    machine: ConfirmationStateMachine,
    listeners: Arc<ListenerList>,
    next_listener_id: u64,
}

impl GestureEngine {
    pub fn new(config: EngineConfig) -> GfResult<Self> {
        config.validate()?;
        let classifier = FrameClassifier::from_config(&config)?;
        let machine = ConfirmationStateMachine::new(config.hold_threshold, config.cooldown_ms);

        Ok(Self {
            config,
            classifier,
            machine,
            listeners: Arc::new(RwLock::new(Vec::new())),
            next_listener_id: 0,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Applies a partial update. On error the previous configuration stays in
    /// force. Hold progress and any open cooldown survive reconfiguration.
    pub fn configure(&mut self, options: &EngineOptions) -> GfResult<()> {
        let next = self.config.with_options(options);
        if let Err(e) = next.validate() {
            warn!("Rejected engine configuration: {}", e);
            return Err(e);
        }
        self.classifier = FrameClassifier::from_config(&next)?;
        self.machine.set_limits(next.hold_threshold, next.cooldown_ms);
        self.config = next;
        Ok(())
    }

    /// Classifies a frame and feeds the state machine. Fires subscribers
    /// synchronously when a gesture is confirmed.
    pub fn submit_frame(&mut self, frame: &LandmarkFrame, now: Timestamp) -> Option<GestureEvent> {
        let candidate = self.candidate(frame);
        self.advance(&candidate, now)
    }

    /// Same as [`Self::submit_frame`], with `None` meaning the tracker saw no hand.
    pub fn submit_detection(
        &mut self,
        frame: Option<&LandmarkFrame>,
        now: Timestamp,
    ) -> Option<GestureEvent> {
        match frame {
            Some(f) => self.submit_frame(f, now),
            None => self.advance(&GestureCandidate::none(), now),
        }
    }

    /// Classification only; does not touch the state machine.
    pub fn analyze(&self, frame: &LandmarkFrame) -> FrameAnalysis {
        self.classifier.analyze(frame)
    }

    /// The candidate the state machine would receive for `frame`, after the
    /// confidence gate.
    pub fn candidate(&self, frame: &LandmarkFrame) -> GestureCandidate {
        let score = frame.confidence_score;
        if frame.is_empty() || score.is_nan() || score < self.config.required_confidence {
            return GestureCandidate::none();
        }
        self.classifier.classify(frame)
    }

    fn advance(&mut self, candidate: &GestureCandidate, now: Timestamp) -> Option<GestureEvent> {
        let event = self.machine.submit(candidate, now)?;
        self.emit(&event);
        Some(event)
    }

    fn emit(&self, event: &GestureEvent) {
        // Snapshot so handlers may (un)subscribe while being called.
        let handlers: Vec<EventHandler> = read_listeners(&self.listeners)
            .iter()
            .map(|l| l.handler.clone())
            .collect();
        for handler in handlers {
            handler(event);
        }
    }

    pub fn subscribe<F>(&mut self, handler: F) -> Subscription
    where
        F: Fn(&GestureEvent) + Send + Sync + 'static,
    {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        write_listeners(&self.listeners).push(Listener {
            id,
            handler: Arc::new(handler),
        });
        Subscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    pub fn listener_count(&self) -> usize {
        read_listeners(&self.listeners).len()
    }

    /// Clears counters and cooldown. Listeners stay registered.
    pub fn reset(&mut self) {
        debug!("Engine reset");
        self.machine.reset();
    }

    pub fn state(&self, now: Timestamp) -> MachineState {
        self.machine.state(now)
    }

    pub fn progress(&self) -> Option<(GestureLabel, f32)> {
        self.machine.progress()
    }

    pub fn counters(&self) -> &ConfirmationCounters {
        self.machine.counters()
    }
}

/// Routes every detection from `tracker` into a shared engine, in the order
/// the tracker delivers them.
pub fn connect<T: HandTracker + ?Sized>(engine: Arc<Mutex<GestureEngine>>, tracker: &mut T) {
    tracker.on_frame(Box::new(move |frame, now| {
        let mut engine = engine
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        engine.submit_detection(frame.as_ref(), now);
    }));
}
