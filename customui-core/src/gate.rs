// customui-core/src/gate.rs
//! One-shot "should this widget be destroyed" decisions, polled by the customizer.

use crossbeam::channel::{Receiver, Sender, TryRecvError, bounded};

/// Sending half, resolved once by whoever runs the external check
#[derive(Debug)]
pub struct DestroyDecision {
    tx: Sender<bool>,
}

impl DestroyDecision {
    /// `true` retracts the widget
    pub fn resolve(self, destroy: bool) {
        // The gate may already be gone if its widget was unregistered
        let _ = self.tx.send(destroy);
    }
}

/// Receiving half, held by the customizer until it resolves
#[derive(Debug)]
pub struct DestroyGate {
    rx: Receiver<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Pending,
    Destroy,
    Keep,
    /// The decision was dropped without resolving
    Abandoned,
}

impl DestroyGate {
    pub fn channel() -> (DestroyDecision, DestroyGate) {
        let (tx, rx) = bounded(1);
        (DestroyDecision { tx }, DestroyGate { rx })
    }

    /// A gate that is already decided
    pub fn resolved(destroy: bool) -> Self {
        let (decision, gate) = Self::channel();
        decision.resolve(destroy);
        gate
    }

    pub fn poll(&self) -> GateState {
        match self.rx.try_recv() {
            Ok(true) => GateState::Destroy,
            Ok(false) => GateState::Keep,
            Err(TryRecvError::Empty) => GateState::Pending,
            Err(TryRecvError::Disconnected) => GateState::Abandoned,
        }
    }
}
