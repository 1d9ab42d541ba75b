//! Non-blocking request/response plumbing between the tick loop and an
//! advisor implementation.
//!
//! The tick loop must never wait on an advisor, so requests are
//! fire-and-forget and responses are polled once per tick. Responses
//! carry the request id they answer; the consumer discards anything
//! stale. A response that arrives after the consumer's deadline is
//! simply ignored; the call itself is never cancelled.

use std::collections::VecDeque;
use std::sync::mpsc;

use coreguard_core::state::SessionSummary;

use crate::{VisualDiagnostic, WaveAdjustment, WaveAdvisor, WaveContext};

/// Identifies one outstanding request.
pub type RequestId = u64;

/// A completed advisory call.
#[derive(Debug, Clone)]
pub enum AdvisorResponse {
    Wave {
        id: RequestId,
        adjustment: Option<WaveAdjustment>,
    },
    Diagnostic {
        id: RequestId,
        diagnostic: Option<VisualDiagnostic>,
    },
    Redemption {
        id: RequestId,
        card_id: Option<String>,
    },
}

impl AdvisorResponse {
    pub fn id(&self) -> RequestId {
        match self {
            AdvisorResponse::Wave { id, .. }
            | AdvisorResponse::Diagnostic { id, .. }
            | AdvisorResponse::Redemption { id, .. } => *id,
        }
    }
}

#[derive(Debug)]
enum AdvisorRequest {
    Wave { id: RequestId, ctx: WaveContext },
    Diagnostic { id: RequestId, frame_png: Vec<u8> },
    Redemption {
        id: RequestId,
        history: Vec<SessionSummary>,
    },
}

enum Mode {
    /// In-process, synchronous dispatch. Deterministic; used by tests
    /// and by embeddings that already answer off-thread themselves.
    Direct {
        advisor: Box<dyn WaveAdvisor>,
        ready: VecDeque<AdvisorResponse>,
    },
    /// Worker thread owns the advisor; channels carry traffic.
    Threaded {
        tx: mpsc::Sender<AdvisorRequest>,
        rx: mpsc::Receiver<AdvisorResponse>,
    },
    /// No advisor wired up. Requests go unanswered and the consumer's
    /// deadline fallback always fires.
    Disconnected,
}

/// Handle the simulation holds to reach the advisor.
pub struct AdvisorLink {
    mode: Mode,
    next_id: RequestId,
}

impl AdvisorLink {
    /// Synchronous in-process link.
    pub fn direct(advisor: Box<dyn WaveAdvisor>) -> Self {
        Self {
            mode: Mode::Direct {
                advisor,
                ready: VecDeque::new(),
            },
            next_id: 0,
        }
    }

    /// Spawn a worker thread owning the advisor.
    pub fn spawn(advisor: Box<dyn WaveAdvisor>) -> Self {
        let (req_tx, req_rx) = mpsc::channel::<AdvisorRequest>();
        let (resp_tx, resp_rx) = mpsc::channel::<AdvisorResponse>();

        let spawned = std::thread::Builder::new()
            .name("coreguard-advisor".into())
            .spawn(move || run_worker(advisor, req_rx, resp_tx));
        if let Err(e) = spawned {
            // The closure (and its channel ends) is dropped, so the link
            // degrades to unanswered requests, same as a dead advisor.
            log::warn!("failed to spawn advisor worker: {e}");
        }

        Self {
            mode: Mode::Threaded {
                tx: req_tx,
                rx: resp_rx,
            },
            next_id: 0,
        }
    }

    /// Link that never answers.
    pub fn disconnected() -> Self {
        Self {
            mode: Mode::Disconnected,
            next_id: 0,
        }
    }

    /// Request next-wave tuning. Returns the id to match the response.
    pub fn request_wave_adjustment(&mut self, ctx: WaveContext) -> RequestId {
        let id = self.take_id();
        self.dispatch(AdvisorRequest::Wave { id, ctx });
        id
    }

    /// Request a frame diagnostic.
    pub fn request_diagnostic(&mut self, frame_png: Vec<u8>) -> RequestId {
        let id = self.take_id();
        self.dispatch(AdvisorRequest::Diagnostic { id, frame_png });
        id
    }

    /// Request a redemption card for a failing history.
    pub fn request_redemption(&mut self, history: Vec<SessionSummary>) -> RequestId {
        let id = self.take_id();
        self.dispatch(AdvisorRequest::Redemption { id, history });
        id
    }

    /// Fetch one completed response, if any. Never blocks.
    pub fn try_poll(&mut self) -> Option<AdvisorResponse> {
        match &mut self.mode {
            Mode::Direct { ready, .. } => ready.pop_front(),
            Mode::Threaded { rx, .. } => rx.try_recv().ok(),
            Mode::Disconnected => None,
        }
    }

    fn take_id(&mut self) -> RequestId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn dispatch(&mut self, request: AdvisorRequest) {
        match &mut self.mode {
            Mode::Direct { advisor, ready } => {
                ready.push_back(answer(advisor.as_mut(), request));
            }
            Mode::Threaded { tx, .. } => {
                if tx.send(request).is_err() {
                    log::warn!("advisor worker is gone; request dropped");
                }
            }
            Mode::Disconnected => {}
        }
    }
}

/// Worker loop: answer requests until the link drops.
fn run_worker(
    mut advisor: Box<dyn WaveAdvisor>,
    req_rx: mpsc::Receiver<AdvisorRequest>,
    resp_tx: mpsc::Sender<AdvisorResponse>,
) {
    while let Ok(request) = req_rx.recv() {
        let response = answer(advisor.as_mut(), request);
        if resp_tx.send(response).is_err() {
            return;
        }
    }
}

fn answer(advisor: &mut dyn WaveAdvisor, request: AdvisorRequest) -> AdvisorResponse {
    match request {
        AdvisorRequest::Wave { id, ctx } => AdvisorResponse::Wave {
            id,
            adjustment: advisor.wave_adjustment(&ctx),
        },
        AdvisorRequest::Diagnostic { id, frame_png } => AdvisorResponse::Diagnostic {
            id,
            diagnostic: advisor.visual_diagnostic(&frame_png),
        },
        AdvisorRequest::Redemption { id, history } => AdvisorResponse::Redemption {
            id,
            card_id: advisor.redemption_card(&history),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticAdvisor;

    struct ScriptedAdvisor {
        difficulty: f64,
    }

    impl WaveAdvisor for ScriptedAdvisor {
        fn wave_adjustment(&mut self, ctx: &WaveContext) -> Option<WaveAdjustment> {
            Some(WaveAdjustment {
                difficulty_multiplier: self.difficulty,
                suggested_card_ids: vec!["pulse_node".into()],
                log_message: format!("wave {} assessed", ctx.wave),
            })
        }

        fn visual_diagnostic(&mut self, _frame: &[u8]) -> Option<VisualDiagnostic> {
            None
        }

        fn redemption_card(&mut self, history: &[SessionSummary]) -> Option<String> {
            (!history.is_empty()).then(|| "lance_battery".to_string())
        }
    }

    fn ctx() -> WaveContext {
        WaveContext {
            wave: 3,
            core_integrity: 88,
            energy: 7,
            node_count: 2,
            defeated_count: 11,
            node_subtypes: Vec::new(),
        }
    }

    #[test]
    fn direct_link_answers_in_order() {
        let mut link = AdvisorLink::direct(Box::new(ScriptedAdvisor { difficulty: 1.2 }));
        let a = link.request_wave_adjustment(ctx());
        let b = link.request_redemption(vec![SessionSummary {
            wave_reached: 4,
            defeated_count: 9,
            timestamp: 0,
        }]);

        match link.try_poll() {
            Some(AdvisorResponse::Wave { id, adjustment }) => {
                assert_eq!(id, a);
                assert_eq!(adjustment.unwrap().difficulty_multiplier, 1.2);
            }
            other => panic!("unexpected response {other:?}"),
        }
        match link.try_poll() {
            Some(AdvisorResponse::Redemption { id, card_id }) => {
                assert_eq!(id, b);
                assert_eq!(card_id.as_deref(), Some("lance_battery"));
            }
            other => panic!("unexpected response {other:?}"),
        }
        assert!(link.try_poll().is_none());
    }

    #[test]
    fn static_advisor_always_declines() {
        let mut link = AdvisorLink::direct(Box::new(StaticAdvisor));
        link.request_wave_adjustment(ctx());
        match link.try_poll() {
            Some(AdvisorResponse::Wave { adjustment, .. }) => assert!(adjustment.is_none()),
            other => panic!("unexpected response {other:?}"),
        }
    }

    #[test]
    fn disconnected_link_never_answers() {
        let mut link = AdvisorLink::disconnected();
        link.request_wave_adjustment(ctx());
        link.request_diagnostic(Vec::new());
        assert!(link.try_poll().is_none());
    }

    #[test]
    fn threaded_link_round_trip() {
        let mut link = AdvisorLink::spawn(Box::new(ScriptedAdvisor { difficulty: 0.9 }));
        let id = link.request_wave_adjustment(ctx());

        // Poll with a generous deadline; the worker answers quickly.
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        loop {
            if let Some(AdvisorResponse::Wave { id: got, adjustment }) = link.try_poll() {
                assert_eq!(got, id);
                assert_eq!(adjustment.unwrap().difficulty_multiplier, 0.9);
                break;
            }
            assert!(std::time::Instant::now() < deadline, "worker never answered");
            std::thread::yield_now();
        }
    }

    #[test]
    fn request_ids_are_unique_and_increasing() {
        let mut link = AdvisorLink::disconnected();
        let a = link.request_wave_adjustment(ctx());
        let b = link.request_diagnostic(Vec::new());
        let c = link.request_redemption(Vec::new());
        assert!(a < b && b < c);
    }
}
