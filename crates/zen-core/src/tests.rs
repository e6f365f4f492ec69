#[cfg(test)]
mod tests {
    use crate::event_bus::EventBus;
    use crate::focus::*;
    use crate::guidance::*;
    use crate::chat::*;
    use crate::tasks::*;
    use crate::notes::*;
    use crate::quotes::*;
    use crate::ports::*;
    use zen_types::event::ZenEvent;
    use zen_types::focus::*;
    use zen_types::message::*;
    use zen_types::note::Note;
    use zen_types::task::Task;
    use zen_types::ZenError;
    use async_trait::async_trait;
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use futures::future::LocalBoxFuture;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    // ─── Mocks ───────────────────────────────────────────────

    #[derive(Default)]
    struct MockAudio {
        played: RefCell<Vec<CueKind>>,
    }

    impl AudioPort for MockAudio {
        fn play_cue(&self, kind: CueKind) {
            self.played.borrow_mut().push(kind);
        }
    }

    /// Guidance that answers immediately and records what it was asked
    struct MockGuidance {
        reply: Result<String, ZenError>,
        asked: RefCell<Vec<GuidanceRequest>>,
    }

    impl MockGuidance {
        fn ok(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                asked: RefCell::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(ZenError::Network("offline".to_string())),
                asked: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl GuidancePort for MockGuidance {
        async fn request_guidance(&self, req: &GuidanceRequest) -> zen_types::Result<String> {
            self.asked.borrow_mut().push(req.clone());
            self.reply.clone()
        }
    }

    /// Spawner that parks futures until the test runs them
    #[derive(Default)]
    struct QueueSpawner {
        tasks: RefCell<Vec<LocalBoxFuture<'static, ()>>>,
    }

    impl QueueSpawner {
        fn run_all(&self) {
            let tasks: Vec<_> = self.tasks.borrow_mut().drain(..).collect();
            for task in tasks {
                block_on(task);
            }
        }

        fn pending(&self) -> usize {
            self.tasks.borrow().len()
        }
    }

    impl Spawner for QueueSpawner {
        fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
            self.tasks.borrow_mut().push(task);
        }
    }

    /// LLM that returns a fixed reply and records requests
    struct MockLlm {
        reply: Result<String, ZenError>,
        requests: RefCell<Vec<ChatRequest>>,
    }

    impl MockLlm {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                requests: RefCell::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(ZenError::Llm("API key invalid".to_string())),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl LlmPort for MockLlm {
        async fn chat_completion(&self, req: ChatRequest) -> zen_types::Result<ChatResponse> {
            self.requests.borrow_mut().push(req);
            let text = self.reply.clone()?;
            Ok(ChatResponse {
                message: Message::assistant(&text),
                usage: Some(TokenUsage {
                    prompt_tokens: 10,
                    completion_tokens: 5,
                    total_tokens: 15,
                }),
            })
        }
    }

    struct MockStorage {
        data: RefCell<HashMap<String, Vec<u8>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                data: RefCell::new(HashMap::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl StoragePort for MockStorage {
        async fn get(&self, key: &str) -> zen_types::Result<Option<Vec<u8>>> {
            Ok(self.data.borrow().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &[u8]) -> zen_types::Result<()> {
            self.data.borrow_mut().insert(key.to_string(), value.to_vec());
            Ok(())
        }

        async fn delete(&self, key: &str) -> zen_types::Result<()> {
            self.data.borrow_mut().remove(key);
            Ok(())
        }

        async fn list_keys(&self, prefix: &str) -> zen_types::Result<Vec<String>> {
            Ok(self
                .data
                .borrow()
                .keys()
                .filter(|k| k.starts_with(prefix))
                .cloned()
                .collect())
        }

        fn backend_name(&self) -> &str {
            "mock"
        }
    }

    // Simple executor for single-threaded tests (we're not in WASM here)
    fn block_on<F: std::future::Future<Output = T>, T>(f: F) -> T {
        use std::task::{Context, Poll, Wake, Waker};
        use std::sync::Arc;

        struct NoopWaker;
        impl Wake for NoopWaker {
            fn wake(self: Arc<Self>) {}
        }

        let waker = Waker::from(Arc::new(NoopWaker));
        let mut cx = Context::from_waker(&waker);
        let mut f = std::pin::pin!(f);

        loop {
            match f.as_mut().poll(&mut cx) {
                Poll::Ready(val) => return val,
                Poll::Pending => {
                    // Mocks complete immediately, so this shouldn't spin
                    std::thread::yield_now();
                }
            }
        }
    }

    fn controller() -> (FocusController, Rc<MockAudio>, EventBus) {
        let audio = Rc::new(MockAudio::default());
        let bus = EventBus::new();
        let ctrl = FocusController::new(audio.clone(), bus.clone());
        (ctrl, audio, bus)
    }

    fn algebra() -> SessionConfig {
        SessionConfig::new("Algebra", 1, 1)
    }

    fn tick_n(ctrl: &mut FocusController, n: usize) {
        for _ in 0..n {
            ctrl.tick();
        }
    }

    // ─── EventBus Tests ──────────────────────────────────────

    #[test]
    fn test_event_bus_emit_and_drain() {
        let bus = EventBus::new();
        assert!(!bus.has_pending());
        bus.emit(ZenEvent::SessionReset);
        bus.emit(ZenEvent::ChatPending);
        assert!(bus.has_pending());
        assert_eq!(bus.drain().len(), 2);
        assert!(!bus.has_pending());
    }

    #[test]
    fn test_event_bus_clone_shares_state() {
        let bus1 = EventBus::new();
        let bus2 = bus1.clone();
        bus1.emit(ZenEvent::SessionReset);
        assert!(bus2.has_pending());
        assert_eq!(bus2.drain().len(), 1);
        assert!(!bus1.has_pending());
    }

    // ─── FocusController: start ──────────────────────────────

    #[test]
    fn test_initial_state_is_idle() {
        let (ctrl, _, _) = controller();
        assert_eq!(ctrl.state(), SessionState::idle());
        assert!(ctrl.config().is_none());
        assert!(!ctrl.is_muted());
    }

    #[test]
    fn test_start_enters_focusing() {
        for (focus, brk) in [(1, 1), (25, 5), (120, 60), (45, 15)] {
            let (mut ctrl, _, _) = controller();
            ctrl.start(SessionConfig::new("Physics", focus, brk)).unwrap();
            let state = ctrl.state();
            assert_eq!(state.phase, Phase::Focusing);
            assert_eq!(state.seconds_remaining, focus * 60);
            assert_eq!(state.total_phase_seconds, focus * 60);
            assert!(!state.paused);
        }
    }

    #[test]
    fn test_start_queues_focus_guidance() {
        let (mut ctrl, _, _) = controller();
        ctrl.start(algebra()).unwrap();
        let tickets = ctrl.take_guidance_requests();
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].generation, ctrl.generation());
        assert_eq!(tickets[0].request.topic, "Algebra");
        assert_eq!(tickets[0].request.phase, PhaseHint::Focus);
        assert!(ctrl.take_guidance_requests().is_empty());
    }

    #[test]
    fn test_start_empty_topic_is_rejected() {
        let (mut ctrl, _, bus) = controller();
        let err = ctrl.start(SessionConfig::new("", 25, 5)).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(ctrl.state(), SessionState::idle());
        assert!(ctrl.config().is_none());
        assert!(ctrl.take_guidance_requests().is_empty());
        assert!(!bus.has_pending());
    }

    #[test]
    fn test_start_out_of_range_is_rejected() {
        let (mut ctrl, _, _) = controller();
        assert!(ctrl.start(SessionConfig::new("x", 0, 5)).is_err());
        assert!(ctrl.start(SessionConfig::new("x", 25, 61)).is_err());
        assert_eq!(ctrl.phase(), Phase::Idle);
    }

    #[test]
    fn test_start_while_live_is_ignored() {
        let (mut ctrl, _, _) = controller();
        ctrl.start(algebra()).unwrap();
        tick_n(&mut ctrl, 10);
        let generation = ctrl.generation();
        ctrl.take_guidance_requests();

        ctrl.start(SessionConfig::new("History", 30, 5)).unwrap();
        assert_eq!(ctrl.config().unwrap().topic, "Algebra");
        assert_eq!(ctrl.state().seconds_remaining, 50);
        assert_eq!(ctrl.generation(), generation);
        assert!(ctrl.take_guidance_requests().is_empty());
    }

    #[test]
    fn test_start_from_ended_begins_new_session() {
        let (mut ctrl, _, _) = controller();
        ctrl.start(algebra()).unwrap();
        tick_n(&mut ctrl, 120);
        assert_eq!(ctrl.phase(), Phase::Ended);

        ctrl.start(SessionConfig::new("Chemistry", 2, 1)).unwrap();
        let state = ctrl.state();
        assert_eq!(state.phase, Phase::Focusing);
        assert_eq!(state.seconds_remaining, 120);
        assert!(state.guidance_message.is_none());
    }

    // ─── FocusController: tick ───────────────────────────────

    #[test]
    fn test_tick_decrements() {
        let (mut ctrl, _, _) = controller();
        ctrl.start(SessionConfig::new("x", 25, 5)).unwrap();
        tick_n(&mut ctrl, 7);
        assert_eq!(ctrl.state().seconds_remaining, 1500 - 7);
    }

    #[test]
    fn test_tick_idle_is_noop() {
        let (mut ctrl, audio, bus) = controller();
        tick_n(&mut ctrl, 5);
        assert_eq!(ctrl.state(), SessionState::idle());
        assert!(audio.played.borrow().is_empty());
        assert!(!bus.has_pending());
    }

    #[test]
    fn test_full_cycle() {
        let (mut ctrl, audio, _) = controller();
        ctrl.start(algebra()).unwrap();

        tick_n(&mut ctrl, 59);
        assert_eq!(ctrl.phase(), Phase::Focusing);
        assert_eq!(ctrl.state().seconds_remaining, 1);

        ctrl.tick();
        let state = ctrl.state();
        assert_eq!(state.phase, Phase::OnBreak);
        assert_eq!(state.seconds_remaining, 60);
        assert_eq!(state.total_phase_seconds, 60);
        assert_eq!(*audio.played.borrow(), vec![CueKind::FocusEnd]);

        tick_n(&mut ctrl, 60);
        let state = ctrl.state();
        assert_eq!(state.phase, Phase::Ended);
        assert_eq!(state.seconds_remaining, 0);
        assert_eq!(*audio.played.borrow(), vec![CueKind::FocusEnd, CueKind::BreakEnd]);

        tick_n(&mut ctrl, 30);
        assert_eq!(ctrl.state(), state);
        assert_eq!(audio.played.borrow().len(), 2);
    }

    #[test]
    fn test_full_cycle_guidance_hints() {
        let (mut ctrl, _, _) = controller();
        ctrl.start(algebra()).unwrap();
        tick_n(&mut ctrl, 120);
        let hints: Vec<PhaseHint> = ctrl
            .take_guidance_requests()
            .into_iter()
            .map(|t| t.request.phase)
            .collect();
        assert_eq!(hints, vec![PhaseHint::Focus, PhaseHint::Break, PhaseHint::Ended]);
    }

    #[test]
    fn test_ended_sets_session_message() {
        let (mut ctrl, _, _) = controller();
        ctrl.start(algebra()).unwrap();
        tick_n(&mut ctrl, 120);
        assert_eq!(
            ctrl.state().guidance_message.as_deref(),
            Some(SESSION_ENDED_MESSAGE)
        );
    }

    #[test]
    fn test_full_cycle_events() {
        let (mut ctrl, _, bus) = controller();
        ctrl.start(algebra()).unwrap();
        tick_n(&mut ctrl, 120);
        let events = bus.drain();
        let phases: Vec<Phase> = events
            .iter()
            .filter_map(|e| match e {
                ZenEvent::PhaseChanged { phase, .. } => Some(*phase),
                _ => None,
            })
            .collect();
        assert_eq!(phases, vec![Phase::Focusing, Phase::OnBreak, Phase::Ended]);
        let cues = events
            .iter()
            .filter(|e| matches!(e, ZenEvent::CueSignalled { .. }))
            .count();
        assert_eq!(cues, 2);
    }

    #[test]
    fn test_counters_stay_in_bounds() {
        let (mut ctrl, _, _) = controller();
        ctrl.start(SessionConfig::new("x", 2, 1)).unwrap();
        for i in 0..400 {
            let state = ctrl.state();
            assert!(
                state.seconds_remaining <= state.total_phase_seconds,
                "tick {}: {} > {}",
                i,
                state.seconds_remaining,
                state.total_phase_seconds
            );
            if i % 37 == 0 {
                ctrl.toggle_pause();
            }
            ctrl.tick();
        }
    }

    // ─── FocusController: pause ──────────────────────────────

    #[test]
    fn test_paused_ticks_do_nothing() {
        let (mut ctrl, audio, _) = controller();
        ctrl.start(algebra()).unwrap();
        tick_n(&mut ctrl, 10);
        ctrl.toggle_pause();
        assert!(ctrl.state().paused);

        tick_n(&mut ctrl, 500);
        assert_eq!(ctrl.state().seconds_remaining, 50);
        assert_eq!(ctrl.phase(), Phase::Focusing);
        assert!(audio.played.borrow().is_empty());

        ctrl.toggle_pause();
        tick_n(&mut ctrl, 20);
        assert_eq!(ctrl.state().seconds_remaining, 30);
    }

    #[test]
    fn test_unpaused_ticks_clamp_at_zero_and_expire() {
        let (mut ctrl, _, _) = controller();
        ctrl.start(SessionConfig::new("x", 1, 2)).unwrap();
        tick_n(&mut ctrl, 75);
        let state = ctrl.state();
        assert_eq!(state.phase, Phase::OnBreak);
        assert_eq!(state.seconds_remaining, 120 - 15);
    }

    #[test]
    fn test_toggle_pause_requeues_guidance() {
        let (mut ctrl, _, bus) = controller();
        ctrl.start(algebra()).unwrap();
        ctrl.take_guidance_requests();
        bus.drain();

        ctrl.toggle_pause();
        ctrl.toggle_pause();
        let tickets = ctrl.take_guidance_requests();
        assert_eq!(tickets.len(), 2);
        assert!(tickets.iter().all(|t| t.request.phase == PhaseHint::Focus));

        let events = bus.drain();
        assert_eq!(
            events,
            vec![
                ZenEvent::PauseToggled { paused: true },
                ZenEvent::PauseToggled { paused: false },
            ]
        );
    }

    #[test]
    fn test_toggle_pause_outside_live_phase_is_noop() {
        let (mut ctrl, _, _) = controller();
        ctrl.toggle_pause();
        assert!(!ctrl.state().paused);

        ctrl.start(algebra()).unwrap();
        tick_n(&mut ctrl, 120);
        ctrl.take_guidance_requests();
        ctrl.toggle_pause();
        assert!(!ctrl.state().paused);
        assert!(ctrl.take_guidance_requests().is_empty());
    }

    // ─── FocusController: reset ──────────────────────────────

    #[test]
    fn test_reset_from_every_phase() {
        let scenarios: [usize; 4] = [0, 10, 70, 120];
        for ticks in scenarios {
            let (mut ctrl, _, _) = controller();
            ctrl.start(algebra()).unwrap();
            tick_n(&mut ctrl, ticks);
            ctrl.toggle_pause();
            ctrl.reset();
            assert_eq!(ctrl.state(), SessionState::idle());
            assert!(ctrl.config().is_none());
            assert!(ctrl.take_guidance_requests().is_empty());
        }
    }

    #[test]
    fn test_reset_is_idempotent() {
        let (mut ctrl, _, _) = controller();
        ctrl.reset();
        let first = ctrl.state();
        ctrl.reset();
        assert_eq!(ctrl.state(), first);
        assert_eq!(first, SessionState::idle());
    }

    #[test]
    fn test_reset_keeps_mute() {
        let (mut ctrl, _, _) = controller();
        assert!(ctrl.toggle_mute());
        ctrl.reset();
        assert!(ctrl.is_muted());
    }

    // ─── FocusController: mute ───────────────────────────────

    #[test]
    fn test_muted_suppresses_cues_only() {
        let (mut ctrl, audio, bus) = controller();
        ctrl.set_muted(true);
        ctrl.start(algebra()).unwrap();
        tick_n(&mut ctrl, 120);
        assert_eq!(ctrl.phase(), Phase::Ended);
        assert!(audio.played.borrow().is_empty());

        let muted_cues = bus
            .drain()
            .into_iter()
            .filter(|e| matches!(e, ZenEvent::CueSignalled { muted: true, .. }))
            .count();
        assert_eq!(muted_cues, 2);
    }

    // ─── FocusController: guidance ───────────────────────────

    #[test]
    fn test_apply_guidance_sets_message() {
        let (mut ctrl, _, _) = controller();
        ctrl.start(algebra()).unwrap();
        let generation = ctrl.generation();
        let before = ctrl.state();

        assert!(ctrl.apply_guidance(generation, Ok("Stay focused!".to_string())));
        let after = ctrl.state();
        assert_eq!(after.guidance_message.as_deref(), Some("Stay focused!"));
        assert_eq!(after.phase, before.phase);
        assert_eq!(after.seconds_remaining, before.seconds_remaining);
    }

    #[test]
    fn test_guidance_failure_uses_fallback() {
        let (mut ctrl, _, _) = controller();
        ctrl.start(algebra()).unwrap();
        tick_n(&mut ctrl, 5);
        let before = ctrl.state();

        ctrl.apply_guidance(ctrl.generation(), Err(ZenError::Network("down".to_string())));
        let after = ctrl.state();
        assert_eq!(after.guidance_message.as_deref(), Some(GUIDANCE_FALLBACK));
        assert_eq!(after.phase, before.phase);
        assert_eq!(after.seconds_remaining, before.seconds_remaining);
        assert_eq!(after.total_phase_seconds, before.total_phase_seconds);
        assert_eq!(after.paused, before.paused);
    }

    #[test]
    fn test_late_response_after_phase_change_still_applies() {
        let (mut ctrl, _, _) = controller();
        ctrl.start(algebra()).unwrap();
        let focus_ticket = ctrl.take_guidance_requests().remove(0);
        tick_n(&mut ctrl, 60);
        assert_eq!(ctrl.phase(), Phase::OnBreak);

        assert!(ctrl.apply_guidance(focus_ticket.generation, Ok("focus tip".to_string())));
        assert_eq!(ctrl.state().guidance_message.as_deref(), Some("focus tip"));
        assert_eq!(ctrl.phase(), Phase::OnBreak);
    }

    #[test]
    fn test_stale_response_after_reset_is_discarded() {
        let (mut ctrl, _, _) = controller();
        ctrl.start(algebra()).unwrap();
        let ticket = ctrl.take_guidance_requests().remove(0);
        ctrl.reset();

        assert!(!ctrl.apply_guidance(ticket.generation, Ok("late".to_string())));
        assert_eq!(ctrl.state(), SessionState::idle());
    }

    #[test]
    fn test_stale_response_from_previous_session_is_discarded() {
        let (mut ctrl, _, _) = controller();
        ctrl.start(algebra()).unwrap();
        let old = ctrl.take_guidance_requests().remove(0);
        ctrl.reset();
        ctrl.start(SessionConfig::new("History", 5, 5)).unwrap();

        assert!(!ctrl.apply_guidance(old.generation, Ok("old".to_string())));
        assert!(ctrl.state().guidance_message.is_none());
    }

    // ─── dispatch_guidance ───────────────────────────────────

    #[test]
    fn test_dispatch_guidance_applies_reply() {
        let (ctrl, _, _) = controller();
        let ctrl = Rc::new(RefCell::new(ctrl));
        let mock = Rc::new(MockGuidance::ok("Block distractions."));
        let guidance: Rc<dyn GuidancePort> = mock.clone();
        let spawner = QueueSpawner::default();

        ctrl.borrow_mut().start(algebra()).unwrap();
        assert_eq!(dispatch_guidance(&ctrl, &guidance, &spawner), 1);
        assert_eq!(spawner.pending(), 1);
        spawner.run_all();

        assert_eq!(
            ctrl.borrow().state().guidance_message.as_deref(),
            Some("Block distractions.")
        );
        assert_eq!(mock.asked.borrow()[0].phase, PhaseHint::Focus);
    }

    #[test]
    fn test_dispatch_guidance_failure_leaves_timer_alone() {
        let (ctrl, _, _) = controller();
        let ctrl = Rc::new(RefCell::new(ctrl));
        let guidance: Rc<dyn GuidancePort> = Rc::new(MockGuidance::failing());
        let spawner = QueueSpawner::default();

        ctrl.borrow_mut().start(algebra()).unwrap();
        ctrl.borrow_mut().tick();
        dispatch_guidance(&ctrl, &guidance, &spawner);
        spawner.run_all();

        let state = ctrl.borrow().state();
        assert_eq!(state.guidance_message.as_deref(), Some(GUIDANCE_FALLBACK));
        assert_eq!(state.phase, Phase::Focusing);
        assert_eq!(state.seconds_remaining, 59);
    }

    #[test]
    fn test_dispatch_guidance_reply_after_reset_is_ignored() {
        let (ctrl, _, _) = controller();
        let ctrl = Rc::new(RefCell::new(ctrl));
        let guidance: Rc<dyn GuidancePort> = Rc::new(MockGuidance::ok("Go!"));
        let spawner = QueueSpawner::default();

        ctrl.borrow_mut().start(algebra()).unwrap();
        dispatch_guidance(&ctrl, &guidance, &spawner);
        ctrl.borrow_mut().reset();
        spawner.run_all();

        assert_eq!(ctrl.borrow().state(), SessionState::idle());
    }

    #[test]
    fn test_dispatch_guidance_after_controller_dropped() {
        let (ctrl, _, _) = controller();
        let ctrl = Rc::new(RefCell::new(ctrl));
        let guidance: Rc<dyn GuidancePort> = Rc::new(MockGuidance::ok("Go!"));
        let spawner = QueueSpawner::default();

        ctrl.borrow_mut().start(algebra()).unwrap();
        dispatch_guidance(&ctrl, &guidance, &spawner);
        drop(ctrl);
        spawner.run_all();
    }

    #[test]
    fn test_dispatch_guidance_nothing_queued() {
        let (ctrl, _, _) = controller();
        let ctrl = Rc::new(RefCell::new(ctrl));
        let guidance: Rc<dyn GuidancePort> = Rc::new(MockGuidance::ok("Go!"));
        let spawner = QueueSpawner::default();
        assert_eq!(dispatch_guidance(&ctrl, &guidance, &spawner), 0);
        assert_eq!(spawner.pending(), 0);
    }

    // ─── LlmGuidance Tests ───────────────────────────────────

    #[test]
    fn test_parse_guidance_json() {
        let raw = r#"{"message":"Keep going!","nextAction":"FOCUS","timeRemaining":20}"#;
        assert_eq!(parse_guidance(raw).unwrap(), "Keep going!");
    }

    #[test]
    fn test_parse_guidance_fenced_json() {
        let raw = "```json\n{\"message\":\"Relax.\",\"nextAction\":\"BREAK\"}\n```";
        assert_eq!(parse_guidance(raw).unwrap(), "Relax.");
    }

    #[test]
    fn test_parse_guidance_plain_text() {
        assert_eq!(parse_guidance("  Well done!  ").unwrap(), "Well done!");
    }

    #[test]
    fn test_parse_guidance_rejects_empty_and_malformed() {
        assert!(parse_guidance("   ").is_err());
        assert!(parse_guidance(r#"{"message": ""}"#).is_err());
        assert!(parse_guidance(r#"{"msg": "x"}"#).is_err());
    }

    #[test]
    fn test_guidance_output_next_action() {
        let out: GuidanceOutput =
            serde_json::from_str(r#"{"message":"m","nextAction":"SESSION_END"}"#).unwrap();
        assert_eq!(out.next_action, Some(NextAction::SessionEnd));
        assert!(out.time_remaining.is_none());
    }

    #[test]
    fn test_llm_guidance_builds_prompt() {
        let llm = Rc::new(MockLlm::replying(r#"{"message":"Focus on Algebra."}"#));
        let guidance = LlmGuidance::new(llm.clone());
        let req = GuidanceRequest::for_config(&algebra(), PhaseHint::Break);

        let text = block_on(guidance.request_guidance(&req)).unwrap();
        assert_eq!(text, "Focus on Algebra.");

        let requests = llm.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].json_output);
        assert_eq!(requests[0].messages[0].role, Role::System);
        let prompt = &requests[0].messages[1].content;
        assert!(prompt.contains("Algebra"));
        assert!(prompt.contains("Current phase: break"));
    }

    #[test]
    fn test_llm_guidance_propagates_error() {
        let guidance = LlmGuidance::new(Rc::new(MockLlm::failing()));
        let req = GuidanceRequest::for_config(&algebra(), PhaseHint::Focus);
        assert!(block_on(guidance.request_guidance(&req)).is_err());
    }

    // ─── Chat Tests ──────────────────────────────────────────

    #[test]
    fn test_route_query() {
        assert_eq!(route_query("What is entropy?"), QueryRoute::AcademicQuestion);
        assert_eq!(route_query("Can you EXPLAIN recursion"), QueryRoute::AcademicQuestion);
        assert_eq!(route_query("I have a question"), QueryRoute::AcademicQuestion);
        assert_eq!(route_query("Any tips for exams?"), QueryRoute::StudyTips);
        assert_eq!(route_query("help me plan my week"), QueryRoute::StudyTips);
        assert_eq!(route_query("hello there"), QueryRoute::General);
    }

    #[test]
    fn test_chat_query_general_prompt() {
        let req = ChatQuery::new("hello there").to_request();
        assert!(!req.json_output);
        assert!(req.messages[1].content.contains("Respond to: hello there"));
    }

    #[test]
    fn test_chat_open_seeds_greeting_once() {
        let mut chat = ChatAssistant::new(EventBus::new());
        chat.open();
        chat.open();
        assert_eq!(chat.entries().len(), 1);
        assert_eq!(chat.entries()[0].text, GREETING);
    }

    #[test]
    fn test_chat_submit_and_complete() {
        let bus = EventBus::new();
        let mut chat = ChatAssistant::new(bus.clone());
        let llm = MockLlm::replying("Use spaced repetition.");

        let query = chat.submit("  any tips?  ").unwrap();
        assert_eq!(query.route, QueryRoute::StudyTips);
        assert_eq!(query.input, "any tips?");
        assert!(chat.is_busy());
        assert!(chat.submit("another").is_none());

        let reply = block_on(query.send(&llm));
        chat.complete(reply);
        assert!(!chat.is_busy());
        assert_eq!(chat.entries().len(), 2);
        assert_eq!(chat.entries()[1], ChatEntry::assistant("Use spaced repetition."));

        let events = bus.drain();
        assert_eq!(events[0], ZenEvent::ChatPending);
        assert!(matches!(events[1], ZenEvent::ChatReply { .. }));
    }

    #[test]
    fn test_chat_blank_input_ignored() {
        let mut chat = ChatAssistant::new(EventBus::new());
        assert!(chat.submit("   ").is_none());
        assert!(chat.entries().is_empty());
        assert!(!chat.is_busy());
    }

    #[test]
    fn test_chat_error_reply() {
        let bus = EventBus::new();
        let mut chat = ChatAssistant::new(bus.clone());
        let query = chat.submit("explain photosynthesis").unwrap();
        let reply = block_on(query.send(&MockLlm::failing()));
        chat.complete(reply);

        assert_eq!(chat.entries().last().unwrap().text, CHAT_ERROR_REPLY);
        assert!(bus.drain().iter().any(|e| matches!(e, ZenEvent::Error { .. })));
    }

    // ─── TaskBook Tests ──────────────────────────────────────

    #[test]
    fn test_task_book_save_inserts_and_updates() {
        let mut book = TaskBook::new();
        let task = Task::new("Read chapter 1");
        let id = task.id.clone();
        book.save_task(task).unwrap();
        assert_eq!(book.len(), 1);

        let mut edited = book.get(&id).unwrap().clone();
        edited.title = "Read chapter 2".to_string();
        book.save_task(edited).unwrap();
        assert_eq!(book.len(), 1);
        assert_eq!(book.get(&id).unwrap().title, "Read chapter 2");
    }

    #[test]
    fn test_task_book_rejects_blank_title() {
        let mut book = TaskBook::new();
        assert!(book.save_task(Task::new("")).unwrap_err().is_validation());
        assert!(book.is_empty());
    }

    #[test]
    fn test_task_book_toggle_and_delete() {
        let mut book = TaskBook::new();
        let task = Task::new("Essay");
        let id = task.id.clone();
        book.save_task(task).unwrap();

        assert!(book.toggle_complete(&id).unwrap());
        assert!(!book.toggle_complete(&id).unwrap());
        assert_eq!(book.delete(&id).unwrap().title, "Essay");
        assert!(matches!(book.delete(&id), Err(ZenError::NotFound(_))));
        assert!(matches!(book.toggle_complete(&id), Err(ZenError::NotFound(_))));
    }

    #[test]
    fn test_task_book_sorted() {
        let day = |d| NaiveDate::from_ymd_opt(2026, 5, d).unwrap();
        let now = Utc::now();
        let mut done = Task::new("done").with_deadline(day(1));
        done.completed = true;
        let late = Task::new("late").with_deadline(day(20));
        let soon = Task::new("soon").with_deadline(day(2));
        let mut old_undated = Task::new("old undated");
        old_undated.created_at = now - Duration::hours(2);
        let mut new_undated = Task::new("new undated");
        new_undated.created_at = now;

        let book = TaskBook::from_tasks(vec![done, late, old_undated, soon, new_undated]);
        let titles: Vec<&str> = book.sorted().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["soon", "late", "new undated", "old undated", "done"]);
    }

    #[test]
    fn test_task_book_due_on() {
        let date = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        let book = TaskBook::from_tasks(vec![
            Task::new("a").with_deadline(date),
            Task::new("b"),
            Task::new("c").with_deadline(date.succ_opt().unwrap()),
        ]);
        let due = book.due_on(date);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].title, "a");
    }

    #[test]
    fn test_task_book_persistence() {
        let storage = MockStorage::new();
        block_on(async {
            assert!(TaskBook::load(&storage).await.unwrap().is_empty());

            let mut book = TaskBook::new();
            book.save_task(Task::new("Flashcards")).unwrap();
            book.save(&storage).await.unwrap();
            assert!(storage.exists(TASKS_KEY).await.unwrap());

            let loaded = TaskBook::load(&storage).await.unwrap();
            assert_eq!(loaded, book);
        });
    }

    #[test]
    fn test_task_book_load_corrupt() {
        let storage = MockStorage::new();
        block_on(async {
            storage.set(TASKS_KEY, b"not json").await.unwrap();
            let err = TaskBook::load(&storage).await.unwrap_err();
            assert!(matches!(err, ZenError::Serialization(_)));
        });
    }

    // ─── NoteBook Tests ──────────────────────────────────────

    #[test]
    fn test_note_book_create_prepends() {
        let mut book = NoteBook::new();
        book.create("first", "a").unwrap();
        let id = book.create("second", "b").unwrap();
        assert_eq!(book.notes()[0].id, id);
        assert_eq!(book.notes()[1].title, "first");
    }

    #[test]
    fn test_note_book_validation() {
        let mut book = NoteBook::new();
        assert!(book.create("", "content").is_err());
        assert!(book.create("title", "").is_err());
        assert!(book.is_empty());
    }

    #[test]
    fn test_note_book_update() {
        let mut book = NoteBook::new();
        let id = book.create("t", "c").unwrap();
        let created = book.get(&id).unwrap().updated_at;

        book.update(&id, "t2", "c2").unwrap();
        let note = book.get(&id).unwrap();
        assert_eq!(note.title, "t2");
        assert_eq!(note.content, "c2");
        assert!(note.updated_at >= created);

        assert!(book.update(&id, "", "c").is_err());
        assert!(matches!(book.update("missing", "t", "c"), Err(ZenError::NotFound(_))));
    }

    #[test]
    fn test_note_book_edited_note_moves_to_top() {
        let mut book = NoteBook::new();
        let old = book.create("old", "first draft").unwrap();
        book.create("new", "second draft").unwrap();

        book.update(&old, "old edited", "revised").unwrap();
        let titles: Vec<&str> = book.sorted().iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["old edited", "new"]);
        assert_eq!(book.notes()[0].id, old);
    }

    #[test]
    fn test_note_book_sorted_by_updated_at() {
        let mut stale = Note::new("stale", "a");
        stale.updated_at = Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap();
        let mut fresh = Note::new("fresh", "b");
        fresh.updated_at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();

        let book = NoteBook::from_notes(vec![stale, fresh]);
        let titles: Vec<&str> = book.sorted().iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["fresh", "stale"]);
    }

    #[test]
    fn test_note_book_delete_and_persist() {
        let storage = MockStorage::new();
        let mut book = NoteBook::new();
        let keep = book.create("keep", "x").unwrap();
        let drop_id = book.create("drop", "y").unwrap();
        book.delete(&drop_id).unwrap();

        block_on(async {
            book.save(&storage).await.unwrap();
            let loaded = NoteBook::load(&storage).await.unwrap();
            assert_eq!(loaded.len(), 1);
            assert_eq!(loaded.notes()[0].id, keep);
        });
    }

    // ─── QuoteRotator Tests ──────────────────────────────────

    #[test]
    fn test_quote_rotator_wraps() {
        let mut rotator = QuoteRotator::new();
        assert_eq!(rotator.current().author, "Steve Jobs");
        for _ in 0..QUOTES.len() {
            rotator.advance();
        }
        assert_eq!(rotator.index(), 0);
        assert_eq!(rotator.advance().author, "Albert Einstein");
    }
}
