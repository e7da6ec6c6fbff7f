#[cfg(test)]
mod tests {
    use crate::cancel::CancellationToken;
    use crate::cart::Cart;
    use crate::chat::{ChatController, ChatWidget, SubmitOutcome};
    use crate::event_bus::EventBus;
    use crate::pharmacist::*;
    use crate::ports::*;
    use crate::router::{Router, UploadNavigation};
    use crate::upload::{PrescriptionUpload, UploadSimulator};
    use pharmacy_types::config::{ChatConfig, UploadConfig};
    use pharmacy_types::event::AppEvent;
    use pharmacy_types::message::{MessageId, Role, GREETING};
    use pharmacy_types::product::Product;
    use pharmacy_types::upload::*;
    use pharmacy_types::view::ViewState;
    use pharmacy_types::{PharmacyError, Result};

    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::future::Future;
    use std::pin::Pin;
    use std::rc::Rc;
    use std::task::{Context, Poll};

    use async_trait::async_trait;
    use futures::channel::oneshot;
    use futures::executor::block_on;

    fn poll_once<F: Future + ?Sized>(fut: Pin<&mut F>) -> Poll<F::Output> {
        let mut cx = Context::from_waker(futures::task::noop_waker_ref());
        fut.poll(&mut cx)
    }

    fn product(id: &str, price: u32) -> Product {
        Product::new(id, format!("Product {}", id), price, "OTC", "img")
    }

    fn file(name: &str) -> PrescriptionFile {
        PrescriptionFile::new(
            name,
            FileKind::Image { mime: "image/jpeg".to_string() },
            4096,
            PreviewRef(format!("blob:preview/{}", name)),
        )
    }

    // ─── Cart Tests ──────────────────────────────────────────

    #[test]
    fn test_cart_starts_empty() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0);
        assert_eq!(cart.unit_count(), 0);
    }

    #[test]
    fn test_cart_add_same_product_twice_merges_line() {
        let mut cart = Cart::new();
        let p1 = product("p1", 100);
        let p2 = product("p2", 40);
        cart.add(&p1);
        cart.add(&p2);
        cart.add(&p1);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.items()[0].id(), "p1");
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.items()[1].id(), "p2");
        assert_eq!(cart.items()[1].quantity, 1);
        assert_eq!(cart.unit_count(), 3);
    }

    #[test]
    fn test_cart_remove_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add(&product("p1", 100));
        let before = cart.clone();
        cart.remove("nope");
        assert_eq!(cart, before);
    }

    #[test]
    fn test_cart_remove_drops_whole_line() {
        let mut cart = Cart::new();
        let p1 = product("p1", 100);
        cart.add(&p1);
        cart.add(&p1);
        cart.add(&product("p2", 5));
        cart.remove("p1");
        assert_eq!(cart.quantity_of("p1"), 0);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total(), 5);
    }

    #[test]
    fn test_cart_example_scenario() {
        let mut cart = Cart::new();
        let p1 = product("p1", 100);
        cart.add(&p1);
        cart.add(&p1);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of("p1"), 2);
        assert_eq!(cart.total(), 200);

        cart.remove("p1");
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0);
    }

    #[test]
    fn test_cart_total_matches_lines_after_mixed_operations() {
        let products = [product("a", 30), product("b", 45), product("c", 220)];
        let mut cart = Cart::new();
        // (index, add?) sequence
        let ops = [
            (0, true), (1, true), (0, true), (2, true), (1, false),
            (2, true), (1, true), (0, false), (0, true), (2, false), (1, true),
        ];
        for (idx, add) in ops {
            if add {
                cart.add(&products[idx]);
            } else {
                cart.remove(&products[idx].id);
            }
            let expected: u64 = cart
                .items()
                .iter()
                .map(|item| u64::from(item.product.price) * u64::from(item.quantity))
                .sum();
            assert_eq!(cart.total(), expected);
            assert!(cart.items().iter().all(|item| item.quantity >= 1));
        }
        assert_eq!(cart.quantity_of("b"), 2);
        assert_eq!(cart.total(), 30 + 90);
    }

    // ─── Router Tests ────────────────────────────────────────

    #[test]
    fn test_router_starts_home() {
        assert_eq!(Router::new().current(), ViewState::Home);
    }

    #[test]
    fn test_router_every_transition_allowed() {
        for from in ViewState::all() {
            for to in ViewState::all() {
                let mut router = Router::new();
                router.navigate(*from);
                router.navigate(*to);
                assert_eq!(router.current(), *to, "{:?} -> {:?}", from, to);
            }
        }
    }

    #[test]
    fn test_request_upload_on_home_scrolls() {
        let mut router = Router::new();
        let outcome = router.request_upload(router.current().hosts_upload_section());
        assert_eq!(outcome, UploadNavigation::ScrolledIntoView);
        assert_eq!(router.current(), ViewState::Home);
        assert!(router.take_scroll_request());
        assert!(!router.take_scroll_request());
    }

    #[test]
    fn test_request_upload_on_shop_switches() {
        let mut router = Router::new();
        router.navigate(ViewState::Shop);
        let outcome = router.request_upload(router.current().hosts_upload_section());
        assert_eq!(outcome, UploadNavigation::Switched);
        assert_eq!(router.current(), ViewState::Upload);
        assert!(!router.take_scroll_request());
    }

    #[test]
    fn test_navigate_discards_stale_scroll_request() {
        let mut router = Router::new();
        router.request_upload(true);
        router.navigate(ViewState::CartPage);
        assert!(!router.take_scroll_request());
    }

    // ─── Upload State Machine Tests ──────────────────────────

    #[test]
    fn test_upload_machine_select_from_idle() {
        let mut machine = PrescriptionUpload::new();
        assert!(machine.select(file("a.jpg")).is_none());
        assert_eq!(machine.status(), UploadStatus::Idle);
        assert_eq!(machine.file().map(|f| f.name.as_str()), Some("a.jpg"));
    }

    #[test]
    fn test_upload_machine_submit_without_file_rejected() {
        let mut machine = PrescriptionUpload::new();
        let err = machine.begin_submit().unwrap_err();
        assert_eq!(err, PharmacyError::invalid_transition("idle", "submit"));
        assert_eq!(machine.state(), &UploadState::Idle);
    }

    #[test]
    fn test_upload_machine_double_submit_rejected() {
        let mut machine = PrescriptionUpload::new();
        machine.select(file("a.jpg"));
        machine.begin_submit().unwrap();
        let err = machine.begin_submit().unwrap_err();
        assert!(matches!(err, PharmacyError::InvalidTransition { .. }));
        assert_eq!(machine.status(), UploadStatus::Uploading);
        assert!(machine.file().is_some());
    }

    #[test]
    fn test_upload_machine_full_cycle() {
        let mut machine = PrescriptionUpload::new();
        machine.select(file("a.jpg"));
        machine.begin_submit().unwrap();
        let reference = uuid::Uuid::new_v4();
        machine.finish_upload(reference).unwrap();
        assert!(matches!(
            machine.state(),
            UploadState::Success { reference: r, .. } if *r == reference
        ));
        let released = machine.reset().unwrap();
        assert_eq!(released.name, "a.jpg");
        assert_eq!(machine.state(), &UploadState::Idle);
    }

    #[test]
    fn test_upload_machine_out_of_order_transitions_keep_state() {
        let mut machine = PrescriptionUpload::new();
        machine.select(file("a.jpg"));
        assert!(machine.finish_upload(uuid::Uuid::new_v4()).is_err());
        assert!(machine.reset().is_err());
        assert_eq!(machine.state(), &UploadState::Selected { file: file("a.jpg") });
    }

    #[test]
    fn test_upload_machine_resubmit_from_success() {
        let mut machine = PrescriptionUpload::new();
        machine.select(file("a.jpg"));
        machine.begin_submit().unwrap();
        machine.finish_upload(uuid::Uuid::new_v4()).unwrap();
        machine.begin_submit().unwrap();
        assert_eq!(machine.status(), UploadStatus::Uploading);
    }

    #[test]
    fn test_upload_machine_select_resets_status() {
        let mut machine = PrescriptionUpload::new();
        machine.select(file("a.jpg"));
        machine.begin_submit().unwrap();
        let replaced = machine.select(file("b.jpg"));
        assert_eq!(replaced.map(|f| f.name), Some("a.jpg".to_string()));
        assert_eq!(machine.status(), UploadStatus::Idle);
        assert_eq!(machine.file().map(|f| f.name.as_str()), Some("b.jpg"));
    }

    #[test]
    fn test_upload_machine_clear() {
        let mut machine = PrescriptionUpload::new();
        machine.select(file("a.jpg"));
        assert!(machine.clear().is_some());
        assert!(machine.clear().is_none());
        assert_eq!(machine.state(), &UploadState::Idle);
    }

    // ─── Upload Simulator Tests ──────────────────────────────

    /// Timer whose sleeps only finish when the test opens the next gate
    #[derive(Default)]
    struct GateTimer {
        gates: RefCell<VecDeque<oneshot::Sender<()>>>,
        requested: RefCell<Vec<u64>>,
    }

    impl GateTimer {
        fn open_next(&self) {
            let gate = self.gates.borrow_mut().pop_front().expect("no pending sleep");
            let _ = gate.send(());
        }
    }

    #[async_trait(?Send)]
    impl TimerPort for GateTimer {
        async fn sleep(&self, ms: u64) {
            let (tx, rx) = oneshot::channel();
            self.requested.borrow_mut().push(ms);
            self.gates.borrow_mut().push_back(tx);
            let _ = rx.await;
        }
    }

    /// Timer that never waits
    struct InstantTimer;

    #[async_trait(?Send)]
    impl TimerPort for InstantTimer {
        async fn sleep(&self, _ms: u64) {}
    }

    #[derive(Default)]
    struct RecordingPreviews {
        released: RefCell<Vec<PreviewRef>>,
    }

    impl PreviewPort for RecordingPreviews {
        fn release(&self, preview: &PreviewRef) {
            self.released.borrow_mut().push(preview.clone());
        }
    }

    fn gated_simulator() -> (UploadSimulator, Rc<GateTimer>, Rc<RecordingPreviews>, EventBus) {
        let timer = Rc::new(GateTimer::default());
        let previews = Rc::new(RecordingPreviews::default());
        let events = EventBus::new();
        let sim = UploadSimulator::new(
            UploadConfig::default(),
            timer.clone(),
            previews.clone(),
            events.clone(),
        );
        (sim, timer, previews, events)
    }

    #[test]
    fn test_simulator_status_sequence() {
        let (sim, timer, previews, events) = gated_simulator();
        assert_eq!(sim.status(), UploadStatus::Idle);
        assert!(!sim.has_file());

        sim.select(file("rx.jpg"));
        assert!(sim.has_file());
        assert!(sim.can_submit());

        let mut submit = Box::pin(sim.submit());
        assert!(poll_once(submit.as_mut()).is_pending());
        assert_eq!(sim.status(), UploadStatus::Uploading);
        assert!(sim.has_file());
        assert!(!sim.can_submit());

        timer.open_next();
        assert!(poll_once(submit.as_mut()).is_pending());
        assert_eq!(sim.status(), UploadStatus::Success);
        assert!(sim.has_file());

        timer.open_next();
        let reference = match poll_once(submit.as_mut()) {
            Poll::Ready(Ok(reference)) => reference,
            other => panic!("expected completed submission, got {:?}", other),
        };
        assert!(!reference.is_nil());
        assert_eq!(sim.state(), UploadState::Idle);
        assert!(!sim.has_file());

        assert_eq!(*timer.requested.borrow(), vec![2000, 3000]);
        assert_eq!(
            *previews.released.borrow(),
            vec![PreviewRef("blob:preview/rx.jpg".to_string())]
        );

        let statuses: Vec<UploadStatus> = events
            .drain()
            .into_iter()
            .map(|e| match e {
                AppEvent::UploadStatusChanged { status } => status,
                other => panic!("unexpected event {:?}", other),
            })
            .collect();
        assert_eq!(
            statuses,
            vec![
                UploadStatus::Idle,
                UploadStatus::Uploading,
                UploadStatus::Success,
                UploadStatus::Idle,
            ]
        );
    }

    #[test]
    fn test_simulator_submit_without_file_rejected() {
        let (sim, timer, _, _) = gated_simulator();
        let result = block_on(sim.submit());
        assert!(matches!(result, Err(PharmacyError::InvalidTransition { .. })));
        assert!(timer.requested.borrow().is_empty());
    }

    #[test]
    fn test_simulator_double_submit_rejected() {
        let (sim, timer, _, _) = gated_simulator();
        sim.select(file("rx.jpg"));
        let mut first = Box::pin(sim.submit());
        assert!(poll_once(first.as_mut()).is_pending());

        let second = block_on(sim.submit());
        assert!(matches!(second, Err(PharmacyError::InvalidTransition { .. })));
        assert_eq!(timer.requested.borrow().len(), 1);
        assert_eq!(sim.status(), UploadStatus::Uploading);
    }

    #[test]
    fn test_simulator_select_mid_flight_abandons_submission() {
        let (sim, timer, previews, _) = gated_simulator();
        sim.select(file("old.jpg"));
        let mut submit = Box::pin(sim.submit());
        assert!(poll_once(submit.as_mut()).is_pending());

        sim.select(file("new.jpg"));
        assert_eq!(
            poll_once(submit.as_mut()),
            Poll::Ready(Err(PharmacyError::Cancelled))
        );
        assert_eq!(sim.state(), UploadState::Selected { file: file("new.jpg") });
        assert_eq!(
            *previews.released.borrow(),
            vec![PreviewRef("blob:preview/old.jpg".to_string())]
        );

        // the abandoned timer firing later changes nothing
        timer.open_next();
        assert_eq!(sim.status(), UploadStatus::Idle);

        // and the form still works afterwards
        let mut again = Box::pin(sim.submit());
        assert!(poll_once(again.as_mut()).is_pending());
        assert_eq!(sim.status(), UploadStatus::Uploading);
    }

    #[test]
    fn test_simulator_clear_releases_preview() {
        let (sim, _, previews, _) = gated_simulator();
        sim.select(file("a.jpg"));
        sim.clear();
        assert!(!sim.has_file());
        assert_eq!(previews.released.borrow().len(), 1);
        sim.clear();
        assert_eq!(previews.released.borrow().len(), 1);
    }

    #[test]
    fn test_simulator_cancel_never_reaches_success() {
        let (sim, timer, _, _) = gated_simulator();
        sim.select(file("a.jpg"));
        let mut submit = Box::pin(sim.submit());
        assert!(poll_once(submit.as_mut()).is_pending());

        sim.cancel();
        assert_eq!(
            poll_once(submit.as_mut()),
            Poll::Ready(Err(PharmacyError::Cancelled))
        );
        timer.open_next();
        assert_ne!(sim.status(), UploadStatus::Success);
        assert_eq!(block_on(sim.submit()), Err(PharmacyError::Cancelled));
    }

    #[test]
    fn test_simulator_resubmit_from_success_supersedes_reset() {
        let (sim, timer, previews, _) = gated_simulator();
        sim.select(file("rx.jpg"));
        let mut first = Box::pin(sim.submit());
        assert!(poll_once(first.as_mut()).is_pending());
        timer.open_next();
        assert!(poll_once(first.as_mut()).is_pending());
        assert_eq!(sim.status(), UploadStatus::Success);

        let mut second = Box::pin(sim.submit());
        assert!(poll_once(second.as_mut()).is_pending());
        assert_eq!(sim.status(), UploadStatus::Uploading);
        assert_eq!(
            poll_once(first.as_mut()),
            Poll::Ready(Err(PharmacyError::Cancelled))
        );

        // stale reset gate, then the new processing and reset gates
        timer.open_next();
        assert_eq!(sim.status(), UploadStatus::Uploading);
        timer.open_next();
        assert!(poll_once(second.as_mut()).is_pending());
        assert_eq!(sim.status(), UploadStatus::Success);
        timer.open_next();
        assert!(matches!(poll_once(second.as_mut()), Poll::Ready(Ok(_))));
        assert_eq!(sim.state(), UploadState::Idle);
        assert_eq!(previews.released.borrow().len(), 1);
    }

    #[test]
    fn test_simulator_with_instant_timer_completes() {
        let sim = UploadSimulator::new(
            UploadConfig::default(),
            Rc::new(InstantTimer),
            Rc::new(NoopPreviews),
            EventBus::new(),
        );
        sim.select(file("a.pdf"));
        assert!(block_on(sim.submit()).is_ok());
        assert_eq!(sim.state(), UploadState::Idle);
    }

    // ─── CancellationToken Tests ─────────────────────────────

    #[test]
    fn test_token_runs_to_completion() {
        let token = CancellationToken::new();
        assert_eq!(block_on(token.run(async { 7 })), Ok(7));
        assert_eq!(token.in_flight(), 0);
    }

    #[test]
    fn test_token_cancel_aborts_pending_future() {
        let token = CancellationToken::new();
        let (_tx, rx) = oneshot::channel::<()>();
        let mut fut = Box::pin(token.run(rx));
        assert!(poll_once(fut.as_mut()).is_pending());
        assert_eq!(token.in_flight(), 1);

        token.clone().cancel();
        assert!(matches!(
            poll_once(fut.as_mut()),
            Poll::Ready(Err(PharmacyError::Cancelled))
        ));
        assert!(token.is_cancelled());
        assert_eq!(block_on(token.run(async { 1 })), Err(PharmacyError::Cancelled));
    }

    // ─── EventBus Tests ──────────────────────────────────────

    #[test]
    fn test_event_bus_clone_shares_state() {
        let bus1 = EventBus::new();
        let bus2 = bus1.clone();
        bus1.emit(AppEvent::UploadStatusChanged { status: UploadStatus::Uploading });
        bus2.emit(AppEvent::UploadStatusChanged { status: UploadStatus::Success });
        assert_eq!(
            bus2.drain(),
            vec![
                AppEvent::UploadStatusChanged { status: UploadStatus::Uploading },
                AppEvent::UploadStatusChanged { status: UploadStatus::Success },
            ]
        );
        assert!(bus1.drain().is_empty());
    }

    // ─── Pharmacist Service Tests ────────────────────────────

    #[derive(Clone)]
    enum Reply {
        Text(String),
        Empty,
        Fail,
    }

    struct ScriptedConversation {
        reply: Reply,
        sent: Rc<RefCell<Vec<String>>>,
    }

    #[async_trait(?Send)]
    impl ConversationPort for ScriptedConversation {
        async fn send_message(&self, text: &str) -> Result<Option<String>> {
            self.sent.borrow_mut().push(text.to_string());
            match &self.reply {
                Reply::Text(t) => Ok(Some(t.clone())),
                Reply::Empty => Ok(None),
                Reply::Fail => Err(PharmacyError::Network("connection reset".to_string())),
            }
        }
    }

    struct MockBackend {
        reply: Reply,
        fail_create: bool,
        sessions_created: Cell<usize>,
        instructions: RefCell<Vec<String>>,
        sent: Rc<RefCell<Vec<String>>>,
    }

    impl MockBackend {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                fail_create: false,
                sessions_created: Cell::new(0),
                instructions: RefCell::new(Vec::new()),
                sent: Rc::new(RefCell::new(Vec::new())),
            }
        }
    }

    impl GenerativePort for MockBackend {
        fn create_session(&self, system_instruction: &str) -> Result<Rc<dyn ConversationPort>> {
            if self.fail_create {
                return Err(PharmacyError::Config("bad model".to_string()));
            }
            self.sessions_created.set(self.sessions_created.get() + 1);
            self.instructions.borrow_mut().push(system_instruction.to_string());
            Ok(Rc::new(ScriptedConversation {
                reply: self.reply.clone(),
                sent: self.sent.clone(),
            }))
        }

        fn provider_name(&self) -> &str {
            "mock"
        }
    }

    fn keyed_config() -> ChatConfig {
        ChatConfig::with_api_key(Some("test-key"))
    }

    #[test]
    fn test_fallbacks_are_distinct() {
        assert_ne!(FALLBACK_UNAVAILABLE, FALLBACK_NO_ANSWER);
        assert_ne!(FALLBACK_UNAVAILABLE, FALLBACK_ERROR);
        assert_ne!(FALLBACK_NO_ANSWER, FALLBACK_ERROR);
        assert!(FALLBACK_NO_ANSWER.starts_with("I understood, but"));
    }

    #[test]
    fn test_service_without_key_uses_unavailable_fallback() {
        let backend = Rc::new(MockBackend::new(Reply::Text("hi".to_string())));
        let service = PharmacistService::new(ChatConfig::default(), backend.clone());
        assert!(service.ensure_session().is_none());
        assert_eq!(block_on(service.send("hello")), FALLBACK_UNAVAILABLE);
        assert_eq!(backend.sessions_created.get(), 0);
        assert!(backend.sent.borrow().is_empty());
    }

    #[test]
    fn test_service_returns_model_text() {
        let backend = Rc::new(MockBackend::new(Reply::Text("Take rest and fluids.".to_string())));
        let service = PharmacistService::new(keyed_config(), backend.clone());
        assert_eq!(block_on(service.send("I have a cold")), "Take rest and fluids.");
        assert_eq!(*backend.sent.borrow(), vec!["I have a cold".to_string()]);
        assert!(backend.instructions.borrow()[0].contains("pharmacist assistant"));
    }

    #[test]
    fn test_service_empty_reply_uses_no_answer_fallback() {
        let backend = Rc::new(MockBackend::new(Reply::Empty));
        let service = PharmacistService::new(keyed_config(), backend);
        assert_eq!(block_on(service.send("?")), FALLBACK_NO_ANSWER);
    }

    #[test]
    fn test_service_passes_model_text_through_verbatim() {
        // blank filtering belongs to the adapter; the service does not re-judge text
        let backend = Rc::new(MockBackend::new(Reply::Text(" Rest well.\n".to_string())));
        let service = PharmacistService::new(keyed_config(), backend);
        assert_eq!(block_on(service.send("?")), " Rest well.\n");
    }

    #[test]
    fn test_service_transport_failure_uses_error_fallback() {
        let backend = Rc::new(MockBackend::new(Reply::Fail));
        let service = PharmacistService::new(keyed_config(), backend);
        assert_eq!(block_on(service.send("hello")), FALLBACK_ERROR);
        assert!(service.has_session());
    }

    #[test]
    fn test_service_session_created_once() {
        let backend = Rc::new(MockBackend::new(Reply::Text("ok".to_string())));
        let service = PharmacistService::new(keyed_config(), backend.clone());
        for i in 0..5 {
            block_on(service.send(&format!("message {}", i)));
        }
        assert_eq!(backend.sessions_created.get(), 1);
        assert_eq!(backend.sent.borrow().len(), 5);
    }

    #[test]
    fn test_service_session_creation_failure_degrades() {
        let mut backend = MockBackend::new(Reply::Text("ok".to_string()));
        backend.fail_create = true;
        let service = PharmacistService::new(keyed_config(), Rc::new(backend));
        assert!(!service.has_session());
        assert_eq!(block_on(service.send("hello")), FALLBACK_UNAVAILABLE);
    }

    // ─── Chat Widget Tests ───────────────────────────────────

    fn controller_with(reply: Reply) -> (ChatController, Rc<MockBackend>, EventBus) {
        let backend = Rc::new(MockBackend::new(reply));
        let service = Rc::new(PharmacistService::new(keyed_config(), backend.clone()));
        let events = EventBus::new();
        (ChatController::new(service, events.clone()), backend, events)
    }

    #[test]
    fn test_widget_seeded_with_greeting() {
        let widget = ChatWidget::new();
        assert_eq!(widget.messages().len(), 1);
        assert_eq!(widget.messages()[0].role, Role::Assistant);
        assert_eq!(widget.messages()[0].text, GREETING);
        assert!(!widget.is_open());
        assert!(!widget.is_pending());
    }

    #[test]
    fn test_widget_visibility_does_not_touch_log() {
        let mut widget = ChatWidget::new();
        widget.toggle();
        assert!(widget.is_open());
        widget.close();
        assert!(!widget.is_open());
        widget.open();
        widget.toggle();
        assert!(!widget.is_open());
        assert_eq!(widget.messages().len(), 1);
    }

    #[test]
    fn test_controller_mount_opens_session() {
        let (controller, backend, _) = controller_with(Reply::Text("hi".to_string()));
        assert_eq!(backend.sessions_created.get(), 1);
        assert!(controller.service().has_session());
    }

    #[test]
    fn test_whitespace_submit_is_ignored() {
        let (controller, backend, events) = controller_with(Reply::Text("hi".to_string()));
        controller.widget().borrow_mut().set_draft("   \t ");
        assert_eq!(block_on(controller.submit_draft()), SubmitOutcome::Ignored);
        assert_eq!(controller.widget().borrow().messages().len(), 1);
        assert!(backend.sent.borrow().is_empty());
        assert!(events.drain().is_empty());
        // a blank draft is left as typed
        assert_eq!(controller.widget().borrow().draft(), "   \t ");
    }

    #[test]
    fn test_successful_send_appends_user_then_assistant() {
        let (controller, backend, events) = controller_with(Reply::Text("Drink water.".to_string()));
        controller.widget().borrow_mut().set_draft("  I feel dehydrated ");
        let outcome = block_on(controller.submit_draft());

        let widget = controller.widget();
        let widget = widget.borrow();
        let messages = widget.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].text, "I feel dehydrated");
        assert_eq!(messages[2].role, Role::Assistant);
        assert_eq!(messages[2].text, "Drink water.");
        assert!(messages[1].timestamp <= messages[2].timestamp);
        assert!(messages[1].id < messages[2].id);
        assert_eq!(outcome, SubmitOutcome::Replied(messages[2].id));
        assert!(widget.draft().is_empty());
        assert!(!widget.is_pending());
        assert_eq!(*backend.sent.borrow(), vec!["I feel dehydrated".to_string()]);

        assert_eq!(
            events.drain(),
            vec![
                AppEvent::ChatReplyPending { message_id: MessageId(1) },
                AppEvent::ChatReplyAppended { message_id: MessageId(1) },
            ]
        );
    }

    #[test]
    fn test_transport_failure_appends_error_fallback() {
        let (controller, _, _) = controller_with(Reply::Fail);
        block_on(controller.submit("hello"));
        let widget = controller.widget();
        let last = widget.borrow().messages().last().cloned().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.text, FALLBACK_ERROR);
        assert_ne!(last.text, FALLBACK_NO_ANSWER);
    }

    /// Conversation whose reply arrives when the test sends it
    struct GatedConversation {
        gates: RefCell<VecDeque<oneshot::Receiver<String>>>,
    }

    #[async_trait(?Send)]
    impl ConversationPort for GatedConversation {
        async fn send_message(&self, _text: &str) -> Result<Option<String>> {
            let gate = self.gates.borrow_mut().pop_front();
            match gate {
                Some(rx) => rx
                    .await
                    .map(Some)
                    .map_err(|_| PharmacyError::Network("dropped".to_string())),
                None => Ok(None),
            }
        }
    }

    struct FixedBackend {
        session: Rc<GatedConversation>,
    }

    impl GenerativePort for FixedBackend {
        fn create_session(&self, _system_instruction: &str) -> Result<Rc<dyn ConversationPort>> {
            Ok(self.session.clone())
        }

        fn provider_name(&self) -> &str {
            "gated"
        }
    }

    fn gated_controller(gates: usize) -> (ChatController, Vec<oneshot::Sender<String>>) {
        let mut senders = Vec::new();
        let mut receivers = VecDeque::new();
        for _ in 0..gates {
            let (tx, rx) = oneshot::channel();
            senders.push(tx);
            receivers.push_back(rx);
        }
        let session = Rc::new(GatedConversation { gates: RefCell::new(receivers) });
        let service = Rc::new(PharmacistService::new(keyed_config(), Rc::new(FixedBackend { session })));
        (ChatController::new(service, EventBus::new()), senders)
    }

    #[test]
    fn test_user_message_visible_before_reply_resolves() {
        let (controller, mut senders) = gated_controller(1);
        let widget = controller.widget();

        let mut submit = Box::pin(controller.submit("Can I take ibuprofen?"));
        assert!(poll_once(submit.as_mut()).is_pending());
        {
            let w = widget.borrow();
            assert_eq!(w.messages().len(), 2);
            assert_eq!(w.messages()[1].role, Role::User);
            assert!(w.is_pending());
        }

        senders.remove(0).send("Please check with a pharmacist.".to_string()).unwrap();
        assert!(matches!(poll_once(submit.as_mut()), Poll::Ready(SubmitOutcome::Replied(_))));
        let w = widget.borrow();
        assert_eq!(w.messages().len(), 3);
        assert_eq!(w.messages()[2].text, "Please check with a pharmacist.");
        assert!(!w.is_pending());
    }

    #[test]
    fn test_submit_draft_empties_draft_before_reply() {
        let (controller, mut senders) = gated_controller(1);
        let widget = controller.widget();
        widget.borrow_mut().set_draft("Dose for a child? ");

        let mut submit = Box::pin(controller.submit_draft());
        assert!(poll_once(submit.as_mut()).is_pending());
        assert!(widget.borrow().draft().is_empty());
        assert_eq!(widget.borrow().messages()[1].text, "Dose for a child?");

        // typing the next question while waiting is kept
        widget.borrow_mut().set_draft("And for adults?");
        senders.remove(0).send("Ask a pharmacist.".to_string()).unwrap();
        assert!(matches!(poll_once(submit.as_mut()), Poll::Ready(SubmitOutcome::Replied(_))));
        assert_eq!(widget.borrow().draft(), "And for adults?");
    }

    #[test]
    fn test_submit_text_leaves_draft_alone() {
        let (controller, _, _) = controller_with(Reply::Text("ok".to_string()));
        controller.widget().borrow_mut().set_draft("half-typed");
        block_on(controller.submit("Is this safe?"));
        assert_eq!(controller.widget().borrow().draft(), "half-typed");
    }

    #[test]
    fn test_unmount_drops_outstanding_reply() {
        let (controller, mut senders) = gated_controller(1);
        let widget = controller.widget();
        let mut submit = Box::pin(controller.submit("hello"));
        assert!(poll_once(submit.as_mut()).is_pending());

        controller.unmount();
        assert_eq!(poll_once(submit.as_mut()), Poll::Ready(SubmitOutcome::Abandoned));
        let _ = senders.remove(0).send("too late".to_string());

        let w = widget.borrow();
        assert_eq!(w.messages().len(), 2);
        assert!(!w.is_pending());
    }

    #[test]
    fn test_overlapping_submits_keep_pending_until_both_land() {
        let (controller, mut senders) = gated_controller(2);
        let widget = controller.widget();

        let mut first = Box::pin(controller.submit("one"));
        let mut second = Box::pin(controller.submit("two"));
        assert!(poll_once(first.as_mut()).is_pending());
        assert!(poll_once(second.as_mut()).is_pending());

        senders.remove(0).send("reply one".to_string()).unwrap();
        assert!(poll_once(first.as_mut()).is_ready());
        assert!(widget.borrow().is_pending());

        senders.remove(0).send("reply two".to_string()).unwrap();
        assert!(poll_once(second.as_mut()).is_ready());
        assert!(!widget.borrow().is_pending());

        let texts: Vec<String> = widget.borrow().messages().iter().map(|m| m.text.clone()).collect();
        assert_eq!(texts[1..], ["one", "two", "reply one", "reply two"]);
    }
}
