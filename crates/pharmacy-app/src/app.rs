//! Main egui application — composes the storefront screens, the upload
//! simulator and the chat widget.

use std::rc::Rc;
use std::time::Duration;

use egui::{self, CentralPanel, ScrollArea, TopBottomPanel};

use pharmacy_core::cart::Cart;
use pharmacy_core::chat::{ChatController, SubmitOutcome};
use pharmacy_core::event_bus::EventBus;
use pharmacy_core::pharmacist::PharmacistService;
use pharmacy_core::ports::{GenerativePort, PreviewPort, TimerPort};
use pharmacy_core::router::{Router, UploadNavigation};
use pharmacy_core::upload::UploadSimulator;
use pharmacy_platform::{FilePicker, GeminiProvider, GlooTimer, ObjectUrlPreviews};
use pharmacy_types::catalog::featured_products;
use pharmacy_types::config::{ChatConfig, PharmacyConfig};
use pharmacy_types::product::Product;
use pharmacy_types::view::ViewState;
use pharmacy_types::PharmacyError;
use pharmacy_ui::panels::{cart, chat, home, nav, shop, upload, UiAction};
use pharmacy_ui::state::UiState;
use pharmacy_ui::theme;

/// Poll interval while a reply or upload is running.
const BUSY_REPAINT: Duration = Duration::from_millis(200);

/// The main application state
pub struct PharmacyApp {
    ui_state: UiState,
    event_bus: EventBus,
    router: Router,
    cart: Cart,
    products: Vec<Product>,
    chat: Rc<ChatController>,
    upload: Rc<UploadSimulator>,
    picker: Option<FilePicker>,
    first_frame: bool,
}

impl PharmacyApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = PharmacyConfig {
            chat: ChatConfig::with_api_key(option_env!("API_KEY")),
            ..PharmacyConfig::default()
        };
        let event_bus = EventBus::new();

        let backend: Rc<dyn GenerativePort> = Rc::new(GeminiProvider::new(config.chat.clone()));
        let service = Rc::new(PharmacistService::new(config.chat.clone(), backend));
        let chat = Rc::new(ChatController::new(service, event_bus.clone()));

        let timer: Rc<dyn TimerPort> = Rc::new(GlooTimer);
        let previews: Rc<dyn PreviewPort> = Rc::new(ObjectUrlPreviews);
        let upload = Rc::new(UploadSimulator::new(
            config.upload.clone(),
            timer,
            previews,
            event_bus.clone(),
        ));

        let picker = match FilePicker::new() {
            Ok(p) => Some(p),
            Err(e) => {
                log::warn!("File picker unavailable: {}", e);
                None
            }
        };

        Self {
            ui_state: UiState::new(),
            event_bus,
            router: Router::new(),
            cart: Cart::new(),
            products: featured_products(),
            chat,
            upload,
            picker,
            first_frame: true,
        }
    }

    /// Move any file the picker or a drag-and-drop produced into the form.
    fn collect_files(&mut self, ctx: &egui::Context) {
        let Some(picker) = &self.picker else {
            return;
        };

        for dropped in ctx.input(|i| i.raw.dropped_files.clone()) {
            match dropped.bytes {
                Some(bytes) => picker.accept_dropped(&dropped.name, &dropped.mime, &bytes),
                None => log::warn!("Dropped file {} has no contents", dropped.name),
            }
        }

        match picker.take_picked() {
            Some(Ok(file)) => {
                self.ui_state.upload_notice = None;
                self.upload.select(file);
            }
            Some(Err(e)) => {
                log::warn!("Rejected prescription file: {}", e);
                self.ui_state.set_upload_notice(notice_for(&e));
            }
            None => {}
        }
    }

    fn render_view(&mut self, ui: &mut egui::Ui, scroll_to_upload: bool) -> Vec<UiAction> {
        let upload_state = self.upload.state();
        let notice = self.ui_state.upload_notice.clone();
        match self.router.current() {
            ViewState::Home => {
                home::home_panel(ui, &mut self.ui_state, &upload_state, scroll_to_upload)
            }
            ViewState::Shop => shop::shop_panel(ui, &self.cart, &self.products),
            ViewState::Upload => upload::upload_page(ui, &upload_state, notice.as_deref()),
            ViewState::CartPage => cart::cart_panel(ui, &self.cart),
        }
    }

    fn dispatch(&mut self, action: UiAction, ctx: &egui::Context) {
        match action {
            UiAction::Navigate(view) => self.router.navigate(view),
            UiAction::RequestUpload => {
                match self.router.request_upload(self.ui_state.upload_section_rendered) {
                    UploadNavigation::ScrolledIntoView => ctx.request_repaint(),
                    UploadNavigation::Switched => {}
                }
            }
            UiAction::AddToCart(product) => self.cart.add(&product),
            UiAction::RemoveFromCart(id) => self.cart.remove(&id),
            UiAction::PickFile => match &self.picker {
                Some(picker) => picker.open(),
                None => self
                    .ui_state
                    .set_upload_notice("File selection is not available in this browser."),
            },
            UiAction::ClearFile => {
                self.ui_state.upload_notice = None;
                self.upload.clear();
            }
            UiAction::SubmitPrescription => self.dispatch_upload(ctx),
            UiAction::SendChat => self.dispatch_chat(ctx),
        }
    }

    /// Run the simulated submission in the background (async)
    fn dispatch_upload(&self, ctx: &egui::Context) {
        let upload = self.upload.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            match upload.submit().await {
                Ok(reference) => log::debug!("Submission {} finished", reference),
                Err(PharmacyError::Cancelled) => log::debug!("Submission abandoned"),
                Err(e) => log::warn!("Submission failed: {}", e),
            }
            ctx.request_repaint();
        });
    }

    /// Send the chat draft to the pharmacist (async)
    fn dispatch_chat(&self, ctx: &egui::Context) {
        let chat = self.chat.clone();
        let repaint_ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            if let SubmitOutcome::Replied(id) = chat.submit_draft().await {
                log::debug!("Pharmacist replied as {}", id);
            }
            repaint_ctx.request_repaint();
        });
        ctx.request_repaint();
    }
}

fn notice_for(error: &PharmacyError) -> String {
    match error {
        PharmacyError::UnsupportedFile(_) => {
            "Please choose an image or a PDF of your prescription.".to_string()
        }
        other => format!("Could not read the file: {}", other),
    }
}

impl eframe::App for PharmacyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }
        self.ui_state.begin_frame();

        let events = self.event_bus.drain();
        if !events.is_empty() {
            self.ui_state.process_events(events);
            ctx.request_repaint();
        }

        self.collect_files(ctx);

        let mut actions = Vec::new();

        // ── Navigation ───────────────────────────────────────
        TopBottomPanel::top("nav_bar").show(ctx, |ui| {
            actions.extend(nav::nav_bar(ui, self.router.current(), self.cart.unit_count()));
        });

        // ── Current screen ───────────────────────────────────
        let scroll_to_upload = self.router.take_scroll_request();
        CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(theme::CONTENT_WIDTH);
                    actions.extend(self.render_view(ui, scroll_to_upload));
                });
            });
        });

        // ── Chat overlay ─────────────────────────────────────
        {
            let widget = self.chat.widget();
            let mut widget = widget.borrow_mut();
            if let Some(action) = chat::chat_widget(ctx, &mut widget, &self.ui_state.chat_status) {
                actions.push(action);
            }
        }

        for action in actions {
            self.dispatch(action, ctx);
        }

        if self.ui_state.is_busy() {
            ctx.request_repaint_after(BUSY_REPAINT);
        }
    }
}

impl Drop for PharmacyApp {
    fn drop(&mut self) {
        self.chat.unmount();
        self.upload.cancel();
    }
}
