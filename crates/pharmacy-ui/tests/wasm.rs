//! WASM-target tests for pharmacy-ui.
//!
//! Runs UiState event handling and headless panel frames under
//! wasm32-unknown-unknown via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use pharmacy_core::cart::Cart;
use pharmacy_core::chat::ChatWidget;
use pharmacy_types::catalog::featured_products;
use pharmacy_types::event::AppEvent;
use pharmacy_types::message::MessageId;
use pharmacy_types::upload::{UploadState, UploadStatus};
use pharmacy_ui::panels::{cart, chat, home, shop, UiAction};
use pharmacy_ui::state::{UiState, STATUS_ONLINE, STATUS_TYPING};

// ─── UiState Tests ───────────────────────────────────────

#[wasm_bindgen_test]
fn ui_state_typing_follows_replies() {
    let mut state = UiState::new();
    state.process_events(vec![AppEvent::ChatReplyPending { message_id: MessageId(1) }]);
    assert_eq!(state.chat_status, STATUS_TYPING);

    state.process_events(vec![AppEvent::ChatReplyAppended { message_id: MessageId(1) }]);
    assert_eq!(state.chat_status, STATUS_ONLINE);
    assert!(!state.is_busy());
}

#[wasm_bindgen_test]
fn ui_state_busy_until_upload_resets() {
    let mut state = UiState::new();
    for status in [UploadStatus::Uploading, UploadStatus::Success] {
        state.process_events(vec![AppEvent::UploadStatusChanged { status }]);
        assert!(state.is_busy());
    }
    state.process_events(vec![AppEvent::UploadStatusChanged { status: UploadStatus::Idle }]);
    assert!(!state.is_busy());
}

// ─── Panel Tests ─────────────────────────────────────────

#[wasm_bindgen_test]
fn home_frame_marks_upload_section() {
    let ctx = egui::Context::default();
    let mut state = UiState::new();
    state.begin_frame();
    let mut actions: Vec<UiAction> = Vec::new();
    let _ = ctx.run(egui::RawInput::default(), |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| {
            actions = home::home_panel(ui, &mut state, &UploadState::Idle, false);
        });
    });
    assert!(actions.is_empty());
    assert!(state.upload_section_rendered);
}

#[wasm_bindgen_test]
fn shop_and_cart_frames_render_without_input() {
    let ctx = egui::Context::default();
    let products = featured_products();
    let mut basket = Cart::new();
    basket.add(&products[1]);
    let mut actions: Vec<UiAction> = Vec::new();
    let _ = ctx.run(egui::RawInput::default(), |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| {
            actions = shop::shop_panel(ui, &basket, &products);
            actions.extend(cart::cart_panel(ui, &basket));
        });
    });
    assert!(actions.is_empty());
}

#[wasm_bindgen_test]
fn chat_frame_without_input_sends_nothing() {
    let ctx = egui::Context::default();
    let mut widget = ChatWidget::new();
    widget.open();
    let mut action = None;
    let _ = ctx.run(egui::RawInput::default(), |ctx| {
        action = chat::chat_widget(ctx, &mut widget, STATUS_ONLINE);
    });
    assert!(action.is_none());
    assert_eq!(widget.messages().len(), 1);
}
