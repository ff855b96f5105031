//! Unsaved Changes Demo
//!
//! An editor page that holds navigation while it has unsaved changes.
//! Toggle "dirty", then try to navigate away: the prompt appears and the
//! navigation only happens once you choose "Leave".

#![allow(clippy::needless_pass_by_ref_mut)]

use gpui::prelude::*;
use gpui::{
    div, px, rgb, size, AnyElement, App, Application, Bounds, Entity, MouseButton,
    SharedString, Subscription, TitlebarOptions, Window, WindowBounds, WindowOptions,
};
use gpui_navigation_prompt::{
    when_fn, BlockingHistory, Location, MemoryHistory, NavigationPromptView, PromptConfig,
    PromptRenderProps, PromptTrigger, SharedHistory, UnloadRegistry,
};
use std::cell::Cell;
use std::rc::Rc;

// ============================================================================
// Main
// ============================================================================

fn main() {
    env_logger::init();

    Application::new().run(|cx: &mut App| {
        let bounds = Bounds::centered(None, size(px(800.), px(500.)), cx);
        cx.open_window(
            WindowOptions {
                window_bounds: Some(WindowBounds::Windowed(bounds)),
                titlebar: Some(TitlebarOptions {
                    title: Some("Unsaved Changes Demo".into()),
                    appears_transparent: false,
                    traffic_light_position: None,
                }),
                ..Default::default()
            },
            |_, cx| cx.new(DemoApp::new),
        )
        .unwrap();

        cx.activate(true);
    });
}

// ============================================================================
// Root App Component
// ============================================================================

struct DemoApp {
    history: SharedHistory<MemoryHistory>,
    unload: UnloadRegistry,
    prompt: Entity<NavigationPromptView<MemoryHistory>>,
    dirty: Rc<Cell<bool>>,
    status: String,
    _prompt_changed: Subscription,
}

impl DemoApp {
    fn new(cx: &mut Context<'_, Self>) -> Self {
        let history = MemoryHistory::with_initial("/editor").shared();
        let unload = UnloadRegistry::new();
        let dirty = Rc::new(Cell::new(false));

        let flag = dirty.clone();
        let cleared = dirty.clone();
        let prompt = PromptConfig::new(render_dialog)
            .when(when_fn(move |current, _next| {
                flag.get() && current.pathname() == "/editor"
            }))
            .after_confirm(move || cleared.set(false))
            .mount(&history, &unload);
        let prompt = cx.new(|cx| NavigationPromptView::new(prompt, cx));
        // Confirming moves the history, so the path label has to follow.
        let prompt_changed = cx.observe(&prompt, |_, _, cx| cx.notify());

        Self {
            history,
            unload,
            prompt,
            dirty,
            status: String::new(),
            _prompt_changed: prompt_changed,
        }
    }
}

impl Render for DemoApp {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<'_, Self>) -> impl IntoElement {
        let current_path = self.history.borrow().current_path().to_string();
        let is_dirty = self.dirty.get();

        div()
            .flex()
            .flex_col()
            .size_full()
            .gap_4()
            .p_4()
            .bg(rgb(0x1e_1e_1e))
            .text_color(rgb(0xff_ff_ff))
            .child(format!("Path: {current_path}"))
            .child(
                div()
                    .flex()
                    .gap_2()
                    .child(nav_button(cx, "/editor", "Editor"))
                    .child(nav_button(cx, "/home", "Home"))
                    .child(nav_button(cx, "/settings", "Settings"))
                    .child(
                        button("toggle-dirty", if is_dirty { "Dirty: ON" } else { "Dirty: OFF" })
                            .on_mouse_down(
                                MouseButton::Left,
                                cx.listener(|this, _event, _window, cx| {
                                    this.dirty.set(!this.dirty.get());
                                    cx.notify();
                                }),
                            ),
                    )
                    .child(button("unload", "Try closing").on_mouse_down(
                        MouseButton::Left,
                        cx.listener(|this, _event, _window, cx| {
                            let event = this.unload.dispatch();
                            this.status = match event.return_value() {
                                Some(message) => format!("Host would ask: {message}"),
                                None => "Host would close right away".to_string(),
                            };
                            cx.notify();
                        }),
                    )),
            )
            .child(div().text_sm().text_color(rgb(0x88_88_88)).child(self.status.clone()))
            .child(self.prompt.clone())
    }
}

fn nav_button(cx: &mut Context<'_, DemoApp>, path: &str, label: &str) -> impl IntoElement {
    let path = path.to_string();
    button(&format!("nav-{label}"), label).on_mouse_down(
        MouseButton::Left,
        cx.listener(move |this, _event, _window, cx| {
            let result = this.history.borrow_mut().push(Location::parse(&path));
            if result.is_blocked() {
                this.status = format!("Holding navigation to {path}");
            } else {
                this.status.clear();
            }
            cx.notify();
        }),
    )
}

fn button(id: &str, label: &str) -> gpui::Stateful<gpui::Div> {
    div()
        .id(SharedString::from(id.to_string()))
        .px_3()
        .py_2()
        .rounded_md()
        .bg(rgb(0x3e_3e_3e))
        .cursor_pointer()
        .hover(|this| this.bg(rgb(0x4e_4e_4e)))
        .child(label.to_string())
}

// ============================================================================
// Prompt UI
// ============================================================================

fn render_dialog(props: PromptRenderProps, _window: &mut Window, _cx: &mut App) -> AnyElement {
    div()
        .flex()
        .flex_col()
        .gap_2()
        .p_4()
        .rounded_md()
        .bg(rgb(0x5d_40_37))
        .child("You have unsaved changes. Leave anyway?")
        .child(
            div()
                .flex()
                .gap_2()
                .child(dialog_button("prompt-cancel", "Stay", props.on_cancel))
                .child(dialog_button("prompt-confirm", "Leave", props.on_confirm)),
        )
        .into_any_element()
}

fn dialog_button(id: &str, label: &str, trigger: PromptTrigger) -> impl IntoElement {
    button(id, label).on_mouse_down(MouseButton::Left, move |_event, _window, _cx| {
        trigger.fire();
    })
}
