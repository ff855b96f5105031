//! GPUI rendering for the navigation prompt.
//!
//! The prompt does not draw anything itself. It calls the render function
//! given to [`PromptConfig::new`](crate::PromptConfig::new) with
//! [`PromptRenderProps`], and the app decides what a confirmation looks
//! like: a modal, a banner, an inline bar.
//!
//! - [`NavigationPrompt::render`] — render in place from any view.
//! - [`NavigationPromptView`] — an entity that owns a prompt and renders it.
//!
//! While the prompt is idle nothing is drawn, unless
//! [`render_if_not_active`](crate::PromptConfig::render_if_not_active) is set.
//!
//! [`NavigationPromptView`] observes its prompt and notifies itself on every
//! state change. Observers fire from inside the history's blocker, so the
//! view only signals a channel there; a task spawned on the view's context
//! calls `cx.notify()` once the history is released.

use crate::history::BlockingHistory;
use crate::prompt::{NavigationPrompt, PromptTrigger};
use crate::trace_log;
use futures_channel::mpsc;
use futures_util::StreamExt;
use gpui::*;
use std::rc::Rc;

/// What the render function receives.
#[derive(Debug, Clone)]
pub struct PromptRenderProps {
    /// A navigation is being held.
    pub is_active: bool,
    /// Confirm the held navigation.
    pub on_confirm: PromptTrigger,
    /// Discard the held navigation.
    pub on_cancel: PromptTrigger,
}

/// Render function supplied by the app.
pub type RenderPromptFn = Rc<dyn Fn(PromptRenderProps, &mut Window, &mut App) -> AnyElement>;

impl<H: BlockingHistory> NavigationPrompt<H> {
    /// Props for the render function, or `None` when nothing should render.
    pub fn render_props(&self) -> Option<PromptRenderProps> {
        let (is_active, render_if_not_active) = {
            let inner = self.inner.borrow();
            (inner.state.is_active(), inner.config.render_if_not_active)
        };
        if !is_active && !render_if_not_active {
            return None;
        }

        Some(PromptRenderProps {
            is_active,
            on_confirm: self.confirm_trigger(),
            on_cancel: self.cancel_trigger(),
        })
    }

    /// Render the prompt. Returns an empty `div` while hidden.
    pub fn render(&self, window: &mut Window, cx: &mut App) -> AnyElement {
        let Some(props) = self.render_props() else {
            trace_log!("NavigationPrompt: idle, nothing to render");
            return div().into_any_element();
        };

        let children = Rc::clone(&self.inner.borrow().config.children);
        div().child(children(props, window, cx)).into_any_element()
    }
}

/// View that owns a [`NavigationPrompt`] and re-renders when its state
/// changes.
///
/// ```ignore
/// let prompt_view = cx.new(|cx| NavigationPromptView::new(prompt, cx));
/// div().child(page).child(prompt_view.clone())
/// ```
pub struct NavigationPromptView<H: BlockingHistory> {
    prompt: NavigationPrompt<H>,
    _observer: Subscription,
    _notify: Task<()>,
}

impl<H: BlockingHistory> NavigationPromptView<H> {
    /// Wrap a mounted prompt and start watching it.
    pub fn new(prompt: NavigationPrompt<H>, cx: &mut Context<'_, Self>) -> Self {
        let (changed, mut changes) = mpsc::unbounded::<()>();
        let observer = prompt.observe(move |_state| {
            let _ = changed.unbounded_send(());
        });

        let notify = cx.spawn(async move |this, cx| {
            while changes.next().await.is_some() {
                if this.update(cx, |_, cx| cx.notify()).is_err() {
                    trace_log!("NavigationPromptView released; stopped watching prompt");
                    break;
                }
            }
        });

        Self {
            prompt,
            _observer: observer,
            _notify: notify,
        }
    }

    /// The wrapped prompt.
    pub fn prompt(&self) -> &NavigationPrompt<H> {
        &self.prompt
    }
}

impl<H: BlockingHistory> Render for NavigationPromptView<H> {
    fn render(&mut self, window: &mut Window, cx: &mut Context<'_, Self>) -> impl IntoElement {
        self.prompt.render(window, cx)
    }
}
