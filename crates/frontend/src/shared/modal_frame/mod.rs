use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::shared::icons::icon;

/// Modal frame: overlay, positioned surface, header with title and close button.
///
/// While `closing` is true the surface plays its exit animation and ignores
/// further close requests; `on_exited` fires when that animation ends.
#[component]
pub fn ModalFrame(
    #[prop(into)] title: Signal<String>,
    /// Called when the modal should close (overlay click, Escape, close button).
    on_close: Callback<()>,
    #[prop(into, optional)] closing: Signal<bool>,
    #[prop(optional)] on_exited: Option<Callback<()>>,
    /// Close when clicking on the overlay (default: true).
    #[prop(optional)]
    close_on_overlay: Option<bool>,
    /// Extra class for the modal surface (`div.modal`).
    #[prop(optional)]
    modal_class: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    let close_on_overlay = close_on_overlay.unwrap_or(true);
    let overlay_mouse_down = RwSignal::new(false);

    let is_direct_overlay_event = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(t), Some(ct)) => t == ct,
            _ => false,
        }
    };

    // Defer to the next tick so the handler is not dropped while its own
    // event is still being dispatched.
    let request_close = move || {
        if closing.get_untracked() {
            return;
        }
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            on_close.run(());
        });
    };

    // Only close if both press and release happened on the overlay itself.
    let handle_overlay_mouse_down = move |ev: ev::MouseEvent| {
        overlay_mouse_down.set(is_direct_overlay_event(&ev));
    };

    let handle_overlay_click = move |ev: ev::MouseEvent| {
        let should_close =
            close_on_overlay && overlay_mouse_down.get() && is_direct_overlay_event(&ev);
        overlay_mouse_down.set(false);
        if should_close {
            request_close();
        }
    };

    let escape = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" {
            request_close();
        }
    });
    on_cleanup(move || escape.remove());

    let surface_class = move || {
        let mut class = String::from("modal");
        if let Some(extra) = modal_class {
            class.push(' ');
            class.push_str(extra);
        }
        if closing.get() {
            class.push_str(" modal--closing");
        }
        class
    };

    let handle_animation_end = move |_: ev::AnimationEvent| {
        if closing.get_untracked() {
            if let Some(cb) = on_exited {
                cb.run(());
            }
        }
    };

    view! {
        <div
            class="modal-overlay"
            class:modal-overlay--closing=move || closing.get()
            on:mousedown=handle_overlay_mouse_down
            on:click=handle_overlay_click
        >
            <div
                class=surface_class
                role="dialog"
                aria-modal="true"
                on:click=|ev: ev::MouseEvent| ev.stop_propagation()
                on:animationend=handle_animation_end
            >
                <div class="modal-header">
                    <h2 class="modal-title">{move || title.get()}</h2>
                    <button
                        class="modal-close"
                        aria-label="Close"
                        on:click=move |_| request_close()
                    >
                        {icon("x")}
                    </button>
                </div>
                {children()}
            </div>
        </div>
    }
}
