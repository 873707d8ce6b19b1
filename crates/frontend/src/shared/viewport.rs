use contracts::shared::actions::ActionLayout;
use leptos::ev;
use leptos::prelude::*;

fn current_width() -> u32 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .map(|w| w as u32)
        .unwrap_or(u32::MAX)
}

/// Viewport width in CSS pixels, updated on resize.
pub fn use_viewport_width() -> ReadSignal<u32> {
    let (width, set_width) = signal(current_width());
    let handle = window_event_listener(ev::resize, move |_| set_width.set(current_width()));
    on_cleanup(move || handle.remove());
    width
}

/// Button layout for the current viewport width.
pub fn use_action_layout() -> Signal<ActionLayout> {
    let width = use_viewport_width();
    Signal::derive(move || ActionLayout::for_width(width.get()))
}
