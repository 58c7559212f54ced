//! Transient operation feedback shown below the navigation bar.
//!
//! Success and error notices auto-clear after three seconds, mirroring how
//! the registry's operators are used to reading them.

use dioxus::prelude::*;

use crate::sleep_secs;

#[derive(Clone, Debug, PartialEq)]
pub enum FeedbackKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
}

/// The feedback slot, from context (provided by `StoreProvider`).
pub fn use_feedback() -> Signal<Option<Feedback>> {
    use_context::<Signal<Option<Feedback>>>()
}

/// Show a notice and clear it after three seconds, unless something newer
/// replaced it in the meantime.
pub fn show_feedback(
    mut slot: Signal<Option<Feedback>>,
    kind: FeedbackKind,
    message: impl Into<String>,
) {
    let notice = Feedback {
        kind,
        message: message.into(),
    };
    slot.set(Some(notice.clone()));
    spawn(async move {
        sleep_secs(3).await;
        if slot.peek().as_ref() == Some(&notice) {
            slot.set(None);
        }
    });
}

/// Renders the current notice, if any.
#[component]
pub fn FeedbackBanner() -> Element {
    let feedback = use_feedback();
    match feedback() {
        Some(notice) => {
            let class = match notice.kind {
                FeedbackKind::Success => "feedback feedback--success",
                FeedbackKind::Error => "feedback feedback--error",
            };
            rsx! {
                div { class: "{class}", "{notice.message}" }
            }
        }
        None => rsx! {},
    }
}
