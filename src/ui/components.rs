/// Reusable UI components

use crate::browser;
use crate::dork::{DorkId, DorkRecord};
use crate::operations::{format_created_date, highlight_segments};
use patternfly_yew::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

const TOAST_MILLIS: i32 = 2_000;

#[derive(PartialEq, Clone, Copy, Debug, Default)]
pub enum ToastKind {
    #[default]
    Success,
    Error,
}

#[derive(PartialEq, Clone, Debug)]
pub struct ToastMessage {
    pub text: String,
    pub kind: ToastKind,
}

#[derive(Properties, PartialEq)]
pub struct StatusToastProps {
    pub message: ToastMessage,
}

#[function_component(StatusToast)]
pub fn status_toast(props: &StatusToastProps) -> Html {
    let bg_color = match props.message.kind {
        ToastKind::Success => "#4CAF50",
        ToastKind::Error => "#f44336",
    };

    html! {
        <div
            id="toast"
            style={format!("position: fixed; top: 10px; right: 10px; background: {}; color: white; padding: 8px 16px; border-radius: 20px; font-size: 12px; font-weight: 600; z-index: 10001;", bg_color)}
        >
            {&props.message.text}
        </div>
    }
}

/// Shows one toast at a time; each hides itself after two seconds
#[derive(Clone)]
pub struct ToastSlot {
    toast: UseStateHandle<Option<ToastMessage>>,
    seq: Rc<RefCell<u64>>,
}

impl ToastSlot {
    pub fn current(&self) -> Option<ToastMessage> {
        (*self.toast).clone()
    }

    pub fn show(&self, text: impl Into<String>, kind: ToastKind) {
        let id = {
            let mut seq = self.seq.borrow_mut();
            *seq += 1;
            *seq
        };
        self.toast.set(Some(ToastMessage { text: text.into(), kind }));

        let toast = self.toast.clone();
        let seq = self.seq.clone();
        browser::set_timeout(TOAST_MILLIS, move || {
            // A newer toast owns the slot now
            if *seq.borrow() == id {
                toast.set(None);
            }
        });
    }

    pub fn success(&self, text: impl Into<String>) {
        self.show(text, ToastKind::Success);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.show(text, ToastKind::Error);
    }
}

#[hook]
pub fn use_toast_slot() -> ToastSlot {
    let toast = use_state(|| None::<ToastMessage>);
    let seq = use_mut_ref(|| 0u64);
    ToastSlot { toast, seq }
}

#[derive(Properties, PartialEq)]
pub struct HighlightedTextProps {
    pub text: String,
    #[prop_or_default]
    pub term: String,
}

/// Text with search matches wrapped in highlight spans
///
/// Every run is a text node, so markup in saved dorks is shown, not parsed.
#[function_component(HighlightedText)]
pub fn highlighted_text(props: &HighlightedTextProps) -> Html {
    html! {
        <>
            {for highlight_segments(&props.text, &props.term).into_iter().map(|segment| {
                if segment.highlighted {
                    html! { <span class="search-highlight">{segment.text}</span> }
                } else {
                    html! { <>{segment.text}</> }
                }
            })}
        </>
    }
}

#[derive(Properties, PartialEq)]
pub struct DorkCardProps {
    pub dork: DorkRecord,
    #[prop_or_default]
    pub term: String,
    pub on_search: Callback<DorkId>,
    pub on_copy: Callback<String>,
    pub on_delete: Callback<DorkId>,
}

#[function_component(DorkCard)]
pub fn dork_card(props: &DorkCardProps) -> Html {
    let dork = &props.dork;
    let id = dork.id;

    let usage = match dork.usage_count {
        0 => None,
        1 => Some(" • Used 1 time".to_string()),
        n => Some(format!(" • Used {} times", n)),
    };

    html! {
        <div class="dork-item">
            <div class="dork-text">
                <HighlightedText text={dork.text.clone()} term={props.term.clone()} />
            </div>
            <div class="dork-meta">
                <div>
                    <span>{format_created_date(&dork.created_at)}</span>
                    if let Some(usage) = usage {
                        <span>{usage}</span>
                    }
                    <div>
                        {for dork.tags.iter().map(|tag| html! {
                            <span class="tag">
                                <HighlightedText text={tag.clone()} term={props.term.clone()} />
                            </span>
                        })}
                    </div>
                </div>
                <div class="dork-actions">
                    <Button
                        onclick={props.on_search.reform(move |_: MouseEvent| id)}
                        variant={ButtonVariant::Primary}
                    >
                        {"Search"}
                    </Button>
                    <Button
                        onclick={props.on_copy.reform({
                            let text = dork.text.clone();
                            move |_: MouseEvent| text.clone()
                        })}
                        variant={ButtonVariant::Secondary}
                    >
                        {"Copy"}
                    </Button>
                    <Button
                        onclick={props.on_delete.reform(move |_: MouseEvent| id)}
                        variant={ButtonVariant::Danger}
                    >
                        {"Delete"}
                    </Button>
                </div>
            </div>
        </div>
    }
}
