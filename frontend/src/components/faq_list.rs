use std::rc::Rc;

use log::{debug, warn};
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::config::LandingConfig;
use crate::faq::{FaqPanel, FaqRegistry};

// Same classes static pages use, so the default FaqConfig selectors match rendered items
const ITEM_CLASS: &str = "faq-item";
const QUESTION_CLASS: &str = "faq-q";
const ANSWER_CLASS: &str = "faq-a";
const ICON_FONT_CLASS: &str = "fas";

#[derive(Clone, PartialEq)]
pub struct FaqEntry {
    pub question: AttrValue,
    pub answer: AttrValue,
}

#[derive(Properties, PartialEq)]
pub struct FaqListProps {
    pub entries: Vec<FaqEntry>,
}

#[derive(Clone, PartialEq)]
struct FaqState {
    registry: FaqRegistry,
}

enum FaqAction {
    Toggle(usize),
}

impl Reducible for FaqState {
    type Action = FaqAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            FaqAction::Toggle(index) => {
                let mut registry = self.registry.clone();
                match registry.toggle(index) {
                    Ok(open) => {
                        debug!("FAQ item {} {}", index, if open { "opened" } else { "closed" });
                        Rc::new(FaqState { registry })
                    }
                    Err(e) => {
                        warn!("FAQ toggle ignored: {}", e);
                        self
                    }
                }
            }
        }
    }
}

#[function_component(FaqList)]
pub fn faq_list(props: &FaqListProps) -> Html {
    let config = use_context::<LandingConfig>().unwrap_or_default();
    let len = props.entries.len();
    let state = use_reducer(move || FaqState {
        registry: FaqRegistry::closed(len),
    });

    html! {
        <div class="faq-list">
            { for props.entries.iter().enumerate().map(|(index, entry)| {
                let panel = state.registry.panel(index).copied().unwrap_or_default();
                let onclick = {
                    let state = state.clone();
                    Callback::from(move |e: MouseEvent| {
                        e.prevent_default();
                        state.dispatch(FaqAction::Toggle(index));
                    })
                };
                render_item(entry, panel, onclick, &config)
            }) }
        </div>
    }
}

fn render_item(entry: &FaqEntry, panel: FaqPanel, onclick: Callback<MouseEvent>, config: &LandingConfig) -> Html {
    let display = if panel.visible { "display: block;" } else { "display: none;" };
    let glyph_class = panel.glyph.class_name(&config.faq).to_string();

    html! {
        <div class={ITEM_CLASS}>
            <div class={QUESTION_CLASS} {onclick}>
                <h3>{ entry.question.clone() }</h3>
                <span><i class={classes!(ICON_FONT_CLASS, glyph_class)}></i></span>
            </div>
            <div class={ANSWER_CLASS} style={display}>
                <p>{ entry.answer.clone() }</p>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FaqConfig;

    #[test]
    fn test_rendered_markup_matches_default_selectors() {
        let config = FaqConfig::default();
        assert_eq!(config.question_selector, format!(".{}", QUESTION_CLASS));
        assert_eq!(config.answer_selector, format!(".{}", ANSWER_CLASS));
        // Icons render as `<span><i>` inside the question
        assert_eq!(config.icon_selector, "span i");
    }
}
