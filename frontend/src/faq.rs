//! FAQ accordion. At most one answer is open; opening one closes the rest.

use std::cell::RefCell;

use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::config::FaqConfig;
use crate::error::LandingError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Glyph {
    #[default]
    Plus,
    Minus,
}

impl Glyph {
    pub fn class_name(self, config: &FaqConfig) -> &str {
        match self {
            Glyph::Plus => &config.closed_glyph_class,
            Glyph::Minus => &config.open_glyph_class,
        }
    }

    fn other(self) -> Glyph {
        match self {
            Glyph::Plus => Glyph::Minus,
            Glyph::Minus => Glyph::Plus,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FaqPanel {
    pub visible: bool,
    pub glyph: Glyph,
}

/// Every FAQ item on the page, registered once in document order.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FaqRegistry {
    panels: Vec<FaqPanel>,
}

impl FaqRegistry {
    /// `len` items, all collapsed.
    pub fn closed(len: usize) -> Self {
        Self {
            panels: vec![FaqPanel::default(); len],
        }
    }

    pub fn from_panels(panels: Vec<FaqPanel>) -> Self {
        Self { panels }
    }

    /// Toggles item `index` and returns whether it is now open.
    ///
    /// Every other item is collapsed first; the target's own visibility is left
    /// untouched by that pass and decides which way it flips.
    pub fn toggle(&mut self, index: usize) -> Result<bool, LandingError> {
        let len = self.panels.len();
        if index >= len {
            return Err(LandingError::FaqIndexOutOfRange { index, len });
        }

        for (i, panel) in self.panels.iter_mut().enumerate() {
            if i != index {
                panel.visible = false;
                panel.glyph = Glyph::Plus;
            }
        }

        let target = &mut self.panels[index];
        if target.visible {
            target.visible = false;
            target.glyph = Glyph::Plus;
        } else {
            target.visible = true;
            target.glyph = Glyph::Minus;
        }
        Ok(target.visible)
    }

    #[cfg(test)]
    pub fn open_index(&self) -> Option<usize> {
        self.panels.iter().position(|panel| panel.visible)
    }

    pub fn panel(&self, index: usize) -> Option<&FaqPanel> {
        self.panels.get(index)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FaqPanel> {
        self.panels.iter()
    }
}

struct FaqNodes {
    question: Element,
    answer: HtmlElement,
    icon: Element,
}

/// FAQ items found in static page markup, bound to their registry slots.
pub struct FaqBoard {
    items: Vec<FaqNodes>,
    registry: FaqRegistry,
    // Answers and icons that matched a selector but belong to no registered item
    stray_answers: Vec<HtmlElement>,
    stray_icons: Vec<Element>,
    config: FaqConfig,
}

impl FaqBoard {
    pub fn from_document(document: &Document, config: &FaqConfig) -> Result<Self, LandingError> {
        let questions = document.query_selector_all(&config.question_selector)?;

        let mut items = Vec::new();
        let mut panels = Vec::new();
        for i in 0..questions.length() {
            let Some(question) = questions.get(i).and_then(|node| node.dyn_into::<Element>().ok()) else {
                continue;
            };
            match Self::bind(question, config) {
                Ok((nodes, panel)) => {
                    items.push(nodes);
                    panels.push(panel);
                }
                Err(e) => warn!("Skipping FAQ item {}: {}", i, e),
            }
        }

        let mut stray_answers = Vec::new();
        let answers = document.query_selector_all(&config.answer_selector)?;
        for i in 0..answers.length() {
            let Some(answer) = answers.get(i).and_then(|node| node.dyn_into::<HtmlElement>().ok()) else {
                continue;
            };
            if !items.iter().any(|nodes| nodes.answer == answer) {
                stray_answers.push(answer);
            }
        }

        let mut stray_icons = Vec::new();
        let icon_selector = format!("{} {}", config.question_selector, config.icon_selector);
        let icons = document.query_selector_all(&icon_selector)?;
        for i in 0..icons.length() {
            let Some(icon) = icons.get(i).and_then(|node| node.dyn_into::<Element>().ok()) else {
                continue;
            };
            if !items.iter().any(|nodes| nodes.icon == icon) {
                stray_icons.push(icon);
            }
        }

        info!(
            "Registered {} FAQ items ({} unbound answers, {} unbound icons)",
            items.len(),
            stray_answers.len(),
            stray_icons.len()
        );
        Ok(Self {
            items,
            registry: FaqRegistry::from_panels(panels),
            stray_answers,
            stray_icons,
            config: config.clone(),
        })
    }

    fn bind(question: Element, config: &FaqConfig) -> Result<(FaqNodes, FaqPanel), LandingError> {
        let item = question
            .parent_element()
            .ok_or_else(|| LandingError::MissingElement {
                what: "FAQ item container",
                selector: config.question_selector.clone(),
            })?;

        let answer = item
            .query_selector(&config.answer_selector)?
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| LandingError::MissingElement {
                what: "FAQ answer",
                selector: config.answer_selector.clone(),
            })?;

        let icon = question
            .query_selector(&config.icon_selector)?
            .ok_or_else(|| LandingError::MissingElement {
                what: "FAQ icon",
                selector: config.icon_selector.clone(),
            })?;

        let visible = answer.style().get_property_value("display")? == "block";
        let glyph = if icon.class_list().contains(&config.open_glyph_class) {
            Glyph::Minus
        } else {
            Glyph::Plus
        };

        Ok((FaqNodes { question, answer, icon }, FaqPanel { visible, glyph }))
    }

    fn index_of(&self, element: &Element) -> Option<usize> {
        if let Some(index) = self.items.iter().position(|nodes| nodes.question == *element) {
            return Some(index);
        }
        // Clicks may land on a child of the question control
        let question = element.closest(&self.config.question_selector).ok().flatten()?;
        self.items.iter().position(|nodes| nodes.question == question)
    }

    /// Toggles the item whose question control is `question`.
    pub fn toggle(&mut self, question: &Element) -> Result<bool, LandingError> {
        let index = self.index_of(question).ok_or(LandingError::UnknownFaqItem)?;
        let open = self.registry.toggle(index)?;
        self.render()?;
        debug!("FAQ item {} {}", index, if open { "opened" } else { "closed" });
        Ok(open)
    }

    #[cfg(all(test, target_arch = "wasm32"))]
    pub fn registry(&self) -> &FaqRegistry {
        &self.registry
    }

    fn render(&self) -> Result<(), LandingError> {
        for (nodes, panel) in self.items.iter().zip(self.registry.iter()) {
            let display = if panel.visible { "block" } else { "none" };
            nodes.answer.style().set_property("display", display)?;

            let classes = nodes.icon.class_list();
            classes.remove_1(panel.glyph.other().class_name(&self.config))?;
            classes.add_1(panel.glyph.class_name(&self.config))?;
        }

        for answer in &self.stray_answers {
            answer.style().set_property("display", "none")?;
        }
        for icon in &self.stray_icons {
            icon.class_list()
                .replace(&self.config.open_glyph_class, &self.config.closed_glyph_class)?;
        }
        Ok(())
    }
}

thread_local! {
    static BOARD: RefCell<Option<FaqBoard>> = RefCell::new(None);
}

/// Makes `board` the target of [`toggle_faq`].
pub fn install_board(board: FaqBoard) {
    BOARD.with(|slot| *slot.borrow_mut() = Some(board));
}

#[cfg(all(test, target_arch = "wasm32"))]
fn take_board() -> Option<FaqBoard> {
    BOARD.with(|slot| slot.borrow_mut().take())
}

/// Click handler for static markup: `onclick="toggleFaq(this)"`.
#[wasm_bindgen(js_name = toggleFaq)]
pub fn toggle_faq(element: Element) {
    BOARD.with(|slot| match slot.borrow_mut().as_mut() {
        Some(board) => {
            if let Err(e) = board.toggle(&element) {
                warn!("toggleFaq ignored: {}", e);
            }
        }
        None => warn!("toggleFaq called before the FAQ board was built"),
    });
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const MARKUP: &str = r#"
        <div class="faq-item"><div class="faq-q">A<span><i class="fas fa-plus"></i></span></div><div class="faq-a" style="display: none;">a</div></div>
        <div class="faq-item"><div class="faq-q">B<span><i class="fas fa-plus"></i></span></div><div class="faq-a" style="display: none;">b</div></div>
        <div class="faq-item"><div class="faq-q">broken</div></div>
    "#;

    fn mount() -> (Document, Element) {
        mount_markup(MARKUP)
    }

    #[wasm_bindgen_test]
    fn test_board_toggles_markup() {
        let (document, host) = mount();
        let config = FaqConfig::default();
        let mut board = FaqBoard::from_document(&document, &config).unwrap();
        assert_eq!(board.registry().len(), 2);

        let questions = host.query_selector_all(".faq-q").unwrap();
        let first: Element = questions.get(0).unwrap().dyn_into().unwrap();
        let second: Element = questions.get(1).unwrap().dyn_into().unwrap();

        assert!(board.toggle(&first).unwrap());
        assert!(board.toggle(&second).unwrap());

        let answers = host.query_selector_all(".faq-a").unwrap();
        let first_answer: HtmlElement = answers.get(0).unwrap().dyn_into().unwrap();
        let second_answer: HtmlElement = answers.get(1).unwrap().dyn_into().unwrap();
        assert_eq!(first_answer.style().get_property_value("display").unwrap(), "none");
        assert_eq!(second_answer.style().get_property_value("display").unwrap(), "block");

        let first_icon = first.query_selector("span i").unwrap().unwrap();
        assert!(first_icon.class_list().contains("fa-plus"));
        let second_icon = second.query_selector("span i").unwrap().unwrap();
        assert!(second_icon.class_list().contains("fa-minus"));

        host.remove();
    }

    fn mount_markup(markup: &str) -> (Document, Element) {
        let document = web_sys::window().unwrap().document().unwrap();
        let host = document.create_element("div").unwrap();
        host.set_inner_html(markup);
        document.body().unwrap().append_child(&host).unwrap();
        (document, host)
    }

    fn nth<T: JsCast>(host: &Element, selector: &str, index: u32) -> T {
        host.query_selector_all(selector)
            .unwrap()
            .get(index)
            .unwrap()
            .dyn_into()
            .unwrap()
    }

    fn display(answer: &HtmlElement) -> String {
        answer.style().get_property_value("display").unwrap()
    }

    #[wasm_bindgen_test]
    fn test_unbound_panels_closed_on_toggle() {
        let (document, host) = mount_markup(
            r#"
            <div class="faq-item"><div class="faq-q">X</div><div class="faq-a" style="display: block;">x</div></div>
            <div class="faq-item"><div class="faq-q">Z<span><i class="fas fa-minus"></i></span></div></div>
            <div class="faq-item"><div class="faq-q">Y<span><i class="fas fa-plus"></i></span></div><div class="faq-a" style="display: none;">y</div></div>
            "#,
        );
        let mut board = FaqBoard::from_document(&document, &FaqConfig::default()).unwrap();
        assert_eq!(board.registry().len(), 1);

        let y: Element = nth(&host, ".faq-q", 2);
        assert!(board.toggle(&y).unwrap());

        let x_answer: HtmlElement = nth(&host, ".faq-a", 0);
        let y_answer: HtmlElement = nth(&host, ".faq-a", 1);
        assert_eq!(display(&x_answer), "none");
        assert_eq!(display(&y_answer), "block");

        let z_icon: Element = nth(&host, ".faq-q span i", 0);
        assert!(z_icon.class_list().contains("fa-plus"));
        assert!(!z_icon.class_list().contains("fa-minus"));

        host.remove();
    }

    #[wasm_bindgen_test]
    fn test_click_on_icon_resolves_question() {
        let (document, host) = mount();
        let mut board = FaqBoard::from_document(&document, &FaqConfig::default()).unwrap();

        let icon: Element = nth(&host, ".faq-q span i", 1);
        assert!(board.toggle(&icon).unwrap());

        let second_answer: HtmlElement = nth(&host, ".faq-a", 1);
        assert_eq!(display(&second_answer), "block");
        assert!(icon.class_list().contains("fa-minus"));

        host.remove();
    }

    #[wasm_bindgen_test]
    fn test_item_open_in_markup_closes_on_first_click() {
        let (document, host) = mount_markup(
            r#"
            <div class="faq-item"><div class="faq-q">A<span><i class="fas fa-minus"></i></span></div><div class="faq-a" style="display: block;">a</div></div>
            <div class="faq-item"><div class="faq-q">B<span><i class="fas fa-plus"></i></span></div><div class="faq-a" style="display: none;">b</div></div>
            "#,
        );
        let mut board = FaqBoard::from_document(&document, &FaqConfig::default()).unwrap();
        assert_eq!(board.registry().panel(0).map(|panel| panel.visible), Some(true));

        let first: Element = nth(&host, ".faq-q", 0);
        assert!(!board.toggle(&first).unwrap());

        let first_answer: HtmlElement = nth(&host, ".faq-a", 0);
        assert_eq!(display(&first_answer), "none");
        let first_icon: Element = nth(&host, ".faq-q span i", 0);
        assert!(first_icon.class_list().contains("fa-plus"));

        host.remove();
    }

    #[wasm_bindgen_test]
    fn test_exported_toggle_uses_installed_board() {
        let (document, host) = mount();
        let first: Element = nth(&host, ".faq-q", 0);
        let first_answer: HtmlElement = nth(&host, ".faq-a", 0);

        // Nothing installed yet: the click is ignored
        take_board();
        toggle_faq(first.clone());
        assert_eq!(display(&first_answer), "none");

        install_board(FaqBoard::from_document(&document, &FaqConfig::default()).unwrap());
        toggle_faq(first.clone());
        assert_eq!(display(&first_answer), "block");

        toggle_faq(first);
        assert_eq!(display(&first_answer), "none");

        take_board();
        host.remove();
    }

    #[wasm_bindgen_test]
    fn test_unknown_element_rejected() {
        let (document, host) = mount();
        let mut board = FaqBoard::from_document(&document, &FaqConfig::default()).unwrap();
        let stranger = document.create_element("button").unwrap();

        assert_eq!(board.toggle(&stranger).unwrap_err(), LandingError::UnknownFaqItem);
        host.remove();
    }
}
