//! Reveal-on-scroll: elements carrying the marker class get the active class
//! the first time they scroll into view, and keep it for the life of the page.

use std::cell::RefCell;
use std::collections::HashSet;
use std::hash::Hash;
use std::rc::Rc;

use js_sys::Array;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config::RevealConfig;
use crate::error::LandingError;

/// One element's state as reported by a single observer callback.
#[derive(Clone, Debug, PartialEq)]
pub struct Sighting<K> {
    pub key: K,
    pub is_intersecting: bool,
}

/// Bookkeeping for which watched elements have been revealed.
///
/// Activation is one-way: once a key is active no later sighting can clear it.
#[derive(Debug)]
pub struct RevealTracker<K> {
    watched: HashSet<K>,
    active: HashSet<K>,
}

impl<K: Eq + Hash + Clone> RevealTracker<K> {
    pub fn new() -> Self {
        Self {
            watched: HashSet::new(),
            active: HashSet::new(),
        }
    }

    pub fn watch(&mut self, key: K) {
        self.watched.insert(key);
    }

    /// Applies one batch of sightings and returns the keys activated by it.
    pub fn apply<I>(&mut self, sightings: I) -> Vec<K>
    where
        I: IntoIterator<Item = Sighting<K>>,
    {
        self.apply_with(sightings, |_| true)
    }

    /// Like [`apply`](Self::apply), but a key only becomes active once
    /// `activate` reports success for it. Failed keys stay pending.
    pub fn apply_with<I, F>(&mut self, sightings: I, mut activate: F) -> Vec<K>
    where
        I: IntoIterator<Item = Sighting<K>>,
        F: FnMut(&K) -> bool,
    {
        let mut newly_active = Vec::new();
        for sighting in sightings {
            if !sighting.is_intersecting
                || !self.watched.contains(&sighting.key)
                || self.active.contains(&sighting.key)
            {
                continue;
            }
            if activate(&sighting.key) {
                self.active.insert(sighting.key.clone());
                newly_active.push(sighting.key);
            }
        }
        newly_active
    }

    #[cfg(test)]
    pub fn is_active(&self, key: &K) -> bool {
        self.active.contains(key)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn pending(&self) -> usize {
        self.watched.len() - self.active.len()
    }
}

impl<K: Eq + Hash + Clone> Default for RevealTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}

struct RevealState {
    elements: Vec<Element>,
    tracker: RevealTracker<usize>,
    active_class: String,
}

impl RevealState {
    fn new(elements: Vec<Element>, active_class: &str) -> Self {
        let mut tracker = RevealTracker::new();
        for index in 0..elements.len() {
            tracker.watch(index);
        }
        Self {
            elements,
            tracker,
            active_class: active_class.to_string(),
        }
    }

    /// Marks newly visible elements active and returns them.
    fn reveal<I>(&mut self, sightings: I) -> Vec<Element>
    where
        I: IntoIterator<Item = (Element, bool)>,
    {
        let elements = &self.elements;
        let active_class = &self.active_class;

        let sightings: Vec<Sighting<usize>> = sightings
            .into_iter()
            .filter_map(|(target, is_intersecting)| {
                elements
                    .iter()
                    .position(|element| *element == target)
                    .map(|key| Sighting { key, is_intersecting })
            })
            .collect();

        let revealed = self.tracker.apply_with(sightings, |&index| {
            match elements[index].class_list().add_1(active_class) {
                Ok(()) => true,
                Err(e) => {
                    warn!("Failed to mark element {} active: {:?}", index, e);
                    false
                }
            }
        });

        if !revealed.is_empty() {
            debug!(
                "Revealed {} elements ({} still hidden)",
                revealed.len(),
                self.tracker.pending()
            );
        }
        revealed.into_iter().map(|index| elements[index].clone()).collect()
    }

    fn handle_batch(&mut self, entries: Array, observer: &IntersectionObserver) {
        let sightings = entries
            .iter()
            .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
            .map(|entry| (entry.target(), entry.is_intersecting()));

        for element in self.reveal(sightings) {
            // Active elements never change again
            observer.unobserve(&element);
        }
    }
}

fn observer_options(config: &RevealConfig) -> IntersectionObserverInit {
    let options = IntersectionObserverInit::new();
    options.set_root_margin(&config.root_margin);
    options.set_threshold(&JsValue::from_f64(config.threshold));
    options
}

/// Owns the intersection observer; dropping it stops all observation.
pub struct RevealObserver {
    observer: IntersectionObserver,
    state: Rc<RefCell<RevealState>>,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl RevealObserver {
    /// Starts watching every element in `document` that carries the marker class.
    pub fn observe_document(document: &Document, config: &RevealConfig) -> Result<Self, LandingError> {
        let selector = format!(".{}", config.marker_class);
        let nodes = document.query_selector_all(&selector)?;

        let mut elements = Vec::with_capacity(nodes.length() as usize);
        for i in 0..nodes.length() {
            if let Some(element) = nodes.get(i).and_then(|node| node.dyn_into::<Element>().ok()) {
                elements.push(element);
            }
        }

        let state = Rc::new(RefCell::new(RevealState::new(elements, &config.active_class)));

        let callback = {
            let state = state.clone();
            Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
                move |entries: Array, observer: IntersectionObserver| {
                    state.borrow_mut().handle_batch(entries, &observer);
                },
            )
        };

        let options = observer_options(config);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        for element in state.borrow().elements.iter() {
            observer.observe(element);
        }
        info!(
            "Watching {} elements matching {} for reveal",
            state.borrow().elements.len(),
            selector
        );

        Ok(Self {
            observer,
            state,
            _callback: callback,
        })
    }

    pub fn revealed(&self) -> usize {
        self.state.borrow().tracker.active_count()
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_observe_document_without_markers() {
        let document = web_sys::window().unwrap().document().unwrap();
        let config = RevealConfig {
            marker_class: "reveal-test-absent".to_string(),
            ..RevealConfig::default()
        };

        let observer = RevealObserver::observe_document(&document, &config).unwrap();
        assert_eq!(observer.revealed(), 0);
    }

    fn element(document: &Document) -> Element {
        let element = document.create_element("div").unwrap();
        element.class_list().add_1("reveal").unwrap();
        element
    }

    #[wasm_bindgen_test]
    fn test_reveal_marks_element_once_and_keeps_it() {
        let document = web_sys::window().unwrap().document().unwrap();
        let above_fold = element(&document);
        let below_fold = element(&document);
        let mut state = RevealState::new(vec![above_fold.clone(), below_fold.clone()], "active");

        let revealed = state.reveal(vec![(above_fold.clone(), true), (below_fold.clone(), false)]);
        assert_eq!(revealed, vec![above_fold.clone()]);
        assert!(above_fold.class_list().contains("active"));
        assert!(!below_fold.class_list().contains("active"));

        // Scrolling back out does not clear it, and a second entry is a no-op
        assert!(state.reveal(vec![(above_fold.clone(), false)]).is_empty());
        assert!(state.reveal(vec![(above_fold.clone(), true)]).is_empty());
        assert!(above_fold.class_list().contains("active"));
        assert_eq!(state.tracker.active_count(), 1);

        assert_eq!(state.reveal(vec![(below_fold.clone(), true)]), vec![below_fold.clone()]);
        assert!(below_fold.class_list().contains("active"));
    }

    #[wasm_bindgen_test]
    fn test_reveal_ignores_unwatched_elements() {
        let document = web_sys::window().unwrap().document().unwrap();
        let watched = element(&document);
        let stranger = element(&document);
        let mut state = RevealState::new(vec![watched], "active");

        assert!(state.reveal(vec![(stranger.clone(), true)]).is_empty());
        assert!(!stranger.class_list().contains("active"));
    }

    #[wasm_bindgen_test]
    fn test_observer_options_follow_config() {
        let config = RevealConfig {
            root_margin: "10px".to_string(),
            threshold: 0.25,
            ..RevealConfig::default()
        };
        let options = observer_options(&config);

        let margin = js_sys::Reflect::get(&options, &JsValue::from_str("rootMargin")).unwrap();
        let threshold = js_sys::Reflect::get(&options, &JsValue::from_str("threshold")).unwrap();
        assert_eq!(margin.as_string().as_deref(), Some("10px"));
        assert_eq!(threshold.as_f64(), Some(0.25));
    }
}
