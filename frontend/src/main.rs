use std::cell::RefCell;

use yew::prelude::*;
use yew_router::prelude::*;
use log::{error, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, Document, Element};

mod config;
mod error;
mod faq;
mod reveal;
mod components {
    pub mod faq_list;
}
mod pages {
    pub mod landing;
}

use config::{LandingConfig, APP_ROOT_ID};
use error::LandingError;
use faq::FaqBoard;
use pages::landing::{Landing, NotFound};
use reveal::RevealObserver;

thread_local! {
    // Static pages keep their observer for the life of the document
    static PAGE_REVEAL: RefCell<Option<RevealObserver>> = RefCell::new(None);
}

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Landing page");
            html! { <Landing /> }
        },
        Route::NotFound => {
            info!("Rendering NotFound page");
            html! { <NotFound /> }
        },
    }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: LandingConfig,
}

#[function_component]
fn App(props: &AppProps) -> Html {
    html! {
        <ContextProvider<LandingConfig> context={props.config.clone()}>
            <BrowserRouter>
                <Switch<Route> render={switch} />
            </BrowserRouter>
        </ContextProvider<LandingConfig>>
    }
}

/// Exposes `toggleFaq` on `window` so inline `onclick` attributes can reach it.
fn publish_toggle(window: &web_sys::Window) -> Result<(), LandingError> {
    let toggle = Closure::<dyn Fn(Element)>::new(faq::toggle_faq);
    js_sys::Reflect::set(window, &JsValue::from_str("toggleFaq"), toggle.as_ref())?;
    toggle.forget();
    Ok(())
}

fn enhance(document: &Document, config: &LandingConfig) {
    match RevealObserver::observe_document(document, &config.reveal) {
        Ok(observer) => PAGE_REVEAL.with(|slot| *slot.borrow_mut() = Some(observer)),
        Err(e) => error!("Reveal-on-scroll disabled: {}", e),
    }

    match FaqBoard::from_document(document, &config.faq) {
        Ok(board) => faq::install_board(board),
        Err(e) => error!("FAQ accordion disabled: {}", e),
    }
}

/// Enhances markup already present in the page instead of rendering the app.
fn start_static(window: &web_sys::Window, document: &Document, config: LandingConfig) -> Result<(), LandingError> {
    publish_toggle(window)?;

    if document.ready_state() == "loading" {
        let ready_document = document.clone();
        let on_ready = Closure::<dyn FnMut()>::once(move || {
            info!("Document ready, enhancing static markup");
            enhance(&ready_document, &config);
        });
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
        on_ready.forget();
    } else {
        enhance(document, &config);
    }
    Ok(())
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    let Some(window) = window() else {
        error!("No window available, nothing to do");
        return;
    };
    let Some(document) = window.document() else {
        error!("No document available, nothing to do");
        return;
    };

    let config = LandingConfig::load(&document);

    match document.get_element_by_id(APP_ROOT_ID) {
        Some(root) => {
            info!("Starting landing app in #{}", APP_ROOT_ID);
            yew::Renderer::<App>::with_root_and_props(root, AppProps { config }).render();
        }
        None => {
            info!("No #{} element, enhancing static markup", APP_ROOT_ID);
            if let Err(e) = start_static(&window, &document, config) {
                error!("Failed to enhance static page: {}", e);
            }
        }
    }
}
