use log::{debug, error};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::components::faq_list::{FaqEntry, FaqList};
use crate::config::LandingConfig;
use crate::reveal::RevealObserver;

const FEATURES: &[(&str, &str)] = &[
    (
        "Learn at your own pace",
        "Every lesson is recorded, so you can pause, rewind and come back whenever life allows.",
    ),
    (
        "Real projects, not toy exercises",
        "Each module ends with a project you can show to a client or an employer.",
    ),
    (
        "A community that answers",
        "Questions posted in the members' group get a reply from an instructor within a day.",
    ),
];

const TESTIMONIALS: &[(&str, &str)] = &[
    ("Mei", "I finished my first paid project two weeks after the last module."),
    ("Jonas", "The recordings made it possible to study around night shifts."),
];

const FAQ_ENTRIES: &[(&str, &str)] = &[
    (
        "Who is this course for?",
        "Anyone starting from zero. The first module assumes no prior experience.",
    ),
    (
        "How long do I keep access?",
        "Access never expires, and future updates to the material are included.",
    ),
    (
        "Is there a refund policy?",
        "Yes. If the course is not for you, ask for a refund within 14 days of purchase.",
    ),
    (
        "Do I get a certificate?",
        "A certificate is issued once every module project has been submitted.",
    ),
];

fn faq_entries() -> Vec<FaqEntry> {
    FAQ_ENTRIES
        .iter()
        .map(|&(question, answer)| FaqEntry {
            question: AttrValue::Static(question),
            answer: AttrValue::Static(answer),
        })
        .collect()
}

#[function_component(Landing)]
pub fn landing() -> Html {
    let config = use_context::<LandingConfig>().unwrap_or_default();

    // Scroll to top and start watching reveal sections once the markup exists
    {
        let reveal_config = config.reveal.clone();
        use_effect_with_deps(
            move |_| {
                let window = web_sys::window();
                if let Some(window) = &window {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }

                let observer = match window.and_then(|w| w.document()) {
                    Some(document) => match RevealObserver::observe_document(&document, &reveal_config) {
                        Ok(observer) => Some(observer),
                        Err(e) => {
                            error!("Reveal-on-scroll disabled: {}", e);
                            None
                        }
                    },
                    None => None,
                };

                move || {
                    if let Some(observer) = observer {
                        debug!("Stopping reveal observer after {} reveals", observer.revealed());
                    }
                }
            },
            (),
        );
    }

    let reveal = config.reveal.marker_class.clone();

    html! {
        <div class="landing-page">
            <section class="hero">
                <h1>{"Build the skill, then build the business"}</h1>
                <p>{"A practical course that takes you from the first lesson to the first paying client."}</p>
                <a href="#pricing" class="cta-button">{"Join now"}</a>
            </section>

            <section class="features">
                { for FEATURES.iter().map(|(title, body)| html! {
                    <div class={classes!("feature-card", reveal.clone())}>
                        <h2>{ *title }</h2>
                        <p>{ *body }</p>
                    </div>
                }) }
            </section>

            <section class={classes!("testimonials", reveal.clone())}>
                <h2>{"What students say"}</h2>
                { for TESTIMONIALS.iter().map(|(name, quote)| html! {
                    <blockquote class="testimonial">
                        <p>{ *quote }</p>
                        <cite>{ *name }</cite>
                    </blockquote>
                }) }
            </section>

            <section id="pricing" class={classes!("pricing", reveal.clone())}>
                <h2>{"One payment, lifetime access"}</h2>
                <a href="#faq" class="cta-button">{"Still unsure? Read the FAQ"}</a>
            </section>

            <section id="faq" class={classes!("faq-section", reveal)}>
                <h2>{"Frequently Asked Questions"}</h2>
                <FaqList entries={faq_entries()} />
            </section>

            <style>
                {r#"
                .landing-page {
                    color: #ffffff;
                    background: #1a1a1a;
                    min-height: 100vh;
                }

                .hero {
                    text-align: center;
                    padding: 8rem 2rem 6rem;
                }

                .hero h1 {
                    font-size: 3.5rem;
                    margin-bottom: 1.5rem;
                    background: linear-gradient(45deg, #fff, #7EB2FF);
                    -webkit-background-clip: text;
                    -webkit-text-fill-color: transparent;
                }

                .hero p {
                    font-size: 1.2rem;
                    color: #999;
                    max-width: 600px;
                    margin: 0 auto 2rem;
                }

                .cta-button {
                    display: inline-block;
                    padding: 1rem 2rem;
                    border-radius: 8px;
                    background: #1E90FF;
                    color: #fff;
                    text-decoration: none;
                    transition: background 0.3s ease;
                }

                .cta-button:hover {
                    background: #7EB2FF;
                }

                .features {
                    display: grid;
                    grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
                    gap: 2rem;
                    max-width: 1000px;
                    margin: 0 auto;
                    padding: 4rem 2rem;
                }

                .feature-card, .testimonials, .pricing, .faq-section {
                    background: rgba(26, 26, 26, 0.85);
                    border: 1px solid rgba(30, 144, 255, 0.1);
                    border-radius: 12px;
                    padding: 2rem;
                }

                .testimonials, .pricing, .faq-section {
                    max-width: 800px;
                    margin: 2rem auto;
                }

                .testimonial cite {
                    color: #7EB2FF;
                }

                .reveal {
                    opacity: 0;
                    transform: translateY(40px);
                    transition: opacity 0.8s ease, transform 0.8s ease;
                }

                .reveal.active {
                    opacity: 1;
                    transform: translateY(0);
                }

                .faq-item {
                    border-bottom: 1px solid rgba(30, 144, 255, 0.1);
                }

                .faq-q {
                    display: flex;
                    justify-content: space-between;
                    align-items: center;
                    padding: 1.5rem 0;
                    cursor: pointer;
                }

                .faq-q:hover {
                    color: #7EB2FF;
                }

                .faq-q span {
                    color: #7EB2FF;
                }

                .faq-a p {
                    color: #999;
                    line-height: 1.6;
                    margin: 0 0 1.5rem;
                }

                @media (max-width: 768px) {
                    .hero h1 {
                        font-size: 2.5rem;
                    }
                }
                "#}
            </style>
        </div>
    }
}

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="landing-page">
            <section class="hero">
                <h1>{"Page not found"}</h1>
                <Link<Route> to={Route::Home} classes="cta-button">
                    {"Back to the start"}
                </Link<Route>>
            </section>
        </div>
    }
}
