use blik_studio::{
    content::{self, SERVICES, TECH_STACK, TESTIMONIALS},
    motion::MotionPreference,
};
use yew::prelude::*;

use super::{locale::I18n, magnetic::MagneticLink};

#[derive(Properties, PartialEq)]
pub(super) struct SectionProps {
    pub i18n: I18n,
    #[prop_or_default]
    pub motion: MotionPreference,
}

fn heading(i18n: &I18n, section: &str, fallbacks: [&'static str; 3]) -> Html {
    let [label, title, description] = fallbacks;
    html! {
        <header class="section-heading">
            <span class="section-label">{i18n.t(&format!("{section}.label"), label)}</span>
            <h2>{i18n.t(&format!("{section}.title"), title)}</h2>
            <p>{i18n.t(&format!("{section}.description"), description)}</p>
        </header>
    }
}

#[function_component(Services)]
pub(super) fn services(props: &SectionProps) -> Html {
    let i18n = &props.i18n;
    let store = i18n.store();

    let cards = SERVICES.iter().map(|service| {
        html! {
            <article key={service.key} class="service-card">
                <h3>{service.title_in(store)}</h3>
                <p>{service.description_in(store)}</p>
                <ul class="service-outcomes">
                    { for service.outcomes_in(store).into_iter().map(|outcome| html! {
                        <li key={outcome}><span aria-hidden="true">{"→"}</span>{outcome}</li>
                    }) }
                </ul>
            </article>
        }
    });

    html! {
        <section id="services" class="services">
            {heading(i18n, "services", [
                "Services",
                "What we build",
                "From a first landing page to a full booking system, one team covers design, code and care after launch.",
            ])}
            <div class="service-grid">
                { for cards }
            </div>
        </section>
    }
}

#[function_component(Testimonials)]
pub(super) fn testimonials(props: &SectionProps) -> Html {
    let i18n = &props.i18n;
    let store = i18n.store();

    let cards = TESTIMONIALS.iter().map(|testimonial| {
        html! {
            <figure key={testimonial.key} class="testimonial">
                <div class="testimonial-rating" aria-label={format!("{}/5", testimonial.rating)}>
                    { for (0..testimonial.rating).map(|_| html! { <span aria-hidden="true">{"★"}</span> }) }
                </div>
                <blockquote>{format!("“{}”", testimonial.content_in(store))}</blockquote>
                <figcaption>
                    <span class="testimonial-avatar" aria-hidden="true">{testimonial.initial()}</span>
                    <span class="testimonial-name">{testimonial.name}</span>
                    <span class="testimonial-role">{testimonial.role_in(store)}</span>
                </figcaption>
            </figure>
        }
    });

    html! {
        <section id="testimonials" class="testimonials">
            {heading(i18n, "testimonials", [
                "Testimonials",
                "What clients say",
                "Feedback from the people we have built for.",
            ])}
            <div class="testimonial-grid">
                { for cards }
            </div>
        </section>
    }
}

/// Index reached from `current` by an arrow key, wrapping at both ends.
fn step_selection(current: usize, key: &str, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match key {
        "ArrowRight" | "ArrowDown" => Some((current + 1) % len),
        "ArrowLeft" | "ArrowUp" => Some((current + len - 1) % len),
        "Home" => Some(0),
        "End" => Some(len - 1),
        _ => None,
    }
}

#[function_component(TechStack)]
pub(super) fn tech_stack(props: &SectionProps) -> Html {
    let i18n = &props.i18n;
    let selected = use_state(|| TECH_STACK[0].id);

    let current = TECH_STACK
        .iter()
        .position(|tool| tool.id == *selected)
        .unwrap_or(0);

    let onkeydown = {
        let selected = selected.clone();
        Callback::from(move |event: KeyboardEvent| {
            if let Some(next) = step_selection(current, &event.key(), TECH_STACK.len()) {
                event.prevent_default();
                selected.set(TECH_STACK[next].id);
            }
        })
    };

    let pills = TECH_STACK.iter().map(|tool| {
        let active = tool.id == *selected;
        let onclick = {
            let selected = selected.clone();
            let id = tool.id;
            Callback::from(move |_: MouseEvent| selected.set(id))
        };
        html! {
            <button
                key={tool.id}
                id={format!("tab-{}", tool.id)}
                type="button"
                role="tab"
                class={classes!("tech-pill", active.then_some("is-active"))}
                aria-selected={active.to_string()}
                aria-controls="tech-details-panel"
                tabindex={if active { "0" } else { "-1" }}
                onclick={onclick}
            >
                {tool.name}
            </button>
        }
    });

    let details = content::tool_by_id(*selected).map(|tool| {
        html! {
            <>
                <h3>{tool.name}</h3>
                <p>{tool.description_in(i18n.store())}</p>
            </>
        }
    });

    html! {
        <section id="tech-stack" class="tech-stack">
            <header class="section-heading">
                <span class="section-label">{i18n.t("techStack.label", "Stack")}</span>
                <h2>{i18n.t("techStack.title", "Tools we trust")}</h2>
                <p>
                    {i18n.t("techStack.description", "The technologies behind our work.")}{" "}
                    <span class="tech-hint">{i18n.t("techStack.hint", "Click to explore.")}</span>
                </p>
            </header>
            <div class="tech-layout">
                <div role="tablist" aria-label="Technology stack" class="tech-pills" onkeydown={onkeydown}>
                    { for pills }
                </div>
                <div
                    role="tabpanel"
                    id="tech-details-panel"
                    aria-labelledby={format!("tab-{}", *selected)}
                    class="tech-details"
                >
                    { for details }
                </div>
            </div>
        </section>
    }
}

#[function_component(CtaSection)]
pub(super) fn cta_section(props: &SectionProps) -> Html {
    let i18n = &props.i18n;
    html! {
        <section class="cta">
            <div class="cta-inner">
                <h2>{i18n.t("cta.title", "Ready to start your project?")}</h2>
                <p>{i18n.t("cta.description", "Tell us where you want to go and we will map the way there.")}</p>
                <div class="cta-actions">
                    <MagneticLink motion={props.motion} href="/#contact" class={classes!("button", "button-light")}>
                        {i18n.t("cta.primaryButton", "Start a project")}
                    </MagneticLink>
                    <MagneticLink motion={props.motion} href="/projects" class={classes!("button", "button-outline")}>
                        {i18n.t("cta.secondaryButton", "See the work")}
                    </MagneticLink>
                </div>
            </div>
        </section>
    }
}
