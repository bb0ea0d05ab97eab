use blik_studio::{
    contact::{
        ContactForm, ContactFormState, Field, SubmissionError, SubmissionStatus, EMAIL_MAX_CHARS,
        MESSAGE_MAX_CHARS, NAME_MAX_CHARS,
    },
    motion::MotionPreference,
};
use gloo_net::http::Request;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use super::{locale::I18n, magnetic::MagneticButton};

const CONTACT_ENDPOINT: &str = "/api/contact";
const CONTACT_EMAIL: &str = "stok@blik-studio.cz";

async fn submit(form: &ContactForm) -> Result<(), SubmissionError> {
    let response = Request::post(CONTACT_ENDPOINT)
        .json(form)
        .map_err(|error| SubmissionError::Network(error.to_string()))?
        .send()
        .await
        .map_err(|error| SubmissionError::Network(error.to_string()))?;

    if response.ok() {
        Ok(())
    } else {
        Err(SubmissionError::Rejected(response.status()))
    }
}

#[derive(Properties, PartialEq)]
pub(super) struct ContactSectionProps {
    pub i18n: I18n,
    pub motion: MotionPreference,
}

#[function_component(ContactSection)]
pub(super) fn contact_section(props: &ContactSectionProps) -> Html {
    let form = use_mut_ref(ContactFormState::default);
    let invalid = use_state(|| false);
    let rerender = use_force_update();

    let on_field = |field: Field| {
        let form = form.clone();
        let invalid = invalid.clone();
        move |value: String| {
            form.borrow_mut().update(field, value);
            invalid.set(false);
        }
    };

    let on_name = {
        let apply = on_field(Field::Name);
        Callback::from(move |event: InputEvent| {
            apply(event.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let on_email = {
        let apply = on_field(Field::Email);
        Callback::from(move |event: InputEvent| {
            apply(event.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let on_message = {
        let apply = on_field(Field::Message);
        Callback::from(move |event: InputEvent| {
            apply(event.target_unchecked_into::<HtmlTextAreaElement>().value());
        })
    };

    let onsubmit = {
        let form = form.clone();
        let invalid = invalid.clone();
        let rerender = rerender.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();

            if let Err(error) = form.borrow().fields().validate() {
                tracing::debug!(error = %error, "contact form rejected before sending");
                invalid.set(true);
                return;
            }

            let Some(payload) = form.borrow_mut().begin_submit() else {
                return;
            };
            rerender.force_update();

            let form = form.clone();
            let rerender = rerender.clone();
            spawn_local(async move {
                let outcome = submit(&payload).await;
                form.borrow_mut().resolve(outcome);
                rerender.force_update();
            });
        })
    };

    let i18n = &props.i18n;
    let state = form.borrow();
    let fields = state.fields();
    let sending = state.is_sending();

    let feedback = match state.status() {
        SubmissionStatus::Success => html! {
            <p class="form-feedback is-success" role="status">
                {i18n.t("contact.form.success", "Thanks! Your message is on its way.")}
            </p>
        },
        SubmissionStatus::Error => html! {
            <p class="form-feedback is-error" role="alert">
                {i18n.t("contact.form.error", "Something went wrong. Please try again or email us directly.")}
            </p>
        },
        SubmissionStatus::Idle | SubmissionStatus::Sending if *invalid => html! {
            <p class="form-feedback is-error" role="alert">
                {i18n.t("contact.form.invalid", "Please fill in every field with a valid email address.")}
            </p>
        },
        SubmissionStatus::Idle | SubmissionStatus::Sending => Html::default(),
    };

    let send_label = if sending {
        i18n.t("contact.form.sending", "Sending...")
    } else {
        i18n.t("contact.form.send", "Send message")
    };

    html! {
        <section id="contact" class="contact">
            <header class="contact-heading">
                <span class="section-label">{i18n.t("contact.badge", "Contact")}</span>
                <h2>{i18n.t("contact.title", "Let's build something together")}</h2>
                <p>{i18n.t("contact.description", "Tell us about your project and we will get back to you within two working days.")}</p>
                <p class="contact-direct">
                    {i18n.t("contact.direct", "Or email directly")}{" "}
                    <a href={format!("mailto:{CONTACT_EMAIL}")}>{CONTACT_EMAIL}</a>
                </p>
            </header>
            <form class="contact-form" onsubmit={onsubmit} novalidate={true}>
                <label class="form-field">
                    <span>{i18n.t("contact.form.name", "Name")}</span>
                    <input
                        type="text"
                        name="name"
                        autocomplete="name"
                        required={true}
                        maxlength={NAME_MAX_CHARS.to_string()}
                        placeholder={i18n.t("contact.form.namePlaceholder", "Your name")}
                        value={fields.name.clone()}
                        oninput={on_name}
                        disabled={sending}
                    />
                </label>
                <label class="form-field">
                    <span>{i18n.t("contact.form.email", "Email")}</span>
                    <input
                        type="email"
                        name="email"
                        autocomplete="email"
                        required={true}
                        maxlength={EMAIL_MAX_CHARS.to_string()}
                        placeholder={i18n.t("contact.form.emailPlaceholder", "you@example.com")}
                        value={fields.email.clone()}
                        oninput={on_email}
                        disabled={sending}
                    />
                </label>
                <label class="form-field">
                    <span>{i18n.t("contact.form.message", "Message")}</span>
                    <textarea
                        name="message"
                        rows="5"
                        required={true}
                        maxlength={MESSAGE_MAX_CHARS.to_string()}
                        placeholder={i18n.t("contact.form.messagePlaceholder", "What are you working on?")}
                        value={fields.message.clone()}
                        oninput={on_message}
                        disabled={sending}
                    />
                </label>
                <MagneticButton
                    motion={props.motion}
                    class={classes!("button", "button-primary")}
                    button_type="submit"
                    disabled={sending}
                >
                    {send_label}
                </MagneticButton>
                {feedback}
            </form>
        </section>
    }
}
