use blik_studio::i18n::{Locale, LocaleStore};
use std::rc::Rc;
use web_sys::window;
use yew::prelude::*;

use super::local_persistence;

pub(super) enum LocaleAction {
    Hydrate,
    Toggle,
}

#[derive(Clone)]
pub(super) struct LocaleState {
    store: LocaleStore,
}

impl PartialEq for LocaleState {
    fn eq(&self, other: &Self) -> bool {
        self.store.locale() == other.store.locale()
            && self.store.is_stable() == other.store.is_stable()
    }
}

impl Reducible for LocaleState {
    type Action = LocaleAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut store = self.store.clone();
        match action {
            LocaleAction::Hydrate => {
                store.hydrate();
            }
            LocaleAction::Toggle => {
                let next = store.toggle();
                tracing::info!(locale = next.as_str(), "locale switched");
            }
        }
        Rc::new(Self { store })
    }
}

/// Translation handle passed down to every component that renders text.
#[derive(Clone, PartialEq)]
pub(super) struct I18n {
    state: UseReducerHandle<LocaleState>,
}

impl I18n {
    pub(super) fn locale(&self) -> Locale {
        self.state.store.locale()
    }

    pub(super) fn store(&self) -> &LocaleStore {
        &self.state.store
    }

    pub(super) fn t(&self, key_path: &str, fallback: &'static str) -> &'static str {
        self.state.store.translate(key_path, fallback)
    }

    pub(super) fn toggle(&self) {
        self.state.dispatch(LocaleAction::Toggle);
    }
}

/// First render uses the default locale; the persisted choice is applied
/// once mounted so the initial markup never depends on storage.
#[hook]
pub(super) fn use_i18n() -> I18n {
    let state = use_reducer(|| LocaleState {
        store: LocaleStore::new(local_persistence()),
    });

    {
        let state = state.clone();
        use_effect_with((), move |_| {
            state.dispatch(LocaleAction::Hydrate);
            || ()
        });
    }

    let locale = state.store.locale();
    use_effect_with(locale, |locale| {
        if let Some(root) = window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            let _ = root.set_attribute("lang", locale.as_str());
        }
        || ()
    });

    I18n { state }
}

#[derive(Properties, PartialEq)]
pub(super) struct LanguageSwitcherProps {
    pub i18n: I18n,
}

#[function_component(LanguageSwitcher)]
pub(super) fn language_switcher(props: &LanguageSwitcherProps) -> Html {
    let onclick = {
        let i18n = props.i18n.clone();
        Callback::from(move |_: MouseEvent| i18n.toggle())
    };
    let next = props.i18n.locale().toggled();

    html! {
        <button
            class="language-switcher"
            type="button"
            aria-label={props.i18n.t("nav.switchLanguage", "Switch language")}
            onclick={onclick}
        >
            <span class="language-switcher-label">{next.label()}</span>
        </button>
    }
}
