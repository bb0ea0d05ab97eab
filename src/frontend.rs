mod contact;
mod follow;
mod gallery;
mod gate;
mod locale;
mod magnetic;
mod pages;
mod process;
mod sections;

use blik_studio::{
    motion::MotionPreference,
    routes::Route,
    storage::{Persistence, StorageBackend, StorageError, THEME_KEY},
};
use js_sys::{Date, Function, Reflect};
use std::io;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, Storage};
use yew::prelude::*;

use self::{
    gate::InitialLoadGate,
    locale::use_i18n,
    pages::{
        document_title, AboutPage, Footer, HomePage, Navbar, NotFoundPage, ProjectDetailPage,
        ProjectsPage,
    },
};

const FALLBACK_VIEWPORT: (f64, f64) = (1280.0, 720.0);

#[derive(Clone, Copy, PartialEq, Eq)]
enum Theme {
    Light,
    Dark,
}

impl Theme {
    fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Light => "◐",
            Self::Dark => "◑",
        }
    }
}

/// Browser storage areas. Each call looks the area up again, so a storage
/// that disappears mid-session degrades to "unavailable".
#[derive(Clone, Copy)]
enum WebStorage {
    Local,
    Session,
}

impl WebStorage {
    fn area(self) -> Option<Storage> {
        let window = window()?;
        let area = match self {
            Self::Local => window.local_storage(),
            Self::Session => window.session_storage(),
        };
        area.ok().flatten()
    }
}

fn js_error_message(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|error| String::from(error.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}

impl StorageBackend for WebStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.area()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let area = self.area().ok_or(StorageError::Unavailable)?;
        area.set_item(key, value)
            .map_err(|error| StorageError::Write(js_error_message(&error)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let area = self.area().ok_or(StorageError::Unavailable)?;
        area.remove_item(key)
            .map_err(|error| StorageError::Write(js_error_message(&error)))
    }
}

fn local_persistence() -> Persistence {
    Persistence::new("local", WebStorage::Local)
}

fn session_persistence() -> Persistence {
    Persistence::new("session", WebStorage::Session)
}

fn media_matches(query: &str) -> bool {
    window()
        .and_then(|w| w.match_media(query).ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn prefers_reduced_motion() -> bool {
    media_matches("(prefers-reduced-motion: reduce)")
}

fn viewport_size() -> (f64, f64) {
    let Some(win) = window() else {
        return FALLBACK_VIEWPORT;
    };

    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(FALLBACK_VIEWPORT.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(FALLBACK_VIEWPORT.1);

    (width, height)
}

fn current_path() -> String {
    window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn resolve_theme(persistence: &Persistence) -> Theme {
    persistence
        .get(THEME_KEY)
        .and_then(|value| Theme::parse(&value))
        .unwrap_or_else(|| {
            if media_matches("(prefers-color-scheme: dark)") {
                Theme::Dark
            } else {
                Theme::Light
            }
        })
}

fn apply_theme(theme: Theme) {
    if let Some(root) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    {
        let _ = root.set_attribute("data-theme", theme.as_str());
    }
}

/// Swaps the theme inside `document.startViewTransition` when the browser
/// has it and motion is allowed.
fn apply_theme_with_transition(theme: Theme, motion: MotionPreference) {
    if motion.is_reduced() {
        apply_theme(theme);
        return;
    }

    let Some(document) = window().and_then(|w| w.document()) else {
        apply_theme(theme);
        return;
    };

    let document_js: JsValue = document.into();
    let Ok(start_view_transition) =
        Reflect::get(&document_js, &JsValue::from_str("startViewTransition"))
    else {
        apply_theme(theme);
        return;
    };

    let Some(start_view_transition) = start_view_transition.dyn_ref::<Function>() else {
        apply_theme(theme);
        return;
    };

    let callback = Closure::once_into_js(move || apply_theme(theme));
    if let Err(error) = start_view_transition.call1(&document_js, &callback) {
        tracing::debug!(error = %js_error_message(&error), "view transition unavailable");
        apply_theme(theme);
    }
}

/// Routes formatted `tracing` output to the matching browser console method.
struct ConsoleMakeWriter;

struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buffer);
        let line = line.trim_end();
        if line.is_empty() {
            return;
        }
        match self.level {
            Level::ERROR => gloo::console::error!(line),
            Level::WARN => gloo::console::warn!(line),
            Level::INFO => gloo::console::info!(line),
            _ => gloo::console::debug!(line),
        }
    }
}

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            buffer: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buffer: Vec::new(),
        }
    }
}

fn init_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .without_time()
        .with_target(false)
        .with_max_level(Level::INFO)
        .try_init();
    if let Err(error) = installed {
        gloo::console::warn!(format!("tracing already initialised: {error}"));
    }
}

#[function_component(App)]
fn app() -> Html {
    let motion = *use_memo((), |_| {
        MotionPreference::from_reduce_flag(prefers_reduced_motion())
    });
    let route = *use_memo((), |_| Route::parse(&current_path()));
    let i18n = use_i18n();
    let theme = use_state(|| resolve_theme(&local_persistence()));

    {
        let current = *theme;
        use_effect_with((), move |_| {
            apply_theme(current);
            || ()
        });
    }

    {
        let title = document_title(&i18n, route);
        use_effect_with(title, |title| {
            if let Some(document) = window().and_then(|w| w.document()) {
                document.set_title(title);
            }
            || ()
        });
    }

    let on_toggle_theme = {
        let theme = theme.clone();
        Callback::from(move |_: MouseEvent| {
            let next = (*theme).toggled();
            local_persistence().set(THEME_KEY, next.as_str());
            apply_theme_with_transition(next, motion);
            tracing::info!(theme = next.as_str(), "theme switched");
            theme.set(next);
        })
    };

    let page = match route {
        Route::Home => html! { <HomePage i18n={i18n.clone()} motion={motion} /> },
        Route::About => html! { <AboutPage i18n={i18n.clone()} motion={motion} /> },
        Route::Projects => html! { <ProjectsPage i18n={i18n.clone()} motion={motion} /> },
        Route::ProjectDetail(project) => html! {
            <ProjectDetailPage i18n={i18n.clone()} motion={motion} project={project} />
        },
        Route::NotFound => html! { <NotFoundPage i18n={i18n.clone()} motion={motion} /> },
    };

    html! {
        <InitialLoadGate motion={motion} wordmark={i18n.t("loader.wordmark", "blik-studio")}>
            <a class="skip-link" href="#content">{"Skip to main content"}</a>
            <div class="page-shell">
                <Navbar
                    i18n={i18n.clone()}
                    motion={motion}
                    route={route}
                    theme={*theme}
                    on_toggle_theme={on_toggle_theme}
                />
                <main id="content">{page}</main>
                <Footer i18n={i18n.clone()} year={Date::new_0().get_full_year()} />
            </div>
        </InitialLoadGate>
    }
}

pub fn run() {
    init_tracing();

    let Some(root) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("app"))
    else {
        tracing::error!("missing #app mount point");
        return;
    };

    yew::Renderer::<App>::with_root(root).render();
}
