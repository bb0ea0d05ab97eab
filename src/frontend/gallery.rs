use blik_studio::{
    content::{self, CategoryFilter, Project, ProjectText},
    motion::{MotionPreference, Vec2},
    pointer::{panel_top_left, PointerFollow},
};
use std::rc::Rc;
use web_sys::Element;
use yew::prelude::*;

use super::{
    follow::{bounds_of, set_transform, FollowDriver},
    locale::I18n,
};

const PREVIEW_SIZE: Vec2 = Vec2::new(320.0, 208.0);
const PREVIEW_GUTTER: f64 = 16.0;
const VISIBLE_TAGS: usize = 3;

#[derive(Properties, PartialEq)]
pub(super) struct ProjectGalleryProps {
    pub i18n: I18n,
    pub motion: MotionPreference,
}

#[function_component(ProjectGallery)]
pub(super) fn project_gallery(props: &ProjectGalleryProps) -> Html {
    let filter = use_state(CategoryFilter::default);
    let hovered = use_state(|| None::<&'static Project>);
    let container = use_node_ref();
    let panel = use_node_ref();

    let driver = {
        let panel = panel.clone();
        let container = container.clone();
        use_memo(props.motion, move |motion| {
            let apply = Box::new(move |element: &web_sys::HtmlElement, anchor: Vec2| {
                let Some(container) = container.cast::<Element>() else {
                    return;
                };
                let bounds = bounds_of(&container);
                let top_left = panel_top_left(
                    anchor,
                    PREVIEW_SIZE,
                    Vec2::new(bounds.width, bounds.height),
                    PREVIEW_GUTTER,
                );
                set_transform(element, top_left);
            });
            FollowDriver::new(panel, PointerFollow::panel(*motion), apply)
        })
    };

    {
        let driver = Rc::clone(&driver);
        use_effect_with(props.motion, move |_| move || driver.stop());
    }

    // Reduced motion attaches no pointer handlers at all.
    let follows = driver.is_enabled();

    let onmousemove = follows.then(|| {
        let driver = Rc::clone(&driver);
        let container = container.clone();
        Callback::from(move |event: MouseEvent| {
            if let Some(element) = container.cast::<Element>() {
                driver.pointer_move(event.client_x(), event.client_y(), bounds_of(&element));
            }
        })
    });

    let onmouseleave = follows.then(|| {
        let driver = Rc::clone(&driver);
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| {
            driver.pointer_leave();
            hovered.set(None);
        })
    });

    let i18n = &props.i18n;
    let pills = CategoryFilter::ALL.into_iter().map(|option| {
        let onclick = {
            let filter = filter.clone();
            Callback::from(move |_: MouseEvent| filter.set(option))
        };
        let active = *filter == option;
        let label = i18n.t(&option.label_key(), option.as_str());
        html! {
            <button
                key={option.as_str()}
                type="button"
                class={classes!("filter-pill", active.then_some("is-active"))}
                aria-pressed={active.to_string()}
                onclick={onclick}
            >
                {label}
            </button>
        }
    });

    let rows = content::filtered(*filter).map(|project| {
        let onmouseenter = follows.then(|| {
            let hovered = hovered.clone();
            Callback::from(move |_: MouseEvent| hovered.set(Some(project)))
        });
        html! {
            <a key={project.slug} href={project.path()} class="gallery-row" onmouseenter={onmouseenter}>
                <div class="gallery-row-copy">
                    <h3>{project.text(i18n.store(), ProjectText::Title).unwrap_or(project.title)}</h3>
                    <p>{project.text(i18n.store(), ProjectText::Description).unwrap_or(project.description)}</p>
                </div>
                <ul class="tag-list">
                    { for project.tags.iter().take(VISIBLE_TAGS).map(|tag| html! { <li key={*tag}>{*tag}</li> }) }
                </ul>
                <img class="gallery-row-thumb" src={project.image} alt={project.title} loading="lazy" />
            </a>
        }
    });

    let preview = if follows {
        let visible = hovered.is_some();
        let (image, title, outcome) = match *hovered {
            Some(project) => (
                project.image,
                project.text(i18n.store(), ProjectText::Title).unwrap_or(project.title),
                project.text(i18n.store(), ProjectText::Outcome).unwrap_or(project.outcome),
            ),
            None => ("", "", ""),
        };
        html! {
            <div ref={panel} class={classes!("gallery-preview", visible.then_some("is-visible"))} aria-hidden="true">
                if !image.is_empty() {
                    <img src={image} alt="" />
                }
                <div class="gallery-preview-copy">
                    <p class="gallery-preview-title">{title}</p>
                    <p class="gallery-preview-outcome">{outcome}</p>
                </div>
            </div>
        }
    } else {
        Html::default()
    };

    html! {
        <div ref={container} class="gallery" onmousemove={onmousemove} onmouseleave={onmouseleave}>
            <div class="filter-pills" role="group">
                { for pills }
            </div>
            <div class="gallery-rows">
                { for rows }
            </div>
            {preview}
        </div>
    }
}
