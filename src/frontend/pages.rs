use blik_studio::{
    content::{self, Project, ProjectText, PROJECTS},
    motion::MotionPreference,
    routes::Route,
};
use yew::prelude::*;

use super::{
    contact::ContactSection,
    gallery::ProjectGallery,
    locale::{I18n, LanguageSwitcher},
    magnetic::{MagneticButton, MagneticLink},
    process::Process,
    sections::{CtaSection, Services, TechStack, Testimonials},
    Theme,
};

const WORDMARK: &str = "blik-studio";

fn localized(i18n: &I18n, project: &Project, field: ProjectText) -> Option<&'static str> {
    project.text(i18n.store(), field)
}

/// Document title for a page, e.g. `Projects | blik-studio`.
pub(super) fn document_title(i18n: &I18n, route: Route) -> String {
    let page = match route {
        Route::Home => return WORDMARK.to_string(),
        Route::About => i18n.t("nav.about", "About"),
        Route::Projects => i18n.t("nav.projects", "Projects"),
        Route::ProjectDetail(project) => {
            localized(i18n, project, ProjectText::Title).unwrap_or(project.title)
        }
        Route::NotFound => i18n.t("notFound.title", "Page not found"),
    };
    format!("{page} | {WORDMARK}")
}

#[derive(Properties, PartialEq)]
pub(super) struct NavbarProps {
    pub i18n: I18n,
    pub motion: MotionPreference,
    pub route: Route,
    pub theme: Theme,
    pub on_toggle_theme: Callback<MouseEvent>,
}

#[function_component(Navbar)]
pub(super) fn navbar(props: &NavbarProps) -> Html {
    let i18n = &props.i18n;
    let link = |target: Route, key: &str, fallback: &'static str| {
        let current = match (props.route, target) {
            (Route::ProjectDetail(_), Route::Projects) => true,
            (route, target) => route == target,
        };
        html! {
            <a
                href={target.path()}
                class={classes!("nav-link", current.then_some("is-active"))}
                aria-current={current.then_some("page")}
            >
                {i18n.t(key, fallback)}
            </a>
        }
    };

    html! {
        <header class="site-header">
            <nav class="navbar" aria-label="Main">
                <a class="navbar-brand" href="/">{WORDMARK}</a>
                <div class="navbar-links">
                    {link(Route::Home, "nav.home", "Home")}
                    {link(Route::Projects, "nav.projects", "Projects")}
                    {link(Route::About, "nav.about", "About")}
                    <a class="nav-link" href="/#contact">{i18n.t("nav.contact", "Contact")}</a>
                </div>
                <div class="navbar-actions">
                    <LanguageSwitcher i18n={i18n.clone()} />
                    <MagneticButton
                        motion={props.motion}
                        class="theme-toggle"
                        aria_label={AttrValue::Static(i18n.t("nav.toggleTheme", "Toggle theme"))}
                        onclick={props.on_toggle_theme.clone()}
                    >
                        <span aria-hidden="true">{props.theme.icon()}</span>
                    </MagneticButton>
                    <MagneticLink motion={props.motion} href="/#contact" class={classes!("button", "button-primary")}>
                        {i18n.t("nav.bookCall", "Book a call")}
                    </MagneticLink>
                </div>
            </nav>
        </header>
    }
}

#[derive(Properties, PartialEq)]
pub(super) struct FooterProps {
    pub i18n: I18n,
    pub year: u32,
}

#[function_component(Footer)]
pub(super) fn footer(props: &FooterProps) -> Html {
    let i18n = &props.i18n;
    html! {
        <footer class="site-footer">
            <p class="footer-brand">{WORDMARK}</p>
            <p>{i18n.t("footer.tagline", "Digital experiences that blend design and engineering.")}</p>
            <p class="footer-rights">
                {format!("© {} {WORDMARK}. {}", props.year, i18n.t("footer.rights", "All rights reserved."))}
            </p>
        </footer>
    }
}

#[derive(Properties, PartialEq)]
pub(super) struct PageProps {
    pub i18n: I18n,
    pub motion: MotionPreference,
}

#[function_component(Hero)]
fn hero(props: &PageProps) -> Html {
    let i18n = &props.i18n;
    html! {
        <section class="hero">
            <span class="hero-badge">{i18n.t("hero.badge", "Web studio")}</span>
            <h1>{i18n.t("hero.title", "Digital experiences that blend design and engineering")}</h1>
            <p class="hero-subtitle">
                {i18n.t("hero.subtitle", "Websites, apps and booking systems for hotels, shops and founders who want results they can measure.")}
            </p>
            <div class="hero-actions">
                <MagneticLink motion={props.motion} href="/projects" class={classes!("button", "button-primary")}>
                    {i18n.t("hero.ctaProjects", "See the work")}
                </MagneticLink>
                <MagneticLink motion={props.motion} href="#contact" class={classes!("button", "button-ghost")}>
                    {i18n.t("hero.ctaContact", "Start a project")}
                </MagneticLink>
            </div>
        </section>
    }
}

fn project_card(i18n: &I18n, project: &'static Project) -> Html {
    html! {
        <a key={project.slug} href={project.path()} class="project-card">
            <img src={project.image} alt={project.title} loading="lazy" />
            <div class="project-card-copy">
                <h3>{localized(i18n, project, ProjectText::Title).unwrap_or(project.title)}</h3>
                <p>{localized(i18n, project, ProjectText::Outcome).unwrap_or(project.outcome)}</p>
            </div>
        </a>
    }
}

#[function_component(FeaturedProjects)]
fn featured_projects(props: &PageProps) -> Html {
    let i18n = &props.i18n;
    html! {
        <section class="featured">
            <header class="section-heading">
                <span class="section-label">{i18n.t("featured.label", "Selected work")}</span>
                <h2>{i18n.t("featured.title", "Featured projects")}</h2>
            </header>
            <div class="project-grid">
                { for content::featured().map(|project| project_card(i18n, project)) }
            </div>
            <MagneticLink motion={props.motion} href="/projects" class="button">
                {i18n.t("featured.viewAll", "All projects")}
            </MagneticLink>
        </section>
    }
}

#[function_component(HomePage)]
pub(super) fn home_page(props: &PageProps) -> Html {
    let i18n = props.i18n.clone();
    html! {
        <>
            <Hero i18n={i18n.clone()} motion={props.motion} />
            <FeaturedProjects i18n={i18n.clone()} motion={props.motion} />
            <Services i18n={i18n.clone()} motion={props.motion} />
            <Process i18n={i18n.clone()} motion={props.motion} />
            <Testimonials i18n={i18n.clone()} motion={props.motion} />
            <TechStack i18n={i18n.clone()} motion={props.motion} />
            <CtaSection i18n={i18n.clone()} motion={props.motion} />
            <ContactSection i18n={i18n} motion={props.motion} />
        </>
    }
}

#[function_component(ProjectsPage)]
pub(super) fn projects_page(props: &PageProps) -> Html {
    let i18n = &props.i18n;
    html! {
        <section class="projects-page">
            <header class="section-heading">
                <span class="section-label">{i18n.t("projects.label", "Portfolio")}</span>
                <h1>{i18n.t("projects.title", "Projects")}</h1>
                <p>{i18n.t("projects.description", "Websites, apps and systems delivered for real clients.")}</p>
            </header>
            <ProjectGallery i18n={i18n.clone()} motion={props.motion} />
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub(super) struct ProjectDetailProps {
    pub i18n: I18n,
    pub motion: MotionPreference,
    pub project: &'static Project,
}

fn tag_list(items: &[&'static str]) -> Html {
    html! {
        <ul class="tag-list">
            { for items.iter().map(|item| html! { <li key={*item}>{*item}</li> }) }
        </ul>
    }
}

#[function_component(ProjectDetailPage)]
pub(super) fn project_detail_page(props: &ProjectDetailProps) -> Html {
    let i18n = &props.i18n;
    let project = props.project;
    let title = localized(i18n, project, ProjectText::Title).unwrap_or(project.title);
    let results = project.localized_results(i18n.store());

    let story = |field: ProjectText, key: &str, fallback: &'static str| match localized(i18n, project, field) {
        Some(text) => html! {
            <section class="detail-block">
                <h2>{i18n.t(key, fallback)}</h2>
                <p>{text}</p>
            </section>
        },
        None => Html::default(),
    };

    let meta = html! {
        <dl class="detail-meta">
            if let Some(client) = project.client {
                <dt>{i18n.t("projectDetail.client", "Client")}</dt>
                <dd>{client}</dd>
            }
            <dt>{i18n.t("projectDetail.year", "Year")}</dt>
            <dd>{project.year.to_string()}</dd>
        </dl>
    };

    let links = html! {
        <div class="detail-links">
            if let Some(live_url) = project.live_url {
                <MagneticLink motion={props.motion} href={live_url} external=true class={classes!("button", "button-primary")}>
                    {i18n.t("projectDetail.viewLiveSite", "View Live Site")}
                </MagneticLink>
            }
            if let Some(github_url) = project.github_url {
                <MagneticLink motion={props.motion} href={github_url} external=true class="button">
                    {i18n.t("projectDetail.viewOnGithub", "View on GitHub")}
                </MagneticLink>
            }
        </div>
    };

    let next = content::next_after(project.slug).map(|next| {
        html! {
            <a class="detail-next" href={next.path()}>
                <span>{i18n.t("projectDetail.nextProject", "Next project")}</span>
                <strong>{localized(i18n, next, ProjectText::Title).unwrap_or(next.title)}</strong>
            </a>
        }
    });

    html! {
        <article class="project-detail">
            <a class="detail-back" href={Route::Projects.path()}>
                {i18n.t("projectDetail.backToProjects", "Back to Projects")}
            </a>
            <header class="detail-header">
                <h1>{title}</h1>
                <p>{localized(i18n, project, ProjectText::Description).unwrap_or(project.description)}</p>
                {meta}
                {links}
            </header>
            <img class="detail-hero-image" src={project.image} alt={title} />
            {story(ProjectText::Problem, "projectDetail.problem", "The problem")}
            {story(ProjectText::Solution, "projectDetail.solution", "The solution")}
            if !results.is_empty() {
                <section class="detail-block">
                    <h2>{i18n.t("projectDetail.results", "Results")}</h2>
                    <ul class="detail-results">
                        { for results.iter().map(|result| html! { <li>{*result}</li> }) }
                    </ul>
                </section>
            }
            <section class="detail-block">
                <h2>{i18n.t("projectDetail.tech", "Technology")}</h2>
                {tag_list(project.tech)}
            </section>
            if !project.gallery.is_empty() {
                <section class="detail-block">
                    <h2>{i18n.t("projectDetail.gallery", "Gallery")}</h2>
                    <div class="detail-gallery">
                        { for project.gallery.iter().map(|image| html! {
                            <img key={*image} src={*image} alt={title} loading="lazy" />
                        }) }
                    </div>
                </section>
            }
            {for next}
        </article>
    }
}

/// Every technology used across the portfolio, in first-seen order.
fn studio_skills() -> Vec<&'static str> {
    let mut skills: Vec<&'static str> = Vec::new();
    for tech in PROJECTS.iter().flat_map(|project| project.tech.iter().copied()) {
        if !skills.contains(&tech) {
            skills.push(tech);
        }
    }
    skills
}

#[function_component(AboutPage)]
pub(super) fn about_page(props: &PageProps) -> Html {
    let i18n = &props.i18n;
    let skills = use_memo((), |_| studio_skills());
    html! {
        <section class="about-page">
            <header class="section-heading">
                <span class="section-label">{i18n.t("about.label", "About")}</span>
                <h1>{i18n.t("about.title", "A small studio with a full stack")}</h1>
            </header>
            <p class="about-body">
                {i18n.t("about.body", "We design and build websites, apps and internal tools, and we stay around after launch.")}
            </p>
            <h2>{i18n.t("about.skillsTitle", "What we do")}</h2>
            {tag_list(&skills)}
            <MagneticLink motion={props.motion} href="/#contact" class={classes!("button", "button-primary")}>
                {i18n.t("nav.bookCall", "Book a call")}
            </MagneticLink>
        </section>
    }
}

#[function_component(NotFoundPage)]
pub(super) fn not_found_page(props: &PageProps) -> Html {
    let i18n = &props.i18n;
    html! {
        <section class="not-found">
            <p class="not-found-code">{"404"}</p>
            <h1>{i18n.t("notFound.title", "Page not found")}</h1>
            <p>{i18n.t("notFound.body", "The page you are looking for does not exist.")}</p>
            <MagneticLink motion={props.motion} href="/" class={classes!("button", "button-primary")}>
                {i18n.t("notFound.home", "Go Home")}
            </MagneticLink>
        </section>
    }
}
