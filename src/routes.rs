use crate::content::{self, Project};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    About,
    Projects,
    ProjectDetail(&'static Project),
    NotFound,
}

impl Route {
    /// Maps a location pathname to a page. Query strings, fragments and a
    /// trailing slash are ignored; unknown project slugs are `NotFound`.
    pub fn parse(path: &str) -> Self {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');

        let mut segments = path.split('/').filter(|segment| !segment.is_empty());
        match (segments.next(), segments.next(), segments.next()) {
            (None, _, _) => Self::Home,
            (Some("about"), None, _) => Self::About,
            (Some("projects"), None, _) => Self::Projects,
            (Some("projects"), Some(slug), None) => content::by_slug(slug)
                .map(Self::ProjectDetail)
                .unwrap_or(Self::NotFound),
            _ => Self::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::About => "/about".to_string(),
            Self::Projects => "/projects".to_string(),
            Self::ProjectDetail(project) => project.path(),
            Self::NotFound => "/404".to_string(),
        }
    }
}
