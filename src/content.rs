//! Static site content: project records and the process steps.

use std::{fmt, str::FromStr};

use crate::i18n::LocaleStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Web,
    Saas,
    App,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Saas => "saas",
            Self::App => "app",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub const ALL: [CategoryFilter; 4] = [
        CategoryFilter::All,
        CategoryFilter::Only(Category::Web),
        CategoryFilter::Only(Category::Saas),
        CategoryFilter::Only(Category::App),
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(category) => category.as_str(),
        }
    }

    pub fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }

    /// Translation key of the filter pill label.
    pub fn label_key(self) -> String {
        format!("projects.filters.{}", self.as_str())
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|filter| filter.as_str() == value)
            .ok_or_else(|| format!("unknown category filter: {value}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub slug: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub outcome: &'static str,
    pub tags: &'static [&'static str],
    pub image: &'static str,
    pub live_url: Option<&'static str>,
    pub github_url: Option<&'static str>,
    pub featured: bool,
    pub category: Category,
    pub year: u16,
    pub client: Option<&'static str>,
    pub problem: Option<&'static str>,
    pub solution: Option<&'static str>,
    pub results: &'static [&'static str],
    pub gallery: &'static [&'static str],
    pub tech: &'static [&'static str],
}

/// Text fields that may be overridden per locale under
/// `projects.items.<slug>.<field>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectText {
    Title,
    Description,
    Outcome,
    Problem,
    Solution,
}

impl ProjectText {
    fn key(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Outcome => "outcome",
            Self::Problem => "problem",
            Self::Solution => "solution",
        }
    }
}

impl Project {
    pub fn path(&self) -> String {
        format!("/projects/{}", self.slug)
    }

    fn source_text(&self, field: ProjectText) -> Option<&'static str> {
        match field {
            ProjectText::Title => Some(self.title),
            ProjectText::Description => Some(self.description),
            ProjectText::Outcome => Some(self.outcome),
            ProjectText::Problem => self.problem,
            ProjectText::Solution => self.solution,
        }
    }

    /// Localized text for `field`, falling back to the record itself.
    pub fn text(&self, locale: &LocaleStore, field: ProjectText) -> Option<&'static str> {
        let fallback = self.source_text(field)?;
        let key = format!("projects.items.{}.{}", self.slug, field.key());
        Some(locale.translate(&key, fallback))
    }

    pub fn localized_results(&self, locale: &LocaleStore) -> Vec<&'static str> {
        let key = format!("projects.items.{}.results", self.slug);
        match locale.translate_list(&key) {
            Some(results) if !results.is_empty() => results,
            _ => self.results.to_vec(),
        }
    }
}

pub static PROJECTS: [Project; 6] = [
    Project {
        slug: "stubnerhof-website",
        title: "Hotel Stubnerhof Website",
        description: "WordPress + Elementor site built for easy editing by the owner, with SEO and multilingual support.",
        outcome: "Improved SEO performance and increased online reservations",
        tags: &["WordPress", "Elementor", "SEO", "Multilingual"],
        image: "/projects/stubnerhof.webp",
        live_url: Some("https://stubnerhof.at/"),
        github_url: None,
        featured: true,
        category: Category::Web,
        year: 2025,
        client: Some("Hotel Stubnerhof"),
        problem: Some("The website needed a modern design, better discoverability, and an editing workflow the owner could manage without developers."),
        solution: Some("Designed and built a WordPress + Elementor site with improved structure, multilingual setup, and SEO-focused pages."),
        results: &[
            "SEO score improved (Lighthouse/SEO target: 100)",
            "Stronger online presence",
            "Increase in online reservations",
        ],
        gallery: &[
            "/projects/stubnerhof.webp",
            "/projects/stubnerhof-1.webp",
            "/projects/Stubnerhof-2.webp",
        ],
        tech: &["WordPress", "Elementor", "Polylang/WPML", "SEO tooling"],
    },
    Project {
        slug: "bks-hotel-digitization",
        title: "Hotel Digitization & Reservation System",
        description: "Digitization project for a hotel group including online booking, online check-in, smart locks, and on-site network improvements.",
        outcome: "Fewer booking errors and reduced operational load",
        tags: &["Hospitality", "Booking", "Online Check-in", "Smart Locks", "Networking"],
        image: "/projects/bks.webp",
        live_url: None,
        github_url: None,
        featured: true,
        category: Category::Saas,
        year: 2025,
        client: Some("Private client (EU)"),
        problem: Some("High operational load and booking mistakes created unnecessary calls, manual work, and staffing pressure at reception."),
        solution: Some("Implemented a digital guest flow (online booking + online check-in), improved infrastructure, and integrated smart access to reduce manual processes."),
        results: &[
            "~50% fewer booking errors",
            "~70% fewer calls",
            "Reduced need for a full-time reception role",
        ],
        gallery: &["/projects/bks.webp", "/projects/bks-1.webp"],
        tech: &[
            "System integration",
            "On-site network setup",
            "Smart lock + access workflow",
            "Booking/check-in platform configuration",
        ],
    },
    Project {
        slug: "fitconnect-ios",
        title: "FitConnect (iOS)",
        description: "iOS app that connects fitness smart devices into one place to help users track progress and support weight loss goals.",
        outcome: "Private iOS build (dev mode) with Firebase + API integrations",
        tags: &["iOS", "Swift/Xcode", "Firebase", "APIs"],
        image: "/projects/fitconnect.webp",
        live_url: None,
        github_url: None,
        featured: true,
        category: Category::App,
        year: 2025,
        client: Some("Personal project"),
        problem: Some("Fitness data is split across multiple devices and platforms, making it hard for users to track progress and stay consistent."),
        solution: Some("Built an iOS app that aggregates device data through APIs and stores it in a structured backend for easy progress monitoring."),
        results: &[
            "Device data centralized into one dashboard",
            "API + database integration for consistent tracking",
            "Designed for future public release",
        ],
        gallery: &[
            "/projects/fitconnect.webp",
            "/projects/fitconnect-1.webp",
            "/projects/fitconnect-2.webp",
        ],
        tech: &["Xcode", "Firebase", "APIs", "Database"],
    },
    Project {
        slug: "torvik-lights-website-admin",
        title: "Törvik-Lights Website + News Admin",
        description: "Laravel + MySQL website with an admin/news panel so the owner can publish updates without coding.",
        outcome: "Owner can add articles via a private admin panel",
        tags: &["Laravel", "MySQL", "PHP", "Admin Panel"],
        image: "/projects/torvik.webp",
        live_url: Some("https://törvik-lights.com/cs"),
        github_url: None,
        featured: true,
        category: Category::Web,
        year: 2025,
        client: Some("Törvik-Lights"),
        problem: Some("Client needed a simple way to publish news and updates without editing code, plus smoother hosting/admin workflow."),
        solution: Some("Implemented a secure admin panel for creating and publishing news posts and integrated it into the live site."),
        results: &[
            "News publishing without developer involvement",
            "Cleaner content workflow for updates",
            "Integrated with existing hosting setup",
        ],
        gallery: &[
            "/projects/torvik.webp",
            "/projects/torvik-1.webp",
            "/projects/torvik-2.webp",
        ],
        tech: &["Laravel", "MySQL", "PHP"],
    },
    Project {
        slug: "haslinger-website",
        title: "Alpenpension Haslinger Website",
        description: "WordPress + Elementor site built for owner-managed edits, SEO, and multilingual content.",
        outcome: "Improved online presence and increased reservations",
        tags: &["WordPress", "Elementor", "SEO", "Multilingual"],
        image: "/projects/Haslinger.webp",
        live_url: Some("https://alpenpension-haslinger.com/"),
        github_url: None,
        featured: false,
        category: Category::Web,
        year: 2025,
        client: Some("Alpenpension Haslinger"),
        problem: Some("The property needed a modern web presence that converts visitors into reservations and is easy to update."),
        solution: Some("Designed and built a multilingual WordPress site with improved structure, SEO, and owner-friendly editing."),
        results: &[
            "More online visibility",
            "Increase in reservations (reported ~30%)",
            "Higher share of bookings coming through online channels",
        ],
        gallery: &["/projects/Haslinger.webp", "/projects/Haslinger-1.webp"],
        tech: &["WordPress", "Elementor", "Polylang/WPML", "SEO tooling"],
    },
    Project {
        slug: "kidscalling-ios",
        title: "KidsCalling (iOS)",
        description: "iOS app for kids who love calling, with prerecorded voices so they can have fun without disturbing real people.",
        outcome: "Ready for release (App Store link pending)",
        tags: &["iOS", "Swift", "App"],
        image: "/projects/kidcalling.webp",
        live_url: None,
        github_url: None,
        featured: false,
        category: Category::App,
        year: 2025,
        client: Some("Personal project"),
        problem: Some("Kids often want to call repeatedly, which can disturb family members or lead to calling real people unintentionally."),
        solution: Some("Built a kid-friendly calling experience using prerecorded voice responses to simulate conversations safely."),
        results: &[
            "No calls to real people",
            "Fun, repeatable \"calling\" experience for kids",
            "Built for simple, safe usage",
        ],
        gallery: &[
            "/projects/kidcalling.webp",
            "/projects/kidscalling-1.webp",
            "/projects/kidscalling-2.webp",
        ],
        tech: &["Swift", "iOS"],
    },
];

pub fn featured() -> impl Iterator<Item = &'static Project> {
    PROJECTS.iter().filter(|project| project.featured)
}

pub fn by_slug(slug: &str) -> Option<&'static Project> {
    PROJECTS.iter().find(|project| project.slug == slug)
}

pub fn filtered(filter: CategoryFilter) -> impl Iterator<Item = &'static Project> {
    PROJECTS
        .iter()
        .filter(move |project| filter.matches(project.category))
}

/// The project listed after `slug`, wrapping around to the first.
pub fn next_after(slug: &str) -> Option<&'static Project> {
    let index = PROJECTS.iter().position(|project| project.slug == slug)?;
    PROJECTS.get((index + 1) % PROJECTS.len())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStep {
    pub number: &'static str,
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub image: &'static str,
}

/// `<section>.items.<key>.<field>` from the active bundle, or the record's
/// own text.
fn item_text(
    locale: &LocaleStore,
    section: &str,
    key: &str,
    field: &str,
    fallback: &'static str,
) -> &'static str {
    locale.translate(&format!("{section}.items.{key}.{field}"), fallback)
}

impl ProcessStep {
    pub fn title_in(&self, locale: &LocaleStore) -> &'static str {
        item_text(locale, "process", self.key, "title", self.title)
    }

    pub fn description_in(&self, locale: &LocaleStore) -> &'static str {
        item_text(locale, "process", self.key, "description", self.description)
    }
}

pub static PROCESS_STEPS: [ProcessStep; 4] = [
    ProcessStep {
        number: "01",
        key: "discovery",
        title: "Discovery",
        description: "We start with a deep dive into your business goals, target audience, and technical requirements.",
        image: "/process/discovery.webp",
    },
    ProcessStep {
        number: "02",
        key: "design",
        title: "Design & Planning",
        description: "Wireframes and mockups first, then the technical architecture for your approval.",
        image: "/process/design.webp",
    },
    ProcessStep {
        number: "03",
        key: "development",
        title: "Development",
        description: "Building your project with clean code, regular updates, and continuous testing.",
        image: "/process/development.webp",
    },
    ProcessStep {
        number: "04",
        key: "launch",
        title: "Launch & Support",
        description: "Deploy to production, monitor performance, and keep things running after go-live.",
        image: "/process/launch.webp",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Service {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub outcomes: &'static [&'static str],
}

impl Service {
    pub fn title_in(&self, locale: &LocaleStore) -> &'static str {
        item_text(locale, "services", self.key, "title", self.title)
    }

    pub fn description_in(&self, locale: &LocaleStore) -> &'static str {
        item_text(locale, "services", self.key, "description", self.description)
    }

    pub fn outcomes_in(&self, locale: &LocaleStore) -> Vec<&'static str> {
        let key = format!("services.items.{}.outcomes", self.key);
        match locale.translate_list(&key) {
            Some(outcomes) if !outcomes.is_empty() => outcomes,
            _ => self.outcomes.to_vec(),
        }
    }
}

pub static SERVICES: [Service; 6] = [
    Service {
        key: "webDev",
        title: "Web Development",
        description: "Custom websites and web applications built with modern frameworks like Next.js, React, and TypeScript.",
        outcomes: &["Fast performance", "SEO optimized", "Scalable architecture"],
    },
    Service {
        key: "uxDesign",
        title: "UI/UX Design",
        description: "Beautiful, intuitive interfaces that users love and that drive conversions.",
        outcomes: &["User research", "Wireframing", "High-fidelity mockups"],
    },
    Service {
        key: "mobile",
        title: "Mobile Development",
        description: "Cross-platform mobile apps that work seamlessly on iOS and Android.",
        outcomes: &["Native performance", "Single codebase", "App store deployment"],
    },
    Service {
        key: "perf",
        title: "Performance Optimization",
        description: "Speed up your existing website with advanced optimization techniques.",
        outcomes: &["Core Web Vitals", "Lighthouse 90+", "Faster load times"],
    },
    Service {
        key: "seo",
        title: "SEO & Marketing",
        description: "Technical SEO, content strategy, and analytics to increase organic traffic.",
        outcomes: &["Higher rankings", "More traffic", "Better conversions"],
    },
    Service {
        key: "support",
        title: "Maintenance & Support",
        description: "Ongoing maintenance, updates, and technical support for peace of mind.",
        outcomes: &["24/7 monitoring", "Regular updates", "Security patches"],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Testimonial {
    pub key: &'static str,
    pub name: &'static str,
    pub role: &'static str,
    pub content: &'static str,
    pub rating: u8,
}

impl Testimonial {
    pub fn role_in(&self, locale: &LocaleStore) -> &'static str {
        item_text(locale, "testimonials", self.key, "role", self.role)
    }

    pub fn content_in(&self, locale: &LocaleStore) -> &'static str {
        item_text(locale, "testimonials", self.key, "content", self.content)
    }

    /// First letter of the name, shown as the avatar.
    pub fn initial(&self) -> char {
        self.name.chars().next().unwrap_or('?')
    }
}

pub static TESTIMONIALS: [Testimonial; 4] = [
    Testimonial {
        key: "sarah",
        name: "Sarah Johnson",
        role: "CEO, Fashion Brand Co.",
        content: "Working with them was a game-changer for our business. Our new e-commerce platform increased sales by 156% in just three months.",
        rating: 5,
    },
    Testimonial {
        key: "michael",
        name: "Michael Chen",
        role: "CTO, DataMetrics Inc.",
        content: "Exceptional technical skills and great communication. The dashboard they built became our product's core feature.",
        rating: 5,
    },
    Testimonial {
        key: "emma",
        name: "Emma Rodriguez",
        role: "Founder, FitLife",
        content: "Not only did they deliver a beautiful app, but they also provided valuable insights on UX that improved our retention by 40%.",
        rating: 5,
    },
    Testimonial {
        key: "david",
        name: "David Park",
        role: "Marketing Director, Creative Co.",
        content: "Our new portfolio site won awards and tripled our inbound leads. The attention to detail and performance is outstanding.",
        rating: 5,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tool {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
}

impl Tool {
    pub fn description_in(&self, locale: &LocaleStore) -> &'static str {
        item_text(locale, "techStack", self.id, "description", self.description)
    }
}

pub static TECH_STACK: [Tool; 15] = [
    Tool { id: "nextjs", name: "Next.js", category: "frontend", description: "The React framework for production-grade applications, with server rendering and static generation built in." },
    Tool { id: "react", name: "React", category: "frontend", description: "A JavaScript library for building user interfaces from composable components." },
    Tool { id: "typescript", name: "TypeScript", category: "language", description: "JavaScript with syntax for types, giving better tooling at any scale." },
    Tool { id: "tailwind", name: "Tailwind CSS", category: "styling", description: "A utility-first CSS framework for building custom designs without leaving the markup." },
    Tool { id: "nodejs", name: "Node.js", category: "backend", description: "A cross-platform JavaScript runtime for fast, scalable network applications." },
    Tool { id: "postgresql", name: "PostgreSQL", category: "database", description: "The world's most advanced open source relational database." },
    Tool { id: "mongodb", name: "MongoDB", category: "database", description: "A document-oriented NoSQL database with a flexible schema." },
    Tool { id: "redis", name: "Redis", category: "database", description: "An in-memory data store used as a database, cache, and message broker." },
    Tool { id: "laravel", name: "Laravel", category: "backend", description: "A PHP web framework with expressive, elegant syntax." },
    Tool { id: "react-native", name: "React Native", category: "mobile", description: "Native Android and iOS apps written with React." },
    Tool { id: "framer-motion", name: "Framer Motion", category: "animation", description: "A production-ready motion library with spring physics and gestures." },
    Tool { id: "aws", name: "AWS", category: "cloud", description: "Reliable, scalable cloud computing from compute to storage to content delivery." },
    Tool { id: "docker", name: "Docker", category: "devops", description: "Packages software into standardized containers for development and deployment." },
    Tool { id: "git", name: "Git", category: "tools", description: "A free and open source distributed version control system." },
    Tool { id: "figma", name: "Figma", category: "design", description: "A collaborative interface design tool for teams." },
];

pub fn tool_by_id(id: &str) -> Option<&'static Tool> {
    TECH_STACK.iter().find(|tool| tool.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{i18n::Locale, storage::Persistence};

    fn store(locale: Locale) -> LocaleStore {
        let mut store = LocaleStore::hydrated(Persistence::memory("local"));
        store.select(locale);
        store
    }

    #[test]
    fn slugs_are_unique() {
        for (index, project) in PROJECTS.iter().enumerate() {
            assert!(
                PROJECTS[index + 1..].iter().all(|other| other.slug != project.slug),
                "duplicate slug {}",
                project.slug
            );
        }
    }

    #[test]
    fn featured_projects_keep_table_order() {
        let slugs: Vec<_> = featured().map(|project| project.slug).collect();
        assert_eq!(
            slugs,
            [
                "stubnerhof-website",
                "bks-hotel-digitization",
                "fitconnect-ios",
                "torvik-lights-website-admin"
            ]
        );
    }

    #[test]
    fn filters_select_by_category() {
        assert_eq!(filtered(CategoryFilter::All).count(), PROJECTS.len());
        assert_eq!(filtered(CategoryFilter::Only(Category::Web)).count(), 3);
        assert_eq!(filtered(CategoryFilter::Only(Category::Saas)).count(), 1);
        assert!(filtered(CategoryFilter::Only(Category::App)).all(|project| project.category == Category::App));
    }

    #[test]
    fn filter_tags_round_trip() {
        for filter in CategoryFilter::ALL {
            assert_eq!(filter.as_str().parse::<CategoryFilter>(), Ok(filter));
        }
        assert!("mobile".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn next_project_wraps_around() {
        assert_eq!(next_after("stubnerhof-website").map(|p| p.slug), Some("bks-hotel-digitization"));
        assert_eq!(next_after("kidscalling-ios").map(|p| p.slug), Some("stubnerhof-website"));
        assert!(next_after("missing").is_none());
    }

    #[test]
    fn czech_copy_overrides_record_text() {
        let project = by_slug("stubnerhof-website").expect("known slug");
        let cs = store(Locale::Cs);
        let en = store(Locale::En);

        let cs_title = project.text(&cs, ProjectText::Title).expect("title");
        assert_ne!(cs_title, "");
        assert_eq!(project.text(&en, ProjectText::Title), Some(project.title));
        assert_eq!(project.localized_results(&en), project.results.to_vec());
        assert_eq!(project.localized_results(&cs).len(), project.results.len());
    }

    #[test]
    fn missing_localized_results_fall_back() {
        let project = by_slug("kidscalling-ios").expect("known slug");
        assert_eq!(project.localized_results(&store(Locale::Cs)), project.results.to_vec());
    }

    #[test]
    fn every_process_step_has_copy_in_both_locales() {
        for locale in Locale::ALL {
            let store = store(locale);
            for step in &PROCESS_STEPS {
                assert!(!step.title_in(&store).is_empty());
                let key = format!("process.items.{}.title", step.key);
                assert!(store.bundle().lookup(&key).is_some(), "{locale}: {key}");
            }
        }
    }

    #[test]
    fn services_fall_back_to_record_copy() {
        let support = SERVICES.iter().find(|service| service.key == "support").expect("support service");

        let en = store(Locale::En);
        assert_eq!(support.title_in(&en), "Care & Support");
        assert_eq!(support.description_in(&en), support.description);
        assert_eq!(support.outcomes_in(&en), support.outcomes.to_vec());

        let cs = store(Locale::Cs);
        assert_ne!(support.description_in(&cs), support.description);
        assert_eq!(support.outcomes_in(&cs).len(), support.outcomes.len());
    }

    #[test]
    fn every_service_has_a_czech_title() {
        let cs = store(Locale::Cs);
        for service in &SERVICES {
            let key = format!("services.items.{}.title", service.key);
            assert!(cs.bundle().lookup(&key).is_some(), "{key}");
        }
    }

    #[test]
    fn testimonials_translate_role_but_keep_names() {
        let cs = store(Locale::Cs);
        let en = store(Locale::En);
        for testimonial in &TESTIMONIALS {
            assert_eq!(testimonial.role_in(&en), testimonial.role);
            assert_ne!(testimonial.content_in(&cs), testimonial.content);
            assert_eq!(testimonial.initial(), testimonial.name.chars().next().unwrap());
        }
    }

    #[test]
    fn tools_are_unique_and_resolvable() {
        for (index, tool) in TECH_STACK.iter().enumerate() {
            assert!(TECH_STACK[..index].iter().all(|other| other.id != tool.id));
            assert_eq!(tool_by_id(tool.id), Some(tool));
        }
        assert_eq!(tool_by_id("cobol"), None);
    }
}
