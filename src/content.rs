//! Static page content. Copy comes from the dictionaries; this module only
//! knows which entries exist and how they are grouped.

use folio_contact::Locale;

pub const TECHNOLOGIES: &[&str] = &[
    "React",
    "Node.js",
    "JavaScript",
    "TypeScript",
    "MongoDB",
    "PostgreSQL",
    "Express",
    "Tailwind CSS",
    "Python",
    "WordPress",
    "Express.js",
    "Git",
    "Make",
    "n8n",
];

pub struct Project {
    key: &'static str,
    pub technologies: &'static [&'static str],
    pub website_url: Option<&'static str>,
    pub code_url: Option<&'static str>,
    pub image: Option<&'static str>,
}

const WEB_STACK: &[&str] = &[
    "React",
    "Vite",
    "JavaScript",
    "HTML5",
    "CSS3",
    "Tailwind CSS",
    "MongoDB",
];

pub const PROJECTS: &[Project] = &[
    Project {
        key: "uniformes_candi",
        technologies: WEB_STACK,
        website_url: None,
        code_url: Some("https://github.com/radavilae"),
        image: Some("/static/img/uniformes-candi.svg"),
    },
    Project {
        key: "wine_camps",
        technologies: WEB_STACK,
        website_url: None,
        code_url: Some("https://github.com/radavilae"),
        image: Some("/static/img/wine-camps.svg"),
    },
];

pub struct ProjectView {
    pub title: String,
    pub description: String,
    pub technologies: &'static [&'static str],
    pub website_url: Option<&'static str>,
    pub code_url: Option<&'static str>,
    pub image: Option<&'static str>,
}

impl Project {
    pub fn view(&self, locale: Locale) -> ProjectView {
        ProjectView {
            title: t(locale, &format!("projects.{}.title", self.key)),
            description: t(locale, &format!("projects.{}.description", self.key)),
            technologies: self.technologies,
            website_url: self.website_url,
            code_url: self.code_url,
            image: self.image,
        }
    }
}

pub fn projects(locale: Locale) -> Vec<ProjectView> {
    PROJECTS.iter().map(|project| project.view(locale)).collect()
}

/// A CV project line, written in the dictionaries as `"Title: URL"`.
#[derive(Debug, PartialEq, Eq)]
pub struct CvLink {
    pub title: String,
    pub url: Option<String>,
}

impl CvLink {
    pub fn parse(item: &str) -> Self {
        match item.split_once(": ") {
            Some((title, url)) => Self {
                title: title.to_owned(),
                url: Some(url.trim().to_owned()),
            },
            None => Self {
                title: item.to_owned(),
                url: None,
            },
        }
    }
}

pub struct Cv {
    pub education: Vec<String>,
    pub projects: Vec<CvLink>,
    pub work: Vec<String>,
}

const EDUCATION_ITEMS: usize = 3;
const PROJECT_ITEMS: usize = 2;
const WORK_ITEMS: usize = 3;

impl Cv {
    pub fn new(locale: Locale) -> Self {
        Self {
            education: items(locale, "cv.education_items", EDUCATION_ITEMS),
            projects: items(locale, "cv.projects_items", PROJECT_ITEMS)
                .iter()
                .map(|item| CvLink::parse(item))
                .collect(),
            work: items(locale, "cv.work_items", WORK_ITEMS),
        }
    }
}

fn items(locale: Locale, prefix: &str, count: usize) -> Vec<String> {
    (1..=count)
        .map(|n| t(locale, &format!("{prefix}.{n}")))
        .collect()
}

fn t(locale: Locale, key: &str) -> String {
    rust_i18n::t!(key, locale = locale.as_str()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cv_link_splits_title_and_url() {
        assert_eq!(
            CvLink::parse("Uniformes Candi: https://github.com/radavilae"),
            CvLink {
                title: "Uniformes Candi".to_owned(),
                url: Some("https://github.com/radavilae".to_owned()),
            }
        );
        assert_eq!(CvLink::parse("No link").url, None);
    }

    #[test]
    fn every_cv_entry_is_translated() {
        for locale in [Locale::Es, Locale::En] {
            let cv = Cv::new(locale);
            let entries = cv
                .education
                .iter()
                .chain(cv.work.iter())
                .chain(cv.projects.iter().map(|link| &link.title));

            for entry in entries {
                assert!(!entry.contains("cv."), "missing translation: {entry}");
            }
            assert!(cv.projects.iter().all(|link| link.url.is_some()));
        }
    }

    #[test]
    fn projects_follow_the_locale() {
        let es = projects(Locale::Es);
        let en = projects(Locale::En);

        assert_eq!(es.len(), PROJECTS.len());
        assert_ne!(es[0].description, en[0].description);
        assert!(!en[1].title.contains("projects."));
    }
}
