//! Content entries as stored in the CMS and as used by the pages.
//!
//! `Cms*` types mirror the CMS JSON (camelCase, nested media objects); the
//! public types are what the renderers consume.

use serde::{Deserialize, Serialize};

use crate::carousel::CarouselCard;

/// Image shown when a project has no image of its own.
pub const PLACEHOLDER_IMAGE: &str = "/static/placeholder.svg";

/// Uploaded media reference.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CmsMedia {
    pub url: String,
}

/// Grid footprint of a portfolio card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectSize {
    #[default]
    Small,
    Medium,
    Large,
}

impl ProjectSize {
    /// CSS grid classes for the card.
    #[must_use]
    pub fn grid_class(self) -> &'static str {
        match self {
            Self::Small => "col-span-1 row-span-1",
            Self::Medium => "col-span-1 md:col-span-2 row-span-1",
            Self::Large => "col-span-1 md:col-span-2 row-span-2",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CmsProject {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub size: Option<ProjectSize>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub markdown: Option<String>,
    #[serde(default)]
    pub markdown_file: Option<CmsMedia>,
    #[serde(default)]
    pub image: Option<CmsMedia>,
}

/// A portfolio project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    /// Absolute image URL, or [`PLACEHOLDER_IMAGE`].
    pub image_url: String,
    pub tags: Vec<String>,
    pub size: ProjectSize,
    /// Inline markdown details, preferred over `markdown_url`.
    pub markdown: Option<String>,
    /// Absolute URL of an uploaded markdown file.
    pub markdown_url: Option<String>,
}

/// A skill shown as a carousel card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<&Skill> for CarouselCard {
    fn from(skill: &Skill) -> Self {
        CarouselCard::new(skill.name.clone(), skill.description.clone())
    }
}

/// A titled group of skills (one carousel per category).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub title: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

impl SkillCategory {
    #[must_use]
    pub fn cards(&self) -> Vec<CarouselCard> {
        self.skills.iter().map(CarouselCard::from).collect()
    }
}

/// Category of a timeline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceType {
    School,
    Graduate,
    Internship,
    Work,
    Final,
}

impl ExperienceType {
    /// Education entries sit on the left of the timeline, work on the right.
    #[must_use]
    pub fn is_education(self) -> bool {
        matches!(self, Self::School | Self::Graduate)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CmsSubtag {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CmsExperience {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type")]
    pub kind: ExperienceType,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub subtags: Option<Vec<CmsSubtag>>,
}

/// One entry of the experience timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub subtitle: String,
    /// Markdown body.
    pub text: String,
    pub kind: ExperienceType,
    pub date: String,
    pub tag: Option<String>,
    pub subtags: Vec<String>,
}

impl From<CmsExperience> for Experience {
    fn from(raw: CmsExperience) -> Self {
        Self {
            title: raw.title,
            subtitle: raw.subtitle,
            text: raw.text,
            kind: raw.kind,
            date: raw.date,
            tag: raw.tag,
            subtags: raw
                .subtags
                .unwrap_or_default()
                .into_iter()
                .map(|s| s.name)
                .collect(),
        }
    }
}

/// A contact or social link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactLink {
    pub social_media: String,
    #[serde(default)]
    pub image_url: String,
    pub text: String,
    pub link: String,
    /// Serve the link as a download (e.g. a résumé PDF).
    #[serde(default)]
    pub download: bool,
}

/// Titles and copy for every homepage section (CMS single type).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HomepageSections {
    pub header_title: String,
    pub hero_section_title: String,
    pub hero_section_description: String,
    pub text_section_title: String,
    pub text_section_text: String,
    pub chat_section_title: String,
    /// Opening AI message of the chat widget.
    #[serde(rename = "chatSectionDefaultAIMessage")]
    pub chat_section_default_ai_message: String,
    pub skills_section_title: String,
    pub timeline_section_title: String,
    pub portfolio_section_title: String,
    pub contact_section_title: String,
    pub footer_license: String,
}

impl HomepageSections {
    /// The chat greeting set in the CMS, if any.
    #[must_use]
    pub fn chat_greeting(&self) -> Option<&str> {
        Some(self.chat_section_default_ai_message.trim()).filter(|g| !g.is_empty())
    }
}
