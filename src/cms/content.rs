//! Typed loaders for each content type used by the site.

use super::client::CmsClient;
use super::types::{
    CmsExperience, CmsProject, ContactLink, Experience, HomepageSections, PLACEHOLDER_IMAGE,
    Project, SkillCategory,
};
use crate::error::CmsResult;

pub const PROJECTS_ENDPOINT: &str = "/projects?populate=image&populate=markdownFile&sort=sortOrder";
pub const SKILLS_ENDPOINT: &str = "/skill-categories?populate=skills";
pub const EXPERIENCES_ENDPOINT: &str = "/experiences?populate=subtags";
pub const CONTACT_LINKS_ENDPOINT: &str = "/contact-links";
pub const HOMEPAGE_ENDPOINT: &str = "/homepage";

impl CmsClient {
    /// Portfolio projects in CMS sort order, with media resolved to absolute URLs.
    pub async fn projects(&self) -> CmsResult<Vec<Project>> {
        let raw: Vec<CmsProject> = self.fetch_collection(PROJECTS_ENDPOINT).await?;
        Ok(raw.into_iter().map(|p| self.project(p)).collect())
    }

    fn project(&self, raw: CmsProject) -> Project {
        Project {
            title: raw.title,
            description: raw.description,
            image_url: raw
                .image
                .map_or_else(|| PLACEHOLDER_IMAGE.to_string(), |m| self.file_url(&m.url)),
            tags: raw.tags.unwrap_or_default(),
            size: raw.size.unwrap_or_default(),
            markdown: raw.markdown.filter(|md| !md.trim().is_empty()),
            markdown_url: raw.markdown_file.map(|m| self.file_url(&m.url)),
        }
    }

    /// Skill categories with their skills.
    pub async fn skill_categories(&self) -> CmsResult<Vec<SkillCategory>> {
        self.fetch_collection(SKILLS_ENDPOINT).await
    }

    /// Timeline entries with subtags flattened to names.
    pub async fn experiences(&self) -> CmsResult<Vec<Experience>> {
        let raw: Vec<CmsExperience> = self.fetch_collection(EXPERIENCES_ENDPOINT).await?;
        Ok(raw.into_iter().map(Experience::from).collect())
    }

    /// Contact and social links.
    pub async fn contact_links(&self) -> CmsResult<Vec<ContactLink>> {
        self.fetch_collection(CONTACT_LINKS_ENDPOINT).await
    }

    /// Section titles and copy; the page cannot render without them.
    pub async fn homepage_sections(&self) -> CmsResult<HomepageSections> {
        self.fetch_single(HOMEPAGE_ENDPOINT, "homepage section").await
    }
}
