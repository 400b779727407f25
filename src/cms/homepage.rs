//! Everything the homepage needs, fetched in one go.

use tracing::info;

use super::client::CmsClient;
use super::types::{ContactLink, Experience, HomepageSections, Project, SkillCategory};
use crate::error::CmsResult;

/// Content for every homepage section.
#[derive(Debug, Clone, Default)]
pub struct HomepageData {
    pub sections: HomepageSections,
    pub projects: Vec<Project>,
    pub skill_categories: Vec<SkillCategory>,
    pub experiences: Vec<Experience>,
    pub contact_links: Vec<ContactLink>,
}

impl HomepageData {
    /// Fetch all sections concurrently; the first failure fails the page.
    pub async fn load(cms: &CmsClient) -> CmsResult<Self> {
        let (sections, projects, skill_categories, experiences, contact_links) = tokio::try_join!(
            cms.homepage_sections(),
            cms.projects(),
            cms.skill_categories(),
            cms.experiences(),
            cms.contact_links(),
        )?;

        info!(
            name: "cms.homepage.loaded",
            projects = projects.len(),
            skill_categories = skill_categories.len(),
            experiences = experiences.len(),
            contact_links = contact_links.len(),
            "Homepage content loaded"
        );

        Ok(Self {
            sections,
            projects,
            skill_categories,
            experiences,
            contact_links,
        })
    }
}
