//! Headless CMS access.
//!
//! Content is read-only: it is fetched per page render and discarded after.
//!
//! # Architecture
//!
//! - [`CmsClient`]: `GET {base}/api/...` with optional bearer token, always
//!   normalized to a list
//! - [`types`]: Projects, skills, experiences, contact links and section copy
//! - [`HomepageData`]: Concurrent fetch of everything the homepage shows

mod client;
mod content;
mod homepage;
pub mod types;

pub use client::{CmsClient, normalize_data};
pub use content::{
    CONTACT_LINKS_ENDPOINT, EXPERIENCES_ENDPOINT, HOMEPAGE_ENDPOINT, PROJECTS_ENDPOINT,
    SKILLS_ENDPOINT,
};
pub use homepage::HomepageData;
pub use types::{
    ContactLink, Experience, ExperienceType, HomepageSections, PLACEHOLDER_IMAGE, Project,
    ProjectSize, Skill, SkillCategory,
};
