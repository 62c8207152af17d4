//! # Content Document Models
//!
//! Typed views of the eight site content documents. Stored values stay
//! untyped JSON until validated; these types are what presentation code
//! decodes a validated value into.
//!
//! Array fields default to empty when absent from storage, never missing.

use crate::doc_id::CmsDocId;
use crate::result::CommonResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stat {
    pub icon: String,
    pub label: String,
    pub sub: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperienceItem {
    pub id: String,
    pub company: String,
    pub role: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub duration: String,
    pub location: String,
    pub description: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,

    /// Any additional fields the section renders (logos, links, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectItem {
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavbarDoc {
    pub resume_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroDoc {
    pub hero_text: String,
    pub info_text: String,
    pub years_of_experience: f64,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutDoc {
    pub section_title: String,
    pub content: String,
    pub years_of_experience: f64,
    #[serde(default)]
    pub stats: Vec<Stat>,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceDoc {
    pub section_title: String,
    pub subtitle: String,
    #[serde(default)]
    pub items: Vec<WorkExperienceItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsDoc {
    pub description: String,
    #[serde(default)]
    pub projects: Vec<ProjectItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillsDoc {
    pub section_title: String,
    pub description: String,
    #[serde(default)]
    pub categories: Vec<SkillCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDoc {
    pub section_title: String,
    pub description: String,
    pub subtitle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_submission_email: Option<String>,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterDoc {
    pub company_description: String,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
}

/// A content document decoded into its typed form
#[derive(Debug, Clone, PartialEq)]
pub enum TypedDocument {
    Navbar(NavbarDoc),
    Hero(HeroDoc),
    About(AboutDoc),
    Experience(ExperienceDoc),
    Projects(ProjectsDoc),
    Skills(SkillsDoc),
    Contact(ContactDoc),
    Footer(FooterDoc),
}

impl TypedDocument {
    /// Decode a stored value as the document named by `doc_id`
    pub fn decode(doc_id: CmsDocId, value: &Value) -> CommonResult<Self> {
        fn from<T: serde::de::DeserializeOwned>(value: &Value) -> CommonResult<T> {
            Ok(T::deserialize(value)?)
        }

        Ok(match doc_id {
            CmsDocId::Navbar => TypedDocument::Navbar(from(value)?),
            CmsDocId::Hero => TypedDocument::Hero(from(value)?),
            CmsDocId::About => TypedDocument::About(from(value)?),
            CmsDocId::Experience => TypedDocument::Experience(from(value)?),
            CmsDocId::Projects => TypedDocument::Projects(from(value)?),
            CmsDocId::Skills => TypedDocument::Skills(from(value)?),
            CmsDocId::Contact => TypedDocument::Contact(from(value)?),
            CmsDocId::Footer => TypedDocument::Footer(from(value)?),
        })
    }

    pub fn doc_id(&self) -> CmsDocId {
        match self {
            TypedDocument::Navbar(_) => CmsDocId::Navbar,
            TypedDocument::Hero(_) => CmsDocId::Hero,
            TypedDocument::About(_) => CmsDocId::About,
            TypedDocument::Experience(_) => CmsDocId::Experience,
            TypedDocument::Projects(_) => CmsDocId::Projects,
            TypedDocument::Skills(_) => CmsDocId::Skills,
            TypedDocument::Contact(_) => CmsDocId::Contact,
            TypedDocument::Footer(_) => CmsDocId::Footer,
        }
    }
}
