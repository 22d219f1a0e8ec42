//! Profile data shown by the portfolio commands.
//!
//! The profile is static content. It is loaded once at startup from a TOML
//! or JSON file, or taken from the copy bundled into the binary.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ProfileError;

const BUNDLED_PROFILE: &str = include_str!("../assets/profile.toml");

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub location: String,
    pub email: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub resume: String,
    #[serde(default)]
    pub about: Vec<String>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub skills: Skills,
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub school: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub languages: Vec<String>,
    pub ml_ai: Vec<String>,
    pub cloud: Vec<String>,
    pub devops: Vec<String>,
    pub web: Vec<String>,
    pub databases: Vec<String>,
    pub tools: Vec<String>,
}

impl Skills {
    /// Non-empty skill groups with their display labels, in display order.
    pub fn categories(&self) -> Vec<(&'static str, &[String])> {
        [
            ("Languages", self.languages.as_slice()),
            ("ML/AI", self.ml_ai.as_slice()),
            ("Cloud & DevOps", self.cloud.as_slice()),
            ("DevOps Tools", self.devops.as_slice()),
            ("Web Development", self.web.as_slice()),
            ("Databases", self.databases.as_slice()),
            ("Tools", self.tools.as_slice()),
        ]
        .into_iter()
        .filter(|(_, skills)| !skills.is_empty())
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub github: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

impl Profile {
    /// The profile compiled into the binary.
    pub fn bundled() -> Result<Self, ProfileError> {
        Self::from_toml_str(BUNDLED_PROFILE)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ProfileError> {
        toml::from_str(content).map_err(|e| ProfileError::Parse {
            message: e.to_string(),
        })
    }

    pub fn from_json_str(content: &str) -> Result<Self, ProfileError> {
        serde_json::from_str(content).map_err(|e| ProfileError::Parse {
            message: e.to_string(),
        })
    }

    /// Load a profile file, choosing the format from its extension.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        if !path.exists() {
            return Err(ProfileError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|e| ProfileError::Parse {
            message: format!("{}: {e}", path.display()),
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(ProfileError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Basic sanity checks. A profile that fails them is still usable.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.name.trim().is_empty() {
            return Err(ProfileError::Invalid {
                reason: "name must not be empty".into(),
            });
        }
        if !self.email.contains('@') {
            return Err(ProfileError::Invalid {
                reason: format!("email '{}' must contain '@'", self.email),
            });
        }
        Ok(())
    }

    /// Find projects whose name contains `query`, case-insensitively.
    pub fn find_projects(&self, query: &str) -> Vec<&Project> {
        let query = query.to_lowercase();
        self.projects
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&query))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_profile_parses_and_validates() {
        let profile = Profile::bundled().unwrap();
        assert_eq!(profile.name, "Piyush Chawla");
        assert!(!profile.projects.is_empty());
        assert!(!profile.experience.is_empty());
        assert!(!profile.education.is_empty());
        profile.validate().unwrap();
    }

    #[test]
    fn test_json_profile_with_minimal_fields() {
        let profile = Profile::from_json_str(
            r#"{"name": "Ada", "title": "Engineer", "email": "ada@example.com"}"#,
        )
        .unwrap();
        assert_eq!(profile.name, "Ada");
        assert!(profile.projects.is_empty());
        assert!(profile.skills.categories().is_empty());
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        let profile = Profile {
            name: "Ada".into(),
            email: "not-an-email".into(),
            ..Default::default()
        };
        assert!(matches!(
            profile.validate(),
            Err(ProfileError::Invalid { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let profile = Profile {
            email: "a@b.c".into(),
            ..Default::default()
        };
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_skill_categories_skip_empty_groups() {
        let skills = Skills {
            languages: vec!["Rust".into()],
            tools: vec!["Git".into()],
            ..Default::default()
        };
        let labels: Vec<&str> = skills.categories().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["Languages", "Tools"]);
    }

    #[test]
    fn test_find_projects_case_insensitive() {
        let profile = Profile::bundled().unwrap();
        let found = profile.find_projects("REGISTRY");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Model Registry Service");
        assert!(profile.find_projects("nothing-like-this").is_empty());
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("me.toml");
        std::fs::write(&toml_path, "name = \"Ada\"\ntitle = \"Eng\"\nemail = \"a@b.c\"\n").unwrap();
        assert_eq!(Profile::load(&toml_path).unwrap().name, "Ada");

        let json_path = dir.path().join("me.json");
        std::fs::write(&json_path, r#"{"name":"Bo","title":"Eng","email":"b@c.d"}"#).unwrap();
        assert_eq!(Profile::load(&json_path).unwrap().name, "Bo");

        let yaml_path = dir.path().join("me.yaml");
        std::fs::write(&yaml_path, "name: Cy").unwrap();
        assert!(matches!(
            Profile::load(&yaml_path),
            Err(ProfileError::UnsupportedFormat { .. })
        ));

        assert!(matches!(
            Profile::load(&dir.path().join("missing.toml")),
            Err(ProfileError::FileNotFound { .. })
        ));
    }
}
