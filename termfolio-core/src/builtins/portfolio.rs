//! Commands that present the profile: whoami, experience, education,
//! skills, projects, contact, resume.

use std::sync::Arc;

use crate::command::{CommandCategory, CommandDefinition, CommandResult, Invocation};
use crate::error::CommandError;
use crate::output::{Link, Output, Section};
use crate::profile::{Profile, Project};
use crate::registry::CommandRegistry;

/// Wrap a profile-reading function into a handler closure.
fn with_profile<F>(
    profile: Arc<Profile>,
    f: F,
) -> impl Fn(&Invocation<'_>) -> CommandResult + Send + Sync + 'static
where
    F: Fn(&Profile, &Invocation<'_>) -> CommandResult + Send + Sync + 'static,
{
    move |inv| f(&profile, inv)
}

pub(super) fn register(registry: &mut CommandRegistry, profile: Arc<Profile>) {
    registry.register(
        CommandDefinition::new(
            "whoami",
            "Learn more about my journey",
            with_profile(Arc::clone(&profile), whoami),
        )
        .with_aliases(&["about"])
        .with_category(CommandCategory::Info),
    );
    registry.register(
        CommandDefinition::new(
            "experience",
            "View my work experience",
            with_profile(Arc::clone(&profile), experience),
        )
        .with_aliases(&["work", "jobs"])
        .with_category(CommandCategory::Info),
    );
    registry.register(
        CommandDefinition::new(
            "education",
            "View my educational background",
            with_profile(Arc::clone(&profile), education),
        )
        .with_aliases(&["edu", "school"])
        .with_category(CommandCategory::Info),
    );
    registry.register(
        CommandDefinition::new(
            "skills",
            "View my technical skills",
            with_profile(Arc::clone(&profile), skills),
        )
        .with_aliases(&["tech", "stack"])
        .with_category(CommandCategory::Info),
    );
    registry.register(
        CommandDefinition::new(
            "projects",
            "Explore my projects",
            with_profile(Arc::clone(&profile), projects),
        )
        .with_usage("projects [name]")
        .with_aliases(&["portfolio", "proj"])
        .with_category(CommandCategory::Navigation),
    );
    registry.register(
        CommandDefinition::new(
            "contact",
            "Get in touch with me",
            with_profile(Arc::clone(&profile), contact),
        )
        .with_category(CommandCategory::Social),
    );
    registry.register(
        CommandDefinition::new(
            "resume",
            "Download my resume",
            with_profile(Arc::clone(&profile), resume),
        )
        .with_aliases(&["cv"])
        .with_category(CommandCategory::Social),
    );
}

fn whoami(profile: &Profile, _: &Invocation<'_>) -> CommandResult {
    let mut lines = vec![profile.name.clone(), profile.title.clone()];
    if let Some(edu) = profile.education.first() {
        lines.push(format!("{} @ {}", edu.degree, edu.school));
    }
    if !profile.location.is_empty() {
        lines.push(format!("Based in {}", profile.location));
    }
    if !profile.about.is_empty() {
        lines.push(String::new());
        lines.extend(profile.about.iter().cloned());
    }
    lines.push(String::new());
    lines.push("Type 'experience' to see my work history".to_string());
    lines.push("Type 'projects' to explore my work".to_string());
    Ok(Output::Lines(lines))
}

fn experience(profile: &Profile, _: &Invocation<'_>) -> CommandResult {
    if profile.experience.is_empty() {
        return Err(CommandError::MissingData {
            what: "work experience".into(),
        });
    }
    let sections = profile
        .experience
        .iter()
        .map(|job| Section {
            heading: job.title.clone(),
            subheading: Some(job.company.clone()),
            meta: non_empty(&job.period),
            body: job.description.clone(),
            ..Default::default()
        })
        .collect();
    Ok(Output::Sections {
        title: "Work Experience".into(),
        sections,
    })
}

fn education(profile: &Profile, _: &Invocation<'_>) -> CommandResult {
    if profile.education.is_empty() {
        return Err(CommandError::MissingData {
            what: "education entries".into(),
        });
    }
    let sections = profile
        .education
        .iter()
        .map(|edu| Section {
            heading: edu.degree.clone(),
            subheading: Some(if edu.location.is_empty() {
                edu.school.clone()
            } else {
                format!("{} • {}", edu.school, edu.location)
            }),
            meta: non_empty(&edu.year),
            body: edu.highlights.clone(),
            ..Default::default()
        })
        .collect();
    Ok(Output::Sections {
        title: "Education".into(),
        sections,
    })
}

fn skills(profile: &Profile, _: &Invocation<'_>) -> CommandResult {
    let categories = profile.skills.categories();
    if categories.is_empty() {
        return Err(CommandError::MissingData {
            what: "skills".into(),
        });
    }
    Ok(Output::KeyValue {
        title: "Technical Skills".into(),
        entries: categories
            .into_iter()
            .map(|(label, items)| (label.to_string(), items.join(", ")))
            .collect(),
    })
}

fn projects(profile: &Profile, inv: &Invocation<'_>) -> CommandResult {
    let selected: Vec<&Project> = if inv.args.is_empty() {
        profile.projects.iter().collect()
    } else {
        let query = inv.args.join(" ");
        let found = profile.find_projects(&query);
        if found.is_empty() {
            return Err(CommandError::invalid_arguments(
                inv.name,
                format!("no project matches '{query}'"),
            ));
        }
        found
    };
    if selected.is_empty() {
        return Err(CommandError::MissingData {
            what: "projects".into(),
        });
    }

    let sections = selected
        .into_iter()
        .map(|project| {
            let mut links = Vec::new();
            if !project.github.is_empty() {
                links.push(Link::new("GitHub", &project.github));
            }
            if let Some(demo) = &project.demo {
                links.push(Link::new("Demo", demo));
            }
            Section {
                heading: project.name.clone(),
                subheading: Some(project.description.clone()),
                meta: None,
                body: project.highlights.clone(),
                tags: project.tech.clone(),
                links,
            }
        })
        .collect();
    Ok(Output::Sections {
        title: "Featured Projects".into(),
        sections,
    })
}

fn contact(profile: &Profile, _: &Invocation<'_>) -> CommandResult {
    let entries: Vec<(String, String)> = [
        ("Email", &profile.email),
        ("LinkedIn", &profile.linkedin),
        ("GitHub", &profile.github),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .map(|(label, value)| (label.to_string(), value.clone()))
    .collect();

    if entries.is_empty() {
        return Err(CommandError::MissingData {
            what: "contact details".into(),
        });
    }
    Ok(Output::KeyValue {
        title: "Let's Connect!".into(),
        entries,
    })
}

fn resume(profile: &Profile, _: &Invocation<'_>) -> CommandResult {
    if profile.resume.is_empty() {
        return Err(CommandError::MissingData {
            what: "resume link".into(),
        });
    }
    Ok(Output::Lines(vec![
        "Download my resume to learn more about my experience and qualifications.".into(),
        profile.resume.clone(),
    ]))
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::Dispatcher;
    use pretty_assertions::assert_eq;

    fn dispatcher_for(profile: Profile) -> Dispatcher {
        let mut registry = CommandRegistry::new();
        register(&mut registry, Arc::new(profile));
        Dispatcher::new(Arc::new(registry))
    }

    fn bundled() -> Dispatcher {
        dispatcher_for(Profile::bundled().unwrap())
    }

    fn minimal() -> Profile {
        Profile {
            name: "Ada".into(),
            title: "Engineer".into(),
            email: "ada@example.com".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_whoami_and_about_alias_agree() {
        let d = bundled();
        let who = d.execute("whoami").unwrap();
        assert_eq!(d.execute("about").unwrap(), who);
        let Output::Lines(lines) = who else {
            panic!("expected lines");
        };
        assert_eq!(lines[0], "Piyush Chawla");
        assert!(lines.iter().any(|l| l.contains("Thapar")));
    }

    #[test]
    fn test_experience_sections() {
        let Some(Output::Sections { title, sections }) = bundled().execute("jobs") else {
            panic!("expected sections");
        };
        assert_eq!(title, "Work Experience");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].meta.as_deref(), Some("2024 - Present"));
    }

    #[test]
    fn test_missing_experience_is_error() {
        let out = dispatcher_for(minimal()).execute("experience").unwrap();
        assert_eq!(out, Output::error("no work experience available"));
    }

    #[test]
    fn test_education_subheading_includes_location() {
        let Some(Output::Sections { sections, .. }) = bundled().execute("edu") else {
            panic!("expected sections");
        };
        let sub = sections[0].subheading.as_deref().unwrap();
        assert!(sub.contains("Patiala"), "{sub}");
    }

    #[test]
    fn test_skills_key_values() {
        let Some(Output::KeyValue { entries, .. }) = bundled().execute("stack") else {
            panic!("expected key/value");
        };
        assert_eq!(entries[0].0, "Languages");
        assert!(entries[0].1.contains("Rust"));
    }

    #[test]
    fn test_projects_all_and_filtered() {
        let d = bundled();
        let Some(Output::Sections { sections, .. }) = d.execute("projects") else {
            panic!("expected sections");
        };
        assert_eq!(sections.len(), 3);

        let Some(Output::Sections { sections, .. }) = d.execute("proj cost radar") else {
            panic!("expected sections");
        };
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].heading, "Cloud Cost Radar");
        assert_eq!(sections[0].links[0].label, "GitHub");
    }

    #[test]
    fn test_projects_demo_link() {
        let Some(Output::Sections { sections, .. }) = bundled().execute("projects registry") else {
            panic!("expected sections");
        };
        let labels: Vec<&str> = sections[0].links.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["GitHub", "Demo"]);
    }

    #[test]
    fn test_projects_unknown_filter_is_error() {
        let out = bundled().execute("portfolio quantum").unwrap();
        assert_eq!(
            out,
            Output::error("invalid arguments for 'projects': no project matches 'quantum'")
        );
    }

    #[test]
    fn test_contact_skips_empty_fields() {
        let Some(Output::KeyValue { entries, .. }) = dispatcher_for(minimal()).execute("contact")
        else {
            panic!("expected key/value");
        };
        assert_eq!(
            entries,
            vec![("Email".to_string(), "ada@example.com".to_string())]
        );
    }

    #[test]
    fn test_resume_requires_link() {
        assert_eq!(
            dispatcher_for(minimal()).execute("cv"),
            Some(Output::error("no resume link available"))
        );
        assert!(matches!(bundled().execute("resume"), Some(Output::Lines(_))));
    }
}
