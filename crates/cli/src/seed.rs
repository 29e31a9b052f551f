//! Seed payloads for the EN/DE home stories.
//!
//! Content goes through the management API without `_uid`s; the CMS
//! assigns block identities on save.

use serde_json::{Value, json};

use hengste_types::Locale;
use storyblok::FetchResult;
use storyblok::management::{ManagementClient, StoryPayload};

/// What an upsert did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertAction {
    Created,
    Updated,
}

impl std::fmt::Display for UpsertAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpsertAction::Created => write!(f, "create"),
            UpsertAction::Updated => write!(f, "update"),
        }
    }
}

/// Create or update the home story for one locale under `{locale}/home`.
pub async fn upsert_home(client: &ManagementClient, locale: Locale) -> FetchResult<UpsertAction> {
    let full_slug = format!("{}/home", locale);
    let payload = StoryPayload {
        name: home_name(locale).to_owned(),
        slug: "home".to_owned(),
        is_startpage: false,
        default_root: false,
        content: home_content(locale),
        lang: locale,
        path: locale.as_str().to_owned(),
    };

    match client.find_story_by_full_slug(&full_slug).await? {
        Some(existing) => {
            client.update_story(existing.id, &payload).await?;
            Ok(UpsertAction::Updated)
        }
        None => {
            client.create_story(&payload).await?;
            Ok(UpsertAction::Created)
        }
    }
}

fn home_name(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Home",
        Locale::De => "Startseite",
    }
}

fn home_content(locale: Locale) -> Value {
    match locale {
        Locale::En => json!({
            "component": "page",
            "body": [
                {
                    "component": "hero_banner",
                    "title": "Welcome to Karl Hengste GmbH – Your trusted partner in premium sheet metal solutions for over 110 years."
                },
                {
                    "component": "grid",
                    "columns": [
                        {
                            "component": "feature",
                            "name": "Defense",
                            "text": "Precision parts for defense applications."
                        },
                        {
                            "component": "feature",
                            "name": "Medical",
                            "text": "High-precision components for medical industry."
                        },
                        {
                            "component": "feature",
                            "name": "Construction",
                            "text": "Solutions tailored for construction industry needs."
                        },
                        {
                            "component": "feature",
                            "name": "Automotive",
                            "text": "Reliable sheet metal parts for automotive."
                        },
                        {
                            "component": "feature",
                            "name": "General Industry",
                            "text": "Versatile products for various industries."
                        }
                    ]
                },
                {
                    "component": "certification_badge",
                    "headline": "Trusted by leading companies",
                    "items": [
                        {
                            "component": "badge_item",
                            "image": { "filename": "/images/logo.avif", "alt": "Badge" }
                        },
                        {
                            "component": "badge_item",
                            "image": { "filename": "/images/logo.avif", "alt": "Badge" }
                        }
                    ]
                }
            ]
        }),
        Locale::De => json!({
            "component": "page",
            "body": [
                {
                    "component": "hero_banner",
                    "title": "Willkommen bei Karl Hengste GmbH – Ihr Partner für hochwertige Blechlösungen seit über 110 Jahren."
                },
                {
                    "component": "grid",
                    "columns": [
                        {
                            "component": "feature",
                            "name": "Verteidigung",
                            "text": "Präzisionsteile für die Verteidigung."
                        },
                        {
                            "component": "feature",
                            "name": "Medizinindustrie",
                            "text": "Hochpräzise Komponenten für die Medizin."
                        },
                        {
                            "component": "feature",
                            "name": "Bauindustrie",
                            "text": "Lösungen für Anforderungen der Bauindustrie."
                        },
                        {
                            "component": "feature",
                            "name": "Automobilindustrie",
                            "text": "Zuverlässige Blechbauteile für Automotive."
                        },
                        {
                            "component": "feature",
                            "name": "Allgemeine Industrie",
                            "text": "Vielseitige Produkte für verschiedene Branchen."
                        }
                    ]
                },
                {
                    "component": "certification_badge",
                    "headline": "Vertrauen von führenden Unternehmen",
                    "items": [
                        {
                            "component": "badge_item",
                            "image": { "filename": "/images/logo.avif", "alt": "Abzeichen" }
                        },
                        {
                            "component": "badge_item",
                            "image": { "filename": "/images/logo.avif", "alt": "Abzeichen" }
                        }
                    ]
                }
            ]
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_content_is_a_page_with_blocks() {
        for locale in Locale::all() {
            let content = home_content(locale);
            assert_eq!(content["component"], "page");
            let body = content["body"].as_array().expect("body array");
            assert_eq!(body[0]["component"], "hero_banner");
            assert_eq!(body[1]["component"], "grid");
            assert_eq!(body[1]["columns"].as_array().expect("columns").len(), 5);
            assert_eq!(body[2]["component"], "certification_badge");
        }
    }

    #[test]
    fn home_names_are_localized() {
        assert_eq!(home_name(Locale::En), "Home");
        assert_eq!(home_name(Locale::De), "Startseite");
    }
}
