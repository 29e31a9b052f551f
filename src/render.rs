//! HTML rendering for resolved stories.
//!
//! Each content block maps to one section of semantic HTML by its
//! `component` discriminator. Unknown blocks render a diagnostic
//! placeholder with their raw payload instead of failing the page.

use hengste_types::Locale;
use storyblok::blok::{
    B2bCredibility, Blok, CertificationBadge, CertificationsStrip, Cta, Feature, Footer, Grid,
    Header, HeroBanner, IndustryShowcase, IndustryTiles, KnowledgeBaseTeaser, NotFound,
    ProductBreadth, ShopPromo, Teaser, resolve_link,
};
use storyblok::Story;

/// Render a resolved story as a complete HTML document.
pub fn story_page(story: &Story, locale: Locale) -> String {
    let title = page_title(story);
    let body = story_body(story, locale);
    document(locale, &title, &body)
}

/// The minimal fallback page for a slug with no CMS document.
pub fn missing_page(locale: Locale, slug: &str) -> String {
    let body = format!(
        "<section><h1>Not found in CMS</h1>\
         <p>No story for: <code>/{}/{}</code></p></section>",
        locale,
        escape_html(slug)
    );
    document(locale, "Karl Hengste", &body)
}

fn document(locale: Locale, title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"{locale}\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n</head>\n<body>\n<main>\n{body}\n</main>\n</body>\n</html>\n"
    )
}

fn page_title(story: &Story) -> String {
    if !story.name.trim().is_empty() {
        format!("{} | Karl Hengste", escape_html(story.name.trim()))
    } else if !story.slug.is_empty() {
        format!("{} | Karl Hengste", escape_html(&capitalize(&story.slug)))
    } else {
        "Karl Hengste".to_owned()
    }
}

fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn story_body(story: &Story, locale: Locale) -> String {
    let body = story.body();
    if body.is_empty() {
        return format!(
            "<section><h1>{}</h1><p>No blocks found in this page.</p></section>",
            escape_html(&story.name)
        );
    }

    body.iter()
        .map(|value| render_blok(&Blok::from_value(value.clone()), locale))
        .collect()
}

/// Dispatch one block to its renderer.
pub fn render_blok(blok: &Blok, locale: Locale) -> String {
    match blok {
        Blok::HeroBanner(hero) => hero_banner(hero, locale),
        Blok::Grid(grid) => grid_section(grid, locale),
        Blok::Feature(feature) => feature_card(feature),
        Blok::Teaser(teaser) => teaser_section(teaser),
        Blok::CertificationBadge(badge) => certification_badge(badge),
        Blok::IndustryTiles(tiles) => industry_tiles(tiles),
        Blok::IndustryShowcase(showcase) => industry_showcase(showcase, locale),
        Blok::Header(header) => header_nav(header, locale),
        Blok::ProductBreadth(breadth) => product_breadth(breadth),
        Blok::CertificationsStrip(strip) => certifications_strip(strip),
        Blok::KnowledgeBaseTeaser(kb) => knowledge_base_teaser(kb, locale),
        Blok::B2bCredibility(cred) => b2b_credibility(cred, locale),
        Blok::ShopPromo(promo) => shop_promo(promo, locale),
        Blok::Footer(footer) => footer_section(footer, locale),
        Blok::NotFound(not_found) => not_found_section(not_found, locale),
        Blok::Unknown { component, raw } => unknown_block(component, raw),
    }
}

fn unknown_block(component: &str, raw: &serde_json::Value) -> String {
    let pretty = serde_json::to_string_pretty(raw).unwrap_or_else(|_| raw.to_string());
    format!(
        "<section><div>Unknown block: <code>{}</code></div><pre>{}</pre></section>",
        escape_html(component),
        escape_html(&pretty)
    )
}

fn hero_banner(hero: &HeroBanner, locale: Locale) -> String {
    let mut out = String::from("<section class=\"hero\">");
    if !hero.bubble.is_empty() {
        out.push_str(&format!("<span>{}</span>", escape_html(&hero.bubble)));
    }
    if !hero.title.is_empty() {
        out.push_str(&format!("<h1>{}</h1>", escape_html(&hero.title)));
    }
    if !hero.description.is_empty() {
        out.push_str(&format!("<p>{}</p>", escape_html(&hero.description)));
    }
    for cta in hero.first_cta.iter().chain(hero.second_cta.iter()) {
        out.push_str(&cta_link(cta, locale));
    }
    out.push_str("</section>");
    out
}

fn cta_link(cta: &Cta, locale: Locale) -> String {
    let href = with_locale_prefix(locale, &resolve_link(cta.link.as_ref()));
    format!(
        "<a href=\"{}\">{}</a>",
        escape_html(&href),
        escape_html(&cta.text)
    )
}

fn grid_section(grid: &Grid, locale: Locale) -> String {
    let children: String = grid
        .children()
        .iter()
        .map(|child| format!("<div>{}</div>", render_blok(child, locale)))
        .collect();
    format!("<section class=\"grid\">{children}</section>")
}

fn feature_card(feature: &Feature) -> String {
    let mut out = String::from("<article>");
    if let Some(image) = &feature.image {
        if !image.filename.is_empty() {
            out.push_str(&format!(
                "<img src=\"{}\" alt=\"{}\">",
                escape_html(&image.filename),
                escape_html(if image.alt.is_empty() {
                    feature.display_title()
                } else {
                    &image.alt
                })
            ));
        }
    }
    out.push_str(&format!("<h3>{}</h3>", escape_html(feature.display_title())));
    if !feature.body_text().is_empty() {
        out.push_str(&format!("<p>{}</p>", escape_html(feature.body_text())));
    }
    out.push_str("</article>");
    out
}

fn teaser_section(teaser: &Teaser) -> String {
    let mut out = String::from("<section>");
    if !teaser.headline.is_empty() {
        out.push_str(&format!("<h2>{}</h2>", escape_html(&teaser.headline)));
    }
    if !teaser.subline.is_empty() {
        out.push_str(&format!("<p>{}</p>", escape_html(&teaser.subline)));
    }
    out.push_str("</section>");
    out
}

fn certification_badge(badge: &CertificationBadge) -> String {
    let mut out = String::from("<section>");
    if !badge.headline.is_empty() {
        out.push_str(&format!("<h2>{}</h2>", escape_html(&badge.headline)));
    }
    for item in &badge.items {
        let (src, alt) = match &item.image {
            Some(image) if !image.filename.is_empty() => (image.filename.as_str(), {
                if !image.alt.is_empty() {
                    image.alt.as_str()
                } else if !item.title.is_empty() {
                    item.title.as_str()
                } else {
                    "Badge"
                }
            }),
            _ => ("/images/logo.avif", "Badge"),
        };
        out.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\">",
            escape_html(src),
            escape_html(alt)
        ));
    }
    out.push_str("</section>");
    out
}

fn industry_tiles(tiles: &IndustryTiles) -> String {
    let mut out = String::from("<section>");
    if !tiles.headline.is_empty() {
        out.push_str(&format!("<h2>{}</h2>", escape_html(&tiles.headline)));
    }
    if !tiles.subline.is_empty() {
        out.push_str(&format!("<p>{}</p>", escape_html(&tiles.subline)));
    }
    out.push_str("<ul>");
    for tile in &tiles.items {
        let title = if !tile.title.is_empty() {
            &tile.title
        } else {
            &tile.name
        };
        let text = if !tile.text.is_empty() {
            &tile.text
        } else {
            &tile.description
        };
        out.push_str(&format!(
            "<li><strong>{}</strong> {}</li>",
            escape_html(title),
            escape_html(text)
        ));
    }
    out.push_str("</ul></section>");
    out
}

fn industry_showcase(showcase: &IndustryShowcase, locale: Locale) -> String {
    let mut out = String::from("<section>");
    if !showcase.title.is_empty() {
        out.push_str(&format!("<h2>{}</h2>", escape_html(&showcase.title)));
    }
    if !showcase.description.is_empty() {
        out.push_str(&format!("<p>{}</p>", escape_html(&showcase.description)));
    }
    let cta_text = if showcase.cta_text.is_empty() {
        "Learn more"
    } else {
        showcase.cta_text.as_str()
    };
    let href = with_locale_prefix(locale, &resolve_link(showcase.cta_url.as_ref()));
    out.push_str(&format!(
        "<a href=\"{}\">{}</a>",
        escape_html(&href),
        escape_html(cta_text)
    ));
    for image in showcase.gallery() {
        out.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\">",
            escape_html(&image.filename),
            escape_html(&image.alt)
        ));
    }
    out.push_str("</section>");
    out
}

fn header_nav(header: &Header, locale: Locale) -> String {
    let mut out = String::from("<nav>");
    for item in &header.items {
        let href = with_locale_prefix(locale, &resolve_link(item.url.as_ref()));
        out.push_str(&format!(
            "<a href=\"{}\">{}</a>",
            escape_html(&href),
            escape_html(&item.label)
        ));
    }
    if !header.languages.is_empty() {
        out.push_str("<ul>");
        for language in &header.languages {
            out.push_str(&format!(
                "<li><a href=\"/{}\">{}</a></li>",
                escape_html(&language.slug),
                escape_html(&language.name)
            ));
        }
        out.push_str("</ul>");
    }
    out.push_str("</nav>");
    out
}

fn product_breadth(breadth: &ProductBreadth) -> String {
    let mut out = String::from("<section>");
    if !breadth.title.is_empty() {
        out.push_str(&format!("<h2>{}</h2>", escape_html(&breadth.title)));
    }
    if !breadth.description.is_empty() {
        out.push_str(&format!("<p>{}</p>", escape_html(&breadth.description)));
    }
    for item in breadth.items.iter().take(4) {
        out.push_str("<article>");
        if let Some(image) = &item.image {
            if !image.filename.is_empty() {
                out.push_str(&format!(
                    "<img src=\"{}\" alt=\"{}\">",
                    escape_html(&image.filename),
                    escape_html(&image.alt)
                ));
            }
        }
        out.push_str(&format!(
            "<h3>{}</h3><p>{}</p></article>",
            escape_html(&item.title),
            escape_html(&item.description)
        ));
    }
    out.push_str("</section>");
    out
}

fn certifications_strip(strip: &CertificationsStrip) -> String {
    // Nothing to show without certifications.
    if strip.certifications.is_empty() {
        return String::new();
    }
    let mut out = String::from("<section>");
    if !strip.title.is_empty() {
        out.push_str(&format!("<h2>{}</h2>", escape_html(&strip.title)));
    }
    out.push_str("<ul>");
    for cert in &strip.certifications {
        out.push_str(&format!(
            "<li><strong>{}</strong> {}</li>",
            escape_html(&cert.name),
            escape_html(&cert.description)
        ));
    }
    out.push_str("</ul></section>");
    out
}

fn knowledge_base_teaser(kb: &KnowledgeBaseTeaser, locale: Locale) -> String {
    let mut out = String::from("<section>");
    if !kb.title.is_empty() {
        out.push_str(&format!("<h2>{}</h2>", escape_html(&kb.title)));
    }
    if !kb.description.is_empty() {
        out.push_str(&format!("<p>{}</p>", escape_html(&kb.description)));
    }
    for banner in &kb.banners {
        out.push_str(&format!(
            "<article><h3>{}</h3><p>{}</p><span>{}</span></article>",
            escape_html(&banner.title),
            escape_html(&banner.description),
            escape_html(&banner.resources)
        ));
    }
    if !kb.cta_text.is_empty() {
        let href = with_locale_prefix(locale, &resolve_link(kb.cta_link.as_ref()));
        out.push_str(&format!(
            "<a href=\"{}\">{}</a>",
            escape_html(&href),
            escape_html(&kb.cta_text)
        ));
    }
    out.push_str("</section>");
    out
}

fn b2b_credibility(cred: &B2bCredibility, locale: Locale) -> String {
    let mut out = String::from("<section>");
    if !cred.badge.is_empty() {
        out.push_str(&format!("<span>{}</span>", escape_html(&cred.badge)));
    }
    if !cred.title.is_empty() {
        out.push_str(&format!("<h2>{}</h2>", escape_html(&cred.title)));
    }
    if !cred.description.is_empty() {
        out.push_str(&format!("<p>{}</p>", escape_html(&cred.description)));
    }
    if !cred.checkmarks.is_empty() {
        out.push_str("<ul>");
        for check in &cred.checkmarks {
            out.push_str(&format!("<li>{}</li>", escape_html(&check.text)));
        }
        out.push_str("</ul>");
    }
    if !cred.facts.is_empty() {
        out.push_str("<dl>");
        for fact in &cred.facts {
            out.push_str(&format!(
                "<dt>{}</dt><dd>{}</dd>",
                escape_html(&fact.value),
                escape_html(&fact.label)
            ));
        }
        out.push_str("</dl>");
    }
    for cta in &cred.ctas {
        out.push_str(&cta_link(cta, locale));
    }
    out.push_str("</section>");
    out
}

fn shop_promo(promo: &ShopPromo, locale: Locale) -> String {
    let mut out = String::from("<section>");
    if !promo.bubble.is_empty() {
        out.push_str(&format!("<span>{}</span>", escape_html(&promo.bubble)));
    }
    if !promo.title.is_empty() {
        out.push_str(&format!("<h2>{}</h2>", escape_html(&promo.title)));
    }
    if !promo.description.is_empty() {
        out.push_str(&format!("<p>{}</p>", escape_html(&promo.description)));
    }
    if !promo.advantages.is_empty() {
        out.push_str("<ul>");
        for advantage in &promo.advantages {
            out.push_str(&format!(
                "<li><strong>{}</strong> {}</li>",
                escape_html(&advantage.title),
                escape_html(&advantage.description)
            ));
        }
        out.push_str("</ul>");
    }
    for section in &promo.products_section {
        out.push_str("<div>");
        if !section.title.is_empty() {
            out.push_str(&format!("<h3>{}</h3>", escape_html(&section.title)));
        }
        for product in &section.products {
            out.push_str(&format!(
                "<article><h4>{}</h4><p>{}</p>",
                escape_html(&product.title),
                escape_html(&product.description)
            ));
            for cta in &product.cta {
                out.push_str(&cta_link(cta, locale));
            }
            out.push_str("</article>");
        }
        if !section.footer.is_empty() {
            out.push_str(&format!("<p>{}</p>", escape_html(&section.footer)));
        }
        out.push_str("</div>");
    }
    for cta in promo.first_cta.iter().chain(promo.second_cta.iter()) {
        out.push_str(&cta_link(cta, locale));
    }
    out.push_str("</section>");
    out
}

fn footer_section(footer: &Footer, locale: Locale) -> String {
    let mut out = String::from("<footer>");
    for link in &footer.links {
        let href = with_locale_prefix(locale, &resolve_link(link.url.as_ref()));
        let label = if link.label.is_empty() {
            "Link"
        } else {
            link.label.as_str()
        };
        out.push_str(&format!(
            "<a href=\"{}\">{}</a>",
            escape_html(&href),
            escape_html(label)
        ));
    }
    out.push_str("<p>© Karl Hengste. All rights reserved.</p></footer>");
    out
}

fn not_found_section(not_found: &NotFound, locale: Locale) -> String {
    let mut out = String::from("<section>");
    out.push_str(&format!("<h1>{}</h1>", escape_html(&not_found.headline)));
    if !not_found.description.is_empty() {
        out.push_str(&format!("<p>{}</p>", escape_html(&not_found.description)));
    }
    if let Some(cta) = not_found.cta.first() {
        out.push_str(&cta_link(cta, locale));
    }
    out.push_str("</section>");
    out
}

/// Prefix a rooted href with the locale segment unless it already has one.
fn with_locale_prefix(locale: Locale, href: &str) -> String {
    let rooted = if href.starts_with('/') {
        href.to_owned()
    } else {
        format!("/{href}")
    };
    let first_segment = rooted.split('/').find(|segment| !segment.is_empty());
    if first_segment == Some(locale.as_str()) {
        rooted
    } else {
        format!("/{locale}{rooted}")
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn story(name: &str, body: serde_json::Value) -> Story {
        serde_json::from_value(json!({
            "name": name,
            "slug": "home",
            "full_slug": "en/home",
            "content": {"component": "page", "body": body}
        }))
        .expect("story")
    }

    #[test]
    fn unknown_block_renders_diagnostic_placeholder() {
        let html = render_blok(
            &Blok::from_value(json!({"component": "carousel_3000", "_uid": "c1"})),
            Locale::En,
        );
        assert!(html.contains("Unknown block"));
        assert!(html.contains("carousel_3000"));
        assert!(html.contains("<pre>"));
    }

    #[test]
    fn known_block_renders_content() {
        let html = render_blok(
            &Blok::from_value(json!({
                "component": "hero_banner",
                "_uid": "h1",
                "title": "Welcome",
                "description": "Sheet metal solutions"
            })),
            Locale::En,
        );
        assert!(html.contains("<h1>Welcome</h1>"));
        assert!(html.contains("Sheet metal solutions"));
    }

    #[test]
    fn text_is_html_escaped() {
        let html = render_blok(
            &Blok::from_value(json!({
                "component": "teaser",
                "_uid": "t1",
                "headline": "<script>alert(1)</script>"
            })),
            Locale::En,
        );
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn page_title_uses_story_name() {
        let page = story_page(&story("Startseite", json!([])), Locale::De);
        assert!(page.contains("<title>Startseite | Karl Hengste</title>"));
        assert!(page.contains("lang=\"de\""));
    }

    #[test]
    fn blank_name_falls_back_to_capitalized_slug() {
        let page = story_page(&story("  ", json!([])), Locale::En);
        assert!(page.contains("<title>Home | Karl Hengste</title>"));
    }

    #[test]
    fn empty_body_renders_no_blocks_note() {
        let page = story_page(&story("Home", json!([])), Locale::En);
        assert!(page.contains("No blocks found in this page."));
    }

    #[test]
    fn missing_page_names_the_slug() {
        let page = missing_page(Locale::De, "industries/unknown");
        assert!(page.contains("Not found in CMS"));
        assert!(page.contains("/de/industries/unknown"));
    }

    #[test]
    fn empty_certifications_strip_renders_nothing() {
        let html = render_blok(
            &Blok::from_value(json!({"component": "certifications_strip", "_uid": "s1"})),
            Locale::En,
        );
        assert!(html.is_empty());
    }

    #[test]
    fn locale_prefix_is_not_duplicated() {
        assert_eq!(with_locale_prefix(Locale::De, "/de/home"), "/de/home");
        assert_eq!(with_locale_prefix(Locale::De, "/home"), "/de/home");
        assert_eq!(with_locale_prefix(Locale::De, "about"), "/de/about");
    }
}
