//! Typed content blocks ("bloks").
//!
//! A story's content tree is made of blocks discriminated by their
//! `component` field. [`Blok`] lifts the raw JSON into one variant per
//! known component; anything unrecognized lands in [`Blok::Unknown`] with
//! its raw payload preserved so the rendering layer can show a diagnostic
//! placeholder instead of dropping the block.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An image or file reference as delivered by the CMS.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Asset {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub alt: String,
}

/// A link field: either a bare URL string or the CMS link object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkField {
    Url(String),
    Link {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        url: Option<String>,
        #[serde(default)]
        cached_url: Option<String>,
        #[serde(default)]
        linktype: Option<String>,
    },
}

impl LinkField {
    /// Resolves the field to a rooted href, defaulting to `/`.
    pub fn resolve(&self) -> String {
        let target = match self {
            LinkField::Url(url) => url.as_str(),
            LinkField::Link {
                cached_url, url, ..
            } => cached_url
                .as_deref()
                .filter(|s| !s.is_empty())
                .or_else(|| url.as_deref().filter(|s| !s.is_empty()))
                .unwrap_or("/"),
        };
        if target.starts_with('/') {
            target.to_owned()
        } else {
            format!("/{target}")
        }
    }
}

/// Resolve an optional link field to a rooted href.
pub fn resolve_link(link: Option<&LinkField>) -> String {
    link.map(LinkField::resolve).unwrap_or_else(|| "/".to_owned())
}

/// A call-to-action sub-block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cta {
    #[serde(rename = "_uid", default)]
    pub uid: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub link: Option<LinkField>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeroBanner {
    #[serde(rename = "_uid", default)]
    pub uid: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub bubble: String,
    #[serde(default)]
    pub first_cta: Vec<Cta>,
    #[serde(default)]
    pub second_cta: Vec<Cta>,
    #[serde(default)]
    pub customers: String,
    #[serde(default)]
    pub customers_number: String,
    #[serde(default)]
    pub years: String,
    #[serde(default)]
    pub years_number: String,
    #[serde(default)]
    pub satisfaction: String,
}

/// Lightweight container laying out child blocks in a grid.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Grid {
    #[serde(rename = "_uid", default)]
    pub uid: String,
    #[serde(default)]
    pub columns: Vec<Blok>,
    #[serde(default)]
    pub items: Vec<Blok>,
}

impl Grid {
    /// Child blocks come from `columns` in most spaces, `items` in older ones.
    pub fn children(&self) -> &[Blok] {
        if !self.columns.is_empty() {
            &self.columns
        } else {
            &self.items
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "_uid", default)]
    pub uid: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub image: Option<Asset>,
}

impl Feature {
    /// Some spaces use `name` instead of `title`.
    pub fn display_title(&self) -> &str {
        if !self.title.is_empty() {
            &self.title
        } else if !self.name.is_empty() {
            &self.name
        } else {
            "Feature"
        }
    }

    /// Some spaces use `text` instead of `description`.
    pub fn body_text(&self) -> &str {
        if !self.description.is_empty() {
            &self.description
        } else {
            &self.text
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Teaser {
    #[serde(rename = "_uid", default)]
    pub uid: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub subline: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BadgeItem {
    #[serde(rename = "_uid", default)]
    pub uid: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: Option<Asset>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CertificationBadge {
    #[serde(rename = "_uid", default)]
    pub uid: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub subline: String,
    #[serde(default)]
    pub items: Vec<BadgeItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndustryTile {
    #[serde(rename = "_uid", default)]
    pub uid: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndustryTiles {
    #[serde(rename = "_uid", default)]
    pub uid: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub subline: String,
    #[serde(default)]
    pub items: Vec<IndustryTile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndustryShowcase {
    #[serde(rename = "_uid", default)]
    pub uid: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cta_text: String,
    #[serde(default)]
    pub cta_url: Option<LinkField>,
    #[serde(default)]
    pub images: Vec<Asset>,
    #[serde(default)]
    pub image1: Option<Asset>,
    #[serde(default)]
    pub image2: Option<Asset>,
    #[serde(default)]
    pub image3: Option<Asset>,
    #[serde(default)]
    pub image4: Option<Asset>,
}

impl IndustryShowcase {
    /// Accepts either the `images` array or the four individual slots.
    pub fn gallery(&self) -> Vec<&Asset> {
        if !self.images.is_empty() {
            self.images.iter().take(4).collect()
        } else {
            [&self.image1, &self.image2, &self.image3, &self.image4]
                .into_iter()
                .filter_map(Option::as_ref)
                .collect()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavItem {
    #[serde(rename = "_uid", default)]
    pub uid: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub url: Option<LinkField>,
    #[serde(default)]
    pub children: Vec<NavItem>,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageItem {
    #[serde(rename = "_uid", default)]
    pub uid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub equivalent: Option<LinkField>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Header {
    #[serde(rename = "_uid", default)]
    pub uid: String,
    #[serde(default)]
    pub items: Vec<NavItem>,
    #[serde(default)]
    pub languages: Vec<LanguageItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductBreadthItem {
    #[serde(rename = "_uid", default)]
    pub uid: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<Asset>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductBreadth {
    #[serde(rename = "_uid", default)]
    pub uid: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub items: Vec<ProductBreadthItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CertificationItem {
    #[serde(rename = "_uid", default)]
    pub uid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CertificationsStrip {
    #[serde(rename = "_uid", default)]
    pub uid: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub certifications: Vec<CertificationItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BannerItem {
    #[serde(rename = "_uid", default)]
    pub uid: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub resources: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeBaseTeaser {
    #[serde(rename = "_uid", default)]
    pub uid: String,
    // The space defines this field with a capital T.
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cta_text: String,
    #[serde(default)]
    pub cta_link: Option<LinkField>,
    #[serde(default)]
    pub banners: Vec<BannerItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckmarkItem {
    #[serde(rename = "_uid", default)]
    pub uid: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FactItem {
    #[serde(rename = "_uid", default)]
    pub uid: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct B2bCredibility {
    #[serde(rename = "_uid", default)]
    pub uid: String,
    #[serde(default)]
    pub badge: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub checkmarks: Vec<CheckmarkItem>,
    #[serde(default)]
    pub ctas: Vec<Cta>,
    #[serde(default)]
    pub facts: Vec<FactItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvantageItem {
    #[serde(rename = "_uid", default)]
    pub uid: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductItem {
    #[serde(rename = "_uid", default)]
    pub uid: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cta: Vec<Cta>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductsSection {
    #[serde(rename = "_uid", default)]
    pub uid: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub footer: String,
    #[serde(default)]
    pub products: Vec<ProductItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopPromo {
    #[serde(rename = "_uid", default)]
    pub uid: String,
    #[serde(default)]
    pub bubble: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub advantages: Vec<AdvantageItem>,
    #[serde(default)]
    pub first_cta: Vec<Cta>,
    #[serde(default)]
    pub second_cta: Vec<Cta>,
    #[serde(default)]
    pub products_section: Vec<ProductsSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FooterLink {
    #[serde(rename = "_uid", default)]
    pub uid: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub url: Option<LinkField>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Footer {
    #[serde(rename = "_uid", default)]
    pub uid: String,
    #[serde(default)]
    pub links: Vec<FooterLink>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotFound {
    #[serde(rename = "_uid", default)]
    pub uid: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cta: Vec<Cta>,
}

/// One node of a story's content tree, discriminated by `component`.
#[derive(Debug, Clone)]
pub enum Blok {
    HeroBanner(HeroBanner),
    Grid(Grid),
    Feature(Feature),
    Teaser(Teaser),
    CertificationBadge(CertificationBadge),
    IndustryTiles(IndustryTiles),
    IndustryShowcase(IndustryShowcase),
    Header(Header),
    ProductBreadth(ProductBreadth),
    CertificationsStrip(CertificationsStrip),
    KnowledgeBaseTeaser(KnowledgeBaseTeaser),
    B2bCredibility(B2bCredibility),
    ShopPromo(ShopPromo),
    Footer(Footer),
    NotFound(NotFound),
    /// Anything with a discriminator we do not know (or a payload that does
    /// not decode). The raw JSON is kept for diagnostic rendering.
    Unknown { component: String, raw: Value },
}

impl Blok {
    /// Lifts a raw content node into a typed block.
    ///
    /// Total: a known component with a malformed payload degrades to
    /// [`Blok::Unknown`] rather than failing, so one bad block never takes
    /// the page down.
    pub fn from_value(value: Value) -> Blok {
        fn decode<T: serde::de::DeserializeOwned>(value: &Value) -> Option<T> {
            serde_json::from_value(value.clone()).ok()
        }

        let component = value
            .get("component")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();

        let known = match component.as_str() {
            "hero_banner" => decode(&value).map(Blok::HeroBanner),
            "grid" => decode(&value).map(Blok::Grid),
            "feature" => decode(&value).map(Blok::Feature),
            "teaser" => decode(&value).map(Blok::Teaser),
            "certification_badge" => decode(&value).map(Blok::CertificationBadge),
            "industry_tiles" => decode(&value).map(Blok::IndustryTiles),
            "industry_showcase" => decode(&value).map(Blok::IndustryShowcase),
            "header" => decode(&value).map(Blok::Header),
            "product_breadth" => decode(&value).map(Blok::ProductBreadth),
            "certifications_strip" => decode(&value).map(Blok::CertificationsStrip),
            "Knowledge Base Teaser" => decode(&value).map(Blok::KnowledgeBaseTeaser),
            "B2B Credibility" => decode(&value).map(Blok::B2bCredibility),
            "shop_promo" => decode(&value).map(Blok::ShopPromo),
            "footer" => decode(&value).map(Blok::Footer),
            "not_found" => decode(&value).map(Blok::NotFound),
            _ => None,
        };

        known.unwrap_or(Blok::Unknown {
            component,
            raw: value,
        })
    }

    /// The block's `component` discriminator.
    pub fn component(&self) -> &str {
        match self {
            Blok::HeroBanner(_) => "hero_banner",
            Blok::Grid(_) => "grid",
            Blok::Feature(_) => "feature",
            Blok::Teaser(_) => "teaser",
            Blok::CertificationBadge(_) => "certification_badge",
            Blok::IndustryTiles(_) => "industry_tiles",
            Blok::IndustryShowcase(_) => "industry_showcase",
            Blok::Header(_) => "header",
            Blok::ProductBreadth(_) => "product_breadth",
            Blok::CertificationsStrip(_) => "certifications_strip",
            Blok::KnowledgeBaseTeaser(_) => "Knowledge Base Teaser",
            Blok::B2bCredibility(_) => "B2B Credibility",
            Blok::ShopPromo(_) => "shop_promo",
            Blok::Footer(_) => "footer",
            Blok::NotFound(_) => "not_found",
            Blok::Unknown { component, .. } => component,
        }
    }
}

impl<'de> Deserialize<'de> for Blok {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Blok::from_value(value))
    }
}
