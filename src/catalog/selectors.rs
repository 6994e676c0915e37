//! CSS selectors and extraction rules for catalogue pages.
//!
//! Everything this crate assumes about the target site's markup lives here.
//! Each record field is described by one rule: a selector evaluated inside
//! the entry element, plus where to read the value from once matched.
//!
//! **Update process**: when extraction starts failing, capture the page,
//! adjust [`RuleSpec::default`] (or override it with a `[rules]` table in
//! the config file) and refresh the fixture under `tests/fixtures/`.

use crate::error::ExtractError;
use scraper::{ElementRef, Selector};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Default selectors for books.toscrape.com listing pages.
pub mod catalogue {
    /// One product card.
    pub const ENTRY: &str = "article.product_pod";

    /// Heading link; carries both the full title and the relative detail href.
    pub const HEADING_LINK: &str = "h3 a";

    /// Displayed price.
    pub const PRICE: &str = "p.price_color";

    pub const TITLE_ATTR: &str = "title";
    pub const LINK_ATTR: &str = "href";
}

/// Serializable description of a single field rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Selector evaluated inside the entry element; the first match wins.
    pub selector: String,
    /// Attribute to read. When absent the trimmed text content is used.
    #[serde(default)]
    pub attr: Option<String>,
}

impl FieldSpec {
    pub fn attr(selector: &str, attr: &str) -> Self {
        Self { selector: selector.to_string(), attr: Some(attr.to_string()) }
    }

    pub fn text(selector: &str) -> Self {
        Self { selector: selector.to_string(), attr: None }
    }
}

/// Serializable rule set mapping selectors to record fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub entry: String,
    pub title: FieldSpec,
    pub price: FieldSpec,
    pub link: FieldSpec,
}

impl Default for RuleSpec {
    fn default() -> Self {
        Self {
            entry: catalogue::ENTRY.to_string(),
            title: FieldSpec::attr(catalogue::HEADING_LINK, catalogue::TITLE_ATTR),
            price: FieldSpec::text(catalogue::PRICE),
            link: FieldSpec::attr(catalogue::HEADING_LINK, catalogue::LINK_ATTR),
        }
    }
}

/// Where a field's value comes from once its element is found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSource {
    Attr(String),
    Text,
}

/// A compiled field rule.
#[derive(Debug, Clone)]
pub struct FieldRule {
    field: &'static str,
    raw: String,
    selector: Selector,
    source: FieldSource,
}

impl FieldRule {
    fn compile(field: &'static str, spec: &FieldSpec) -> Result<Self, ExtractError> {
        let selector = parse_selector(field, &spec.selector)?;
        let source = match &spec.attr {
            Some(attr) => FieldSource::Attr(attr.clone()),
            None => FieldSource::Text,
        };

        Ok(Self { field, raw: spec.selector.clone(), selector, source })
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn source(&self) -> &FieldSource {
        &self.source
    }

    /// Applies the rule to one entry. `index` is 1-based and only used in errors.
    pub fn extract(&self, entry: ElementRef, index: usize) -> Result<String, ExtractError> {
        let element = entry.select(&self.selector).next().ok_or_else(|| {
            ExtractError::MissingElement { field: self.field, selector: self.raw.clone(), index }
        })?;

        match &self.source {
            FieldSource::Attr(attr) => element
                .value()
                .attr(attr)
                .map(String::from)
                .ok_or_else(|| ExtractError::MissingAttribute {
                    field: self.field,
                    attr: attr.clone(),
                    index,
                }),
            FieldSource::Text => Ok(element.text().collect::<String>().trim().to_string()),
        }
    }
}

/// Compiled selectors for every record field.
#[derive(Debug, Clone)]
pub struct ExtractionRules {
    pub entry: Selector,
    pub title: FieldRule,
    pub price: FieldRule,
    pub link: FieldRule,
}

impl ExtractionRules {
    pub fn compile(spec: &RuleSpec) -> Result<Self, ExtractError> {
        Ok(Self {
            entry: parse_selector("entry", &spec.entry)?,
            title: FieldRule::compile("title", &spec.title)?,
            price: FieldRule::compile("price", &spec.price)?,
            link: FieldRule::compile("link", &spec.link)?,
        })
    }
}

/// Built-in rules for books.toscrape.com.
pub static BOOKS: LazyLock<ExtractionRules> =
    LazyLock::new(|| ExtractionRules::compile(&RuleSpec::default()).unwrap());

fn parse_selector(field: &'static str, raw: &str) -> Result<Selector, ExtractError> {
    Selector::parse(raw)
        .map_err(|_| ExtractError::InvalidSelector { field, selector: raw.to_string() })
}
