use crate::data::Data;
use crate::error::{Error, Result};
use crate::template::{self, bindings};
use iri_string::template::{UriTemplateStr, UriTemplateString};
use iri_string::types::UriReferenceString;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Where a link or query points: a fixed URI, or a URI Template that is
/// resolved against a document's data.
///
/// Two targets are equal when their source strings are equal; nothing is
/// expanded for comparison.
#[derive(Debug, Clone)]
pub enum Target {
    Uri(UriReferenceString),
    Template(UriTemplateString),
}

impl Target {
    /// A fixed URI (absolute or relative).
    pub fn uri(uri: &str) -> Result<Target> {
        template::parse_uri(uri).map(Target::Uri)
    }

    /// A URI Template. Fails on malformed template syntax.
    pub fn template(template: &str) -> Result<Target> {
        UriTemplateStr::new(template)
            .map(|t| Target::Template(t.to_owned()))
            .map_err(|source| Error::TemplateSyntax {
                template: template.to_string(),
                source,
            })
    }

    /// Treat `href` as a template when it contains an expression, and as a
    /// fixed URI otherwise.
    pub fn parse(href: &str) -> Result<Target> {
        if href.contains('{') {
            Target::template(href)
        } else {
            Target::uri(href)
        }
    }

    pub fn is_uri_template(&self) -> bool {
        matches!(self, Target::Template(_))
    }

    /// The URI or template exactly as given.
    pub fn as_str(&self) -> &str {
        match self {
            Target::Uri(uri) => uri.as_str(),
            Target::Template(tpl) => tpl.as_str(),
        }
    }

    /// The fixed URI, or the template expanded with no variables bound.
    pub fn to_uri(&self) -> Result<UriReferenceString> {
        match self {
            Target::Uri(uri) => Ok(uri.clone()),
            Target::Template(tpl) => template::expand(tpl, &BTreeMap::new()),
        }
    }

    /// Resolve against `data`. A fixed URI ignores `data`.
    pub fn expand(&self, data: &Data) -> Result<UriReferenceString> {
        match self {
            Target::Uri(uri) => Ok(uri.clone()),
            Target::Template(tpl) => {
                let bound = bindings(data);
                log::trace!("expanding {} with {} bound variables", tpl.as_str(), bound.len());
                template::expand(tpl, &bound)
            }
        }
    }
}

impl PartialEq for Target {
    fn eq(&self, other: &Self) -> bool {
        self.is_uri_template() == other.is_uri_template() && self.as_str() == other.as_str()
    }
}

impl Eq for Target {}

impl Hash for Target {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.is_uri_template().hash(state);
        self.as_str().hash(state);
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
