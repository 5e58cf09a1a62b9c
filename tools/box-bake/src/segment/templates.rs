//! Template document parsing
//!
//! ```xml
//! <templates>
//!   <template name="stone">
//!     <properties color="0.4 0.4 0.4" tile="3"/>
//!   </template>
//! </templates>
//! ```

use std::collections::HashMap;

use super::attributes::AttributeSet;
use crate::error::BakeError;

/// Named attribute sets boxes and segments can inherit from
#[derive(Debug, Clone, Default)]
pub struct Templates {
    sets: HashMap<String, AttributeSet>,
}

impl Templates {
    pub fn insert(&mut self, name: impl Into<String>, attributes: AttributeSet) {
        self.sets.insert(name.into(), attributes);
    }

    pub fn get(&self, name: &str) -> Option<&AttributeSet> {
        self.sets.get(name)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

/// Parse a templates document
pub fn parse_templates(xml: &str) -> Result<Templates, BakeError> {
    let doc = roxmltree::Document::parse(xml)?;
    let root = doc.root_element();

    if !root.has_tag_name("templates") {
        return Err(BakeError::parse(format!(
            "expected <templates> root element, found <{}>",
            root.tag_name().name()
        )));
    }

    let mut templates = Templates::default();

    for child in root.children().filter(|n| n.is_element()) {
        if !child.has_tag_name("template") {
            return Err(BakeError::parse(format!(
                "unexpected <{}> in templates document",
                child.tag_name().name()
            )));
        }

        let name = child
            .attribute("name")
            .ok_or_else(|| BakeError::parse("template without a name attribute"))?;

        let properties = child
            .children()
            .find(|n| n.is_element())
            .ok_or_else(|| BakeError::parse(format!("template '{name}' has no attribute element")))?;

        let set: AttributeSet = properties
            .attributes()
            .map(|a| (a.name().to_string(), a.value().to_string()))
            .collect();

        templates.insert(name, set);
    }

    tracing::debug!("Loaded {} templates", templates.len());

    Ok(templates)
}
