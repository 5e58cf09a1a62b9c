//! Attribute resolution
//!
//! An element's attribute is looked up on the element itself, then on the
//! template it names, then falls back to a typed default supplied by the
//! caller. Template sets never reference other templates.

use std::collections::HashMap;
use std::str::FromStr;

use glam::Vec3;

use super::Templates;
use crate::error::BakeError;

/// Attributes carried by one named template
pub type AttributeSet = HashMap<String, String>;

/// Typed view over an element's attributes and its template
#[derive(Clone, Copy)]
pub struct Attributes<'a, 'input> {
    node: roxmltree::Node<'a, 'input>,
    template: Option<&'a AttributeSet>,
}

impl<'a, 'input> Attributes<'a, 'input> {
    /// Resolve against the template named by the element's `template` attribute.
    /// An unknown template name behaves like no template at all.
    pub fn new(node: roxmltree::Node<'a, 'input>, templates: &'a Templates) -> Self {
        let template = node
            .attribute("template")
            .and_then(|name| templates.get(name));
        Self { node, template }
    }

    /// Raw attribute text: own value first, then the template's
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.node.attribute(name).or_else(|| {
            self.template
                .and_then(|set| set.get(name))
                .map(String::as_str)
        })
    }

    /// `visible="0"` hides the element; anything else (or nothing) shows it
    pub fn is_visible(&self) -> bool {
        self.get("visible").is_none_or(|v| v != "0")
    }

    pub fn float(&self, name: &str, default: f32) -> Result<f32, BakeError> {
        match self.get(name) {
            Some(text) => parse_float(name, text),
            None => Ok(default),
        }
    }

    /// Vector of up to three components; missing components are zero
    pub fn vector(&self, name: &str, default: Vec3) -> Result<Vec3, BakeError> {
        match self.get(name) {
            Some(text) => parse_vector(name, text),
            None => Ok(default),
        }
    }

    /// One colour (broadcast to every face pair) or three colours
    /// (right-left, top-bottom, front-back)
    pub fn colours(&self, name: &str, default: Vec3) -> Result<[Vec3; 3], BakeError> {
        match self.get(name) {
            Some(text) => parse_colours(name, text),
            None => Ok([default; 3]),
        }
    }

    /// One to three values; a short list repeats its last value
    pub fn triplet<T>(&self, name: &str, default: [T; 3]) -> Result<[T; 3], BakeError>
    where
        T: FromStr + Copy,
    {
        match self.get(name) {
            Some(text) => parse_triplet(name, text),
            None => Ok(default),
        }
    }
}

pub(crate) fn parse_numbers<T: FromStr>(name: &str, text: &str) -> Result<Vec<T>, BakeError> {
    text.split_whitespace()
        .map(|word| {
            word.parse::<T>().map_err(|_| {
                BakeError::parse(format!("attribute '{name}': invalid number '{word}'"))
            })
        })
        .collect()
}

pub(crate) fn parse_float(name: &str, text: &str) -> Result<f32, BakeError> {
    text.trim()
        .parse::<f32>()
        .map_err(|_| BakeError::parse(format!("attribute '{name}': invalid number '{text}'")))
}

fn parse_vector(name: &str, text: &str) -> Result<Vec3, BakeError> {
    let values = parse_numbers::<f32>(name, text)?;
    let mut v = Vec3::ZERO;
    for (i, value) in values.iter().take(3).enumerate() {
        v[i] = *value;
    }
    Ok(v)
}

fn parse_colours(name: &str, text: &str) -> Result<[Vec3; 3], BakeError> {
    let values = parse_numbers::<f32>(name, text)?;

    if values.len() >= 6 && values.len() % 3 == 0 {
        let colours: Vec<Vec3> = values.chunks_exact(3).map(Vec3::from_slice).collect();
        return match colours.as_slice() {
            [a, b, c] => Ok([*a, *b, *c]),
            _ => Err(BakeError::parse(format!(
                "attribute '{name}': expected 1 or 3 colours, found {}",
                colours.len()
            ))),
        };
    }

    let colour = parse_vector(name, text)?;
    Ok([colour; 3])
}

fn parse_triplet<T: FromStr + Copy>(name: &str, text: &str) -> Result<[T; 3], BakeError> {
    let values = parse_numbers::<T>(name, text)?;
    match values.as_slice() {
        [] => Err(BakeError::parse(format!(
            "attribute '{name}': expected 1 to 3 values"
        ))),
        [a] => Ok([*a, *a, *a]),
        [a, b] => Ok([*a, *b, *b]),
        [a, b, c, ..] => Ok([*a, *b, *c]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_box<F: FnOnce(Attributes)>(xml: &str, templates: &Templates, f: F) {
        let doc = roxmltree::Document::parse(xml).unwrap();
        f(Attributes::new(doc.root_element(), templates));
    }

    fn templates() -> Templates {
        let mut set = AttributeSet::new();
        set.insert("color".into(), "0.1 0.2 0.3".into());
        set.insert("tile".into(), "5".into());
        let mut templates = Templates::default();
        templates.insert("stone", set);
        templates
    }

    #[test]
    fn test_own_then_template_then_default() {
        let templates = templates();
        with_box(r#"<box template="stone" tile="7"/>"#, &templates, |attrs| {
            // own attribute wins over the template
            assert_eq!(attrs.triplet::<u32>("tile", [0; 3]).unwrap(), [7, 7, 7]);
            // template fills what the element lacks
            assert_eq!(
                attrs.colours("color", Vec3::ONE).unwrap(),
                [Vec3::new(0.1, 0.2, 0.3); 3]
            );
            // neither has it
            assert_eq!(attrs.float("glow", 0.0).unwrap(), 0.0);
        });
    }

    #[test]
    fn test_missing_template_uses_defaults() {
        let templates = templates();
        with_box(r#"<box template="nope"/>"#, &templates, |attrs| {
            assert_eq!(attrs.triplet::<u32>("tile", [3; 3]).unwrap(), [3, 3, 3]);
            assert!(attrs.is_visible());
        });
    }

    #[test]
    fn test_visibility() {
        let templates = Templates::default();
        with_box(r#"<box visible="0"/>"#, &templates, |attrs| {
            assert!(!attrs.is_visible())
        });
        with_box(r#"<box visible="1"/>"#, &templates, |attrs| {
            assert!(attrs.is_visible())
        });
    }

    #[test]
    fn test_triplet_expansion() {
        assert_eq!(parse_triplet::<i32>("tile", "4").unwrap(), [4, 4, 4]);
        assert_eq!(parse_triplet::<i32>("tile", "4 5").unwrap(), [4, 5, 5]);
        assert_eq!(parse_triplet::<i32>("tile", " 4  5 6 ").unwrap(), [4, 5, 6]);
        assert_eq!(parse_triplet::<f32>("tileSize", "0.5").unwrap(), [0.5; 3]);
        assert!(parse_triplet::<i32>("tile", "").is_err());
        assert!(parse_triplet::<i32>("tile", "1.5").is_err());
    }

    #[test]
    fn test_vector_parsing() {
        assert_eq!(
            parse_vector("pos", "0 -0.5 -8").unwrap(),
            Vec3::new(0.0, -0.5, -8.0)
        );
        assert_eq!(parse_vector("pos", "2").unwrap(), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(parse_vector("pos", "").unwrap(), Vec3::ZERO);
        assert!(matches!(
            parse_vector("pos", "1 x 3"),
            Err(BakeError::Parse(_))
        ));
    }

    #[test]
    fn test_colour_parsing() {
        let single = parse_colours("color", "0.3 0.9 0.3").unwrap();
        assert_eq!(single, [Vec3::new(0.3, 0.9, 0.3); 3]);

        let three = parse_colours("color", "1 0 0  0 1 0  0 0 1").unwrap();
        assert_eq!(three, [Vec3::X, Vec3::Y, Vec3::Z]);

        assert!(parse_colours("color", "1 0 0 0 1 0").is_err());
    }

    #[test]
    fn test_float_parsing() {
        assert_eq!(parse_float("glow", " 2.5 ").unwrap(), 2.5);
        assert!(parse_float("glow", "").is_err());
        assert!(parse_float("glow", "bright").is_err());
    }
}
