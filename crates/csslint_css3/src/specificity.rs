use crate::node::{Selector, SelectorComponent, SelectorPart, SubPartKind};
use std::cmp::Ordering;
use std::fmt;

/// Selector specificity as (inline, ids, classes/attributes/pseudo-classes, elements/pseudo-elements).
/// The inline weight is always 0 for selectors.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Specificity(pub u32, pub u32, pub u32, pub u32);

impl Specificity {
    pub fn new(a: u32, b: u32, c: u32, d: u32) -> Self {
        Self(a, b, c, d)
    }

    /// Single number representation, only meaningful while every count stays below 10
    pub fn value(&self) -> u32 {
        self.0 * 1000 + self.1 * 100 + self.2 * 10 + self.3
    }

    pub fn parts(&self) -> [u32; 4] {
        [self.0, self.1, self.2, self.3]
    }

    fn update(&mut self, part: &SelectorPart) {
        if let Some(element) = &part.element_name {
            if !element.ends_with('*') {
                self.3 += 1;
            }
        }

        for modifier in &part.modifiers {
            match modifier.kind {
                SubPartKind::Class | SubPartKind::Attribute => self.2 += 1,
                SubPartKind::Id => self.1 += 1,
                SubPartKind::Pseudo => {
                    if is_pseudo_element(&modifier.text) {
                        self.3 += 1;
                    } else {
                        self.2 += 1;
                    }
                }
                SubPartKind::Not => {
                    for arg in &modifier.args {
                        self.update(arg);
                    }
                }
            }
        }
    }
}

impl From<&Selector> for Specificity {
    fn from(selector: &Selector) -> Self {
        Specificity::from(selector.parts.as_slice())
    }
}

impl From<&[SelectorComponent]> for Specificity {
    fn from(parts: &[SelectorComponent]) -> Self {
        let mut specificity = Specificity::default();
        for part in parts {
            if let SelectorComponent::Part(part) = part {
                specificity.update(part);
            }
        }
        specificity
    }
}

/// `::name` and the four CSS2 pseudo-elements that may still use a single colon
pub fn is_pseudo_element(text: &str) -> bool {
    if text.starts_with("::") {
        return true;
    }
    matches!(
        text.to_lowercase().as_str(),
        ":first-letter" | ":first-line" | ":before" | ":after"
    )
}

impl PartialOrd for Specificity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Specificity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .cmp(&other.0)
            .then(self.1.cmp(&other.1))
            .then(self.2.cmp(&other.2))
            .then(self.3.cmp(&other.3))
    }
}

impl fmt::Display for Specificity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.0, self.1, self.2, self.3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specificity_ordering() {
        let id = Specificity::new(0, 1, 0, 0);
        let class = Specificity::new(0, 0, 1, 0);
        let element = Specificity::new(0, 0, 0, 1);
        let universal = Specificity::new(0, 0, 0, 0);

        assert!(id > class);
        assert!(class > element);
        assert!(element > universal);
        assert!(Specificity::new(0, 0, 11, 0) > Specificity::new(0, 0, 10, 9));
        assert_eq!(Specificity::new(0, 1, 2, 0).value(), 120);
        assert_eq!(Specificity::new(0, 1, 2, 0).to_string(), "0,1,2,0");
    }

    #[test]
    fn pseudo_elements() {
        assert!(is_pseudo_element("::selection"));
        assert!(is_pseudo_element(":BEFORE"));
        assert!(is_pseudo_element(":first-line"));
        assert!(!is_pseudo_element(":hover"));
        assert!(!is_pseudo_element(":first-child"));
    }
}
