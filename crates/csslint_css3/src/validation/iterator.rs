use crate::node::{PropertyValue, PropertyValuePart};

/// Cursor over the parts of a property value. Matchers move it forward as they consume parts, and can
/// mark a position to return to when a speculative match fails.
#[derive(Debug, Clone)]
pub struct PropertyValueIterator<'a> {
    value: &'a PropertyValue,
    index: usize,
    marks: Vec<usize>,
}

impl<'a> PropertyValueIterator<'a> {
    pub fn new(value: &'a PropertyValue) -> Self {
        Self {
            value,
            index: 0,
            marks: Vec::new(),
        }
    }

    /// The complete value being iterated
    pub fn value(&self) -> &'a PropertyValue {
        self.value
    }

    /// Total number of parts
    pub fn len(&self) -> usize {
        self.value.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.parts.is_empty()
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn has_next(&self) -> bool {
        self.index < self.value.parts.len()
    }

    /// The part `offset` positions after the current one, `peek(0)` being the next part `next()` returns
    pub fn peek(&self, offset: usize) -> Option<&'a PropertyValuePart> {
        if !self.has_next() {
            return None;
        }
        self.value.parts.get(self.index + offset)
    }

    /// Steps back one part and returns it
    pub fn previous(&mut self) -> Option<&'a PropertyValuePart> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        self.value.parts.get(self.index)
    }

    pub fn mark(&mut self) {
        self.marks.push(self.index);
    }

    /// Returns to the most recent mark and removes it
    pub fn restore(&mut self) {
        if let Some(index) = self.marks.pop() {
            self.index = index;
        }
    }

    /// Removes the most recent mark without moving
    pub fn drop_mark(&mut self) {
        self.marks.pop();
    }
}

impl<'a> Iterator for PropertyValueIterator<'a> {
    type Item = &'a PropertyValuePart;

    fn next(&mut self) -> Option<Self::Item> {
        let part = self.value.parts.get(self.index)?;
        self.index += 1;
        Some(part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csslint_shared::reader::Location;

    fn value(texts: &[&str]) -> PropertyValue {
        let parts = texts
            .iter()
            .map(|t| PropertyValuePart::new(t, Location::default()))
            .collect();
        PropertyValue::new(parts, Location::default())
    }

    #[test]
    fn walks_forward_and_back() {
        let value = value(&["1px", "solid", "red"]);
        let mut it = PropertyValueIterator::new(&value);

        assert!(it.is_first());
        assert_eq!(it.len(), 3);
        assert_eq!(it.peek(0).map(|p| p.text.as_str()), Some("1px"));
        assert_eq!(it.peek(2).map(|p| p.text.as_str()), Some("red"));
        assert_eq!(it.peek(3), None);

        assert_eq!(it.next().map(|p| p.text.as_str()), Some("1px"));
        assert!(!it.is_first());
        assert_eq!(it.previous().map(|p| p.text.as_str()), Some("1px"));
        assert_eq!(it.previous(), None);
    }

    #[test]
    fn marks() {
        let value = value(&["a", "b", "c"]);
        let mut it = PropertyValueIterator::new(&value);

        it.next();
        it.mark();
        it.next();
        it.next();
        assert!(!it.has_next());
        assert_eq!(it.peek(0), None);

        it.restore();
        assert_eq!(it.peek(0).map(|p| p.text.as_str()), Some("b"));

        it.mark();
        it.next();
        it.drop_mark();
        it.restore();
        assert_eq!(it.peek(0).map(|p| p.text.as_str()), Some("c"));
    }
}
