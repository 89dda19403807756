use std::collections::HashMap;

use crate::color::Color;

/// Ordered texture name -> color mapping
/// Iteration follows insertion order (the scanner's file name order).
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    entries: Vec<(String, Color)>,
    index: HashMap<String, usize>,
}

impl ColorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a texture's color
    /// A replaced entry keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, color: Color) {
        let name = name.into();
        match self.index.get(&name) {
            Some(&i) => self.entries[i].1 = color,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, color));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<Color> {
        self.index.get(name).map(|&i| self.entries[i].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Color)> {
        self.entries.iter().map(|(name, color)| (name.as_str(), *color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order() {
        let mut map = ColorMap::new();
        map.insert("stone", Color::new(1, 2, 3, 255));
        map.insert("dirt", Color::new(4, 5, 6, 255));
        map.insert("acacia_log", Color::TRANSPARENT);

        let names: Vec<_> = map.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["stone", "dirt", "acacia_log"]);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut map = ColorMap::new();
        map.insert("a", Color::new(1, 1, 1, 1));
        map.insert("b", Color::new(2, 2, 2, 2));
        map.insert("a", Color::new(9, 9, 9, 9));

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(Color::new(9, 9, 9, 9)));
        assert_eq!(map.iter().next(), Some(("a", Color::new(9, 9, 9, 9))));
    }

    #[test]
    fn test_missing_name() {
        let map = ColorMap::new();
        assert!(map.is_empty());
        assert!(!map.contains("stone"));
        assert_eq!(map.get("stone"), None);
    }
}
