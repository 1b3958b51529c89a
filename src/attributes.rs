use crate::constants::AFFINITY_CAP;
use serde::{Deserialize, Serialize};

/// The five elemental channels a character can have affinity with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Element {
    Metal,
    Wood,
    Water,
    Fire,
    Earth,
}

impl Element {
    pub fn all() -> [Element; 5] {
        [
            Element::Metal,
            Element::Wood,
            Element::Water,
            Element::Fire,
            Element::Earth,
        ]
    }

    pub fn name(&self) -> &str {
        match self {
            Element::Metal => "Metal",
            Element::Wood => "Wood",
            Element::Water => "Water",
            Element::Fire => "Fire",
            Element::Earth => "Earth",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Element::Metal => 0,
            Element::Wood => 1,
            Element::Water => 2,
            Element::Fire => 3,
            Element::Earth => 4,
        }
    }
}

/// Elemental affinity values, one per channel, each in `0..=100`.
///
/// The highest channel feeds the cultivation speed formula; the others
/// only matter for technique compatibility in the presentation layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Affinities {
    values: [u32; 5],
}

impl Default for Affinities {
    fn default() -> Self {
        Self::new()
    }
}

impl Affinities {
    pub fn new() -> Self {
        Self { values: [10; 5] }
    }

    pub fn get(&self, element: Element) -> u32 {
        self.values[element.index()]
    }

    /// Sets a channel, clamped to the affinity cap.
    pub fn set(&mut self, element: Element, value: u32) {
        self.values[element.index()] = value.min(AFFINITY_CAP);
    }

    /// The strongest channel, used by the cultivation speed formula.
    pub fn highest(&self) -> u32 {
        self.values.iter().copied().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_affinities() {
        let affinities = Affinities::new();
        for element in Element::all() {
            assert_eq!(affinities.get(element), 10);
        }
    }

    #[test]
    fn test_get_set() {
        let mut affinities = Affinities::new();
        affinities.set(Element::Fire, 80);
        assert_eq!(affinities.get(Element::Fire), 80);
        assert_eq!(affinities.get(Element::Water), 10);
    }

    #[test]
    fn test_set_clamps_to_cap() {
        let mut affinities = Affinities::new();
        affinities.set(Element::Earth, 150);
        assert_eq!(affinities.get(Element::Earth), AFFINITY_CAP);
    }

    #[test]
    fn test_highest() {
        let mut affinities = Affinities::new();
        assert_eq!(affinities.highest(), 10);
        affinities.set(Element::Wood, 42);
        affinities.set(Element::Metal, 37);
        assert_eq!(affinities.highest(), 42);
    }

    #[test]
    fn test_element_names() {
        assert_eq!(Element::Metal.name(), "Metal");
        assert_eq!(Element::Wood.name(), "Wood");
        assert_eq!(Element::Water.name(), "Water");
        assert_eq!(Element::Fire.name(), "Fire");
        assert_eq!(Element::Earth.name(), "Earth");
    }
}
