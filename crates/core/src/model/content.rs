use serde::{Deserialize, Serialize};

use super::expansion::ItemId;
use super::phase::PhaseName;

/// One entry of a detail panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub tag: Option<String>,
    pub body: String,
}

/// Static content of a phase's detail panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub phase: PhaseName,
    pub heading: String,
    #[serde(default)]
    pub subheading: String,
    pub items: Vec<ContentItem>,
}

impl Panel {
    pub fn item(&self, id: &str) -> Option<&ContentItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Item at a 1-based position, as picked with the number keys.
    pub fn nth(&self, position: usize) -> Option<&ContentItem> {
        position.checked_sub(1).and_then(|i| self.items.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> Panel {
        Panel {
            phase: PhaseName::Brands,
            heading: "BRANDS".into(),
            subheading: String::new(),
            items: vec![
                ContentItem {
                    id: "aether-systems".into(),
                    title: "AETHER SYSTEMS".into(),
                    tag: Some("SaaS".into()),
                    body: "Data visualization as a habitable environment.".into(),
                },
                ContentItem {
                    id: "echo-sound".into(),
                    title: "ECHO SOUND".into(),
                    tag: None,
                    body: "Audio spatialization for immersive narrative.".into(),
                },
            ],
        }
    }

    #[test]
    fn lookup_by_id_and_position() {
        let p = panel();
        assert_eq!(p.item("echo-sound").map(|i| i.title.as_str()), Some("ECHO SOUND"));
        assert!(p.item("missing").is_none());
        assert_eq!(p.nth(1).map(|i| i.id.as_str()), Some("aether-systems"));
        assert!(p.nth(0).is_none());
        assert!(p.nth(3).is_none());
    }
}
