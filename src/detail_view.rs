// Detail View - one animal, by value
//
// Built from a copy of the selected animal. Later repository changes
// (even deleting this animal) do not reach an open detail view.

use crate::animal::Animal;

/// How the image is laid out inside its area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMode {
    /// Keep the aspect ratio, fit inside the area
    Fit,
    /// Fill the whole area
    Fill,
}

impl ContentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentMode::Fit => "fit",
            ContentMode::Fill => "fill",
        }
    }
}

#[derive(Debug, Clone)]
pub struct DetailView {
    animal: Animal,
    zoomed: bool,
}

impl DetailView {
    pub fn new(animal: Animal) -> Self {
        DetailView {
            animal,
            zoomed: false,
        }
    }

    pub fn animal(&self) -> &Animal {
        &self.animal
    }

    /// Navigation title, e.g. "Owl Details"
    pub fn title(&self) -> String {
        format!("{} Details", self.animal.name)
    }

    /// Tap on the image
    pub fn toggle_zoom(&mut self) {
        self.zoomed = !self.zoomed;
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoomed
    }

    pub fn content_mode(&self) -> ContentMode {
        if self.zoomed {
            ContentMode::Fill
        } else {
            ContentMode::Fit
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_defaults_to_fit() {
        let detail = DetailView::new(Animal::new("Owl", "Hoots"));

        assert!(!detail.is_zoomed());
        assert_eq!(detail.content_mode(), ContentMode::Fit);
        assert_eq!(detail.title(), "Owl Details");
    }

    #[test]
    fn test_toggle_zoom_round_trip() {
        let mut detail = DetailView::new(Animal::new("Owl", "Hoots"));
        let original = detail.content_mode();

        detail.toggle_zoom();
        assert_eq!(detail.content_mode(), ContentMode::Fill);

        detail.toggle_zoom();
        assert_eq!(detail.content_mode(), original);
    }

    #[test]
    fn test_zoom_is_per_instance() {
        let owl = Animal::new("Owl", "Hoots");
        let mut first = DetailView::new(owl.clone());
        let second = DetailView::new(owl);

        first.toggle_zoom();

        assert!(first.is_zoomed());
        assert!(!second.is_zoomed());
    }
}
