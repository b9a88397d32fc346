/// Full-image overlay opened from the detail view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lightbox {
    open: Option<LightboxContent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxContent {
    pub url: String,
    pub title: String,
}

impl Lightbox {
    /// Nothing opens without a URL.
    pub fn open(&mut self, url: Option<String>, title: impl Into<String>) -> bool {
        match url.filter(|u| !u.trim().is_empty()) {
            Some(url) => {
                self.open = Some(LightboxContent {
                    url,
                    title: title.into(),
                });
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self) -> bool {
        self.open.take().is_some()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn content(&self) -> Option<&LightboxContent> {
        self.open.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_only_with_a_url() {
        let mut lightbox = Lightbox::default();
        assert!(!lightbox.open(None, "Nothing"));
        assert!(!lightbox.open(Some("  ".into()), "Blank"));
        assert!(!lightbox.is_open());

        assert!(lightbox.open(Some("https://media.example/full.png".into()), "Full"));
        assert_eq!(lightbox.content().unwrap().title, "Full");
        assert!(lightbox.close());
        assert!(!lightbox.close());
    }
}
