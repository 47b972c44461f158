use std::collections::VecDeque;

/// What the page shows for one successful registration. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryCard {
    pub image_url: String,
    pub owner_name: String,
    pub pet_name: String,
    pub age: String,
}

impl GalleryCard {
    pub fn to_html(&self) -> String {
        format!(
            "<div class=\"photo-card\">\
             <img src=\"{}\" alt=\"Pet image\">\
             <p><strong>Owner:</strong> {}</p>\
             <p><strong>Name:</strong> {}</p>\
             <p><strong>Age:</strong> {}</p>\
             </div>",
            escape_html(&self.image_url),
            escape_html(&self.owner_name),
            escape_html(&self.pet_name),
            escape_html(&self.age)
        )
    }
}

/// Newest card first.
#[derive(Debug, Default, Clone)]
pub struct Gallery {
    cards: VecDeque<GalleryCard>,
}

impl Gallery {
    pub fn prepend(&mut self, card: GalleryCard) {
        self.cards.push_front(card);
    }

    pub fn first(&self) -> Option<&GalleryCard> {
        self.cards.front()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn to_html(&self) -> String {
        self.cards.iter().map(GalleryCard::to_html).collect()
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(pet: &str) -> GalleryCard {
        GalleryCard {
            image_url: format!("https://storage.test/{}.png", pet),
            owner_name: "Ana".to_string(),
            pet_name: pet.to_string(),
            age: "2".to_string(),
        }
    }

    #[test]
    fn test_prepend_puts_newest_first() {
        let mut gallery = Gallery::default();
        gallery.prepend(card("Toby"));
        gallery.prepend(card("Luna"));

        assert_eq!(gallery.len(), 2);
        assert_eq!(gallery.first().unwrap().pet_name, "Luna");
        assert!(gallery.to_html().find("Luna").unwrap() < gallery.to_html().find("Toby").unwrap());
    }

    #[test]
    fn test_card_html() {
        let html = card("Toby").to_html();
        assert!(html.starts_with("<div class=\"photo-card\">"));
        assert!(html.contains("<img src=\"https://storage.test/Toby.png\" alt=\"Pet image\">"));
        assert!(html.contains("<p><strong>Owner:</strong> Ana</p>"));
        assert!(html.contains("<p><strong>Name:</strong> Toby</p>"));
        assert!(html.contains("<p><strong>Age:</strong> 2</p>"));
    }

    #[test]
    fn test_card_text_is_escaped() {
        let mut c = card("Toby");
        c.owner_name = "<script>alert(1)</script>".to_string();
        c.image_url = "https://x.test/a.png?a=1&b=\"2\"".to_string();

        let html = c.to_html();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a=1&amp;b=&quot;2&quot;"));
    }
}
