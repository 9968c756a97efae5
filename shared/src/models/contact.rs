//! Contact and display helpers for a listing

use super::Listing;

impl Listing {
    /// Cover photo shown on listing cards
    pub fn cover_photo(&self) -> Option<&str> {
        self.photos.first().map(String::as_str)
    }

    /// `https://wa.me/<digits>` chat link, if a WhatsApp number was given
    pub fn whatsapp_link(&self) -> Option<String> {
        let number = self.whatsapp.as_deref()?;
        let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return None;
        }
        Some(format!("https://wa.me/{}", digits))
    }

    /// `tel:` link for the phone number
    pub fn phone_link(&self) -> Option<String> {
        let phone = self.phone.as_deref()?.trim();
        if phone.is_empty() {
            return None;
        }
        let dialable: String = phone
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        Some(format!("tel:{}", dialable))
    }
}
