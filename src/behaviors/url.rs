use super::*;

/// Domains accepted as valid product URL sources, matched anywhere in the
/// input. Deliberately permissive: this is a hint for the user, not a
/// security boundary.
pub const ALLOWED_DOMAIN_PATTERN: &str = r"(salla\.sa|salla\.com|zid\.store|zid\.sa)";

/// Message shown next to a URL field that matches no allowed domain.
pub const INVALID_URL_MESSAGE: &str = "URL must be from Salla or Zid platforms.";

/// Checks a URL field against the Salla/Zid allow-list and reflects the
/// result on the presentation surface.
#[derive(Debug, Clone)]
pub struct UrlValidator {
    domains: Pattern,
}

impl UrlValidator {
    pub fn new() -> Result<Self> {
        Ok(Self {
            domains: Pattern::case_insensitive(ALLOWED_DOMAIN_PATTERN)?,
        })
    }

    /// Validates the field's current value.
    ///
    /// Empty or whitespace-only input is "not yet filled in": no visual
    /// state changes at all. Otherwise the field becomes valid (and any
    /// adjacent error message is removed) or invalid (and exactly one
    /// error message with the fixed text follows the field). Repeated
    /// calls with the same input converge to the same surface state.
    pub fn validate<S: PresentationSurface>(&self, surface: &mut S, field: S::Handle) -> Result<()> {
        let raw = surface.field_value(field)?;
        let url = raw.trim();
        if url.is_empty() {
            return Ok(());
        }

        if self.domains.is_match(url)? {
            surface.set_validity_state(field, Validity::Valid)?;
            surface.remove_error_message(field)
        } else {
            surface.set_validity_state(field, Validity::Invalid)?;
            surface.ensure_error_message(field, INVALID_URL_MESSAGE)
        }
    }
}
