use crate::application::ports::util::SlugGenerator;
use slug::slugify;

/// `slug`-crate backed generator: lowercase ASCII words joined by `-`.
#[derive(Default, Clone)]
pub struct DefaultSlugGenerator;

impl SlugGenerator for DefaultSlugGenerator {
    fn slugify(&self, input: &str) -> String {
        slugify(input.trim())
    }
}
