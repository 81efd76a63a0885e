//! Document engines: structure and cross-references from non-code files.
//!
//! Documents carry real graph signal (a README that links to a design doc,
//! a package manifest that names dependencies), so they get engines of
//! their own instead of being skipped.

pub mod html;
pub mod markdown;
pub mod text;
pub mod yaml;

use std::sync::Arc;
use symgraph_core::ParseEngine;

/// All document engines, one instance each.
pub fn all_engines() -> Vec<Arc<dyn ParseEngine>> {
    vec![
        Arc::new(markdown::MarkdownEngine),
        Arc::new(html::HtmlEngine),
        Arc::new(yaml::YamlEngine),
        Arc::new(text::TextEngine),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engines_cover_their_extensions() {
        let engines = all_engines();
        let mut languages: Vec<String> =
            engines.iter().map(|e| e.language().to_string()).collect();
        languages.sort();
        assert_eq!(languages, vec!["html", "markdown", "text", "yaml"]);
    }
}
