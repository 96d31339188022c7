//! Page-level link annotation on top of lol_html.

use crate::handlers::LinkHandlers;
use extlink_core::LinkConfig;
use lol_html::errors::RewritingError;
use lol_html::{RewriteStrSettings, rewrite_str};
use std::cell::RefCell;
use thiserror::Error;

/// Errors surfaced by [`try_annotate`].
#[derive(Debug, Error)]
pub enum AnnotateError {
    /// lol_html stopped rewriting the document.
    #[error("HTML rewrite failed: {0}")]
    Rewrite(#[from] RewritingError),
}

/// Per-page counters collected while annotating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    /// Anchors carrying an `href` attribute.
    pub anchors: usize,
    /// Anchors skipped because their `href` was empty.
    pub empty_href: usize,
    /// Anchors classified as external.
    pub external: usize,
    /// External anchors that received the class (the rest already had it).
    pub classes_added: usize,
}

impl LinkStats {
    /// Adds the counters of a nested fragment.
    pub fn add(&mut self, other: LinkStats) {
        self.anchors += other.anchors;
        self.empty_href += other.empty_href;
        self.external += other.external;
        self.classes_added += other.classes_added;
    }
}

/// Output of a successful annotation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotated {
    /// Rewritten HTML.
    pub html: String,
    /// Counters for the page.
    pub stats: LinkStats,
}

/// Annotates external links in `html`. Never fails.
///
/// If the rewriter reports an error the input is returned unchanged and the
/// error is logged.
///
/// ```
/// use extlink_core::LinkConfig;
/// use extlink_rewrite::annotate;
///
/// let html = annotate(r#"<a href="https://example.com">x</a>"#, &LinkConfig::default());
/// assert_eq!(html, r#"<a href="https://example.com" class="external">x</a>"#);
/// ```
pub fn annotate(html: &str, config: &LinkConfig) -> String {
    match try_annotate(html, config) {
        Ok(annotated) => annotated.html,
        Err(err) => {
            log::warn!("extlink: leaving page unchanged: {}", err);
            html.to_string()
        }
    }
}

/// Annotates external links in `html`, returning the output with counters.
pub fn try_annotate(html: &str, config: &LinkConfig) -> Result<Annotated, AnnotateError> {
    if !has_anchor_tag(html) {
        return Ok(Annotated {
            html: html.to_string(),
            stats: LinkStats::default(),
        });
    }

    let stats = RefCell::new(LinkStats::default());
    let output = {
        let handlers = LinkHandlers::for_config(config, &stats);
        rewrite_str(
            html,
            RewriteStrSettings {
                element_content_handlers: handlers.into_vec(),
                // Ambiguous markup (e.g. `<xmp>` inside `<select>`) must not abort the page.
                strict: false,
                ..RewriteStrSettings::new()
            },
        )?
    };

    Ok(Annotated {
        html: output,
        stats: stats.into_inner(),
    })
}

/// Cheap scan for `<a` followed by whitespace, `>` or `/`, in any case.
fn has_anchor_tag(html: &str) -> bool {
    let bytes = html.as_bytes();
    bytes.windows(3).any(|w| {
        w[0] == b'<'
            && (w[1] == b'a' || w[1] == b'A')
            && (w[2].is_ascii_whitespace() || w[2] == b'>' || w[2] == b'/')
    })
}

/// Owns a configuration and annotates pages with it.
#[derive(Debug, Clone, Default)]
pub struct LinkAnnotator {
    config: LinkConfig,
}

impl LinkAnnotator {
    /// Creates an annotator for `config`.
    pub fn new(config: LinkConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// See [`annotate`].
    pub fn annotate(&self, html: &str) -> String {
        annotate(html, &self.config)
    }

    /// See [`try_annotate`].
    pub fn try_annotate(&self, html: &str) -> Result<Annotated, AnnotateError> {
        try_annotate(html, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_config() -> LinkConfig {
        LinkConfig::default()
            .with_class_name("ext")
            .with_target("_blank")
            .with_rel(["noopener"])
    }

    #[test]
    fn appends_class_to_external_link() {
        let out = annotate(
            r#"<a href="https://example.com">x</a>"#,
            &LinkConfig::default(),
        );
        assert_eq!(out, r#"<a href="https://example.com" class="external">x</a>"#);
    }

    #[test]
    fn leaves_local_link_untouched() {
        let input = r#"<a href="/local/page">x</a>"#;
        assert_eq!(annotate(input, &LinkConfig::default()), input);
    }

    #[test]
    fn keeps_existing_classes_in_order() {
        let out = annotate(
            r#"<a class="foo" href="http://x.com">x</a>"#,
            &scenario_config(),
        );
        assert_eq!(
            out,
            r#"<a class="foo ext" href="http://x.com" target="_blank" rel="noopener">x</a>"#
        );
    }

    #[test]
    fn does_not_duplicate_existing_class() {
        let input = r#"<a class="external" href="https://example.com">x</a>"#;
        let annotated = try_annotate(input, &LinkConfig::default()).unwrap();
        assert_eq!(annotated.html, input);
        assert_eq!(annotated.stats.external, 1);
        assert_eq!(annotated.stats.classes_added, 0);
    }

    #[test]
    fn target_and_rel_apply_to_internal_links_too() {
        let out = annotate(r#"<a href="/docs/">docs</a>"#, &scenario_config());
        assert_eq!(
            out,
            r#"<a href="/docs/" target="_blank" rel="noopener">docs</a>"#
        );
    }

    #[test]
    fn target_and_rel_overwrite_existing_values() {
        let out = annotate(
            r#"<a href="https://x.com" target="_self" rel="nofollow">x</a>"#,
            &scenario_config(),
        );
        assert!(out.contains(r#"target="_blank""#), "{out}");
        assert!(out.contains(r#"rel="noopener""#), "{out}");
        assert!(!out.contains("_self"), "{out}");
        assert!(!out.contains("nofollow"), "{out}");
    }

    #[test]
    fn anchors_without_href_are_untouched() {
        let input = r#"<a name="top">anchor</a><a id="x" class="foo">y</a>"#;
        let annotated = try_annotate(input, &scenario_config()).unwrap();
        assert_eq!(annotated.html, input);
        assert_eq!(annotated.stats.anchors, 0);
    }

    #[test]
    fn empty_href_is_skipped() {
        let input = r#"<a href="">x</a>"#;
        let annotated = try_annotate(input, &scenario_config()).unwrap();
        assert_eq!(annotated.html, input);
        assert_eq!(annotated.stats.anchors, 1);
        assert_eq!(annotated.stats.empty_href, 1);
    }

    #[test]
    fn counts_links_in_document_order() {
        let input = concat!(
            r#"<p><a href="https://a.com">a</a> <a href="/b">b</a> "#,
            r#"<a class="external" href="mailto:c@d.com">c</a></p>"#
        );
        let annotated = try_annotate(input, &LinkConfig::default()).unwrap();
        assert_eq!(
            annotated.stats,
            LinkStats {
                anchors: 3,
                empty_href: 0,
                external: 2,
                classes_added: 1,
            }
        );
    }

    #[test]
    fn no_anchor_fast_path_returns_input() {
        let input = "<p>hi</p><abbr title=\"x\">x</abbr>";
        assert!(!has_anchor_tag(input));
        assert_eq!(annotate(input, &scenario_config()), input);
    }

    #[test]
    fn detects_uppercase_anchor_tags() {
        assert!(has_anchor_tag("<A HREF=\"https://x.com\">x</A>"));
        assert!(has_anchor_tag("<a\nhref=x>"));
    }

    #[test]
    fn tolerates_malformed_markup() {
        for input in [
            "",
            "<a href=\"https://x.com\">unclosed",
            "<a href=https://x.com><p><div>",
            "<<<>>> <a <a href=\"",
            "\u{0}\u{1}garbage<\u{7f}a>",
        ] {
            let out = annotate(input, &scenario_config());
            assert_eq!(annotate(&out, &scenario_config()), out, "input: {input:?}");
        }
    }

    #[test]
    fn malformed_pages_still_get_annotated() {
        for input in [
            "<a href=\"https://x.com\">unclosed",
            "<a href=https://x.com><p><div>",
            "<table><a href=\"https://x.com\">x</a><tr><td>",
        ] {
            let annotated = try_annotate(input, &LinkConfig::default()).expect("rewrite succeeds");
            assert_eq!(annotated.stats.external, 1, "input: {input:?}");
            assert!(annotated.html.contains(r#"class="external""#), "input: {input:?}");
        }
    }

    #[test]
    fn ambiguous_text_content_tags_do_not_abort_rewriting() {
        let input = concat!(
            r#"<a href="https://a.com">a</a>"#,
            "<select><xmp>\"use strict\";</xmp></select>",
            r#"<a href="https://x.com">x</a>"#
        );
        let annotated = try_annotate(input, &LinkConfig::default()).expect("rewrite succeeds");
        assert_eq!(annotated.stats.external, 2);
        assert_eq!(annotated.html.matches(r#"class="external""#).count(), 2);
        assert_eq!(annotate(input, &LinkConfig::default()), annotated.html);
    }

    #[test]
    fn entity_encoded_mailto_is_external() {
        // Markdown automail output: "mailto:foo@bar.com" as decimal references.
        let href = "mailto:foo@bar.com"
            .chars()
            .map(|c| format!("&#{};", c as u32))
            .collect::<String>();
        let input = format!(r#"<a href="{href}">foo@bar.com</a>"#);
        let annotated = try_annotate(&input, &LinkConfig::default()).unwrap();
        assert_eq!(annotated.stats.external, 1);
        assert_eq!(
            annotated.html,
            format!(r#"<a href="{href}" class="external">foo@bar.com</a>"#)
        );
    }

    #[test]
    fn partially_encoded_scheme_is_external() {
        let out = annotate(r#"<a href="&#104;ttps://x.com">x</a>"#, &LinkConfig::default());
        assert!(out.contains(r#"class="external""#), "{out}");
    }

    #[test]
    fn encoded_class_tokens_are_compared_decoded() {
        let config = LinkConfig::default().with_class_name("a&b");
        let input = r#"<a class="a&amp;b" href="https://x.com">x</a>"#;
        let annotated = try_annotate(input, &config).unwrap();
        assert_eq!(annotated.stats.classes_added, 0);
        assert_eq!(annotated.html, input);

        let out = annotate(r#"<a class="x" href="https://x.com">x</a>"#, &config);
        assert!(out.contains(r#"class="x a&amp;b""#), "{out}");
        assert_eq!(annotate(&out, &config), out);
    }

    #[test]
    fn anchors_inside_noscript_are_annotated() {
        let input = concat!(
            r#"<p><a href="https://a.com">a</a></p>"#,
            r#"<noscript><a href="https://y.com">n</a> <a href="/local">l</a></noscript>"#
        );
        let annotated = try_annotate(input, &scenario_config()).unwrap();
        assert_eq!(
            annotated.html,
            concat!(
                r#"<p><a href="https://a.com" class="ext" target="_blank" rel="noopener">a</a></p>"#,
                r#"<noscript><a href="https://y.com" class="ext" target="_blank" rel="noopener">n</a> "#,
                r#"<a href="/local" target="_blank" rel="noopener">l</a></noscript>"#
            )
        );
        assert_eq!(annotated.stats.anchors, 3);
        assert_eq!(annotated.stats.external, 2);
        assert_eq!(annotate(&annotated.html, &scenario_config()), annotated.html);
    }

    #[test]
    fn unquoted_href_is_classified() {
        let out = annotate("<a href=https://x.com>x</a>", &LinkConfig::default());
        assert!(out.contains(r#"class="external""#), "{out}");
    }

    #[test]
    fn annotator_is_idempotent() {
        let annotator = LinkAnnotator::new(scenario_config());
        let input = r#"<ul><li><a href="https://a.com" class="x">a</a></li><li><a href="tel:123">t</a></li></ul>"#;
        let once = annotator.annotate(input);
        let twice = annotator.annotate(&once);
        assert_eq!(once, twice);
        assert_eq!(once.matches("ext").count(), 2);
    }
}
