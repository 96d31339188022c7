use extlink_rewrite::{LinkConfig, LinkHandlers, LinkStats, annotate, try_annotate};
use lol_html::{RewriteStrSettings, element, rewrite_str};
use serde_json::json;
use std::cell::RefCell;

fn scenario_three_config() -> LinkConfig {
    let (config, diagnostics) = LinkConfig::from_options(&json!({
        "class_name": "ext",
        "target": "_blank",
        "rel": ["noopener"],
    }));
    assert!(!diagnostics.has_warnings());
    config
}

#[test]
fn https_link_gets_default_class_only() {
    let out = annotate(
        r#"<a href="https://example.com">x</a>"#,
        &LinkConfig::default(),
    );
    insta::assert_snapshot!(out, @r#"<a href="https://example.com" class="external">x</a>"#);
}

#[test]
fn local_link_is_unchanged() {
    let out = annotate(r#"<a href="/local/page">x</a>"#, &LinkConfig::default());
    insta::assert_snapshot!(out, @r#"<a href="/local/page">x</a>"#);
}

#[test]
fn configured_class_target_and_rel() {
    let out = annotate(
        r#"<a class="foo" href="http://x.com">x</a>"#,
        &scenario_three_config(),
    );
    insta::assert_snapshot!(out, @r#"<a class="foo ext" href="http://x.com" target="_blank" rel="noopener">x</a>"#);
}

#[test]
fn mailto_is_external_by_default() {
    let (config, _) = LinkConfig::from_options(&json!({ "additional_schemes": [] }));
    let out = annotate(r#"<a href="mailto:a@b.com">x</a>"#, &config);
    insta::assert_snapshot!(out, @r#"<a href="mailto:a@b.com" class="external">x</a>"#);
}

#[test]
fn document_without_anchors_is_unchanged() {
    let out = annotate("<p>hi</p>", &scenario_three_config());
    insta::assert_snapshot!(out, @"<p>hi</p>");
}

#[test]
fn uppercase_scheme_is_not_external() {
    let input = r#"<a href="HTTPS://EXAMPLE.COM">x</a>"#;
    assert_eq!(annotate(input, &LinkConfig::default()), input);
}

#[test]
fn surrounding_markup_is_preserved() {
    let input = concat!(
        "<!-- nav -->\n<nav class='site'>\n",
        "  <a href='/'>Home</a>\n",
        "  <a href='https://github.com/org/repo'>Source</a>\n",
        "</nav>\n<pre><code>&lt;a href=\"https://not.a.link\"&gt;</code></pre>\n"
    );
    let out = annotate(input, &LinkConfig::default());
    assert!(out.starts_with("<!-- nav -->\n<nav class='site'>\n  <a href='/'>Home</a>\n"));
    assert!(out.contains(r#"<a href='https://github.com/org/repo' class="external">Source</a>"#));
    assert!(out.ends_with("<pre><code>&lt;a href=\"https://not.a.link\"&gt;</code></pre>\n"));
}

#[test]
fn applying_twice_equals_applying_once() {
    let config = scenario_three_config().with_additional_schemes(["irc://"]);
    let input = concat!(
        r#"<article><a href="https://a.com" class="ext">a</a>"#,
        r#"<a href="irc://libera.chat">b</a><a name="top">c</a>"#,
        r#"<a href="../local.html" rel="prev">d</a></article>"#
    );
    let once = annotate(input, &config);
    let twice = annotate(&once, &config);
    assert_eq!(once, twice);
    assert_eq!(once.matches(r#"target="_blank""#).count(), 3);
    assert!(once.contains(r#"<a name="top">c</a>"#));
}

#[test]
fn handlers_combine_with_host_rewriting() {
    let config = LinkConfig::default();
    let stats = RefCell::new(LinkStats::default());
    let mut handlers = LinkHandlers::for_config(&config, &stats);
    handlers.push(element!("img", |el| {
        el.set_attribute("loading", "lazy")?;
        Ok(())
    }));
    assert_eq!(handlers.len(), 3);

    let out = rewrite_str(
        r#"<a href="https://x.com"><img src="x.png"></a>"#,
        RewriteStrSettings {
            element_content_handlers: handlers.into_vec(),
            ..RewriteStrSettings::new()
        },
    )
    .expect("rewrite succeeds");

    assert_eq!(
        out,
        r#"<a href="https://x.com" class="external"><img src="x.png" loading="lazy"></a>"#
    );
    assert_eq!(stats.into_inner().external, 1);
}

#[test]
fn stats_report_each_page_independently() {
    let config = LinkConfig::default();
    let first = try_annotate(r#"<a href="https://a.com">a</a>"#, &config).unwrap();
    let second = try_annotate(r#"<a href="/b">b</a>"#, &config).unwrap();
    assert_eq!(first.stats.external, 1);
    assert_eq!(second.stats.external, 0);
    assert_eq!(second.stats.anchors, 1);
}

#[test]
fn target_is_written_as_configured() {
    let config = LinkConfig::default().with_target("_blank ");
    let out = annotate(r#"<a href="/a">a</a>"#, &config);
    insta::assert_snapshot!(out, @r#"<a href="/a" target="_blank ">a</a>"#);

    let blank = LinkConfig::default().with_target("  ");
    let input = r#"<a href="/a">a</a>"#;
    assert_eq!(annotate(input, &blank), input);
}

#[test]
fn preferred_class_alias_wins_over_legacy_key() {
    let (config, _) = LinkConfig::from_options(&json!({
        "external_link_class_name": "legacy",
        "class_name": "preferred",
    }));
    let out = annotate(r#"<a href="https://x.com">x</a>"#, &config);
    insta::assert_snapshot!(out, @r#"<a href="https://x.com" class="preferred">x</a>"#);
}
