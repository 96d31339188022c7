//! Shared helpers for reading host objects.

use extlink_rewrite::PageContext;
use serde_json::Value as JsonValue;

/// Pulls the bits of a host page object that are useful in log messages.
///
/// Accepts `{ url, srcPath }`, `{ url, src_path }`, or `{ file: { src_path } }`;
/// anything else yields an empty context.
pub(crate) fn page_context(page: Option<&JsonValue>) -> PageContext {
    let Some(page) = page.filter(|p| p.is_object()) else {
        return PageContext::default();
    };

    let string_at = |value: &JsonValue, key: &str| {
        value
            .get(key)
            .and_then(JsonValue::as_str)
            .map(str::to_string)
    };

    let source_path = string_at(page, "srcPath")
        .or_else(|| string_at(page, "src_path"))
        .or_else(|| page.get("file").and_then(|file| string_at(file, "src_path")));

    PageContext {
        url: string_at(page, "url"),
        source_path,
    }
}

#[cfg(test)]
mod tests {
    use super::page_context;
    use serde_json::json;

    #[test]
    fn reads_camel_and_snake_case_paths() {
        let page = json!({ "url": "/a/", "srcPath": "a.md" });
        let ctx = page_context(Some(&page));
        assert_eq!(ctx.url.as_deref(), Some("/a/"));
        assert_eq!(ctx.source_path.as_deref(), Some("a.md"));

        let page = json!({ "file": { "src_path": "b.md" } });
        assert_eq!(page_context(Some(&page)).source_path.as_deref(), Some("b.md"));
    }

    #[test]
    fn non_objects_give_empty_context() {
        assert_eq!(page_context(None).label(), "<page>");
        assert_eq!(page_context(Some(&json!("page"))).label(), "<page>");
    }
}
