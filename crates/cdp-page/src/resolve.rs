//! Text-locator resolution: tag matching elements in the page with a
//! one-shot attribute token, then select on the token.

use uuid::Uuid;

pub const ANCHOR_ATTR: &str = "data-listcheck-anchor";

pub struct TextTag {
    pub script: String,
    pub selector: String,
}

/// Build the tagging expression for a page-wide text match. Only innermost
/// matches are tagged, so a container does not shadow the control it wraps.
/// Returns the matched-element count when evaluated.
pub fn tag_by_text(content: &str, exact: bool) -> TextTag {
    let token = format!("text-{}", Uuid::new_v4().simple());
    let script = format!(
        r#"(() => {{
            const target = {target}.trim().toLowerCase();
            const attr = {attr};
            const token = {token};
            const exact = {exact};
            const textOf = (el) => ((el.innerText || el.textContent || '')).trim().toLowerCase();
            const hits = [];
            for (const el of document.querySelectorAll('body *')) {{
                const value = textOf(el);
                if (!value) continue;
                if (exact ? value === target : value.includes(target)) {{
                    hits.push(el);
                }}
            }}
            const innermost = hits.filter(el => !hits.some(other => other !== el && el.contains(other)));
            for (const el of innermost) {{
                el.setAttribute(attr, token);
            }}
            return innermost.length;
        }})()"#,
        target = serde_json::to_string(content).unwrap(),
        attr = serde_json::to_string(ANCHOR_ATTR).unwrap(),
        token = serde_json::to_string(&token).unwrap(),
        exact = if exact { "true" } else { "false" },
    );
    TextTag {
        script,
        selector: format!("[{ANCHOR_ATTR}=\"{token}\"]"),
    }
}

/// Same tagging restricted to the subtree of the element bound to `this`;
/// shaped as a function declaration for `callFunctionOn`.
pub fn tag_by_text_scoped(content: &str, exact: bool) -> TextTag {
    let token = format!("text-{}", Uuid::new_v4().simple());
    let script = format!(
        r#"function() {{
            const target = {target}.trim().toLowerCase();
            const attr = {attr};
            const token = {token};
            const exact = {exact};
            const textOf = (el) => ((el.innerText || el.textContent || '')).trim().toLowerCase();
            const hits = [];
            for (const el of this.querySelectorAll('*')) {{
                const value = textOf(el);
                if (!value) continue;
                if (exact ? value === target : value.includes(target)) {{
                    hits.push(el);
                }}
            }}
            const innermost = hits.filter(el => !hits.some(other => other !== el && el.contains(other)));
            for (const el of innermost) {{
                el.setAttribute(attr, token);
            }}
            return innermost.length;
        }}"#,
        target = serde_json::to_string(content).unwrap(),
        attr = serde_json::to_string(ANCHOR_ATTR).unwrap(),
        token = serde_json::to_string(&token).unwrap(),
        exact = if exact { "true" } else { "false" },
    );
    TextTag {
        script,
        selector: format!("[{ANCHOR_ATTR}=\"{token}\"]"),
    }
}
