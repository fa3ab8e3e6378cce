//! Row Rendering
//!
//! Row templating and the adapter over the virtual list widget. The widget
//! only materializes visible rows; it is always handed the full content.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::category::Category;
use crate::category_list::CategoryList;
use crate::models::Changeset;
use crate::predicate::MatchField;

/// Characters `encodeURIComponent` leaves untouched
const COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Pre-rendered HTML for one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow(String);

impl RenderedRow {
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A virtualizing list widget
pub trait VirtualList {
    /// Replace the displayed content and re-render the visible viewport
    fn update(&self, rows: &[RenderedRow]);
}

/// Single mutation entry point for one category's widget
pub struct RenderAdapter<W> {
    category: Category,
    widget: W,
}

impl<W: VirtualList> RenderAdapter<W> {
    pub fn new(category: Category, widget: W) -> Self {
        Self { category, widget }
    }

    /// Push the complete content of `list` to the widget
    pub fn replace(&self, list: &CategoryList) {
        debug_assert_eq!(list.category(), self.category);
        self.widget.update(list.rows());
    }
}

/// Renders a changeset into a draggable card
#[derive(Debug, Clone)]
pub struct RowTemplate {
    osm_url: String,
}

impl RowTemplate {
    pub fn new(osm_url: impl Into<String>) -> Self {
        let mut osm_url = osm_url.into();
        while osm_url.ends_with('/') {
            osm_url.pop();
        }
        Self { osm_url }
    }

    pub fn render(&self, cs: &Changeset) -> RenderedRow {
        let user = escape_html(&cs.user);
        let comment = escape_html(&cs.comment);
        let user_path = utf8_percent_encode(&cs.user, COMPONENT_ENCODE_SET);

        let mut prefix = String::new();
        if cs.deleted {
            prefix.push_str(r#"<span title="Deleted account">☠️</span>"#);
        }
        if cs.blocked {
            prefix.push_str(r#"<span title="Blocked user">🚫</span>"#);
        }

        let user_buttons = move_buttons(MatchField::Author);
        let comment_buttons = move_buttons(MatchField::Comment);

        RenderedRow::new(format!(
            r#"<div class="changeset-item py-1" data-id="{id}" draggable="true">
    <div class="card">
        <div class="card-body">
            <div class="row g-1">
                <div class="col-10">
                    <h6 class="card-title header mb-1">
                        <a href="{osm}/changeset/{id}" target="_blank">#{id}</a>
                        by
                        {prefix}
                        <a href="{osm}/user/{user_path}" target="_blank">{user}</a>
                    </h6>
                    <p class="comment mb-0" title="{comment}">{comment}</p>
                </div>
                <div class="col-2 text-end">
                    <div class="micro" title="Auto-move {user} user">
                        <span class="font-monospace">{u}</span>
                        {user_buttons}
                    </div>
                    <div class="micro" title="Auto-move '{comment}' comment">
                        <span class="font-monospace">{c}</span>
                        {comment_buttons}
                    </div>
                </div>
            </div>
        </div>
    </div>
</div>"#,
            id = cs.id,
            osm = self.osm_url,
            u = MatchField::Author.short(),
            c = MatchField::Comment.short(),
        ))
    }
}

fn move_buttons(field: MatchField) -> String {
    Category::ALL
        .iter()
        .map(|c| {
            format!(
                r#"<button class="btn btn-light hide-{name}" {attr}="{name}">{marker}</button>"#,
                name = c.as_str(),
                attr = field.attribute(),
                marker = c.marker(),
            )
        })
        .collect::<Vec<_>>()
        .join("")
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn changeset() -> Changeset {
        Changeset {
            id: 123,
            user: "Jan <3 & Co".to_string(),
            deleted: true,
            blocked: true,
            comment: r#"say "hi""#.to_string(),
        }
    }

    #[test]
    fn test_row_escapes_user_and_comment() {
        let row = RowTemplate::new("https://www.openstreetmap.org/").render(&changeset());
        let html = row.as_str();

        assert!(html.contains(r#"data-id="123""#));
        assert!(html.contains("Jan &lt;3 &amp; Co"));
        assert!(!html.contains("Jan <3"));
        assert!(html.contains("say &quot;hi&quot;"));
        assert!(html.contains("https://www.openstreetmap.org/user/Jan%20%3C3%20%26%20Co"));
        assert!(html.contains("https://www.openstreetmap.org/changeset/123"));
    }

    #[test]
    fn test_row_markers_and_buttons() {
        let html = RowTemplate::new("https://osm.test").render(&changeset()).as_str().to_string();

        assert!(html.contains("Deleted account"));
        assert!(html.contains("Blocked user"));
        for c in Category::ALL {
            assert!(html.contains(&format!(r#"data-auto-move-user-to="{}""#, c.as_str())));
            assert!(html.contains(&format!(r#"data-auto-move-comment-to="{}""#, c.as_str())));
        }
    }

    #[test]
    fn test_plain_row_has_no_markers() {
        let mut cs = changeset();
        cs.deleted = false;
        cs.blocked = false;
        let html = RowTemplate::new("https://osm.test").render(&cs).as_str().to_string();
        assert!(!html.contains("Deleted account"));
        assert!(!html.contains("Blocked user"));
    }
}
