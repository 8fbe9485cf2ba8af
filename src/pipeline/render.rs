use crate::error::PipelineError;
use crate::models::entry::RankedEntry;
use std::fs;
use std::path::Path;

/// Sentinel token on the line where generated rows are injected. The whole
/// line is consumed, so an empty leaderboard leaves no blank line behind.
pub const ROWS_MARKER: &str = "__ROWS__";

/// Sentinel token replaced, everywhere it occurs, with the generation
/// timestamp.
pub const LAST_UPDATED_MARKER: &str = "__LAST_UPDATED__";

/// A leaderboard template whose markers have been validated at load time.
/// Substitution on a `Template` value cannot silently no-op: a malformed
/// template is rejected before the store is ever touched.
#[derive(Debug)]
pub struct Template {
    text: String,
}

impl Template {
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let text = fs::read_to_string(path).map_err(|e| {
            PipelineError::Template(format!("failed to read template {}: {e}", path.display()))
        })?;
        Self::from_text(text)
    }

    pub fn from_text(text: String) -> Result<Self, PipelineError> {
        let rows_markers = text.matches(ROWS_MARKER).count();
        if rows_markers != 1 {
            return Err(PipelineError::Template(format!(
                "expected exactly one {ROWS_MARKER} marker, found {rows_markers}"
            )));
        }
        if !text.contains(LAST_UPDATED_MARKER) {
            return Err(PipelineError::Template(format!(
                "missing {LAST_UPDATED_MARKER} marker"
            )));
        }
        Ok(Self { text })
    }

    /// Produce the complete page: one `<tr>` fragment per entry in place of
    /// the rows-marker line, and the generation timestamp wherever the
    /// last-updated marker occurs.
    pub fn render(&self, entries: &[RankedEntry], generated_at: &str) -> String {
        let mut out = String::with_capacity(self.text.len() + entries.len() * 64);
        for line in self.text.lines() {
            if line.contains(ROWS_MARKER) {
                for entry in entries {
                    out.push_str(&render_row(entry));
                    out.push('\n');
                }
            } else {
                out.push_str(line);
                out.push('\n');
            }
        }
        out.replace(LAST_UPDATED_MARKER, generated_at)
    }
}

fn render_row(entry: &RankedEntry) -> String {
    format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
        entry.rank_label(),
        escape_html(&entry.username),
        entry.score
    )
}

/// Usernames come from the store verbatim and may contain markup-significant
/// characters; they are escaped before embedding so a hostile name cannot
/// inject into the published page.
fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
