/// How a file is opened in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Edit,
    View,
}

impl EditorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditorMode::Edit => "edit",
            EditorMode::View => "view",
        }
    }

    /// Anything that isn't explicitly `view` opens editable.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("view") => EditorMode::View,
            _ => EditorMode::Edit,
        }
    }
}

/// The one descriptor request a page load issues, derived from the route's
/// query parameters. Comparison takes precedence over a single historical
/// version, which takes precedence over a plain open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorRequest {
    Compare { original: u32, revised: u32 },
    Version(u32),
    Open(EditorMode),
}

impl EditorRequest {
    pub fn from_query(
        mode: Option<&str>,
        version: Option<&str>,
        v1: Option<&str>,
        v2: Option<&str>,
    ) -> Self {
        if let (Some(original), Some(revised)) = (parse_version(v1), parse_version(v2)) {
            return EditorRequest::Compare { original, revised };
        }

        if let Some(version) = parse_version(version) {
            return EditorRequest::Version(version);
        }

        EditorRequest::Open(EditorMode::parse(mode))
    }
}

/// A version parameter that doesn't parse as a number is treated as absent.
fn parse_version(value: Option<&str>) -> Option<u32> {
    value.and_then(|v| v.trim().parse().ok())
}
