//! Page model: sections, active-nav geometry, character counter
//!
//! The section list is the single source of truth for the page's
//! navigation; the index template is rendered against it so the nav and
//! the section anchors cannot drift apart. `active_section` and
//! `counter_level` are the pure decision rules behind the page script's
//! scroll tracking and live character counter.

/// Header compensation applied when deciding which section is in view
pub const SCROLL_OFFSET_PX: f64 = 100.0;

/// Character count at which the message counter turns to a warning
pub const COUNTER_WARNING_AT: usize = 800;
/// Character count at which the message counter turns to an error
pub const COUNTER_ERROR_AT: usize = 900;

/// A page section: anchor id and nav label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub id: &'static str,
    pub title: &'static str,
}

/// Sections of the portfolio page, in document order
pub const SECTIONS: &[Section] = &[
    Section { id: "about", title: "About" },
    Section { id: "skills", title: "Skills" },
    Section { id: "projects", title: "Projects" },
    Section { id: "recommendations", title: "Recommendations" },
    Section { id: "contact", title: "Contact" },
];

/// Measured vertical bounds of a rendered section
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// Decide which section the given scroll offset falls into.
///
/// A section is active while `scroll_y` is within
/// `[top - SCROLL_OFFSET_PX, top + height - SCROLL_OFFSET_PX)`. When
/// several sections match (overlapping bounds), the last one in document
/// order wins.
pub fn active_section(scroll_y: f64, sections: &[SectionBounds]) -> Option<&str> {
    let mut current = None;
    for section in sections {
        if scroll_y >= section.top - SCROLL_OFFSET_PX
            && scroll_y < section.top + section.height - SCROLL_OFFSET_PX
        {
            current = Some(section.id.as_str());
        }
    }
    current
}

/// Styling level for the live message character counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterLevel {
    Normal,
    Warning,
    Error,
}

impl CounterLevel {
    /// CSS class applied to the counter element, empty for `Normal`
    pub fn css_class(self) -> &'static str {
        match self {
            CounterLevel::Normal => "",
            CounterLevel::Warning => "warning",
            CounterLevel::Error => "error",
        }
    }
}

/// Map a live message length to its counter styling level.
pub fn counter_level(len: usize) -> CounterLevel {
    if len > COUNTER_ERROR_AT {
        CounterLevel::Error
    } else if len > COUNTER_WARNING_AT {
        CounterLevel::Warning
    } else {
        CounterLevel::Normal
    }
}

/// Render the nav links for the page header.
pub fn nav_links_html() -> String {
    SECTIONS
        .iter()
        .map(|s| format!("<a href=\"#{}\">{}</a>", s.id, s.title))
        .collect::<Vec<_>>()
        .join("\n            ")
}
