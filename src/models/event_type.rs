use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Wedding,
    Corporate,
    Birthday,
    Social,
    Other,
}

impl EventType {
    pub const ALL: [EventType; 5] = [
        EventType::Wedding,
        EventType::Corporate,
        EventType::Birthday,
        EventType::Social,
        EventType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventType::Wedding => "wedding",
            EventType::Corporate => "corporate",
            EventType::Birthday => "birthday",
            EventType::Social => "social",
            EventType::Other => "other",
        }
    }

    /// Exact, case-insensitive match against the known tags. Anything else is `Other`.
    pub fn normalize(text: &str) -> Self {
        match text.to_lowercase().as_str() {
            "wedding" => EventType::Wedding,
            "corporate" => EventType::Corporate,
            "birthday" => EventType::Birthday,
            "social" => EventType::Social,
            _ => EventType::Other,
        }
    }

    /// Keyword guess from an event title, used when no type was given explicitly.
    pub fn infer_from_title(title: &str) -> Self {
        let title = title.to_lowercase();
        if title.contains("wedding") {
            EventType::Wedding
        } else if title.contains("corporate") || title.contains("conference") {
            EventType::Corporate
        } else if title.contains("birthday") {
            EventType::Birthday
        } else if title.contains("social") || title.contains("party") {
            EventType::Social
        } else {
            EventType::Other
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
