use serde::{Deserialize, Serialize};

/// An entry of a member's gallog (the personal log of their posts).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GallogEntry {
    Article {
        gall_id: String,
        number: String,
    },
    Comment {
        gall_id: String,
        number: String,
        comment_number: String,
    },
}

impl GallogEntry {
    pub fn article(gall_id: &str, number: &str) -> Self {
        GallogEntry::Article {
            gall_id: gall_id.to_string(),
            number: number.to_string(),
        }
    }

    pub fn comment(gall_id: &str, number: &str, comment_number: &str) -> Self {
        GallogEntry::Comment {
            gall_id: gall_id.to_string(),
            number: number.to_string(),
            comment_number: comment_number.to_string(),
        }
    }

    pub fn gall_id(&self) -> &str {
        match self {
            GallogEntry::Article { gall_id, .. } | GallogEntry::Comment { gall_id, .. } => gall_id,
        }
    }

    pub fn number(&self) -> &str {
        match self {
            GallogEntry::Article { number, .. } | GallogEntry::Comment { number, .. } => number,
        }
    }
}
