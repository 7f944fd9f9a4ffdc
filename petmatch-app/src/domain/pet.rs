use serde::{Deserialize, Serialize};

/// A pet record as served by the matching backend. Field names on the wire
/// are camelCase, hence the renames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "userName")]
    pub user_name: String,
    #[serde(default)]
    pub liked: bool,
    #[serde(rename = "match")]
    pub match_percentage: u32,
}

impl Pet {
    pub fn new(user_id: String, user_name: String, match_percentage: u32) -> Self {
        Self {
            user_id,
            user_name,
            liked: false,
            match_percentage,
        }
    }

    pub fn with_liked(mut self, liked: bool) -> Self {
        self.liked = liked;
        self
    }
}
