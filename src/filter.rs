/// Client-side folder filtering

/// Case-insensitive substring filter over folder titles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FolderFilter {
    query: String,
}

impl FolderFilter {
    pub fn new(query: &str) -> FolderFilter {
        FolderFilter {
            query: query.to_lowercase(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    /// An empty query matches every title
    pub fn matches(&self, title: &str) -> bool {
        title.to_lowercase().contains(&self.query)
    }
}
