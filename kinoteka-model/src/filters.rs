/// Optional single-value filters for movie listings.
///
/// Values are kept as the raw strings received from the query string. An
/// empty string means the dimension is not filtered; anything else is
/// handed to the database unchanged, so a non-numeric value fails there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct MovieFilters {
    #[cfg_attr(feature = "serde", serde(alias = "genreids"))]
    pub genre_id: String,
    #[cfg_attr(feature = "serde", serde(alias = "categoryids"))]
    pub category_id: String,
    #[cfg_attr(feature = "serde", serde(alias = "typeids"))]
    pub type_id: String,
    #[cfg_attr(feature = "serde", serde(alias = "ageids"))]
    pub age_id: String,
}

impl MovieFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn genre(mut self, value: impl Into<String>) -> Self {
        self.genre_id = value.into();
        self
    }

    pub fn category(mut self, value: impl Into<String>) -> Self {
        self.category_id = value.into();
        self
    }

    pub fn movie_type(mut self, value: impl Into<String>) -> Self {
        self.type_id = value.into();
        self
    }

    pub fn age(mut self, value: impl Into<String>) -> Self {
        self.age_id = value.into();
        self
    }

    /// True when no dimension carries a value.
    pub fn is_empty(&self) -> bool {
        self.genre_id.is_empty()
            && self.category_id.is_empty()
            && self.type_id.is_empty()
            && self.age_id.is_empty()
    }
}
