/// One row of the user's rating history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatedTitle {
    pub title: String,

    /// Release year, or [`crate::model::YEAR_UNKNOWN`]
    pub year: String,

    /// Stars given by the user, 0 to 5
    pub stars: u8,
}

impl RatedTitle {
    pub fn new(title: impl Into<String>, year: impl Into<String>, stars: u8) -> Self {
        Self {
            title: title.into(),
            year: year.into(),
            stars,
        }
    }

    /// Rating rendered as `"{stars}/5"`
    pub fn rating(&self) -> String {
        format!("{}/5", self.stars)
    }
}
