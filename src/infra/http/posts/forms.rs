use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct PostEditForm {
    pub(crate) title: String,
    pub(crate) text: String,
    #[serde(default)]
    pub(crate) action: Option<String>,
}
