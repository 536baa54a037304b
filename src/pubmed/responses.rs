use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ESearchResult {
    pub esearchresult: ESearchData,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ESearchData {
    #[serde(default)]
    pub idlist: Vec<String>,
    #[serde(default)]
    pub count: Option<String>,
    // NCBI sometimes returns 200 OK with an ERROR field in the body
    #[serde(default, rename = "ERROR")]
    pub error: Option<String>,
}
