use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;
use std::error::Error;
use std::fs;
use std::path::Path;

static ARTICLES_DIR: Dir = include_dir!("src/articles");

/// one row of the scraped top-articles dataset, sorted by pageview rank
#[derive(Deserialize, Clone, Debug)]
pub struct Article {
    pub title: String,
    pub extract: String,
    pub pageid: u64,
    #[serde(default)]
    pub views: Option<u64>,
    #[serde(default)]
    pub rank: Option<u32>,
}

impl Article {
    pub fn wiki_url(&self) -> String {
        format!("https://he.wikipedia.org/?curid={}", self.pageid)
    }
}

pub fn bundled() -> Vec<Article> {
    let file = ARTICLES_DIR
        .get_file("top_articles.json")
        .expect("Articles file not found");

    let file_as_str = file
        .contents_utf8()
        .expect("Unable to interpret file as a string");

    from_str(file_as_str).expect("Unable to deserialize articles json")
}

pub fn load_from_path(path: &Path) -> Result<Vec<Article>, Box<dyn Error>> {
    let contents = fs::read_to_string(path)?;
    let articles: Vec<Article> = from_str(&contents)?;
    Ok(articles)
}
