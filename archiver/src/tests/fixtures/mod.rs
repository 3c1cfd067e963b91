use std::fs;
use std::path::{Path, PathBuf};

pub const FIXTURES_DIR: &str = "src/tests/fixtures";
pub const PAGES_DIR: &str = "src/tests/fixtures/pages";

/// Load test HTML fixture by name
pub fn load_html_fixture(fixture_name: &str) -> String {
    let path = Path::new(FIXTURES_DIR).join(format!("{}.html", fixture_name));
    fs::read_to_string(path)
        .unwrap_or_else(|_| panic!("Failed to load test fixture: {}", fixture_name))
}

/// All saved site pages, as captured by `save_page_fixture`
pub fn page_fixtures() -> Vec<PathBuf> {
    let mut pages: Vec<PathBuf> = fs::read_dir(PAGES_DIR)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .map(|entry| entry.path())
                .filter(|path| path.extension().map_or(false, |ext| ext == "html"))
                .collect()
        })
        .unwrap_or_default();
    pages.sort();
    pages
}
