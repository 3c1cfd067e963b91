use clap::ValueEnum;
use log::debug;
use scraper::{ElementRef, Html, Node, Selector};

use crate::config::GO_PLACEHOLDER_LINK;
use crate::error::{ArchiverError, Result};
use crate::models::{ExtraordinaryGazette, GazetteEntry, GazetteIssue, GoAbstract};
use crate::parse::parse_site_date;

/// One data row of a listing table with its document link.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: Vec<String>,
    /// `link_base` + the row's first anchor href, or empty if the row has none.
    pub link: String,
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|_| ArchiverError::Selector(css.to_string()))
}

fn element_text(element: ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reads the `border="1"` listing table of a gazette page. The first row is
/// the header and is skipped. A page with no such table is a
/// `MalformedPage`; a table with only a header yields no rows.
pub fn extract_table(html: &str, page_url: &str, link_base: &str) -> Result<Vec<TableRow>> {
    let document = Html::parse_document(html);
    let table_selector = selector(r#"table[border="1"]"#)?;
    let row_selector = selector("tr")?;
    let cell_selector = selector("td, th")?;
    let link_selector = selector("a")?;

    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| ArchiverError::malformed(page_url, "no listing table"))?;

    let rows: Vec<TableRow> = table
        .select(&row_selector)
        .skip(1)
        .map(|row| {
            let cells = row.select(&cell_selector).map(element_text).collect();
            let link = row
                .select(&link_selector)
                .next()
                .and_then(|a| a.value().attr("href"))
                .map(|href| format!("{}{}", link_base, href.trim()))
                .unwrap_or_default();
            TableRow { cells, link }
        })
        .collect();

    debug!("{} rows on {}", rows.len(), page_url);
    Ok(rows)
}

fn cell(row: &TableRow, idx: usize) -> String {
    row.cells.get(idx).cloned().unwrap_or_default()
}

/// Columns: Issue No, Issue Date, Gazette Number, Category, Department.
pub fn extraordinary_gazettes(rows: Vec<TableRow>) -> Vec<ExtraordinaryGazette> {
    rows.into_iter()
        .map(|row| ExtraordinaryGazette {
            issue_no: cell(&row, 0),
            issue_date: parse_site_date(&cell(&row, 1)),
            gazette_number: cell(&row, 2),
            category: cell(&row, 3),
            department: cell(&row, 4),
            url: row.link,
            deleted: None,
            archive: None,
        })
        .collect()
}

/// Columns: Issue No and Date, Particulars.
pub fn gazette_issues(rows: Vec<TableRow>) -> Vec<GazetteIssue> {
    rows.into_iter()
        .map(|row| GazetteIssue {
            label: cell(&row, 0),
            particulars: cell(&row, 1),
            url: row.link,
        })
        .collect()
}

/// Columns: Part, Content. Date and issue are stamped on by the caller.
pub fn gazette_entries(rows: Vec<TableRow>) -> Vec<GazetteEntry> {
    rows.into_iter()
        .map(|row| GazetteEntry {
            part: cell(&row, 0),
            content: cell(&row, 1),
            url: row.link,
            date: None,
            issue: String::new(),
            deleted: None,
            archive: None,
        })
        .collect()
}

/// Which extractor a saved page is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[clap(rename_all = "lowercase")]
pub enum PageKind {
    /// Extraordinary gazette listing
    Extraordinary,
    /// Ordinary gazette issue index
    Issues,
    /// Contents page of one gazette issue
    Entries,
    /// Government order listing page
    Go,
}

impl PageKind {
    pub fn name(&self) -> &'static str {
        match self {
            PageKind::Extraordinary => "extraordinary",
            PageKind::Issues => "issues",
            PageKind::Entries => "entries",
            PageKind::Go => "go",
        }
    }

    /// Page fixtures are saved as `<kind>-<name>.html`.
    pub fn from_fixture_name(stem: &str) -> Option<PageKind> {
        let (kind, _) = stem.split_once('-')?;
        PageKind::from_str(kind, true).ok()
    }

    /// Number of records the matching extractor finds on `html`.
    pub fn count_records(&self, html: &str, url: &str) -> Result<usize> {
        let count = match self {
            PageKind::Extraordinary => extraordinary_gazettes(extract_table(html, url, "")?).len(),
            PageKind::Issues => gazette_issues(extract_table(html, url, "")?).len(),
            PageKind::Entries => gazette_entries(extract_table(html, url, "")?).len(),
            PageKind::Go => extract_go_abstracts(html, DepartmentContext::default())?.0.len(),
        };
        Ok(count)
    }
}

/// Department heading carried from one GO box to the next. The listing only
/// prints a department on the first order of each run, and runs continue
/// across page boundaries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentContext {
    pub department: String,
}

/// Extracts every `div.go_box` on a GO listing page, returning the orders
/// and the department context to hand to the next page.
pub fn extract_go_abstracts(
    html: &str,
    mut context: DepartmentContext,
) -> Result<(Vec<GoAbstract>, DepartmentContext)> {
    let document = Html::parse_document(html);
    let box_selector = selector("div.go_box")?;
    let dept_selector = selector("div.res_dept")?;
    let abstract_selector = selector("div.go_abstract")?;
    let link_selector = selector("a")?;
    let span_selector = selector("span")?;

    let mut orders = Vec::new();

    for go_box in document.select(&box_selector) {
        if let Some(dept) = go_box.select(&dept_selector).next() {
            let name = element_text(dept);
            if !name.is_empty() {
                context.department = name;
            }
        }

        let Some(abstract_div) = go_box.select(&abstract_selector).next() else {
            continue;
        };

        let link = abstract_div.select(&link_selector).next();
        let (url, go_number_date, file_size) = match link {
            Some(a) => {
                let href = a.value().attr("href").unwrap_or("").trim().to_string();
                if href == GO_PLACEHOLDER_LINK {
                    continue;
                }
                debug!("GO link {}", href);
                let span = a.select(&span_selector).next();
                let number_date = link_label(a);
                let size = span.and_then(span_file_size);
                (Some(href), Some(number_date), size)
            }
            None => (None, None, None),
        };

        orders.push(GoAbstract {
            deptname: context.department.clone(),
            go_text: own_text(abstract_div),
            url,
            go_number_date,
            file_size,
        });
    }

    Ok((orders, context))
}

/// Text directly inside `element`, ignoring text of child elements.
fn own_text(element: ElementRef) -> String {
    element
        .children()
        .filter_map(|child| match child.value() {
            Node::Text(text) => Some(text.trim().to_string()),
            _ => None,
        })
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The anchor's own leading text: `"<number> Dt: <date>"`.
fn link_label(anchor: ElementRef) -> String {
    anchor
        .children()
        .find_map(|child| match child.value() {
            Node::Text(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
            _ => None,
        })
        .unwrap_or_default()
}

/// Last non-empty text fragment of the size span, e.g. `"(245 KB)"`.
fn span_file_size(span: ElementRef) -> Option<String> {
    span.text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .last()
        .map(str::to_string)
}
