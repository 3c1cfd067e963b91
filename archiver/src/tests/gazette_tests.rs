use super::fixtures::load_html_fixture;
use super::{FakeArchive, FakeProbe, FixtureFetcher, SITE};
use crate::config::{ArchiveMode, SiteConfig};
use crate::gazette::{write_tables, GazetteArchiver};
use crate::resolver::ArchiveOutcome;
use chrono::{Datelike, NaiveDate, Utc};
use std::fs;

fn site_fetcher() -> FixtureFetcher {
    FixtureFetcher::default()
        .with_page(
            "http://site/extraordinary/extraord_list.php",
            load_html_fixture("extraordinary_list"),
        )
        .with_page(
            "http://site/gazette/gazette_list.php",
            load_html_fixture("gazette_list"),
        )
        .with_page(
            "http://site/gazette/issue123.php",
            load_html_fixture("gazette_issue_123"),
        )
        .with_page(
            "http://site/gazette/issue124.php",
            load_html_fixture("gazette_issue_124"),
        )
}

fn archiver<'a>(
    mode: ArchiveMode,
    fetcher: &'a FixtureFetcher,
    probe: &'a FakeProbe,
    archive: &'a FakeArchive,
) -> GazetteArchiver<'a, FixtureFetcher, FakeProbe, FakeArchive> {
    GazetteArchiver {
        site: SiteConfig::new(SITE),
        mode,
        fetcher,
        probe,
        archive,
    }
}

#[test]
fn test_collect_current_listing() {
    let fetcher = site_fetcher();
    let probe = FakeProbe::default();
    let archive = FakeArchive::default();
    let tables = archiver(ArchiveMode::CurrentYear, &fetcher, &probe, &archive).collect();

    assert_eq!(tables.extraordinary.len(), 3);
    assert_eq!(tables.extraordinary[0].issue_no, "412");
    assert_eq!(
        tables.extraordinary[0].url,
        "http://site/extraordinary/2020/412.pdf"
    );
    assert_eq!(
        tables.extraordinary[1].issue_date,
        NaiveDate::from_ymd_opt(2020, 9, 11)
    );
    assert_eq!(tables.extraordinary[2].url, "");

    assert_eq!(tables.issues.len(), 3);
    assert_eq!(tables.issues[0].label, "123 - 01-02-2020");
    assert_eq!(tables.issues[0].url, "http://site/gazette/issue123.php");
}

#[test]
fn test_entries_are_stamped_and_sorted_newest_first() {
    let fetcher = site_fetcher();
    let probe = FakeProbe::default();
    let archive = FakeArchive::default();
    let tables = archiver(ArchiveMode::CurrentYear, &fetcher, &probe, &archive).collect();

    // Issue 124 (08-02-2020) before issue 123 (01-02-2020); the unlabelled
    // supplement is skipped.
    assert_eq!(tables.entries.len(), 5);
    let issues: Vec<&str> = tables.entries.iter().map(|e| e.issue.as_str()).collect();
    assert_eq!(issues, vec!["124", "124", "124", "123", "123"]);
    assert_eq!(tables.entries[0].date, NaiveDate::from_ymd_opt(2020, 2, 8));
    assert_eq!(tables.entries[0].part, "Part I - Section 1");
    assert_eq!(tables.entries[2].content, "Advertisements");
    assert_eq!(
        tables.entries[3].url,
        "http://site/gazette/2020/123/p1s1.pdf"
    );
    assert_eq!(tables.entries[4].date, NaiveDate::from_ymd_opt(2020, 2, 1));

    assert!(!fetcher
        .requested
        .borrow()
        .contains(&"http://site/gazette/special.php".to_string()));
}

#[test]
fn test_current_year_run_archives_every_row() {
    let fetcher = site_fetcher();
    let mut probe = FakeProbe::default();
    probe
        .deleted
        .insert("http://site/extraordinary/2020/411.pdf".to_string());
    let mut archive = FakeArchive::default();
    archive.snapshots.insert(
        "http://site/extraordinary/2020/412.pdf".to_string(),
        "20200915101010".to_string(),
    );
    archive
        .refuse
        .insert("http://site/gazette/2020/124/p6s4.pdf".to_string());

    let (tables, summary) = archiver(ArchiveMode::CurrentYear, &fetcher, &probe, &archive).run();

    assert_eq!(probe.probes.get(), 8);
    assert_eq!(tables.extraordinary[0].deleted, Some(false));
    assert_eq!(tables.extraordinary[1].deleted, Some(true));
    assert_eq!(tables.extraordinary[2].deleted, Some(true));

    let first = tables.extraordinary[0].archive.as_ref().unwrap();
    assert_eq!(first.outcome, ArchiveOutcome::FoundExisting);
    assert_eq!(
        first.archived_url.as_deref(),
        Some("https://web.archive.org/web/20200915101010/http://site/extraordinary/2020/412.pdf")
    );

    let second = tables.extraordinary[1].archive.as_ref().unwrap();
    assert_eq!(second.outcome, ArchiveOutcome::CreatedNew);

    // No link, nothing to archive.
    let third = tables.extraordinary[2].archive.as_ref().unwrap();
    assert_eq!(third.outcome, ArchiveOutcome::Failed);

    let refused = tables
        .entries
        .iter()
        .find(|e| e.url.ends_with("p6s4.pdf"))
        .unwrap();
    assert_eq!(refused.archive.as_ref().unwrap().outcome, ArchiveOutcome::Failed);
    assert_eq!(refused.archive.as_ref().unwrap().archived_url, None);

    assert_eq!(summary.found_existing, 1);
    assert_eq!(summary.created_new, 5);
    assert_eq!(summary.failed, 2);
    // The found snapshot is never re-captured.
    assert_eq!(archive.captured.borrow().len(), 6);
}

#[test]
fn test_full_run_skips_archival() {
    let fetcher = site_fetcher();
    let probe = FakeProbe::default();
    let archive = FakeArchive::default();

    let (tables, summary) = archiver(ArchiveMode::Full, &fetcher, &probe, &archive).run();

    // Only the current listing exists in the fixtures; every historical
    // partition is a 404 and contributes nothing.
    assert_eq!(tables.extraordinary.len(), 3);
    assert_eq!(tables.entries.len(), 5);
    assert!(tables.entries.iter().all(|e| e.archive.is_none()));
    assert!(tables.entries.iter().all(|e| e.deleted.is_some()));
    assert_eq!(summary.created_new + summary.found_existing + summary.failed, 0);
    assert!(archive.captured.borrow().is_empty());

    let requested = fetcher.requested.borrow();
    assert!(requested.contains(&"http://site/extraordinary/extraord_list2008.php".to_string()));
    assert!(requested.contains(&"http://site/gazette/gazette_list2022.php".to_string()));
}

#[test]
fn test_malformed_page_counts_as_empty() {
    let fetcher = FixtureFetcher::default()
        .with_page(
            "http://site/extraordinary/extraord_list.php",
            "<html><body>Site under maintenance</body></html>".to_string(),
        )
        .with_page(
            "http://site/gazette/gazette_list.php",
            load_html_fixture("gazette_list"),
        );
    let probe = FakeProbe::default();
    let archive = FakeArchive::default();
    let tables = archiver(ArchiveMode::CurrentYear, &fetcher, &probe, &archive).collect();

    assert!(tables.extraordinary.is_empty());
    assert_eq!(tables.issues.len(), 3);
    // Issue pages themselves are missing.
    assert!(tables.entries.is_empty());
}

#[test]
fn test_write_tables_names_files_by_mode() {
    let fetcher = site_fetcher();
    let probe = FakeProbe::default();
    let archive = FakeArchive::default();
    let (tables, _) = archiver(ArchiveMode::CurrentYear, &fetcher, &probe, &archive).run();

    let dir = tempfile::tempdir().unwrap();
    let year = Utc::now().year();
    write_tables(&tables, ArchiveMode::CurrentYear, year, dir.path()).unwrap();

    let entries = fs::read_to_string(dir.path().join(format!("Gazattes_{}.csv", year))).unwrap();
    assert!(entries.starts_with("Part,Content,URL,Date,Issue,Deleted,Archived URL,Archived Date\n"));
    assert_eq!(entries.lines().count(), 6);
    assert!(dir
        .path()
        .join(format!("ExtraOrdinaryGazattes_{}.csv", year))
        .exists());
    assert!(dir.path().join(format!("GazatteIssues_{}.csv", year)).exists());

    write_tables(&tables, ArchiveMode::Full, year, dir.path()).unwrap();
    let entries = fs::read_to_string(dir.path().join("Gazattes.csv")).unwrap();
    assert!(entries.starts_with("Part,Content,URL,Date,Issue,Deleted\n"));
}

#[test]
fn test_empty_listing_still_writes_header() {
    let fetcher = FixtureFetcher::default().with_page(
        "http://site/gazette/gazette_list.php",
        load_html_fixture("gazette_list"),
    );
    let probe = FakeProbe::default();
    let archive = FakeArchive::default();
    let (tables, _) = archiver(ArchiveMode::CurrentYear, &fetcher, &probe, &archive).run();
    assert!(tables.extraordinary.is_empty());
    assert!(tables.entries.is_empty());

    let dir = tempfile::tempdir().unwrap();
    write_tables(&tables, ArchiveMode::CurrentYear, 2024, dir.path()).unwrap();

    let extraordinary =
        fs::read_to_string(dir.path().join("ExtraOrdinaryGazattes_2024.csv")).unwrap();
    assert_eq!(extraordinary.lines().count(), 1);
    assert!(extraordinary.starts_with("Issue No,Issue Date,"));

    let entries = fs::read_to_string(dir.path().join("Gazattes_2024.csv")).unwrap();
    assert_eq!(
        entries,
        "Part,Content,URL,Date,Issue,Deleted,Archived URL,Archived Date\n"
    );
}
