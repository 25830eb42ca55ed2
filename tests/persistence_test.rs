use anyhow::Result;
use calc_suite::domain::ports::LedgerStore;
use calc_suite::{GpaLedger, Grade, JsonFileStore, LedgerState, MemoryStore, SuiteError};
use tempfile::TempDir;

#[test]
fn test_save_then_load_round_trip() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("gpa_data.json");

    let mut ledger = GpaLedger::new(JsonFileStore::new(&path));
    ledger.add_course("Calculus I", 4.0, Grade::A)?;
    ledger.add_course("Writing", 3.0, Grade::BPlus)?;
    ledger.archive_semester("Fall 2024")?;
    ledger.add_course("Calculus II", 4.0, Grade::AMinus)?;
    ledger.add_course("Lab", 1.5, Grade::B)?;
    ledger.save()?;

    let mut reloaded = GpaLedger::new(JsonFileStore::new(&path));
    reloaded.load()?;

    assert_eq!(reloaded.state(), ledger.state());
    assert_eq!(reloaded.semesters()[0].courses()[1].name(), "Writing");
    assert_eq!(reloaded.in_progress()[1].credits(), 1.5);
    assert_eq!(reloaded.cumulative_gpa(), ledger.cumulative_gpa());
    Ok(())
}

#[test]
fn test_file_format_matches_legacy_layout() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("gpa_data.json");

    let mut ledger = GpaLedger::new(JsonFileStore::new(&path));
    ledger.add_course("Chemistry", 3.0, Grade::BMinus)?;
    ledger.archive_semester("Spring")?;

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(
        json,
        serde_json::json!({
            "semesters": [{
                "name": "Spring",
                "courses": [{
                    "name": "Chemistry",
                    "credits": 3.0,
                    "grade": "B-",
                    "points": 2.7
                }]
            }],
            "current_courses": []
        })
    );
    Ok(())
}

#[test]
fn test_loads_file_written_by_older_versions() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("gpa_data.json");
    std::fs::write(
        &path,
        r#"{"semesters": [{"name": "Fall 2023", "courses": [
            {"name": "Intro CS", "credits": 3.0, "grade": "A", "points": 4.0}
        ]}]}"#,
    )?;

    let mut ledger = GpaLedger::new(JsonFileStore::new(&path));
    ledger.load()?;

    assert_eq!(ledger.semesters().len(), 1);
    assert!(ledger.in_progress().is_empty());
    assert_eq!(ledger.cumulative_gpa(), 4.0);
    Ok(())
}

#[test]
fn test_missing_file_leaves_empty_state() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut ledger = GpaLedger::new(JsonFileStore::new(temp_dir.path().join("absent.json")));
    ledger.load()?;
    assert_eq!(ledger.state(), &LedgerState::default());
    Ok(())
}

#[test]
fn test_corrupt_file_reports_error_and_keeps_state() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("gpa_data.json");
    std::fs::write(&path, "{\"semesters\": [oops")?;

    let mut ledger = GpaLedger::new(JsonFileStore::new(&path));
    ledger.add_course("Unsaved", 3.0, Grade::A)?;

    let err = ledger.load().unwrap_err();
    assert!(matches!(err, SuiteError::PersistenceError { .. }));
    assert_eq!(ledger.in_progress().len(), 1);
    Ok(())
}

#[test]
fn test_invalid_course_in_file_is_persistence_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("gpa_data.json");
    std::fs::write(
        &path,
        r#"{"current_courses": [
            {"name": "", "credits": -2.0, "grade": "F", "points": 0.0},
            {"name": "X", "credits": 3.0, "grade": "F", "points": 99.0}
        ]}"#,
    )?;

    let mut ledger = GpaLedger::new(JsonFileStore::new(&path));
    ledger.add_course("Kept", 3.0, Grade::B)?;

    let err = ledger.load().unwrap_err();
    assert!(matches!(err, SuiteError::PersistenceError { .. }));
    assert_eq!(ledger.in_progress().len(), 1);
    assert_eq!(ledger.in_progress()[0].name(), "Kept");
    Ok(())
}

#[test]
fn test_stored_points_are_recomputed_from_grade() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("gpa_data.json");
    std::fs::write(
        &path,
        r#"{"current_courses": [{"name": "X", "credits": 3.0, "grade": "F", "points": 99.0}]}"#,
    )?;

    let mut ledger = GpaLedger::new(JsonFileStore::new(&path));
    ledger.load()?;
    assert_eq!(ledger.in_progress()[0].grade_points(), 0.0);
    assert_eq!(ledger.current_semester_gpa(), 0.0);
    Ok(())
}

#[test]
fn test_open_falls_back_to_empty_on_corrupt_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("gpa_data.json");
    std::fs::write(&path, "not json at all")?;

    let ledger = GpaLedger::open(JsonFileStore::new(&path));
    assert!(ledger.state().is_empty());
    Ok(())
}

#[test]
fn test_open_reads_memory_store() -> Result<()> {
    let store = MemoryStore::default();
    let mut source = GpaLedger::new(MemoryStore::default());
    source.add_course("Ethics", 2.0, Grade::AMinus)?;
    store.save(source.state())?;

    let ledger = GpaLedger::open(store);
    assert_eq!(ledger.in_progress().len(), 1);
    assert_eq!(ledger.in_progress()[0].grade(), Grade::AMinus);
    Ok(())
}
