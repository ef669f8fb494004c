mod common;

use shelf_reader::{BookType, LibraryStore, ReaderController, View};

// Kept as the only test in this binary: it sets a process-wide env var.
#[test]
fn unusable_home_degrades_to_a_session_store() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"occupied").unwrap();
    std::env::set_var("SHELF_READER_HOME", &blocker);

    let mut store = LibraryStore::open_default();
    assert!(!store.is_persistent());
    let record = store.add("notes.txt", BookType::Txt, b"hello".to_vec()).unwrap();
    assert_eq!(store.list().len(), 1);
    assert_eq!(store.load_content(record.id).unwrap(), b"hello");

    let mut controller = ReaderController::open_default();
    assert!(!controller.store().is_persistent());
    let id = controller.upload("long.txt", common::words(300)).unwrap();
    assert!(matches!(controller.view(), View::Reading(s) if s.record.id == id));
    assert!(controller.next_page());
    controller.toggle_theme();
    assert!(controller.preferences().theme().is_dark());
    controller.back();
    assert_eq!(controller.books().len(), 1);

    std::env::remove_var("SHELF_READER_HOME");
}
