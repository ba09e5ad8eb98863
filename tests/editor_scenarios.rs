//! End-to-end editing scenarios through the public API.

use checklist_core::{
    decode, encode, ChecklistDocument, ChecklistEditor, CorruptData, EditError, EditorConfig,
    Item, ItemId,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn ids(editor: &ChecklistEditor) -> Vec<ItemId> {
    editor.document().items().iter().map(Item::id).collect()
}

fn titles(editor: &ChecklistEditor) -> Vec<String> {
    editor
        .document()
        .items()
        .iter()
        .map(|i| i.title.clone())
        .collect()
}

fn editor_with(titles: &[&str]) -> ChecklistEditor {
    let config = EditorConfig {
        starter_items: titles.iter().map(|t| t.to_string()).collect(),
        ..EditorConfig::default()
    };
    ChecklistEditor::new(&config)
}

/// Field-by-field copy of the items, for comparing states.
fn contents(editor: &ChecklistEditor) -> Vec<(ItemId, bool, String)> {
    editor
        .document()
        .items()
        .iter()
        .map(|i| (i.id(), i.checked, i.title.clone()))
        .collect()
}

#[test]
fn test_add_undo_redo_scenario() {
    init_tracing();
    let mut editor = ChecklistEditor::default();
    let start = ids(&editor);
    assert_eq!(titles(&editor), vec!["Item 1", "Item 2"]);

    editor.add("Item 3").unwrap();
    assert_eq!(editor.document().len(), 3);
    let added = editor.document().items()[2].clone();
    assert_eq!(added.title, "Item 3");
    assert!(!added.checked);

    assert!(editor.undo().unwrap());
    assert_eq!(ids(&editor), start);

    assert!(editor.redo().unwrap());
    assert_eq!(editor.document().len(), 3);
    assert_eq!(editor.document().items()[2].id(), added.id());
}

#[test]
fn test_delete_many_scenario() {
    init_tracing();
    let mut editor = editor_with(&["A", "B", "C"]);
    let start = ids(&editor);

    editor.delete_many([start[1]]).unwrap();
    assert_eq!(titles(&editor), vec!["A", "C"]);

    editor.undo().unwrap();
    assert_eq!(ids(&editor), start);
    assert_eq!(titles(&editor), vec!["A", "B", "C"]);
}

#[test]
fn test_move_scenario() {
    init_tracing();
    let mut editor = editor_with(&["A", "B", "C"]);
    let start = ids(&editor);

    editor.move_items([0], 3).unwrap();
    assert_eq!(titles(&editor), vec!["B", "C", "A"]);

    editor.undo().unwrap();
    assert_eq!(ids(&editor), start);
}

#[test]
fn test_decode_scenarios() {
    init_tracing();
    assert_eq!(decode(b"").unwrap_err(), CorruptData::Empty);

    let json = r#"{
        "id": "9f8e7d6c-5b4a-4392-8170-6f5e4d3c2b1a",
        "items": [
            {"id": "1a2b3c4d-5e6f-4a0b-9c1d-2e3f4a5b6c7d", "checked": false, "title": "Item 1"}
        ],
        "lastOpened": "yesterday"
    }"#;
    let doc = decode(json.as_bytes()).unwrap();
    assert_eq!(doc.len(), 1);
    assert_eq!(doc.items()[0].title, "Item 1");
}

#[test]
fn test_deleted_item_keeps_id_after_undo() {
    init_tracing();
    let mut editor = editor_with(&["A", "B", "C"]);
    let x = editor.document().items()[1].clone();

    editor.delete(1).unwrap();
    assert!(editor.document().find(x.id()).is_none());

    editor.undo().unwrap();
    let restored = editor.document().find(x.id()).unwrap();
    assert!(restored.same_content(&x));
}

#[test]
fn test_toggle_pairing() {
    init_tracing();
    let mut editor = editor_with(&["A"]);
    let a = editor.document().items()[0].id();

    editor.toggle(a).unwrap();
    editor.undo().unwrap();
    assert!(!editor.document().items()[0].checked);
    assert!(!editor.can_undo());
    assert!(editor.can_redo());
}

#[test]
fn test_branch_invalidation() {
    init_tracing();
    let mut editor = editor_with(&["A", "B"]);
    editor.add("C").unwrap();
    editor.add("D").unwrap();
    editor.undo().unwrap();
    editor.undo().unwrap();
    assert!(editor.can_redo());

    editor.add("E").unwrap();
    assert!(!editor.can_redo());
    assert!(!editor.redo().unwrap());
    assert_eq!(titles(&editor), vec!["A", "B", "E"]);
}

fn edit_toggle(e: &mut ChecklistEditor) {
    let id = e.document().items()[1].id();
    e.toggle(id).unwrap();
}

fn edit_add(e: &mut ChecklistEditor) {
    e.add("New").unwrap();
}

fn edit_delete(e: &mut ChecklistEditor) {
    e.delete(0).unwrap();
}

fn edit_delete_offsets(e: &mut ChecklistEditor) {
    e.delete_offsets([0, 2]).unwrap();
}

fn edit_delete_many(e: &mut ChecklistEditor) {
    let ids = vec![e.document().items()[1].id(), e.document().items()[3].id()];
    e.delete_many(ids).unwrap();
}

fn edit_replace_all(e: &mut ChecklistEditor) {
    e.replace_all(vec![Item::new("Fresh")]).unwrap();
}

fn edit_move_items(e: &mut ChecklistEditor) {
    e.move_items([3, 1], 0).unwrap();
}

fn edit_title(e: &mut ChecklistEditor) {
    let id = e.document().items()[2].id();
    e.edit_title(id, "Renamed").unwrap();
    e.commit_title_change(id, "C").unwrap();
}

#[test]
fn test_inverse_law_for_every_operation() {
    init_tracing();
    let edits: [(&str, fn(&mut ChecklistEditor)); 8] = [
        ("toggle", edit_toggle),
        ("add", edit_add),
        ("delete", edit_delete),
        ("delete_offsets", edit_delete_offsets),
        ("delete_many", edit_delete_many),
        ("replace_all", edit_replace_all),
        ("move_items", edit_move_items),
        ("commit_title_change", edit_title),
    ];

    for (name, edit) in edits {
        let mut editor = editor_with(&["A", "B", "C", "D"]);
        let a = editor.document().items()[0].id();
        // Start with a checked item so flags are covered too.
        editor.toggle(a).unwrap();
        let before = contents(&editor);

        edit(&mut editor);
        let after = contents(&editor);
        assert_ne!(after, before, "{}: edit changed nothing", name);

        assert!(editor.undo().unwrap(), "{}: undo", name);
        assert_eq!(contents(&editor), before, "{}: undo restores", name);

        assert!(editor.redo().unwrap(), "{}: redo", name);
        assert_eq!(contents(&editor), after, "{}: redo reapplies", name);
    }
}

#[test]
fn test_save_load_roundtrip_after_history() {
    init_tracing();
    let mut editor = editor_with(&["A", "B", "C"]);
    let b = editor.document().items()[1].id();
    editor.toggle(b).unwrap();
    editor.add("D").unwrap();
    editor.move_items([3], 0).unwrap();
    editor.undo().unwrap();

    let bytes = editor.save().unwrap();
    let loaded = ChecklistEditor::load(&bytes, &EditorConfig::default()).unwrap();

    assert_eq!(contents(&loaded), contents(&editor));
    assert_eq!(loaded.document().id(), editor.document().id());
    assert!(!loaded.can_undo());
    // Saving does not touch the source history.
    assert!(editor.can_undo());
    assert!(editor.can_redo());
}

#[test]
fn test_codec_roundtrip_free_functions() {
    init_tracing();
    let doc = ChecklistDocument::with_titles(["One", "Two"]);
    let decoded = decode(&encode(&doc).unwrap()).unwrap();
    assert_eq!(decoded.id(), doc.id());
    for (x, y) in doc.items().iter().zip(decoded.items()) {
        assert!(x.same_content(y));
    }
}

#[test]
fn test_editing_without_undo() {
    init_tracing();
    let config = EditorConfig {
        undo_enabled: false,
        ..EditorConfig::default()
    };
    let mut editor = ChecklistEditor::new(&config);
    editor.add("Item 3").unwrap();
    editor.delete(0).unwrap();

    assert_eq!(titles(&editor), vec!["Item 2", "Item 3"]);
    assert!(!editor.can_undo());
    assert!(!editor.undo().unwrap());
    assert_eq!(editor.undo_label(), None);
}

#[test]
fn test_rejected_edits_leave_history_alone() {
    init_tracing();
    let mut editor = editor_with(&["A", "B"]);
    editor.add("C").unwrap();

    let err = editor.toggle(ItemId::new()).unwrap_err();
    assert!(matches!(err, EditError::InvalidReference(_)));
    assert!(editor.move_items([0], 9).is_err());
    assert_eq!(editor.history().unwrap().undo_depth(), 1);
    assert_eq!(editor.undo_label(), Some("Add Item"));
}
