//! Integration tests for editor crate

use quire_editor::{
    toolbar_state, ChangeEvent, Command, CompileOptions, Document, EditSession, EditorConfig,
    EditorError, ListKind, Mark, Path, Selection,
};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_document_lifecycle() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("note.html");
    std::fs::write(&path, "<p>Click me</p>")?;

    let mut doc = Document::load(&path)?;
    assert_eq!(doc.version, 0);
    assert!(!doc.is_dirty());
    assert_eq!(doc.path(), Some(path.as_path()));

    let selection = Selection::all(doc.content());
    doc.apply(&Command::Mark(Mark::Bold).to_mutation(), &selection)?;
    assert!(doc.is_dirty());

    doc.save(&CompileOptions::default())?;
    assert!(!doc.is_dirty());
    assert_eq!(std::fs::read_to_string(&path)?, "<p><strong>Click me</strong></p>");

    Ok(())
}

#[test]
fn test_json_documents_save_as_json() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("note.json");
    std::fs::write(
        &path,
        r#"[{"type":"paragraph","align":"right","children":[{"text":"Hi"}]}]"#,
    )?;

    let mut doc = Document::load(&path)?;
    let selection = Selection::all(doc.content());
    doc.apply(&Command::List(ListKind::Bulleted).to_mutation(), &selection)?;
    doc.save(&CompileOptions::default())?;

    let saved: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    assert_eq!(saved[0]["type"], "bulleted-list");
    assert_eq!(saved[0]["children"][0]["type"], "list-item");
    assert_eq!(saved[0]["children"][0]["align"], "right");

    let reloaded = Document::load(&path)?;
    assert_eq!(reloaded.content(), doc.content());
    Ok(())
}

#[test]
fn test_load_reports_parse_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.html");
    std::fs::write(&path, "<p><em>open</p>").unwrap();

    assert!(matches!(Document::load(&path), Err(EditorError::Parse(_))));
    assert!(matches!(
        Document::load(dir.path().join("missing.html")),
        Err(EditorError::Io(_))
    ));
}

#[test]
fn test_edit_session_workflow() {
    let doc = Document::from_html(r#"<p style="text-align:left">Hello</p>"#).unwrap();
    let mut session = EditSession::new("form-1", doc, EditorConfig::default());

    let events: Rc<RefCell<Vec<ChangeEvent>>> = Rc::default();
    let sink = Rc::clone(&events);
    session.on_change(move |event| sink.borrow_mut().push(event.clone()));

    session.execute("bold").unwrap();

    let events = events.borrow();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].version, 1);
    assert_eq!(
        events[0].output,
        r#"<p style="text-align:left"><strong>Hello</strong></p>"#
    );
    assert_eq!(&events[0].document, session.content());
}

#[test]
fn test_toolbar_follows_selection() {
    let doc = Document::from_html("<p><strong>a</strong></p><ul><li>b</li></ul>").unwrap();
    let mut session = EditSession::new("toolbar", doc, EditorConfig::default());

    session.set_selection(Selection::collapsed(Path::new([0, 0])));
    assert_eq!(session.toolbar().active(), vec!["bold"]);

    session.set_selection(Selection::collapsed(Path::new([1, 0, 0])));
    assert_eq!(session.toolbar().active(), vec!["list:bulleted"]);

    session.set_selection(Selection::all(session.content()));
    let state = toolbar_state(session.content(), session.selection());
    assert_eq!(state.active(), vec!["bold", "list:bulleted"]);
}

#[test]
fn test_reset_returns_to_blank() {
    let doc = Document::from_html("<ol><li>one</li></ol>").unwrap();
    let mut session = EditSession::new("reset", doc, EditorConfig::default());

    session.reset().unwrap();
    assert!(session.content().is_blank());
    assert_eq!(session.output(), "<p></p>");
    assert_eq!(session.selection(), &Selection::collapsed(Path::new([0, 0])));
}
