use rich_text_core::{
    DocumentOffset, LineVisualData, ParagraphCache, ParagraphOffset, Run, RunProperty, Selection,
    TextEditorCore, TextRun,
};

fn main() {
    let mut editor = TextEditorCore::default();
    editor.edit_and_replace("Hello World").unwrap();

    // Insert a run with two line breaks in the middle of the paragraph.
    editor.set_caret_offset(DocumentOffset(6)).unwrap();
    let bold = RunProperty::default().with_bold(true);
    editor
        .edit_and_replace_run(Run::Text(TextRun::new("big\r\nbold\r\n", bold)))
        .unwrap();
    assert_eq!(editor.get_text(), "Hello big\r\nbold\r\nWorld");
    assert_eq!(editor.current_caret_offset(), DocumentOffset(17));

    let manager = editor.text_run_manager().paragraph_manager();
    let texts: Vec<String> = manager.paragraphs().iter().map(|p| p.get_text()).collect();
    assert_eq!(texts, vec!["Hello big", "bold", "World"]);

    // Lay out the middle paragraph, then edit the last one: only the last line goes stale.
    let lines: Vec<LineVisualData> = manager
        .paragraphs()
        .iter()
        .map(|p| LineVisualData::attach(p, 0, p.run_count()).unwrap())
        .collect();
    editor.edit_and_replace("!").unwrap();
    let manager = editor.text_run_manager().paragraph_manager();
    let dirty: Vec<bool> = lines
        .iter()
        .map(|line| line.is_dirty(manager).unwrap())
        .collect();
    assert_eq!(dirty, vec![false, false, true]);

    // Character lookup inside a paragraph.
    let hit = manager.paragraphs()[0]
        .get_run_index(ParagraphOffset(7))
        .unwrap();
    assert_eq!(hit.run.char_at(hit.hit_offset), Some("i"));

    // Join everything back into one paragraph.
    editor
        .set_selection(Selection::new(DocumentOffset(9), 8))
        .unwrap();
    editor.edit_and_replace(" ").unwrap();
    assert_eq!(editor.get_text(), "Hello big !World");
    println!("{}", editor.get_text());
}
