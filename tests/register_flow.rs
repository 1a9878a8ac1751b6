//! End-to-end flow over the library API: register, search, edit, delete,
//! export, with the collection persisted to a real file throughout.

use std::io::Write;

use stockbook::{editor::RecordDraft, export::Exporter, filter, store::Store};

#[tokio::test]
async fn full_register_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("inventoryItems.json");

    // Register two items, one with a photo.
    let photo = dir.path().join("widget.png");
    std::fs::File::create(&photo)
        .unwrap()
        .write_all(b"fake png bytes")
        .unwrap();

    let mut store = Store::open(&store_path);
    assert!(store.load_warning().is_none());

    let mut draft = RecordDraft::new();
    draft.name = "Widget".to_string();
    draft.set_quantity("10");
    draft.location = "Shelf A".to_string();
    draft.responsible = "Alice".to_string();
    draft.attach_images(&[&photo]).await.unwrap();
    let widget = draft.submit(&mut store).unwrap();

    // The draft reset after the create; reuse it for the second item.
    draft.name = "Gadget".to_string();
    draft.set_quantity("3");
    draft.location = "Drawer B".to_string();
    draft.responsible = "Bob".to_string();
    let gadget = draft.submit(&mut store).unwrap();

    assert_eq!(store.records().len(), 2);
    assert_ne!(widget.id, gadget.id);

    // Search finds by name and by quantity text.
    assert_eq!(filter::filter(store.records(), "widget").len(), 1);
    assert_eq!(filter::filter(store.records(), "10").len(), 1);
    assert_eq!(filter::filter(store.records(), "").len(), 2);

    // The collection survives a reload identically.
    let reloaded = Store::open(&store_path);
    assert_eq!(reloaded.records(), store.records());

    // Edit keeps identity and creation date, and its position in the list.
    let mut edit = RecordDraft::edit(widget.clone());
    edit.set_quantity("15");
    let updated = edit.submit(&mut store).unwrap();
    assert_eq!(updated.id, widget.id);
    assert_eq!(updated.created_at, widget.created_at);
    assert_eq!(store.records()[0].quantity, 15);
    assert_eq!(store.records().len(), 2);

    // Export: one spreadsheet plus exactly the one decodable image.
    let archive_path = dir.path().join("inventory_export.zip");
    let exporter = Exporter::new();
    exporter
        .export(store.records(), &archive_path)
        .await
        .unwrap();

    let file = std::fs::File::open(&archive_path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    assert!(names.contains(&"inventory.xlsx".to_string()));
    assert_eq!(
        names.iter().filter(|n| n.starts_with("images/")).count(),
        1
    );
    assert!(names.contains(&format!("images/item_{}_image_0.jpg", widget.id)));

    // Delete one, tolerate deleting the other twice.
    store.remove(&gadget.id);
    store.remove(&gadget.id);
    assert_eq!(store.records().len(), 1);

    let after_delete = Store::open(&store_path);
    assert_eq!(after_delete.records().len(), 1);
    assert_eq!(after_delete.records()[0].id, widget.id);
}
