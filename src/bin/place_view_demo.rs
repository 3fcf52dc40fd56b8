//! Demo: place a view on a sheet, then try again and watch the rollback.

use anyhow::Context;
use sheetplace::logging::{self, Profile};
use sheetplace::{
    Command, CommandResult, Document, Outline, PlaceViewCommand, Sheet, Vector2, View, ViewType,
};

fn sample_document() -> anyhow::Result<Document> {
    let mut doc = Document::new("Demo project");
    doc.add_entity(Sheet::new("A101", "My First Sheet"))
        .context("adding sheet")?;
    doc.add_entity(View::new(
        "Our first plan!",
        ViewType::FloorPlan,
        Outline::rectangle(Vector2::new(0.0, 0.0), Vector2::new(24000.0, 16000.0)),
    ))
    .context("adding view")?;
    Ok(doc)
}

fn report(doc: &Document, attempt: usize, result: CommandResult, message: &str) {
    match result {
        CommandResult::Succeeded => println!("  attempt {attempt}: {result}"),
        CommandResult::Failed => println!("  attempt {attempt}: {result} ({message})"),
    }
    for vp in doc.viewports() {
        println!(
            "    viewport {:<6} {:<20} center={} size={}x{}",
            vp.common.handle.to_string(),
            vp.common.name,
            vp.center,
            vp.width,
            vp.height
        );
    }
}

fn main() -> anyhow::Result<()> {
    logging::init(Profile::Development);

    let mut doc = sample_document()?;
    let command = PlaceViewCommand::new();

    println!("Running '{}' on '{}'", command.name(), doc.title);
    for attempt in 1..=2 {
        let mut message = String::new();
        let result = command.execute(&mut doc, &mut message);
        report(&doc, attempt, result, &message);
    }

    println!("Transaction history:");
    for record in doc.transaction_history() {
        match &record.reason {
            Some(reason) => println!("  {:<12} {} ({reason})", record.name, record.status),
            None => println!("  {:<12} {}", record.name, record.status),
        }
    }
    for notification in &doc.notifications {
        println!("  {notification}");
    }
    Ok(())
}
