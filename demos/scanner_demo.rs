use tagcheck::{render_text, BalanceChecker, Scanner, VocabularyRegistry};

fn main() {
    println!("=== Tag Scanner Demo ===");

    let registry = VocabularyRegistry::with_built_ins();
    let vocabulary = match registry.resolve("react-html") {
        Ok(vocabulary) => vocabulary,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };
    let scanner = match Scanner::new(vocabulary) {
        Ok(scanner) => scanner,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };

    let document = r#"<section className="contacts">
  <header>
    <h1>Contacts</h1>
    <button onClick={() => setOpen(true)}>
      <Plus size={16} /> New
    </button>
  </div>
  <Avatar
    src={contact.avatar}
  />
"#;

    println!("\nEvents:");
    for event in scanner.events(document) {
        println!("  {:?}", event);
    }

    println!("\nReport:");
    let report = BalanceChecker::new().check(scanner.events(document));
    for line in render_text(&report.diagnostics) {
        println!("  {}", line);
    }
}
