//! Circulation Integration Tests
//!
//! Checkout/return transitions and the availability/holdings invariant.

use bookdesk::core::{CirculationError, Library, Seed, SeedBook, SeedPatron};
use bookdesk::domain::Availability;

fn dune_and_alice() -> Library {
    let seed = Seed {
        books: vec![SeedBook {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            year: 1965,
        }],
        patrons: vec![SeedPatron {
            name: "Alice".to_string(),
            id: "P101".to_string(),
        }],
    };
    Library::seeded(&seed).unwrap()
}

fn snapshot(library: &Library) -> (bookdesk::Catalog, bookdesk::Roster) {
    (library.catalog().clone(), library.roster().clone())
}

#[test]
fn test_checkout_return_scenario() {
    let mut library = dune_and_alice();
    let dune = library.catalog().find_by_title("Dune").unwrap();
    let alice = library.roster().find_by_id("P101").unwrap();

    // First checkout succeeds
    library.checkout("P101", "Dune").unwrap();
    assert_eq!(
        library.catalog().get(dune).availability,
        Availability::CheckedOut {
            patron_id: "P101".to_string()
        }
    );
    assert_eq!(library.catalog().get(dune).held_by(), Some("P101"));
    assert_eq!(library.roster().holdings_of(alice), ["Dune"]);
    library.check_consistency().unwrap();

    // Second checkout is refused and changes nothing
    let before = snapshot(&library);
    let err = library.checkout("P101", "Dune").unwrap_err();
    assert_eq!(
        err,
        CirculationError::AlreadyCheckedOut {
            title: "Dune".to_string()
        }
    );
    assert_eq!(snapshot(&library), before);

    // Return restores availability
    library.return_book("P101", "Dune").unwrap();
    assert!(library.catalog().get(dune).is_available());
    assert_eq!(library.catalog().get(dune).held_by(), None);
    assert!(library.roster().holdings_of(alice).is_empty());
    library.check_consistency().unwrap();
}

#[test]
fn test_return_never_checked_out() {
    let mut library = dune_and_alice();
    let before = snapshot(&library);

    let err = library.return_book("P101", "Dune").unwrap_err();
    assert!(matches!(err, CirculationError::NotCheckedOutByThisPatron { .. }));
    assert_eq!(snapshot(&library), before);
}

#[test]
fn test_checkout_unknown_patron() {
    let mut library = dune_and_alice();
    let before = snapshot(&library);

    let err = library.checkout("P999", "Dune").unwrap_err();
    assert_eq!(
        err,
        CirculationError::PatronNotFound {
            patron_id: "P999".to_string()
        }
    );
    assert_eq!(snapshot(&library), before);
    assert!(library.journal().is_empty());
}

#[test]
fn test_checkout_unknown_book() {
    let mut library = dune_and_alice();
    let before = snapshot(&library);

    let err = library.checkout("P101", "Emma").unwrap_err();
    assert_eq!(
        err,
        CirculationError::BookNotFound {
            title: "Emma".to_string()
        }
    );
    assert_eq!(snapshot(&library), before);
}

#[test]
fn test_round_trip_restores_state() {
    let mut library = Library::seeded(&Seed::standard()).unwrap();
    library.checkout("P102", "1984").unwrap();

    let before = snapshot(&library);
    library.checkout("p101", "the lord of the rings").unwrap();
    library.return_book("P101", "The Lord of the Rings").unwrap();

    assert_eq!(snapshot(&library), before);
}

#[test]
fn test_return_by_non_holder_mutates_nothing() {
    let mut library = Library::seeded(&Seed::standard()).unwrap();
    library.checkout("P101", "Dune").unwrap();

    let before = snapshot(&library);
    let err = library.return_book("P102", "Dune").unwrap_err();

    assert_eq!(
        err,
        CirculationError::NotCheckedOutByThisPatron {
            title: "Dune".to_string(),
            patron_id: "P102".to_string(),
        }
    );
    assert_eq!(snapshot(&library), before);
}

#[test]
fn test_lookups_are_case_insensitive() {
    let library = Library::seeded(&Seed::standard()).unwrap();
    let catalog = library.catalog();

    assert!(catalog.find_by_title("dune").is_some());
    assert_eq!(catalog.find_by_title("dune"), catalog.find_by_title("DUNE"));
    assert_eq!(
        library.roster().find_by_id("p101"),
        library.roster().find_by_id("P101")
    );
}

#[test]
fn test_invariant_holds_across_mixed_activity() {
    let mut library = Library::seeded(&Seed::standard()).unwrap();
    library.add_book("Emma", "Jane Austen", 1815);
    library.add_patron("Carol", "P103");

    let script: [(&str, &str, bool); 10] = [
        ("P101", "Dune", true),
        ("P102", "dune", true),
        ("P102", "1984", true),
        ("P103", "Emma", true),
        ("P101", "1984", false),
        ("P102", "1984", true),
        ("P103", "Dune", false),
        ("p101", "DUNE", false),
        ("P103", "emma", false),
        ("P101", "Missing", true),
    ];

    for (patron_id, title, checkout) in script {
        let _ = if checkout {
            library.checkout(patron_id, title)
        } else {
            library.return_book(patron_id, title)
        };
        library.check_consistency().unwrap();
    }

    // Only 1984 remains out, with Bob
    let book = library.catalog().find_by_title("1984").unwrap();
    assert_eq!(library.catalog().get(book).held_by(), Some("P102"));
    let bob = library.roster().find_by_id("P102").unwrap();
    assert_eq!(library.roster().holdings_of(bob), ["1984"]);

    for book in library.catalog().books() {
        match book.held_by() {
            Some(holder) => {
                let patron = library.roster().find_by_id(holder).unwrap();
                assert!(library.roster().get(patron).holds(&book.title));
            }
            None => {
                assert!(library.roster().patrons().iter().all(|p| !p.holds(&book.title)));
            }
        }
    }
}

#[test]
fn test_duplicate_title_shadowed_by_first_copy() {
    let mut library = dune_and_alice();
    library.add_book("DUNE", "Frank Herbert", 1990);
    library.add_patron("Bob", "P102");

    library.checkout("P101", "dune").unwrap();
    // The second copy is unreachable by title lookup
    let err = library.checkout("P102", "Dune").unwrap_err();
    assert!(matches!(err, CirculationError::AlreadyCheckedOut { .. }));

    assert_eq!(library.catalog().books()[1].held_by(), None);
    library.check_consistency().unwrap();
}

#[test]
fn test_holdings_report_in_checkout_order() {
    let mut library = Library::seeded(&Seed::standard()).unwrap();
    library.checkout("P101", "Dune").unwrap();
    library.checkout("P101", "1984").unwrap();

    let report = library.holdings_report("P101").unwrap();
    assert_eq!(report.patron_name, "Alice");
    assert_eq!(report.titles, vec!["Dune", "1984"]);

    let err = library.holdings_report("P999").unwrap_err();
    assert!(matches!(err, CirculationError::PatronNotFound { .. }));
}
