//! Basic example of using the Quizdle grid model

use quizdle_core::{assemble_document, Direction, Grid, Placement, PuzzleDraft};

fn main() {
    // A small layout, the shape the layout service would return
    let clues = vec![
        Placement::new("CAT", 0, 0, Direction::Across),
        Placement::new("COW", 0, 0, Direction::Down),
        Placement::new("WET", 2, 0, Direction::Across),
        Placement::new("TOT", 0, 2, Direction::Down),
        Placement::new("EELS", 2, 1, Direction::Down),
    ];

    println!("Projecting {} placements onto a 6x6 grid...\n", clues.len());
    let mut grid = Grid::new(6);
    let conflicts = grid.project(&clues).expect("placements should fit");

    println!("{}", grid);
    println!("Filled cells: {}", grid.filled_count());
    println!("Conflicts: {}", conflicts.len());

    // Read the words back out of the grid
    println!("\nExtracted occurrences:");
    for occurrence in grid.occurrences() {
        println!("  {}\t{}", occurrence.word, occurrence.position_code());
    }

    // Assemble an upload document from a finished draft
    let mut draft = PuzzleDraft::new();
    let answers = ["CAT", "COW", "WET", "TOT", "EELS"];
    for (i, answer) in answers.iter().enumerate() {
        draft.set_question(i, &format!("Question {}", i + 1));
        draft.set_answer(i, answer);
    }

    match assemble_document(&draft, "2025-11-03", &clues) {
        Ok(document) => {
            println!("\nUpload document:");
            println!("  date = {}", document.date().unwrap_or("?"));
            for n in 1..=5 {
                let key = format!("rowCol{}", n);
                println!("  {} = {}", key, document.get(&key).unwrap_or("?"));
            }
        }
        Err(e) => println!("Could not assemble document: {}", e),
    }
}
