use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Date, Duration, OffsetDateTime};

use spendlog::initialize_db;

/// A utility for creating a demo database for the spendlog server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Setting spending limits...");

    let limits = [
        ("Food & Drinks", 3_000_000),
        ("Transportation", 800_000),
        ("Study", 150_000),
    ];

    for (name, limit) in limits {
        conn.execute(
            "UPDATE category SET spending_limit = ?1 WHERE name = ?2",
            (limit, name),
        )?;
    }

    println!("Adding sample expenses...");

    let today = OffsetDateTime::now_utc().date();

    let expenses = [
        ("Grab to work", 42_000, 0, "Transportation"),
        ("Groceries at the wet market", 230_000, 1, "Food & Drinks"),
        ("Textbook for statistics course", 180_000, 2, "Study"),
        ("Monthly rent", 4_500_000, 3, "House"),
        ("New running shoes", 750_000, 4, "Shopping"),
        ("Coffee with friends", 90_000, 5, "Food & Drinks"),
        ("Bus ticket home", 120_000, 6, "Transportation"),
        ("Phone case from the mall", 150_000, 8, "Shopping"),
        ("KFC dinner", 185_000, 10, "Food & Drinks"),
    ];

    for (description, amount, days_ago, category) in expenses {
        insert_expense(
            &conn,
            description,
            amount,
            today - Duration::days(days_ago),
            category,
        )?;
    }

    // Enough rows that the history page needs more than one page.
    for days_ago in 0..30 {
        insert_expense(
            &conn,
            "Lunch near the office",
            45_000,
            today - Duration::days(days_ago),
            "Food & Drinks",
        )?;
    }

    println!("Success!");

    Ok(())
}

fn insert_expense(
    conn: &Connection,
    description: &str,
    amount: i64,
    date: Date,
    category: &str,
) -> Result<(), Box<dyn Error>> {
    let category_id: i64 = conn.query_one(
        "SELECT id FROM category WHERE name = ?1",
        (category,),
        |row| row.get(0),
    )?;

    conn.execute(
        "INSERT INTO expense (amount, date, description, category_id) VALUES (?1, ?2, ?3, ?4)",
        (amount, date, description, category_id),
    )?;

    Ok(())
}
