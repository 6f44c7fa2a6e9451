//! Database access functions for categories.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::domain::{Category, CategoryId, CategoryName},
};

/// The categories created when the database is first initialized.
///
/// These match the classifier's rule table, so a freshly classified expense
/// always has a category row to land in.
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Food & Drinks",
    "Transportation",
    "House",
    "Study",
    "Shopping",
    "Others",
];

/// Create a category in the database with no spending limit.
///
/// # Errors
/// Returns [Error::DuplicateCategoryName] if a category called `name` already
/// exists, otherwise an error if there is an SQL error.
pub fn create_category(name: CategoryName, connection: &Connection) -> Result<Category, Error> {
    connection
        .execute(
            "INSERT INTO category (name) VALUES (?1);",
            (name.as_ref(),),
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
                },
                _,
            ) => Error::DuplicateCategoryName,
            error => error.into(),
        })?;

    let id = connection.last_insert_rowid();

    Ok(Category {
        id,
        name,
        spending_limit: 0,
    })
}

/// Retrieve the category with `category_id` from the database.
///
/// # Errors
/// Returns [Error::NotFound] if there is no category with `category_id`,
/// otherwise an error if there is an SQL error.
pub fn get_category(category_id: CategoryId, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, name, spending_limit FROM category WHERE id = :id;")?
        .query_one(&[(":id", &category_id)], map_category_row)
        .map_err(|error| error.into())
}

/// Retrieve the category called `name` from the database.
///
/// Used to resolve the category suggested by the keyword classifier.
///
/// # Errors
/// Returns [Error::NotFound] if there is no category called `name`, otherwise
/// an error if there is an SQL error.
pub fn get_category_by_name(name: &str, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, name, spending_limit FROM category WHERE name = :name;")?
        .query_one(&[(":name", &name)], map_category_row)
        .map_err(|error| error.into())
}

/// Retrieve all categories from the database, sorted by name.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, name, spending_limit FROM category ORDER BY name ASC;")?
        .query_map([], map_category_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Set the spending limit of the category with `category_id`.
///
/// A limit of zero clears the limit.
///
/// # Errors
/// Returns [Error::NegativeLimit] if `limit` is negative and
/// [Error::UpdateMissingCategory] if there is no category with `category_id`,
/// otherwise an error if there is an SQL error.
pub fn set_spending_limit(
    category_id: CategoryId,
    limit: i64,
    connection: &Connection,
) -> Result<(), Error> {
    if limit < 0 {
        return Err(Error::NegativeLimit(limit));
    }

    let rows_affected = connection.execute(
        "UPDATE category SET spending_limit = ?1 WHERE id = ?2;",
        (limit, category_id),
    )?;

    if rows_affected == 0 {
        Err(Error::UpdateMissingCategory)
    } else {
        Ok(())
    }
}

/// Create the category table in the database.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            spending_limit INTEGER NOT NULL DEFAULT 0
        );
        INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('category', 0);",
    )
}

/// Insert the [DEFAULT_CATEGORIES] that are not already in the database.
///
/// Existing categories keep their IDs and spending limits, so this is safe to
/// run on every start-up.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub fn seed_default_categories(connection: &Connection) -> Result<(), rusqlite::Error> {
    for name in DEFAULT_CATEGORIES {
        connection.execute("INSERT OR IGNORE INTO category (name) VALUES (?1);", (name,))?;
    }

    Ok(())
}

fn map_category_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let name = CategoryName::new_unchecked(&raw_name);
    let spending_limit = row.get(2)?;

    Ok(Category {
        id,
        name,
        spending_limit,
    })
}

#[cfg(test)]
mod category_query_tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        category::{
            CategoryName,
            db::{
                DEFAULT_CATEGORIES, create_category, create_category_table, get_all_categories,
                get_category, get_category_by_name, seed_default_categories, set_spending_limit,
            },
        },
    };

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_category_table(&connection).expect("Could not create category table");

        connection
    }

    #[test]
    fn create_category_succeeds() {
        let connection = get_test_connection();
        let name = CategoryName::new("Categorically a category").unwrap();

        let category = create_category(name.clone(), &connection);

        let category = category.expect("Could not create category");
        assert!(category.id > 0);
        assert_eq!(category.name, name);
        assert_eq!(category.spending_limit, 0);
    }

    #[test]
    fn create_category_fails_on_duplicate_name() {
        let connection = get_test_connection();
        let name = CategoryName::new_unchecked("Foo");
        create_category(name.clone(), &connection).expect("Could not create test category");

        let duplicate = create_category(name, &connection);

        assert_eq!(duplicate, Err(Error::DuplicateCategoryName));
    }

    #[test]
    fn get_category_succeeds() {
        let connection = get_test_connection();
        let inserted_category = create_category(CategoryName::new_unchecked("Foo"), &connection)
            .expect("Could not create test category");

        let selected_category = get_category(inserted_category.id, &connection);

        assert_eq!(Ok(inserted_category), selected_category);
    }

    #[test]
    fn get_category_with_invalid_id_returns_not_found() {
        let connection = get_test_connection();
        let inserted_category = create_category(CategoryName::new_unchecked("Foo"), &connection)
            .expect("Could not create test category");

        let selected_category = get_category(inserted_category.id + 123, &connection);

        assert_eq!(selected_category, Err(Error::NotFound));
    }

    #[test]
    fn get_category_by_name_succeeds() {
        let connection = get_test_connection();
        let inserted_category = create_category(CategoryName::new_unchecked("Foo"), &connection)
            .expect("Could not create test category");

        let selected_category = get_category_by_name("Foo", &connection);

        assert_eq!(Ok(inserted_category), selected_category);
    }

    #[test]
    fn get_category_by_unknown_name_returns_not_found() {
        let connection = get_test_connection();

        let selected_category = get_category_by_name("Foo", &connection);

        assert_eq!(selected_category, Err(Error::NotFound));
    }

    #[test]
    fn get_all_categories_sorts_by_name() {
        let connection = get_test_connection();
        create_category(CategoryName::new_unchecked("Zoo"), &connection)
            .expect("Could not create test category");
        create_category(CategoryName::new_unchecked("Aquarium"), &connection)
            .expect("Could not create test category");

        let categories = get_all_categories(&connection).expect("Could not get all categories");

        let names: Vec<&str> = categories
            .iter()
            .map(|category| category.name.as_ref())
            .collect();
        assert_eq!(names, ["Aquarium", "Zoo"]);
    }

    #[test]
    fn set_spending_limit_updates_the_category() {
        let connection = get_test_connection();
        let category = create_category(CategoryName::new_unchecked("Food & Drinks"), &connection)
            .expect("Could not create test category");

        set_spending_limit(category.id, 120_000, &connection).expect("Could not set limit");

        let updated = get_category(category.id, &connection).expect("Could not get category");
        assert_eq!(updated.spending_limit, 120_000);
        assert_eq!(updated.limit(), Some(120_000));
    }

    #[test]
    fn set_spending_limit_clears_with_zero() {
        let connection = get_test_connection();
        let category = create_category(CategoryName::new_unchecked("Shopping"), &connection)
            .expect("Could not create test category");
        set_spending_limit(category.id, 50_000, &connection).expect("Could not set limit");

        set_spending_limit(category.id, 0, &connection).expect("Could not clear limit");

        let updated = get_category(category.id, &connection).expect("Could not get category");
        assert_eq!(updated.limit(), None);
    }

    #[test]
    fn set_spending_limit_rejects_negative_limit() {
        let connection = get_test_connection();
        let category = create_category(CategoryName::new_unchecked("Study"), &connection)
            .expect("Could not create test category");

        let result = set_spending_limit(category.id, -1, &connection);

        assert_eq!(result, Err(Error::NegativeLimit(-1)));
    }

    #[test]
    fn set_spending_limit_fails_on_missing_category() {
        let connection = get_test_connection();

        let result = set_spending_limit(999, 10_000, &connection);

        assert_eq!(result, Err(Error::UpdateMissingCategory));
    }

    #[test]
    fn seed_creates_default_categories_once() {
        let connection = get_test_connection();

        seed_default_categories(&connection).expect("Could not seed categories");
        seed_default_categories(&connection).expect("Could not seed categories twice");

        let categories = get_all_categories(&connection).expect("Could not get all categories");

        assert_eq!(categories.len(), DEFAULT_CATEGORIES.len());
        for name in DEFAULT_CATEGORIES {
            assert!(
                categories
                    .iter()
                    .any(|category| category.name.as_ref() == name),
                "want category {name} to be seeded, got {categories:?}"
            );
        }
    }
}
