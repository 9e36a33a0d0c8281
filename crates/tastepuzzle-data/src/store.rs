//! The rusqlite-backed [`DataAccess`] implementation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use rusqlite::{params, params_from_iter, types::Value, Connection, OptionalExtension};
use tastepuzzle_foundation::{CartEntry, RecipeFilters};

use crate::types::{NewIngredient, NewRecipe, ProfileStats, Recipe, RecipeId, UserId};
use crate::DataAccess;

/// Database version for migrations.
const SCHEMA_VERSION: i32 = 1;

/// Label used for recipes whose dish type was never set.
const UNCATEGORIZED: &str = "Uncategorized";

/// The persistence store backed by SQLite. One connection, synchronous.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open or create the database at the default location
    /// (`<data dir>/PuzzleVkusov/recipes.db`).
    pub fn open_default() -> Result<Self> {
        let path = default_db_path()?;
        Self::open(&path)
    }

    /// Open or create the database at a specific path.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {:?}", path))?;

        let mut store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Open an in-memory database. Used by the test harness and the data
    /// tests; never by the application itself.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Returns the id for `login`, creating the user on first sight.
    pub fn ensure_user(&self, login: &str) -> Result<UserId> {
        self.conn.execute(
            "INSERT OR IGNORE INTO users (login) VALUES (?1)",
            params![login],
        )?;
        let id = self.conn.query_row(
            "SELECT id FROM users WHERE login = ?1",
            params![login],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    fn initialize(&mut self) -> Result<()> {
        let version = self.get_schema_version()?;

        if version == 0 {
            self.create_schema()?;
        } else if version < SCHEMA_VERSION {
            self.migrate(version)?;
        }

        Ok(())
    }

    fn get_schema_version(&self) -> Result<i32> {
        let exists: bool = self
            .conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type='table' AND name='meta'",
                [],
                |_| Ok(true),
            )
            .unwrap_or(false);

        if !exists {
            return Ok(0);
        }

        let version: i32 = self
            .conn
            .query_row(
                "SELECT value FROM meta WHERE key = 'schema_version'",
                [],
                |row| {
                    let v: String = row.get(0)?;
                    Ok(v.parse().unwrap_or(0))
                },
            )
            .unwrap_or(0);

        Ok(version)
    }

    fn create_schema(&mut self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            -- Metadata table for schema versioning
            CREATE TABLE IF NOT EXISTS meta (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                login TEXT NOT NULL UNIQUE,
                avatar BLOB
            );

            CREATE TABLE IF NOT EXISTS cuisines (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            );

            CREATE TABLE IF NOT EXISTS dish_types (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            );

            CREATE TABLE IF NOT EXISTS recipes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                time_to_cook INTEGER,
                cuisine_id INTEGER REFERENCES cuisines(id),
                dish_type_id INTEGER REFERENCES dish_types(id)
            );

            CREATE TABLE IF NOT EXISTS ingredients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            );

            CREATE TABLE IF NOT EXISTS recipe_ingredients (
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                ingredient_id INTEGER NOT NULL REFERENCES ingredients(id),
                quantity TEXT NOT NULL DEFAULT '',
                unit TEXT NOT NULL DEFAULT ''
            );

            -- Per-user favorite/cooked flags
            CREATE TABLE IF NOT EXISTS user_recipe_status (
                user_id INTEGER NOT NULL REFERENCES users(id),
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                favorite INTEGER NOT NULL DEFAULT 0,
                cooked INTEGER NOT NULL DEFAULT 0,
                PRIMARY KEY (user_id, recipe_id)
            );

            -- Raw cart rows; duplicates allowed, aggregation happens in memory
            CREATE TABLE IF NOT EXISTS cart_items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id),
                name TEXT NOT NULL,
                quantity TEXT NOT NULL DEFAULT '',
                unit TEXT NOT NULL DEFAULT ''
            );

            CREATE INDEX IF NOT EXISTS idx_cart_user ON cart_items(user_id);
            CREATE INDEX IF NOT EXISTS idx_ri_recipe ON recipe_ingredients(recipe_id);

            INSERT OR REPLACE INTO meta (key, value) VALUES ('schema_version', '1');
            "#,
        )?;

        Ok(())
    }

    fn migrate(&mut self, _from_version: i32) -> Result<()> {
        // Future migrations go here
        Ok(())
    }

    fn get_or_insert_name(&self, table: &str, name: &str) -> Result<i64> {
        // `table` is always a compile-time constant from this module.
        self.conn.execute(
            &format!("INSERT OR IGNORE INTO {} (name) VALUES (?1)", table),
            params![name],
        )?;
        let id = self.conn.query_row(
            &format!("SELECT id FROM {} WHERE name = ?1", table),
            params![name],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    fn recipes_where(&self, user: UserId, extra: &str) -> Result<Vec<Recipe>> {
        let sql = format!("{} {} ORDER BY r.name", recipe_select_sql(), extra);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![user], recipe_from_row)?;
        let mut recipes = Vec::new();
        for row in rows {
            recipes.push(row?);
        }
        Ok(recipes)
    }
}

/// The shared SELECT head for recipe queries: per-user flags joined in,
/// nullable cuisine/dish-type resolved to names.
fn recipe_select_sql() -> &'static str {
    "SELECT r.id, r.name, r.description, r.time_to_cook, \
            COALESCE(s.favorite, 0), COALESCE(s.cooked, 0), \
            c.name, COALESCE(dt.name, 'Uncategorized') \
     FROM recipes r \
     LEFT JOIN cuisines c ON c.id = r.cuisine_id \
     LEFT JOIN dish_types dt ON dt.id = r.dish_type_id \
     LEFT JOIN user_recipe_status s ON s.recipe_id = r.id AND s.user_id = ?1"
}

fn recipe_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Recipe> {
    Ok(Recipe {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        time_to_cook: row.get(3)?,
        favorite: row.get(4)?,
        cooked: row.get(5)?,
        cuisine: row.get(6)?,
        dish_type: row.get(7)?,
    })
}

impl DataAccess for Store {
    fn recipes_with_filters(
        &self,
        user: UserId,
        filters: &RecipeFilters,
    ) -> Result<IndexMap<String, Vec<Recipe>>> {
        let mut sql = format!("{} WHERE 1=1", recipe_select_sql());
        let mut values: Vec<Value> = vec![Value::Integer(user)];

        if let Some(cuisine) = &filters.cuisine {
            values.push(Value::Text(cuisine.clone()));
            sql.push_str(&format!(" AND c.name = ?{}", values.len()));
        }
        if let Some(max_time) = filters.max_time {
            values.push(Value::Integer(max_time as i64));
            sql.push_str(&format!(
                " AND r.time_to_cook IS NOT NULL AND r.time_to_cook <= ?{}",
                values.len()
            ));
        }
        if filters.favorites_only {
            sql.push_str(" AND COALESCE(s.favorite, 0) = 1");
        }
        if filters.cooked_only {
            sql.push_str(" AND COALESCE(s.cooked, 0) = 1");
        }
        // Conjunction: the recipe must contain every selected ingredient.
        for ingredient in &filters.ingredients {
            values.push(Value::Text(ingredient.clone()));
            sql.push_str(&format!(
                " AND EXISTS (SELECT 1 FROM recipe_ingredients ri \
                   JOIN ingredients i ON i.id = ri.ingredient_id \
                   WHERE ri.recipe_id = r.id AND i.name = ?{})",
                values.len()
            ));
        }

        sql.push_str(" ORDER BY COALESCE(dt.name, 'Uncategorized'), r.name");

        let mut stmt = self.conn.prepare(&sql).context("Bad recipe filter query")?;
        let rows = stmt.query_map(params_from_iter(values), recipe_from_row)?;

        // The name filter runs in Rust, not SQL: SQLite's LOWER() folds
        // ASCII only, which would miss non-Latin recipe names entirely.
        // Datasets are small enough that post-filtering is fine.
        let needle = filters.name.trim().to_lowercase();

        let mut grouped: IndexMap<String, Vec<Recipe>> = IndexMap::new();
        for row in rows {
            let recipe = row?;
            if !needle.is_empty() && !recipe.name.to_lowercase().contains(&needle) {
                continue;
            }
            grouped
                .entry(recipe.dish_type.clone())
                .or_default()
                .push(recipe);
        }
        log::debug!(
            "loaded {} recipe groups for user {} with filters {:?}",
            grouped.len(),
            user,
            filters
        );
        Ok(grouped)
    }

    fn toggle_favorite(&self, user: UserId, recipe: RecipeId) -> Result<bool> {
        self.conn.execute(
            "INSERT INTO user_recipe_status (user_id, recipe_id, favorite, cooked) \
             VALUES (?1, ?2, 1, 0) \
             ON CONFLICT(user_id, recipe_id) DO UPDATE SET favorite = 1 - favorite",
            params![user, recipe],
        )?;
        let favorite: bool = self.conn.query_row(
            "SELECT favorite FROM user_recipe_status WHERE user_id = ?1 AND recipe_id = ?2",
            params![user, recipe],
            |row| row.get(0),
        )?;
        Ok(favorite)
    }

    fn set_cooked(&self, user: UserId, recipe: RecipeId, cooked: bool) -> Result<()> {
        self.conn.execute(
            "INSERT INTO user_recipe_status (user_id, recipe_id, favorite, cooked) \
             VALUES (?1, ?2, 0, ?3) \
             ON CONFLICT(user_id, recipe_id) DO UPDATE SET cooked = excluded.cooked",
            params![user, recipe, cooked],
        )?;
        Ok(())
    }

    fn favorite_recipes(&self, user: UserId) -> Result<Vec<Recipe>> {
        self.recipes_where(user, "WHERE COALESCE(s.favorite, 0) = 1")
    }

    fn cooked_recipes(&self, user: UserId) -> Result<Vec<Recipe>> {
        self.recipes_where(user, "WHERE COALESCE(s.cooked, 0) = 1")
    }

    fn recipe_ingredients(&self, recipe: RecipeId) -> Result<Vec<NewIngredient>> {
        let mut stmt = self.conn.prepare(
            "SELECT i.name, ri.quantity, ri.unit FROM recipe_ingredients ri \
             JOIN ingredients i ON i.id = ri.ingredient_id \
             WHERE ri.recipe_id = ?1 ORDER BY ri.rowid",
        )?;
        let rows = stmt.query_map(params![recipe], |row| {
            Ok(NewIngredient {
                name: row.get(0)?,
                quantity: row.get(1)?,
                unit: row.get(2)?,
            })
        })?;
        let mut ingredients = Vec::new();
        for row in rows {
            ingredients.push(row?);
        }
        Ok(ingredients)
    }

    fn cart_items(&self, user: UserId) -> Result<Vec<CartEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, quantity, unit FROM cart_items WHERE user_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![user], |row| {
            Ok(CartEntry {
                name: row.get(0)?,
                quantity: row.get(1)?,
                unit: row.get(2)?,
            })
        })?;
        let mut items = Vec::new();
        for row in rows {
            items.push(row?);
        }
        Ok(items)
    }

    fn add_cart_item(&self, user: UserId, name: &str, quantity: &str, unit: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO cart_items (user_id, name, quantity, unit) VALUES (?1, ?2, ?3, ?4)",
            params![user, name, quantity, unit],
        )?;
        Ok(())
    }

    fn remove_cart_items(&self, user: UserId, keys: &[(String, String)]) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let mut removed = 0;
        for (name, unit) in keys {
            removed += tx.execute(
                "DELETE FROM cart_items WHERE user_id = ?1 AND name = ?2 AND unit = ?3",
                params![user, name, unit],
            )?;
        }
        tx.commit()?;
        Ok(removed)
    }

    fn clear_cart(&self, user: UserId) -> Result<()> {
        self.conn
            .execute("DELETE FROM cart_items WHERE user_id = ?1", params![user])?;
        Ok(())
    }

    fn cuisines(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM cuisines ORDER BY name")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        let mut names = Vec::new();
        for row in rows {
            names.push(row?);
        }
        Ok(names)
    }

    fn ingredients(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM ingredients ORDER BY LOWER(name)")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        let mut names = Vec::new();
        for row in rows {
            names.push(row?);
        }
        Ok(names)
    }

    fn recipe_names(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT name FROM recipes ORDER BY name")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        let mut names = Vec::new();
        for row in rows {
            names.push(row?);
        }
        Ok(names)
    }

    fn profile_stats(&self, user: UserId) -> Result<ProfileStats> {
        let recipes_count: u32 =
            self.conn
                .query_row("SELECT COUNT(*) FROM recipes", [], |row| row.get(0))?;
        let favorites_count: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM user_recipe_status WHERE user_id = ?1 AND favorite = 1",
            params![user],
            |row| row.get(0),
        )?;
        let cooked_count: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM user_recipe_status WHERE user_id = ?1 AND cooked = 1",
            params![user],
            |row| row.get(0),
        )?;
        let cart_count: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM cart_items WHERE user_id = ?1",
            params![user],
            |row| row.get(0),
        )?;
        Ok(ProfileStats {
            recipes_count,
            favorites_count,
            cooked_count,
            cart_count,
        })
    }

    fn user_login(&self, user: UserId) -> Result<Option<String>> {
        let login = self
            .conn
            .query_row(
                "SELECT login FROM users WHERE id = ?1",
                params![user],
                |row| row.get(0),
            )
            .optional()?;
        Ok(login)
    }

    fn avatar(&self, user: UserId) -> Result<Option<Vec<u8>>> {
        let avatar: Option<Option<Vec<u8>>> = self
            .conn
            .query_row(
                "SELECT avatar FROM users WHERE id = ?1",
                params![user],
                |row| row.get(0),
            )
            .optional()?;
        Ok(avatar.flatten())
    }

    fn update_avatar(&self, user: UserId, avatar: &[u8]) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE users SET avatar = ?2 WHERE id = ?1",
            params![user, avatar],
        )?;
        anyhow::ensure!(changed == 1, "No such user: {}", user);
        Ok(())
    }

    fn add_recipe(&self, recipe: &NewRecipe) -> Result<RecipeId> {
        let tx = self.conn.unchecked_transaction()?;

        let cuisine_id = match &recipe.cuisine {
            Some(name) => Some(self.get_or_insert_name("cuisines", name)?),
            None => None,
        };
        let dish_type = if recipe.dish_type.is_empty() {
            UNCATEGORIZED
        } else {
            &recipe.dish_type
        };
        let dish_type_id = self.get_or_insert_name("dish_types", dish_type)?;

        tx.execute(
            "INSERT INTO recipes (name, description, time_to_cook, cuisine_id, dish_type_id) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                recipe.name,
                recipe.description,
                recipe.time_to_cook,
                cuisine_id,
                dish_type_id
            ],
        )?;
        let recipe_id = tx.last_insert_rowid();

        for ingredient in &recipe.ingredients {
            let ingredient_id = self.get_or_insert_name("ingredients", &ingredient.name)?;
            tx.execute(
                "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, quantity, unit) \
                 VALUES (?1, ?2, ?3, ?4)",
                params![recipe_id, ingredient_id, ingredient.quantity, ingredient.unit],
            )?;
        }

        tx.commit()?;
        log::info!("added recipe '{}' (#{})", recipe.name, recipe_id);
        Ok(recipe_id)
    }

    fn delete_recipe(&self, recipe: RecipeId) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "DELETE FROM recipe_ingredients WHERE recipe_id = ?1",
            params![recipe],
        )?;
        tx.execute(
            "DELETE FROM user_recipe_status WHERE recipe_id = ?1",
            params![recipe],
        )?;
        tx.execute("DELETE FROM recipes WHERE id = ?1", params![recipe])?;
        tx.commit()?;
        Ok(())
    }
}

fn default_db_path() -> Result<PathBuf> {
    let dir = dirs::data_dir().context("No data directory available")?;
    Ok(dir.join("PuzzleVkusov").join("recipes.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(name: &str, dish_type: &str, cuisine: Option<&str>, minutes: u32) -> NewRecipe {
        NewRecipe {
            name: name.into(),
            description: format!("{} description", name),
            time_to_cook: Some(minutes),
            cuisine: cuisine.map(Into::into),
            dish_type: dish_type.into(),
            ingredients: Vec::new(),
        }
    }

    fn seeded_store() -> (Store, UserId) {
        let store = Store::open_in_memory().unwrap();
        let user = store.ensure_user("alice").unwrap();

        let mut borscht = recipe("Borscht", "Soups", Some("Ukrainian"), 90);
        borscht.ingredients = vec![
            NewIngredient::new("Beetroot", "2", "pcs"),
            NewIngredient::new("Cabbage", "300", "g"),
        ];
        store.add_recipe(&borscht).unwrap();

        let mut carbonara = recipe("Carbonara", "Main courses", Some("Italian"), 25);
        carbonara.ingredients = vec![
            NewIngredient::new("Spaghetti", "400", "g"),
            NewIngredient::new("Eggs", "3", "pcs"),
        ];
        store.add_recipe(&carbonara).unwrap();

        let mut caesar = recipe("Caesar salad", "Salads", Some("Italian"), 15);
        caesar.ingredients = vec![
            NewIngredient::new("Lettuce", "1", "pcs"),
            NewIngredient::new("Eggs", "2", "pcs"),
        ];
        store.add_recipe(&caesar).unwrap();

        (store, user)
    }

    #[test]
    fn test_unfiltered_grouping() {
        let (store, user) = seeded_store();
        let grouped = store
            .recipes_with_filters(user, &RecipeFilters::default())
            .unwrap();

        let categories: Vec<_> = grouped.keys().cloned().collect();
        assert_eq!(categories, vec!["Main courses", "Salads", "Soups"]);
        assert_eq!(grouped["Soups"][0].name, "Borscht");
        assert_eq!(grouped["Soups"][0].cuisine.as_deref(), Some("Ukrainian"));
    }

    #[test]
    fn test_cuisine_filter() {
        let (store, user) = seeded_store();
        let filters = RecipeFilters {
            cuisine: Some("Italian".into()),
            ..Default::default()
        };

        let grouped = store.recipes_with_filters(user, &filters).unwrap();
        let total: usize = grouped.values().map(Vec::len).sum();
        assert_eq!(total, 2);
        assert!(!grouped.contains_key("Soups"));
    }

    #[test]
    fn test_max_time_filter() {
        let (store, user) = seeded_store();
        let filters = RecipeFilters {
            max_time: Some(30),
            ..Default::default()
        };

        let grouped = store.recipes_with_filters(user, &filters).unwrap();
        let names: Vec<_> = grouped
            .values()
            .flatten()
            .map(|r| r.name.clone())
            .collect();
        assert_eq!(names, vec!["Carbonara", "Caesar salad"]);
    }

    #[test]
    fn test_name_filter_is_case_insensitive_substring() {
        let (store, user) = seeded_store();
        let filters = RecipeFilters {
            name: "CARB".into(),
            ..Default::default()
        };

        let grouped = store.recipes_with_filters(user, &filters).unwrap();
        let names: Vec<_> = grouped.values().flatten().map(|r| &r.name).collect();
        assert_eq!(names, vec!["Carbonara"]);
    }

    #[test]
    fn test_name_filter_folds_case_beyond_ascii() {
        let (store, user) = seeded_store();
        store
            .add_recipe(&recipe("Борщ", "Soups", Some("Ukrainian"), 90))
            .unwrap();

        for query in ["борщ", "БОРЩ", "оРщ"] {
            let filters = RecipeFilters {
                name: query.into(),
                ..Default::default()
            };
            let grouped = store.recipes_with_filters(user, &filters).unwrap();
            let names: Vec<_> = grouped.values().flatten().map(|r| &r.name).collect();
            assert_eq!(names, vec!["Борщ"], "query {:?}", query);
        }
    }

    #[test]
    fn test_ingredient_filter_is_a_conjunction() {
        let (store, user) = seeded_store();

        // Eggs alone: both Carbonara and Caesar.
        let filters = RecipeFilters {
            ingredients: vec!["Eggs".into()],
            ..Default::default()
        };
        let grouped = store.recipes_with_filters(user, &filters).unwrap();
        assert_eq!(grouped.values().flatten().count(), 2);

        // Eggs AND Lettuce: only Caesar.
        let filters = RecipeFilters {
            ingredients: vec!["Eggs".into(), "Lettuce".into()],
            ..Default::default()
        };
        let grouped = store.recipes_with_filters(user, &filters).unwrap();
        let names: Vec<_> = grouped.values().flatten().map(|r| &r.name).collect();
        assert_eq!(names, vec!["Caesar salad"]);
    }

    #[test]
    fn test_favorite_toggle_round_trip() {
        let (store, user) = seeded_store();
        let grouped = store
            .recipes_with_filters(user, &RecipeFilters::default())
            .unwrap();
        let id = grouped["Soups"][0].id;

        assert!(store.toggle_favorite(user, id).unwrap());
        let favorites = store.favorite_recipes(user).unwrap();
        assert_eq!(favorites.len(), 1);
        assert!(favorites[0].favorite);

        assert!(!store.toggle_favorite(user, id).unwrap());
        assert!(store.favorite_recipes(user).unwrap().is_empty());
    }

    #[test]
    fn test_favorites_only_filter() {
        let (store, user) = seeded_store();
        let grouped = store
            .recipes_with_filters(user, &RecipeFilters::default())
            .unwrap();
        let id = grouped["Salads"][0].id;
        store.toggle_favorite(user, id).unwrap();

        let filters = RecipeFilters {
            favorites_only: true,
            ..Default::default()
        };
        let grouped = store.recipes_with_filters(user, &filters).unwrap();
        let names: Vec<_> = grouped.values().flatten().map(|r| &r.name).collect();
        assert_eq!(names, vec!["Caesar salad"]);
    }

    #[test]
    fn test_cooked_flag_and_filter() {
        let (store, user) = seeded_store();
        let grouped = store
            .recipes_with_filters(user, &RecipeFilters::default())
            .unwrap();
        let id = grouped["Main courses"][0].id;
        store.set_cooked(user, id, true).unwrap();

        let cooked = store.cooked_recipes(user).unwrap();
        assert_eq!(cooked.len(), 1);
        assert_eq!(cooked[0].name, "Carbonara");

        store.set_cooked(user, id, false).unwrap();
        assert!(store.cooked_recipes(user).unwrap().is_empty());
    }

    #[test]
    fn test_flags_are_per_user() {
        let (store, alice) = seeded_store();
        let bob = store.ensure_user("bob").unwrap();
        let grouped = store
            .recipes_with_filters(alice, &RecipeFilters::default())
            .unwrap();
        let id = grouped["Soups"][0].id;

        store.toggle_favorite(alice, id).unwrap();
        assert!(store.favorite_recipes(bob).unwrap().is_empty());
    }

    #[test]
    fn test_cart_round_trip() {
        let (store, user) = seeded_store();
        store.add_cart_item(user, "Salt", "5", "g").unwrap();
        store.add_cart_item(user, "Salt", "3", "g").unwrap();
        store.add_cart_item(user, "Milk", "1", "l").unwrap();

        // Raw rows, unmerged, insertion order.
        let items = store.cart_items(user).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], CartEntry::new("Salt", "5", "g"));

        let removed = store
            .remove_cart_items(user, &[("Salt".into(), "g".into())])
            .unwrap();
        assert_eq!(removed, 2);
        assert_eq!(store.cart_items(user).unwrap().len(), 1);

        store.clear_cart(user).unwrap();
        assert!(store.cart_items(user).unwrap().is_empty());
    }

    #[test]
    fn test_distinct_cuisines_and_ingredients() {
        let (store, _) = seeded_store();
        assert_eq!(store.cuisines().unwrap(), vec!["Italian", "Ukrainian"]);

        let ingredients = store.ingredients().unwrap();
        assert_eq!(
            ingredients,
            vec!["Beetroot", "Cabbage", "Eggs", "Lettuce", "Spaghetti"]
        );
    }

    #[test]
    fn test_recipe_names_for_suggestions() {
        let (store, _) = seeded_store();
        assert_eq!(
            store.recipe_names().unwrap(),
            vec!["Borscht", "Caesar salad", "Carbonara"]
        );
    }

    #[test]
    fn test_profile_stats() {
        let (store, user) = seeded_store();
        let grouped = store
            .recipes_with_filters(user, &RecipeFilters::default())
            .unwrap();
        let id = grouped["Soups"][0].id;
        store.toggle_favorite(user, id).unwrap();
        store.set_cooked(user, id, true).unwrap();
        store.add_cart_item(user, "Salt", "5", "g").unwrap();

        let stats = store.profile_stats(user).unwrap();
        assert_eq!(
            stats,
            ProfileStats {
                recipes_count: 3,
                favorites_count: 1,
                cooked_count: 1,
                cart_count: 1,
            }
        );
    }

    #[test]
    fn test_avatar_round_trip() {
        let (store, user) = seeded_store();
        assert!(store.avatar(user).unwrap().is_none());

        store.update_avatar(user, &[1, 2, 3]).unwrap();
        assert_eq!(store.avatar(user).unwrap(), Some(vec![1, 2, 3]));

        assert!(store.update_avatar(999, &[0]).is_err());
    }

    #[test]
    fn test_recipe_ingredients_in_order() {
        let (store, user) = seeded_store();
        let grouped = store
            .recipes_with_filters(user, &RecipeFilters::default())
            .unwrap();
        let id = grouped["Soups"][0].id;

        let ingredients = store.recipe_ingredients(id).unwrap();
        assert_eq!(ingredients[0].name, "Beetroot");
        assert_eq!(ingredients[1], NewIngredient::new("Cabbage", "300", "g"));
    }

    #[test]
    fn test_delete_recipe_cleans_up() {
        let (store, user) = seeded_store();
        let grouped = store
            .recipes_with_filters(user, &RecipeFilters::default())
            .unwrap();
        let id = grouped["Soups"][0].id;
        store.toggle_favorite(user, id).unwrap();

        store.delete_recipe(id).unwrap();

        let grouped = store
            .recipes_with_filters(user, &RecipeFilters::default())
            .unwrap();
        assert!(!grouped.contains_key("Soups"));
        assert!(store.recipe_ingredients(id).unwrap().is_empty());
        assert_eq!(store.profile_stats(user).unwrap().favorites_count, 0);
    }

    #[test]
    fn test_schema_version_is_recorded() {
        let store = Store::open_in_memory().unwrap();
        assert_eq!(store.get_schema_version().unwrap(), SCHEMA_VERSION);
    }
}
