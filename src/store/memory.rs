//! In-memory record store for tests, seeded with a slice of the library schema.

use crate::config::{library_catalogue, resolve, RegisteredTable, ResolvedConfig};
use crate::error::AppError;
use crate::schema::ColumnDescriptor;
use crate::store::RecordStore;
use crate::value::{FieldValue, Record};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
struct MemTable {
    columns: Vec<ColumnDescriptor>,
    rows: Vec<Record>,
    next_id: i64,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, MemTable>>,
}

pub fn column(name: &str, declared_type: &str) -> ColumnDescriptor {
    ColumnDescriptor {
        name: name.into(),
        declared_type: declared_type.into(),
        nullable: true,
        default_value: None,
        is_auto_generated: false,
        is_primary_key: false,
    }
}

pub fn auto_pk(name: &str) -> ColumnDescriptor {
    ColumnDescriptor {
        nullable: false,
        is_auto_generated: true,
        is_primary_key: true,
        ..column(name, "int(11)")
    }
}

pub fn required(mut c: ColumnDescriptor) -> ColumnDescriptor {
    c.nullable = false;
    c
}

impl MemoryStore {
    pub fn with_table(self, name: &str, columns: Vec<ColumnDescriptor>) -> Self {
        self.tables.lock().unwrap().insert(
            name.to_string(),
            MemTable {
                columns,
                rows: Vec::new(),
                next_id: 1,
            },
        );
        self
    }

    pub fn seed(&self, table: &str, rows: Vec<Vec<(&str, FieldValue)>>) {
        let mut tables = self.tables.lock().unwrap();
        let t = tables.get_mut(table).expect("seeded table exists");
        for row in rows {
            let rec: Record = row.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
            if let Some(FieldValue::Int(n)) = t.columns.iter().find(|c| c.is_primary_key).and_then(|c| rec.get(&c.name)) {
                t.next_id = t.next_id.max(n + 1);
            }
            t.rows.push(rec);
        }
    }

    pub fn row_count(&self, table: &str) -> usize {
        self.tables.lock().unwrap().get(table).map(|t| t.rows.len()).unwrap_or(0)
    }

    /// editorial, libros, usuarios, bibliotecario and prestamo with a few rows each.
    pub fn library() -> Self {
        let store = MemoryStore::default()
            .with_table(
                "editorial",
                vec![auto_pk("id_editorial"), required(column("nom_editorial", "varchar(120)"))],
            )
            .with_table(
                "libros",
                vec![
                    auto_pk("id_libro"),
                    required(column("titulo", "varchar(255)")),
                    column("sinopsis", "text"),
                    column("precio", "decimal(10,2)"),
                    column("fecha_publicacion", "date"),
                    column("id_editorial", "int(11)"),
                ],
            )
            .with_table(
                "usuarios",
                vec![
                    auto_pk("id_usuarios"),
                    required(column("nom_usuarios", "varchar(80)")),
                    column("apell_usuarios", "varchar(80)"),
                ],
            )
            .with_table(
                "bibliotecario",
                vec![
                    auto_pk("id_biblio"),
                    required(column("nombre_biblio", "varchar(80)")),
                    column("apellido_biblio", "varchar(80)"),
                ],
            )
            .with_table(
                "prestamo",
                vec![
                    auto_pk("id_prestamo"),
                    column("fecha_prestamo", "datetime"),
                    column("id_usuarios", "int(11)"),
                    column("id_biblio", "int(11)"),
                ],
            );
        store.seed(
            "editorial",
            vec![
                vec![("id_editorial", FieldValue::Int(1)), ("nom_editorial", "Planeta".into())],
                vec![("id_editorial", FieldValue::Int(3)), ("nom_editorial", "Alfaguara".into())],
            ],
        );
        store.seed(
            "usuarios",
            vec![
                vec![("id_usuarios", FieldValue::Int(1)), ("nom_usuarios", "John".into()), ("apell_usuarios", "Doe".into())],
                vec![("id_usuarios", FieldValue::Int(2)), ("nom_usuarios", "Ana".into()), ("apell_usuarios", FieldValue::Null)],
            ],
        );
        store.seed(
            "bibliotecario",
            vec![vec![("id_biblio", FieldValue::Int(1)), ("nombre_biblio", "Rosa".into()), ("apellido_biblio", "Paz".into())]],
        );
        store.seed(
            "libros",
            vec![vec![
                ("id_libro", FieldValue::Int(1)),
                ("titulo", "Rayuela".into()),
                ("sinopsis", FieldValue::Null),
                ("precio", FieldValue::Text("12.50".into())),
                ("fecha_publicacion", "1963-06-28".into()),
                ("id_editorial", FieldValue::Int(3)),
            ]],
        );
        store.seed(
            "prestamo",
            vec![vec![
                ("id_prestamo", FieldValue::Int(1)),
                ("fecha_prestamo", "2024-03-01T10:00:00".into()),
                ("id_usuarios", FieldValue::Int(1)),
                ("id_biblio", FieldValue::Int(1)),
            ]],
        );
        store
    }
}

/// The built-in catalogue; its registry covers every table `MemoryStore::library` creates.
pub fn library_config() -> ResolvedConfig {
    resolve(&library_catalogue()).unwrap()
}

fn pk_of(t: &MemTable, table: &RegisteredTable) -> String {
    t.columns
        .iter()
        .find(|c| c.is_primary_key)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| table.primary_key.clone())
}

fn missing(table: &str) -> AppError {
    AppError::Db(sqlx::Error::Protocol(format!("Table '{}' doesn't exist", table)))
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>, AppError> {
        Ok(self.tables.lock().unwrap().get(table).map(|t| t.columns.clone()).unwrap_or_default())
    }

    async fn fetch_page(&self, table: &RegisteredTable, limit: u64, offset: u64) -> Result<Vec<Record>, AppError> {
        let tables = self.tables.lock().unwrap();
        let t = tables.get(&table.name).ok_or_else(|| missing(&table.name))?;
        Ok(t.rows.iter().skip(offset as usize).take(limit as usize).cloned().collect())
    }

    async fn count(&self, table: &RegisteredTable) -> Result<u64, AppError> {
        let tables = self.tables.lock().unwrap();
        let t = tables.get(&table.name).ok_or_else(|| missing(&table.name))?;
        Ok(t.rows.len() as u64)
    }

    async fn fetch_by_key(&self, table: &RegisteredTable, key: &FieldValue) -> Result<Option<Record>, AppError> {
        let tables = self.tables.lock().unwrap();
        let t = tables.get(&table.name).ok_or_else(|| missing(&table.name))?;
        Ok(t.rows
            .iter()
            .find(|r| r.get(&table.primary_key).map(|v| v.loosely_eq(key)).unwrap_or(false))
            .cloned())
    }

    async fn insert(&self, table: &RegisteredTable, fields: &Record) -> Result<Option<FieldValue>, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let t = tables.get_mut(&table.name).ok_or_else(|| missing(&table.name))?;
        let pk = pk_of(t, table);
        let auto = t.columns.iter().any(|c| c.name == pk && c.is_auto_generated);
        let mut row: Record = t.columns.iter().map(|c| (c.name.clone(), FieldValue::Null)).collect();
        for (k, v) in fields {
            if !row.contains_key(k) {
                return Err(AppError::Db(sqlx::Error::Protocol(format!("Unknown column '{}'", k))));
            }
            row.insert(k.clone(), v.clone());
        }
        let generated = if auto && row.get(&pk).map(FieldValue::is_null).unwrap_or(true) {
            let id = t.next_id;
            t.next_id += 1;
            row.insert(pk, FieldValue::Int(id));
            Some(FieldValue::Int(id))
        } else {
            None
        };
        t.rows.push(row);
        Ok(generated)
    }

    async fn update(&self, table: &RegisteredTable, key: &FieldValue, fields: &Record) -> Result<u64, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let t = tables.get_mut(&table.name).ok_or_else(|| missing(&table.name))?;
        let mut affected = 0;
        for row in t.rows.iter_mut() {
            if row.get(&table.primary_key).map(|v| v.loosely_eq(key)).unwrap_or(false) {
                for (k, v) in fields {
                    row.insert(k.clone(), v.clone());
                }
                affected += 1;
            }
        }
        Ok(affected)
    }

    async fn delete(&self, table: &RegisteredTable, key: &FieldValue) -> Result<u64, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let t = tables.get_mut(&table.name).ok_or_else(|| missing(&table.name))?;
        let before = t.rows.len();
        t.rows
            .retain(|r| !r.get(&table.primary_key).map(|v| v.loosely_eq(key)).unwrap_or(false));
        Ok((before - t.rows.len()) as u64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
