//! Built-in catalogue for the library database.

use crate::config::{ConsoleConfig, ForeignKeyConfig, TableConfig};

const TABLES: &[(&str, &str)] = &[
    ("autores", "id_autor"),
    ("libros", "id_libro"),
    ("usuarios", "id_usuarios"),
    ("editorial", "id_editorial"),
    ("prestamo", "id_prestamo"),
    ("correo_usuario", "id_correo_usuario"),
    ("direccion_usuario", "id_direccion_usuario"),
    ("documento_usuario", "id_documento_usuario"),
    ("telefono_usuario", "id_telefono_usuario"),
    ("bibliotecario", "id_biblio"),
    ("correo_bibliotecario", "id_correo_biblio"),
    ("telefono_bibliotecario", "id_telefono_biblio"),
    ("horario_bibliotecario", "id_horario_bibliotecario"),
];

const USUARIO_LABEL: &[&str] = &["nom_usuarios", "apell_usuarios"];
const BIBLIO_LABEL: &[&str] = &["nombre_biblio", "apellido_biblio"];

fn fk(table: &str, column: &str, references_table: &str, references_key: &str, label: &[&str]) -> ForeignKeyConfig {
    ForeignKeyConfig {
        table: table.into(),
        column: column.into(),
        references_table: references_table.into(),
        references_key: references_key.into(),
        label_columns: label.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn library_catalogue() -> ConsoleConfig {
    let tables = TABLES
        .iter()
        .map(|(name, pk)| TableConfig {
            name: name.to_string(),
            primary_key: pk.to_string(),
        })
        .collect();

    let mut foreign_keys = vec![
        fk("libros", "id_editorial", "editorial", "id_editorial", &["nom_editorial"]),
        fk("prestamo", "id_usuarios", "usuarios", "id_usuarios", USUARIO_LABEL),
        fk("prestamo", "id_biblio", "bibliotecario", "id_biblio", BIBLIO_LABEL),
    ];
    for table in ["correo_usuario", "direccion_usuario", "documento_usuario", "telefono_usuario"] {
        foreign_keys.push(fk(table, "id_usuario", "usuarios", "id_usuarios", USUARIO_LABEL));
    }
    for table in ["correo_bibliotecario", "telefono_bibliotecario", "horario_bibliotecario"] {
        foreign_keys.push(fk(table, "id_biblio", "bibliotecario", "id_biblio", BIBLIO_LABEL));
    }

    ConsoleConfig { tables, foreign_keys }
}
